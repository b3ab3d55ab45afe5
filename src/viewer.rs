//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use starview::Viewer;
//! Viewer::builder()
//!     .with_title("Starview")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    engine::SceneEngine,
    error::StarviewError,
    input::{InputEvent, Key},
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            title: "Starview".into(),
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer { title: self.title }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    pub fn run(self) -> Result<(), StarviewError> {
        let event_loop =
            EventLoop::new().map_err(|e| StarviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| StarviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    last_frame_time: Instant,
    title: String,
}

impl ViewerApp {
    /// Capture or release the cursor to match the overlay state.
    /// Mouse-look wants a hidden, grabbed cursor; the overlay wants it
    /// back.
    fn apply_cursor_mode(window: &Window, overlay_enabled: bool) {
        if overlay_enabled {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("could not release cursor: {e}");
            }
            window.set_cursor_visible(true);
        } else {
            // Locked is not available on every platform.
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                    log::warn!("could not grab cursor: {e}");
                }
            }
            window.set_cursor_visible(false);
        }
    }

    /// Save state and shut the event loop down.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.save_state();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(logical_w, logical_h))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        Self::apply_cursor_mode(&window, engine.state.overlay_enabled);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.shutdown(event_loop);
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(event_size.width.max(1), event_size.height.max(1));
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let Some(engine) = &mut self.engine {
                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                engine.resize(inner.width.max(1), inner.height.max(1));
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {:?}", e);
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    let _ = engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
            }

            WindowEvent::Focused(focused) => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::FocusChanged { focused });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::{KeyCode, PhysicalKey};
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    self.shutdown(event_loop);
                    return;
                }
                // OS key repeats would re-fire the toggle keys.
                if event.repeat {
                    return;
                }
                let Some(key) = Key::from_key_code(code) else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                let mut overlay_toggled = false;
                if let Some(engine) = &mut self.engine {
                    overlay_toggled = engine.handle_input(InputEvent::Key { key, pressed });
                }
                if overlay_toggled {
                    if let (Some(window), Some(engine)) = (&self.window, &self.engine) {
                        Self::apply_cursor_mode(window, engine.state.overlay_enabled);
                    }
                }
            }

            _ => (),
        }
    }
}
