//! Application state and its flat-file persistence.
//!
//! The persisted record is plain text, newline separated, fixed field
//! order, no versioning: clear-color r/g/b, overlay flag, camera
//! position x/y/z, camera front x/y/z. A missing or unparseable file
//! silently falls back to the compiled-in defaults.

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::camera::{FlyCamera, MoveDirection};
use crate::input::{InputState, Key};
use crate::options::Options;

/// Which flag a toggle key press flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Specular model switched between Blinn-Phong and Phong.
    Blinn,
    /// HDR tonemapping switched on or off.
    Hdr,
    /// Stats overlay shown or hidden; mouse look follows inversely.
    Overlay,
}

/// All mutable program state, created at startup and passed by
/// reference into the input and render routines.
pub struct AppState {
    /// Background clear color.
    pub clear_color: Vec3,
    /// Whether the stats overlay is shown (cursor released, mouse look
    /// suspended).
    pub overlay_enabled: bool,
    /// The free-fly view camera.
    pub camera: FlyCamera,
    /// Whether mouse movement drives the camera. Cleared while the
    /// overlay is up.
    pub mouse_look_enabled: bool,
    /// Position of the ship model in the scene.
    pub ship_position: Vec3,
    /// Uniform scale of the ship model.
    pub ship_scale: f32,
    /// Blinn-Phong (true) vs. Phong (false) specular model.
    pub blinn: bool,
    /// Whether the tonemap pass applies HDR exposure mapping.
    pub hdr_enabled: bool,
}

impl AppState {
    /// Default state, with camera gains and HDR setting taken from the
    /// options file.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let mut camera = FlyCamera::default();
        camera.movement_speed = options.camera.movement_speed;
        camera.mouse_sensitivity = options.camera.mouse_sensitivity;
        camera.znear = options.camera.znear;
        camera.zfar = options.camera.zfar;
        Self {
            clear_color: Vec3::ZERO,
            overlay_enabled: false,
            camera,
            mouse_look_enabled: true,
            ship_position: Vec3::ZERO,
            ship_scale: 1.0,
            blinn: false,
            hdr_enabled: options.post_processing.hdr,
        }
    }

    /// Default state overlaid with whatever the persisted file held.
    #[must_use]
    pub fn load_or_default(path: &Path, options: &Options) -> Self {
        let mut state = Self::new(options);
        match std::fs::read_to_string(path) {
            Ok(content) => {
                if let Some(record) = PersistedState::decode(&content) {
                    state.apply(&record);
                } else {
                    log::warn!(
                        "state file {} is unparseable, using defaults",
                        path.display()
                    );
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("could not read state file {}: {e}", path.display());
            }
        }
        state
    }

    /// Flip the flag a toggle key controls. Callers invoke this only
    /// on a fresh press edge ([`InputState::press_edge`]), so each
    /// physical press flips exactly once. Movement keys return `None`.
    pub fn apply_toggle(&mut self, key: Key) -> Option<ToggleAction> {
        match key {
            Key::ToggleBlinn => {
                self.blinn = !self.blinn;
                Some(ToggleAction::Blinn)
            }
            Key::ToggleHdr => {
                self.hdr_enabled = !self.hdr_enabled;
                Some(ToggleAction::Hdr)
            }
            Key::ToggleOverlay => {
                self.overlay_enabled = !self.overlay_enabled;
                self.mouse_look_enabled = !self.overlay_enabled;
                Some(ToggleAction::Overlay)
            }
            _ => None,
        }
    }

    /// Advance the camera from this frame's input sample.
    ///
    /// While the overlay is up only mouse-driven rotation is
    /// suspended; held movement keys and the scroll zoom stay live.
    pub fn apply_input(&mut self, input: &mut InputState, dt: f32) {
        let mouse = input.take_mouse_delta();
        let scroll = input.take_scroll_delta();

        if self.mouse_look_enabled && mouse != Vec2::ZERO {
            self.camera.process_mouse_move(mouse.x, mouse.y);
        }
        if scroll != 0.0 {
            self.camera.process_scroll(scroll);
        }

        if input.is_held(Key::Forward) {
            self.camera.process_keyboard(MoveDirection::Forward, dt);
        }
        if input.is_held(Key::Backward) {
            self.camera.process_keyboard(MoveDirection::Backward, dt);
        }
        if input.is_held(Key::Left) {
            self.camera.process_keyboard(MoveDirection::Left, dt);
        }
        if input.is_held(Key::Right) {
            self.camera.process_keyboard(MoveDirection::Right, dt);
        }
    }

    /// Write the persisted record for this state.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.record().encode())
    }

    /// Snapshot the persisted fields.
    #[must_use]
    pub fn record(&self) -> PersistedState {
        PersistedState {
            clear_color: self.clear_color,
            overlay_enabled: self.overlay_enabled,
            position: self.camera.position,
            front: self.camera.front(),
        }
    }

    fn apply(&mut self, record: &PersistedState) {
        self.clear_color = record.clear_color;
        self.overlay_enabled = record.overlay_enabled;
        self.mouse_look_enabled = !record.overlay_enabled;
        self.camera.position = record.position;
        // The file stores the derived front vector, not yaw/pitch.
        // Re-derive the angles so mouse rotation continues from the
        // loaded facing direction instead of the default one.
        self.camera.set_facing(record.front);
    }
}

/// The on-disk record. Field order matches the wire format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedState {
    pub clear_color: Vec3,
    pub overlay_enabled: bool,
    pub position: Vec3,
    pub front: Vec3,
}

impl PersistedState {
    /// Serialize to the newline-separated text format. Rust's `{}`
    /// float formatting is shortest-round-trip, so decode restores the
    /// exact bits.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for v in [
            self.clear_color.x,
            self.clear_color.y,
            self.clear_color.z,
        ] {
            out.push_str(&format!("{v}\n"));
        }
        out.push_str(if self.overlay_enabled { "1\n" } else { "0\n" });
        for v in [
            self.position.x,
            self.position.y,
            self.position.z,
            self.front.x,
            self.front.y,
            self.front.z,
        ] {
            out.push_str(&format!("{v}\n"));
        }
        out
    }

    /// Parse the text format. Returns `None` on any malformed field;
    /// the caller falls back to defaults.
    #[must_use]
    pub fn decode(content: &str) -> Option<Self> {
        let mut fields = content.split_whitespace();
        let mut next_f32 = || fields.next()?.parse::<f32>().ok();
        let r = next_f32()?;
        let g = next_f32()?;
        let b = next_f32()?;
        let overlay_enabled = next_f32()? != 0.0;
        let px = next_f32()?;
        let py = next_f32()?;
        let pz = next_f32()?;
        let fx = next_f32()?;
        let fy = next_f32()?;
        let fz = next_f32()?;
        Some(Self {
            clear_color: Vec3::new(r, g, b),
            overlay_enabled,
            position: Vec3::new(px, py, pz),
            front: Vec3::new(fx, fy, fz),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_exactly() {
        let record = PersistedState {
            clear_color: Vec3::new(0.05, 0.125, 0.3333333),
            overlay_enabled: true,
            position: Vec3::new(1.5, -2.25, 10.0 / 3.0),
            front: Vec3::new(0.0, 0.0, -1.0),
        };
        let decoded = PersistedState::decode(&record.encode()).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn decode_rejects_truncated_input() {
        assert!(PersistedState::decode("0.1\n0.2\n0.3\n1\n").is_none());
        assert!(PersistedState::decode("").is_none());
    }

    #[test]
    fn decode_rejects_non_numeric_fields() {
        let content = "0.1\n0.2\nnope\n1\n0\n0\n3\n0\n0\n-1\n";
        assert!(PersistedState::decode(content).is_none());
    }

    #[test]
    fn load_missing_file_keeps_defaults() {
        let options = Options::default();
        let state = AppState::load_or_default(
            Path::new("definitely/not/a/real/state/file.txt"),
            &options,
        );
        assert_eq!(state.clear_color, Vec3::ZERO);
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert!(!state.overlay_enabled);
        assert!(state.mouse_look_enabled);
    }

    #[test]
    fn loaded_front_rederives_camera_angles() {
        let options = Options::default();
        let mut state = AppState::new(&options);
        let record = PersistedState {
            clear_color: Vec3::new(0.1, 0.2, 0.3),
            overlay_enabled: false,
            position: Vec3::new(5.0, 1.0, -2.0),
            front: Vec3::new(0.0, 0.70710677, -0.70710677),
        };
        state.apply(&record);
        assert_eq!(state.camera.position, record.position);
        assert!((state.camera.front() - record.front).length() < 1e-4);
        assert!((state.camera.pitch() - 45.0).abs() < 1e-2);
    }

    #[test]
    fn toggle_flips_flags_on_press_edge() {
        let options = Options::default();
        let mut state = AppState::new(&options);
        assert!(!state.blinn);
        assert_eq!(state.apply_toggle(Key::ToggleBlinn), Some(ToggleAction::Blinn));
        assert!(state.blinn);

        assert_eq!(state.apply_toggle(Key::Forward), None);

        assert_eq!(
            state.apply_toggle(Key::ToggleOverlay),
            Some(ToggleAction::Overlay)
        );
        assert!(state.overlay_enabled);
        assert!(!state.mouse_look_enabled);
        assert_eq!(
            state.apply_toggle(Key::ToggleOverlay),
            Some(ToggleAction::Overlay)
        );
        assert!(!state.overlay_enabled);
        assert!(state.mouse_look_enabled);
    }

    #[test]
    fn toggle_fires_once_per_press() {
        let options = Options::default();
        let mut input = InputState::new();
        let mut state = AppState::new(&options);
        assert!(state.hdr_enabled);

        // One physical press, delivered with two key-repeat samples.
        for _ in 0..3 {
            if input.press_edge(Key::ToggleHdr, true) {
                let _ = state.apply_toggle(Key::ToggleHdr);
            }
        }
        assert!(!state.hdr_enabled);

        let _ = input.press_edge(Key::ToggleHdr, false);
        if input.press_edge(Key::ToggleHdr, true) {
            let _ = state.apply_toggle(Key::ToggleHdr);
        }
        assert!(state.hdr_enabled);
    }

    #[test]
    fn movement_and_zoom_stay_live_while_overlay_is_up() {
        let options = Options::default();
        let mut input = InputState::new();
        let mut state = AppState::new(&options);
        let _ = state.apply_toggle(Key::ToggleOverlay);
        assert!(!state.mouse_look_enabled);

        input.handle_event(crate::input::InputEvent::Key {
            key: Key::Forward,
            pressed: true,
        });
        input.handle_event(crate::input::InputEvent::Scroll { delta: 2.0 });
        input.handle_event(crate::input::InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        input.handle_event(crate::input::InputEvent::CursorMoved { x: 50.0, y: 0.0 });

        let yaw = state.camera.yaw();
        let start = state.camera.position;
        state.apply_input(&mut input, 0.5);

        // W and the scroll wheel keep working with the overlay open.
        let moved = state.camera.position - start;
        assert!((moved.length() - 2.5 * 0.5).abs() < 1e-5);
        assert!((state.camera.zoom() - 43.0).abs() < 1e-5);
        // Mouse rotation is the only thing suspended.
        assert_eq!(state.camera.yaw(), yaw);
    }

    #[test]
    fn save_then_load_preserves_pose() {
        let options = Options::default();
        let mut state = AppState::new(&options);
        state.clear_color = Vec3::new(0.2, 0.0, 0.4);
        state.camera.position = Vec3::new(-3.0, 1.5, 7.0);
        state.camera.process_mouse_move(120.0, -45.0);

        let path = std::env::temp_dir().join("starview_state_test.txt");
        state.save(&path).unwrap();
        let loaded = AppState::load_or_default(&path, &options);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.clear_color, state.clear_color);
        assert_eq!(loaded.camera.position, state.camera.position);
        assert!((loaded.camera.front() - state.camera.front()).length() < 1e-4);
    }
}
