/// Platform-agnostic input events.
///
/// The viewer translates winit window events into these before handing
/// them to the engine, so the core never sees winit types and tests can
/// construct events directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute screen position, in physical pixels.
    CursorMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position (screen Y grows downward).
        y: f32,
    },
    /// Scroll wheel delta (positive = wheel up).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// A bound key was pressed or released. Key repeats are filtered
    /// out by the viewer, so `pressed: true` is a clean edge.
    Key {
        /// Which binding changed.
        key: Key,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Window focus changed. Losing or regaining focus resets the
    /// cursor baseline so the next sample does not register as a jump.
    FocusChanged {
        /// Whether the window now has focus.
        focused: bool,
    },
}

/// Keys the viewer cares about, already resolved from physical key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// W — move along the camera front vector.
    Forward,
    /// S — move against the camera front vector.
    Backward,
    /// A — strafe left.
    Left,
    /// D — strafe right.
    Right,
    /// B — switch between Blinn-Phong and Phong shading.
    ToggleBlinn,
    /// F1 — toggle the stats overlay and release the cursor.
    ToggleOverlay,
    /// H — toggle HDR tonemapping.
    ToggleHdr,
}

impl Key {
    /// Map a winit physical key code to a binding, if one exists.
    #[must_use]
    pub fn from_key_code(code: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode;
        match code {
            KeyCode::KeyW => Some(Self::Forward),
            KeyCode::KeyS => Some(Self::Backward),
            KeyCode::KeyA => Some(Self::Left),
            KeyCode::KeyD => Some(Self::Right),
            KeyCode::KeyB => Some(Self::ToggleBlinn),
            KeyCode::F1 => Some(Self::ToggleOverlay),
            KeyCode::KeyH => Some(Self::ToggleHdr),
            _ => None,
        }
    }
}
