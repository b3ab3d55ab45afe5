use glam::{Mat4, Vec3};

/// Default yaw looks down the negative Z axis.
const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is kept strictly inside ±90°; the basis recomputation is
/// singular at the poles.
const PITCH_LIMIT: f32 = 89.0;
/// Field-of-view bounds. The lower bound keeps the perspective
/// projection away from a degenerate 0° frustum.
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

/// Discrete movement directions driven by the held-key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-fly first-person camera.
///
/// Orientation is stored as yaw/pitch angles in degrees; the
/// `front`/`right`/`up` basis is re-derived from them on every mutation
/// and always forms a right-handed orthonormal frame. `zoom` is the
/// vertical field of view in degrees, clamped to [`ZOOM_MIN`,
/// `ZOOM_MAX`].
pub struct FlyCamera {
    /// Eye position in world space.
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    /// Traversal speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse delta.
    pub mouse_sensitivity: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

impl FlyCamera {
    /// Create a camera at `position` with the default orientation
    /// (looking down negative Z).
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            zoom: DEFAULT_ZOOM,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            znear: 0.1,
            zfar: 100.0,
        };
        camera.update_basis();
        camera
    }

    /// Unit vector the camera is looking along.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Camera-space up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Camera-space right vector.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw angle in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch angle in degrees, always within ±[`PITCH_LIMIT`].
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Displace the camera along its basis for one frame.
    ///
    /// Displacement is `movement_speed * dt`, so average traversal speed
    /// over wall-clock time is independent of frame rate.
    pub fn process_keyboard(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse delta in pixels.
    ///
    /// The caller is expected to pre-invert the vertical delta (screen Y
    /// grows downward, pitch grows looking up). Pitch is clamped before
    /// the basis is recomputed.
    pub fn process_mouse_move(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Apply a scroll delta as a field-of-view change (zoom lens effect).
    pub fn process_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Point the camera along `front`, re-deriving yaw/pitch so that
    /// subsequent mouse rotation continues from this facing direction.
    ///
    /// Used when restoring a persisted pose, which stores the front
    /// vector rather than the angles. A zero/non-finite vector leaves
    /// the orientation unchanged.
    pub fn set_facing(&mut self, front: Vec3) {
        if !front.is_finite() || front.length_squared() < 1e-12 {
            return;
        }
        let dir = front.normalize();
        self.pitch = dir.y.asin().to_degrees().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.update_basis();
    }

    /// World-to-camera transform. Pure function of current state.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection from the current zoom and the given aspect
    /// ratio. Uses [0,1] depth range (wgpu convention).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, self.znear, self.zfar)
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(
            pitch_cos * yaw_cos,
            pitch_sin,
            pitch_cos * yaw_sin,
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(camera: &FlyCamera) {
        assert!((camera.front().length() - 1.0).abs() < EPS);
        assert!((camera.right().length() - 1.0).abs() < EPS);
        assert!((camera.up().length() - 1.0).abs() < EPS);
        assert!(camera.front().dot(camera.right()).abs() < EPS);
        assert!(camera.front().dot(camera.up()).abs() < EPS);
        assert!(camera.right().dot(camera.up()).abs() < EPS);
        // Right-handed: right x up points opposite front.
        let cross = camera.right().cross(camera.up());
        assert!((cross + camera.front()).length() < 1e-4);
    }

    #[test]
    fn basis_stays_orthonormal_across_orientations() {
        let mut camera = FlyCamera::default();
        for yaw_step in 0..24 {
            for pitch_step in -8..=8 {
                camera.yaw = yaw_step as f32 * 15.0;
                camera.pitch = pitch_step as f32 * 10.0;
                camera.update_basis();
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn pitch_never_leaves_clamp_bound() {
        let mut camera = FlyCamera::default();
        for _ in 0..1000 {
            camera.process_mouse_move(3.0, 500.0);
            assert!(camera.pitch() <= 89.0);
            assert_orthonormal(&camera);
        }
        for _ in 0..1000 {
            camera.process_mouse_move(-7.0, -500.0);
            assert!(camera.pitch() >= -89.0);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn zoom_pins_at_lower_bound() {
        let mut camera = FlyCamera::default();
        assert!((camera.zoom() - 45.0).abs() < EPS);
        while camera.zoom() > 1.0 {
            camera.process_scroll(10.0);
        }
        assert!((camera.zoom() - 1.0).abs() < EPS);
        for _ in 0..100 {
            camera.process_scroll(10.0);
        }
        assert!((camera.zoom() - 1.0).abs() < EPS);
    }

    #[test]
    fn zoom_pins_at_upper_bound() {
        let mut camera = FlyCamera::default();
        for _ in 0..100 {
            camera.process_scroll(-10.0);
        }
        assert!((camera.zoom() - 45.0).abs() < EPS);
    }

    #[test]
    fn displacement_scales_linearly_with_dt() {
        let mut a = FlyCamera::default();
        let mut b = FlyCamera::default();
        a.process_keyboard(MoveDirection::Forward, 0.016);
        b.process_keyboard(MoveDirection::Forward, 0.032);
        let da = (a.position - Vec3::new(0.0, 0.0, 3.0)).length();
        let db = (b.position - Vec3::new(0.0, 0.0, 3.0)).length();
        assert!((db - 2.0 * da).abs() < EPS);
    }

    #[test]
    fn strafing_moves_along_right_axis() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(MoveDirection::Right, 1.0);
        let moved = camera.position - Vec3::new(0.0, 0.0, 3.0);
        assert!((moved.normalize() - camera.right()).length() < EPS);
    }

    #[test]
    fn zero_mouse_delta_is_a_no_op() {
        let mut camera = FlyCamera::default();
        let yaw = camera.yaw();
        let pitch = camera.pitch();
        let view = camera.view_matrix();
        camera.process_mouse_move(0.0, 0.0);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);
        assert_eq!(camera.view_matrix(), view);
    }

    #[test]
    fn default_faces_negative_z() {
        let camera = FlyCamera::default();
        assert!((camera.front() - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn set_facing_rederives_consistent_angles() {
        let mut camera = FlyCamera::default();
        let target = Vec3::new(0.3, 0.5, -0.8).normalize();
        camera.set_facing(target);
        assert!((camera.front() - target).length() < 1e-4);
        assert_orthonormal(&camera);

        // Straight down negative Z is the default orientation.
        camera.set_facing(Vec3::NEG_Z);
        assert!((camera.yaw() - -90.0).abs() < 1e-3);
        assert!(camera.pitch().abs() < 1e-3);
    }

    #[test]
    fn set_facing_ignores_degenerate_input() {
        let mut camera = FlyCamera::default();
        let front = camera.front();
        camera.set_facing(Vec3::ZERO);
        camera.set_facing(Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn view_matrix_maps_look_target_to_view_axis() {
        let camera = FlyCamera::new(Vec3::new(1.0, 2.0, 3.0));
        let view = camera.view_matrix();
        // The eye maps to the view-space origin.
        let eye = view.transform_point3(camera.position);
        assert!(eye.length() < EPS);
        // A point one unit along front maps to -Z in view space.
        let ahead = view.transform_point3(camera.position + camera.front());
        assert!((ahead - Vec3::NEG_Z).length() < EPS);
    }
}
