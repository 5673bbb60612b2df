use glam::{Mat3, Mat4, Vec3};

/// Near/far planes of the fixed perspective frustum.
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 150.0;

/// Free-flying camera defined by eye, look-at target and up vector.
///
/// Every movement and orientation operator mutates the basis and
/// recomputes the view matrix before returning. Callers must keep the
/// basis non-degenerate: an eye equal to the target, or an up vector
/// parallel to the viewing direction, is a precondition violation and is
/// not guarded here.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 2.0, 5.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::Y,
            90.0,
        )
    }
}

impl Camera {
    /// Per-call travel distance used by the key bindings.
    pub const DEFAULT_SPEED: f32 = 0.2;
    /// Per-call rotation in degrees used by the key bindings.
    pub const DEFAULT_ANGLE: f32 = 5.0;

    pub fn new(eye: Vec3, at: Vec3, up: Vec3, fov: f32) -> Self {
        let mut camera = Self {
            eye,
            at,
            up,
            fov,
            view: Mat4::IDENTITY,
        };
        camera.update_view();
        camera
    }

    /// World-to-camera transform for the current basis.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Perspective projection for the given viewport aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect.max(0.01), NEAR_PLANE, FAR_PLANE)
    }

    /// Translates eye and target along the viewing direction.
    pub fn move_forward(&mut self, speed: f32) {
        let step = (self.at - self.eye).normalize() * speed;
        self.eye += step;
        self.at += step;
        self.update_view();
    }

    pub fn move_backward(&mut self, speed: f32) {
        let step = (self.eye - self.at).normalize() * speed;
        self.eye += step;
        self.at += step;
        self.update_view();
    }

    /// Strafes perpendicular to both the viewing direction and up.
    pub fn move_left(&mut self, speed: f32) {
        let forward = (self.at - self.eye).normalize();
        let step = self.up.cross(forward).normalize() * speed;
        self.eye += step;
        self.at += step;
        self.update_view();
    }

    pub fn move_right(&mut self, speed: f32) {
        let forward = (self.at - self.eye).normalize();
        let step = forward.cross(self.up).normalize() * speed;
        self.eye += step;
        self.at += step;
        self.update_view();
    }

    /// Rotates the viewing direction about the up axis; up is unchanged.
    pub fn pan_left(&mut self, angle: f32) {
        let forward = self.at - self.eye;
        let rotation = Mat3::from_axis_angle(self.up.normalize(), angle.to_radians());
        self.at = self.eye + rotation * forward;
        self.update_view();
    }

    pub fn pan_right(&mut self, angle: f32) {
        self.pan_left(-angle);
    }

    /// Rotates the viewing direction and up about the right axis,
    /// keeping the basis orthonormal.
    ///
    /// The accumulated pitch clamp lives with the caller (see
    /// [`crate::scene::SceneState`]), not here.
    pub fn look_up(&mut self, angle: f32) {
        let forward = self.at - self.eye;
        let right = forward.cross(self.up).normalize();
        let rotation = Mat3::from_axis_angle(right, angle.to_radians());
        self.at = self.eye + rotation * forward;
        self.up = rotation * self.up;
        self.update_view();
    }

    pub fn look_down(&mut self, angle: f32) {
        self.look_up(-angle);
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.at, self.up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn forward_then_backward_returns_to_the_start() {
        let mut camera = Camera::default();
        camera.move_forward(0.2);
        camera.move_backward(0.2);
        assert!(close(camera.eye, Vec3::new(0.0, 2.0, 5.0)));
        assert!(close(camera.at, Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn strafe_preserves_the_viewing_direction() {
        let mut camera = Camera::default();
        let before = camera.at - camera.eye;
        camera.move_left(0.4);
        assert!(close(camera.at - camera.eye, before));
        camera.move_right(0.4);
        assert!(close(camera.eye, Vec3::new(0.0, 2.0, 5.0)));
    }

    #[test]
    fn pan_left_then_right_restores_the_target() {
        let mut camera = Camera::default();
        for angle in [5.0, 17.5, 90.0] {
            camera.pan_left(angle);
            camera.pan_right(angle);
            assert!(close(camera.at, Vec3::new(0.0, 2.0, 0.0)), "angle {angle}");
        }
    }

    #[test]
    fn pan_moves_the_target_but_not_the_eye() {
        let mut camera = Camera::default();
        camera.pan_left(30.0);
        assert!(close(camera.eye, Vec3::new(0.0, 2.0, 5.0)));
        assert!(!close(camera.at, Vec3::new(0.0, 2.0, 0.0)));
        // Rotation about up preserves distance to the target.
        assert!(((camera.at - camera.eye).length() - 5.0).abs() < EPS);
    }

    #[test]
    fn look_up_keeps_the_basis_orthonormal() {
        let mut camera = Camera::default();
        camera.look_up(40.0);
        let forward = (camera.at - camera.eye).normalize();
        assert!((camera.up.length() - 1.0).abs() < EPS);
        assert!(forward.dot(camera.up).abs() < EPS);
        camera.look_down(40.0);
        assert!(close(camera.up, Vec3::Y));
        assert!(close(camera.at, Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn view_matrix_tracks_the_basis() {
        let mut camera = Camera::default();
        let before = camera.view_matrix();
        camera.move_forward(1.0);
        assert_ne!(before, camera.view_matrix());
        assert_eq!(
            camera.view_matrix(),
            Mat4::look_at_rh(camera.eye, camera.at, camera.up)
        );
    }
}
