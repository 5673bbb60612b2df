use glam::Vec2;

use crate::camera::Camera;
use crate::scene::SceneState;

/// Pixel-to-degree factor for mouse-drag orientation.
pub const DRAG_FACTOR: f32 = 0.3;

/// Step applied to one light-position component per nudge key press.
pub const LIGHT_NUDGE: f32 = 0.25;

/// Camera and lighting actions reachable from the keyboard.
///
/// The window layer maps physical keys to these; everything below that
/// mapping is testable without a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    PanLeft,
    PanRight,
    LookUp,
    LookDown,
    ToggleLight,
    ToggleTint,
    ToggleSpot,
    ToggleAnimation,
    ToggleNormals,
    /// Slider stand-in: shift one component of the light base position.
    NudgeLight { component: usize, delta: f32 },
}

/// Applies one action to the scene state.
pub fn apply_action(action: Action, state: &mut SceneState) {
    match action {
        Action::MoveForward => state.camera.move_forward(Camera::DEFAULT_SPEED),
        Action::MoveBackward => state.camera.move_backward(Camera::DEFAULT_SPEED),
        Action::MoveLeft => state.camera.move_left(Camera::DEFAULT_SPEED),
        Action::MoveRight => state.camera.move_right(Camera::DEFAULT_SPEED),
        Action::PanLeft => state.camera.pan_left(Camera::DEFAULT_ANGLE),
        Action::PanRight => state.camera.pan_right(Camera::DEFAULT_ANGLE),
        Action::LookUp => state.look_up(Camera::DEFAULT_ANGLE),
        Action::LookDown => state.look_down(Camera::DEFAULT_ANGLE),
        Action::ToggleLight => state.light.light_on = !state.light.light_on,
        Action::ToggleTint => state.light.tint_on = !state.light.tint_on,
        Action::ToggleSpot => state.light.spot_on = !state.light.spot_on,
        Action::ToggleAnimation => state.light.animate = !state.light.animate,
        Action::ToggleNormals => state.light.normal_debug = !state.light.normal_debug,
        Action::NudgeLight { component, delta } => {
            let base = state.light.base_position[component] + delta;
            state.light.set_base_component(component, base);
        }
    }
}

/// Tracks an active mouse drag and feeds scaled pixel deltas into the
/// orientation accumulators.
#[derive(Debug, Default)]
pub struct DragState {
    active: bool,
    last: Vec2,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, position: Vec2) {
        self.active = true;
        self.last = position;
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cursor moved; rotates the scene when a drag is in progress.
    pub fn move_to(&mut self, position: Vec2, state: &mut SceneState) {
        if !self.active {
            return;
        }
        let delta = position - self.last;
        state.rotate_view(-DRAG_FACTOR * delta.x, -DRAG_FACTOR * delta.y);
        self.last = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn movement_actions_drive_the_camera() {
        let mut state = SceneState::new();
        apply_action(Action::MoveForward, &mut state);
        assert!((state.camera.eye - Vec3::new(0.0, 2.0, 4.8)).length() < 1e-5);
        apply_action(Action::MoveBackward, &mut state);
        assert!((state.camera.eye - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn toggles_flip_their_flag() {
        let mut state = SceneState::new();
        apply_action(Action::ToggleSpot, &mut state);
        assert!(state.light.spot_on);
        apply_action(Action::ToggleSpot, &mut state);
        assert!(!state.light.spot_on);
        apply_action(Action::ToggleNormals, &mut state);
        assert!(state.light.normal_debug);
    }

    #[test]
    fn nudges_move_one_component_of_the_light_base() {
        let mut state = SceneState::new();
        apply_action(
            Action::NudgeLight {
                component: 2,
                delta: -LIGHT_NUDGE,
            },
            &mut state,
        );
        assert_eq!(state.light.base_position, Vec3::new(2.0, 2.0, 1.75));
    }

    #[test]
    fn drag_scales_pixel_deltas_into_degrees() {
        let mut state = SceneState::new();
        let mut drag = DragState::new();
        drag.move_to(Vec2::new(50.0, 50.0), &mut state);
        assert_eq!(state.rot_y, 0.0); // no drag in progress

        drag.begin(Vec2::new(10.0, 10.0));
        drag.move_to(Vec2::new(20.0, 30.0), &mut state);
        assert!((state.rot_y + DRAG_FACTOR * 10.0).abs() < 1e-5);
        assert!((state.rot_x + DRAG_FACTOR * 20.0).abs() < 1e-5);

        drag.end();
        drag.move_to(Vec2::new(100.0, 100.0), &mut state);
        assert!((state.rot_y + DRAG_FACTOR * 10.0).abs() < 1e-5);
    }
}
