use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::geometry::{Primitive, SphereSpec};

/// Orbit excursion of the animated light around its base position.
pub const ORBIT_AMPLITUDE: f32 = 2.0;
/// Orbit angular rate in radians per second.
pub const ORBIT_RATE: f32 = 0.5;
/// Accumulated pitch limit in degrees, shared by the mouse-drag
/// orientation and the keyboard look operators.
pub const PITCH_LIMIT: f32 = 90.0;

/// Texture units referenced by the fixed scene.
pub const TEXTURE_UNIT_SKY: u32 = 1;
pub const TEXTURE_UNIT_GROUND: u32 = 2;

/// Per-drawable choice between a flat color, the interpolated UV shown
/// as a color, and a sampled texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    Flat(Vec4),
    UvDebug,
    Texture(u32),
}

impl Material {
    /// Integer selector pushed to the shader: -2 flat, -1 UV, >= 0 unit.
    pub fn selector(self) -> i32 {
        match self {
            Material::Flat(_) => -2,
            Material::UvDebug => -1,
            Material::Texture(unit) => unit as i32,
        }
    }

    /// Flat base color, white for the texture-driven variants.
    pub fn base_color(self) -> Vec4 {
        match self {
            Material::Flat(color) => color,
            _ => Vec4::ONE,
        }
    }
}

/// One scene object instance, rebuilt for every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub primitive: Primitive,
    pub model: Mat4,
    pub material: Material,
}

/// Mutable lighting record: point light, spotlight and display toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    /// Slider-owned anchor the orbit animation moves around.
    pub base_position: Vec3,
    /// Effective light position for the current frame.
    pub position: Vec3,
    pub color: Vec3,
    pub spot_direction: Vec3,
    /// Cosine threshold of the spotlight cone.
    pub spot_cutoff: f32,
    pub light_on: bool,
    pub tint_on: bool,
    pub spot_on: bool,
    pub normal_debug: bool,
    pub animate: bool,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            base_position: Vec3::splat(2.0),
            position: Vec3::splat(2.0),
            color: Vec3::ONE,
            spot_direction: Vec3::new(0.0, -1.0, 0.0),
            spot_cutoff: 0.7,
            light_on: true,
            tint_on: true,
            spot_on: false,
            normal_debug: false,
            animate: false,
        }
    }
}

impl LightState {
    /// Light position for the given elapsed time since process start.
    ///
    /// Y and Z orbit the base sinusoidally; X tracks the base directly.
    /// Deterministic: the same elapsed time always yields the same
    /// position.
    pub fn position_at(&self, elapsed_secs: f32) -> Vec3 {
        if !self.animate {
            return self.base_position;
        }
        let angle = elapsed_secs * ORBIT_RATE;
        self.base_position
            + Vec3::new(
                0.0,
                ORBIT_AMPLITUDE * angle.sin(),
                ORBIT_AMPLITUDE * angle.cos(),
            )
    }

    /// Advances the animation, updating the effective position.
    pub fn advance(&mut self, elapsed_secs: f32) {
        self.position = self.position_at(elapsed_secs);
    }

    /// Slider contract: overwrite one component of the base position.
    pub fn set_base_component(&mut self, component: usize, value: f32) {
        self.base_position[component] = value;
    }

    /// Slider contract: overwrite one component of the light color.
    pub fn set_color_component(&mut self, component: usize, value: f32) {
        self.color[component] = value;
    }
}

/// The explicit per-process render state: camera, lighting and the
/// global orientation accumulators, passed by reference into per-frame
/// code instead of living in globals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneState {
    pub camera: Camera,
    pub light: LightState,
    /// Whole-scene orientation in degrees, applied X then Y then Z.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    pitch: f32,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the light animation for the elapsed time.
    pub fn tick(&mut self, elapsed_secs: f32) {
        self.light.advance(elapsed_secs);
    }

    /// Whole-scene orientation matrix.
    pub fn global_rotation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rot_x.to_radians())
            * Mat4::from_rotation_y(self.rot_y.to_radians())
            * Mat4::from_rotation_z(self.rot_z.to_radians())
    }

    /// Adds mouse-drag deltas (degrees) to the orientation accumulators,
    /// clamping pitch so the scene cannot flip past vertical.
    pub fn rotate_view(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rot_y += yaw_delta;
        self.rot_x = (self.rot_x + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Pitch-clamped wrapper around [`Camera::look_up`]: the accumulated
    /// look pitch never leaves [-90, 90] degrees.
    pub fn look_up(&mut self, angle: f32) {
        let delta = (self.pitch + angle).clamp(-PITCH_LIMIT, PITCH_LIMIT) - self.pitch;
        if delta != 0.0 {
            self.camera.look_up(delta);
            self.pitch += delta;
        }
    }

    pub fn look_down(&mut self, angle: f32) {
        self.look_up(-angle);
    }

    /// Accumulated look pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// Sphere tessellation used by the scene's ball.
const BALL_SPHERE: SphereSpec = SphereSpec {
    radius: 1.0,
    lat_segments: 20,
    long_segments: 20,
};

/// The fixed scene list, re-derived from constants every frame: a ground
/// slab, a sky enclosure, the ball, and a small marker cube at the
/// current light position.
pub fn frame_drawables(light_position: Vec3) -> Vec<Drawable> {
    vec![
        Drawable {
            primitive: Primitive::Box,
            model: Mat4::from_translation(Vec3::new(-4.0, -0.75, -4.0))
                * Mat4::from_scale(Vec3::new(32.0, 0.01, 32.0)),
            material: Material::Texture(TEXTURE_UNIT_GROUND),
        },
        Drawable {
            primitive: Primitive::Box,
            model: Mat4::from_translation(Vec3::new(-1.0, 0.0, -1.0))
                * Mat4::from_scale(Vec3::splat(100.0))
                * Mat4::from_translation(Vec3::splat(-0.5)),
            material: Material::Texture(TEXTURE_UNIT_SKY),
        },
        Drawable {
            primitive: Primitive::Sphere(BALL_SPHERE),
            model: Mat4::from_translation(Vec3::new(0.0, -0.25, 0.0))
                * Mat4::from_scale(Vec3::splat(0.5)),
            material: Material::Flat(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        },
        Drawable {
            primitive: Primitive::Box,
            model: Mat4::from_translation(light_position) * Mat4::from_scale(Vec3::splat(0.1)),
            material: Material::Flat(Vec4::new(1.0, 1.0, 0.0, 1.0)),
        },
    ]
}
