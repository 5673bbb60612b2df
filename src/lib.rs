//! Core modules for the glimmer scene walkthrough.
//!
//! The crate separates the math that defines the scene (primitive mesh
//! generation, the free-flying camera, lighting state and the per-pixel
//! illumination contract) from the wgpu backend that draws it, so the
//! interesting parts stay testable without a window or GPU.

pub mod app;
pub mod camera;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;
pub mod shading;
pub mod texture;

pub use camera::Camera;
pub use geometry::{build_mesh, Mesh, MeshCache, Primitive, SphereSpec, Topology};
pub use input::{Action, DragState};
pub use render::{GlobalParams, Renderer};
pub use scene::{frame_drawables, Drawable, LightState, Material, SceneState};
pub use texture::{TextureLoader, TEXTURE_FILES};
