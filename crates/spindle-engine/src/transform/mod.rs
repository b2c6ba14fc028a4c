//! Transform math for the triangle: a fixed camera and a spinning model matrix.
//!
//! All matrices are `glam::Mat4`, column-major, matching WGSL `mat4x4<f32>`.
//! Clip space follows wgpu: right-handed view, depth in `[0, 1]`.

mod camera;
mod model;

pub use camera::Camera;
pub use model::model_at;
