//! GPU rendering subsystem.
//!
//! One fixed pipeline draws one triangle. Per frame the model/view/projection
//! matrices are written to a uniform buffer read by the vertex shader.
//!
//! Convention:
//! - uniform layout is `[model, view, projection]`, 64 bytes each, column-major
//! - the WGSL `Transforms` struct mirrors that order

mod frame;
mod mesh;
mod pass;
mod pipeline;
mod uniform;

pub use frame::{FrameBackend, FrameOutcome, FramePhase, FrameRenderer, FrameState};
pub use mesh::{MeshSource, TriangleMesh, Vertex, TRIANGLE_VERTICES};
pub use pass::{record_triangle_pass, TriangleDraw};
pub use pipeline::{check_shader_contract, PipelineShape, TrianglePipeline, SHADER_SOURCE};
pub use uniform::{
    MatrixSlot, UniformBlock, UniformBuffer, MATRIX_SIZE, UNIFORM_BLOCK_SIZE,
};
