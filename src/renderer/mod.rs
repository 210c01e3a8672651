//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.

pub mod card_pipeline;

pub use card_pipeline::{CardLayout, CardRenderState};
