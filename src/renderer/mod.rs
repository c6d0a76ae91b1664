//! WebGPU rendering module
//!
//! Draws the simulation snapshot as vector lines, the way the game always
//! looked: a ship outline and small bullet squares on black.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use vertex::Vertex;
