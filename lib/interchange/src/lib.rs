//! Read-only model of a parsed scene-interchange mesh.
//!
//! The types here mirror what an interchange loader hands over after parsing: flat value streams
//! partitioned into declared sources, and primitives that index into those streams. Nothing in
//! this crate knows about the host mesh types; see `facetport` for the conversion itself.
//!
//! # Notes
//!
//! * Attribute streams are *per-corner indexed*: every primitive carries its own index array for
//!   positions, normals, and each UV/color set it uses. Positions and normals may therefore use
//!   unrelated index arrays over the same topology.
//! * Strips, fans, and polygons are stored as one flat index array plus a parallel array of run
//!   lengths ("vertex counts"). A non-positive polygon run length marks a hole.

mod error;
mod mesh;
mod primitive;
mod validate;
mod values;
mod vertex_data;

pub use error::*;
pub use mesh::*;
pub use primitive::*;
pub use values::*;
pub use vertex_data::*;
