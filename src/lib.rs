//! Conversion of scene-interchange meshes into host-native triangle and polygon meshes.
//!
//! Interchange meshes index every attribute per corner and describe faces as triangle lists,
//! strips, fans, or polygons. Host meshes share one vertex index per corner for positions, carry
//! their own per-face index arrays for normals and map channels, and only offer a fixed number of
//! map channel slots. [convert] bridges the two:
//!
//! * [flatten] decomposes every primitive into faces, with the same traversal for every attribute
//! * [positions] copies vertices and builds the face list
//! * [normals] builds a unit normal pool and per-corner normal indices
//! * [channel] places each `(set, source)` pair of UV/color data into a map channel slot
//! * [uv] fills the assigned map channels
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod channel;
mod context;
mod conversion;
pub mod error;
pub mod flatten;
mod material;
pub mod normals;
mod options;
pub mod positions;
pub mod target;
pub mod uv;

pub use context::*;
pub use conversion::*;
pub use error::Error;
pub use material::*;
pub use options::*;
pub use target::*;

pub use interchange;
