use interchange::{MaterialTag, SourceError};

use crate::channel::ChannelKey;

/// Errors raised while converting a [SourceMesh](interchange::SourceMesh).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Normal(#[from] NormalError),
    #[error("Material tag {0} does not fit a host material id")]
    MaterialOutOfRange(MaterialTag),
}

/// Errors related to assigning UV/color sets to map channel slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// Every slot within `1..=limit` is occupied; `key` and any keys after it were not assigned.
    #[error("No free map channel for {key:?}: all slots in 1..={limit} are taken")]
    Exhausted { key: ChannelKey, limit: usize },
    #[error("Primitive {primitive} references initial index {initial_index}, which starts no declared source")]
    UnresolvedSource {
        primitive: usize,
        initial_index: usize,
    },
}

/// Inconsistencies found after assigning per-corner normals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalError {
    #[error("No normals were assigned to face {0}")]
    UnsetFace(usize),
    #[error("Face {face} has {vertices} vertices but {normals} normals")]
    DegreeMismatch {
        face: usize,
        vertices: usize,
        normals: usize,
    },
    #[error("Face {face} references normal {index}, outside of the pool 0..{pool}")]
    IndexOutOfRange { face: usize, index: u32, pool: usize },
}
