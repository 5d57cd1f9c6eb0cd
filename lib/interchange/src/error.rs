/// Contract violations in a [SourceMesh](crate::SourceMesh).
///
/// These describe input that an interchange loader should never produce; conversion does not
/// attempt to recover from them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("{stream} stream holds {len} values, which is not a multiple of 3")]
    NotTriplets { stream: Stream, len: usize },
    #[error("source {input} declares stride {stride}; strides must be within 1..=4")]
    InvalidStride { input: usize, stride: usize },
    #[error("source {input} holds {length} values, which is not a multiple of its stride {stride}")]
    RaggedSource {
        input: usize,
        length: usize,
        stride: usize,
    },
    #[error("declared sources cover {declared} values, but the stream holds {actual}")]
    SourceLengthMismatch { declared: usize, actual: usize },
    #[error("primitive {primitive}: triangle list of {len} indices is not a multiple of 3")]
    RaggedTriangles { primitive: usize, len: usize },
    #[error("primitive {primitive}: runs cover {covered} indices, but the index array holds {len}")]
    RunLengthMismatch {
        primitive: usize,
        covered: usize,
        len: usize,
    },
    #[error("primitive {primitive}: {stream} index array holds {len} indices, expected {expected}")]
    IndexCountMismatch {
        primitive: usize,
        stream: Stream,
        len: usize,
        expected: usize,
    },
    #[error("primitive {primitive}: {stream} index {index} is out of range 0..{bound}")]
    IndexOutOfRange {
        primitive: usize,
        stream: Stream,
        index: u32,
        bound: usize,
    },
    #[error("primitive {primitive}: {stream} list references initial index {initial_index}, which starts no declared source")]
    UnknownInitialIndex {
        primitive: usize,
        stream: Stream,
        initial_index: usize,
    },
    #[error("primitive {primitive} references {stream} data, but the mesh declares none")]
    MissingStream { primitive: usize, stream: Stream },
}

/// The attribute stream an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Position,
    Normal,
    Uv,
    Color,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Position => f.write_str("position"),
            Stream::Normal => f.write_str("normal"),
            Stream::Uv => f.write_str("uv"),
            Stream::Color => f.write_str("color"),
        }
    }
}
