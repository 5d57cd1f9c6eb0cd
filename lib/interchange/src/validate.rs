//! Contract checks for [SourceMesh].

use crate::{IndexList, Primitive, PrimitiveKind, SourceError, SourceMesh, Stream, VertexData};

impl SourceMesh {
    /// Check every structural invariant the conversion passes rely on.
    ///
    /// Conversion only runs this under `debug_assertions`; loaders that cannot vouch for their
    /// output should call it themselves.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.positions().len() % 3 != 0 {
            return Err(SourceError::NotTriplets {
                stream: Stream::Position,
                len: self.positions().len(),
            });
        }
        if let Some(normals) = self.normals() {
            if normals.len() % 3 != 0 {
                return Err(SourceError::NotTriplets {
                    stream: Stream::Normal,
                    len: normals.len(),
                });
            }
        }
        if let Some(uvs) = self.uvs() {
            uvs.check()?;
        }
        if let Some(colors) = self.colors() {
            colors.check()?;
        }

        let normal_count = self.normals().map(|n| n.len() / 3);
        for (index, primitive) in self.primitives().iter().enumerate() {
            let corners = check_runs(index, primitive)?;
            check_indices(
                index,
                Stream::Position,
                primitive.position_indices(),
                self.vertex_count(),
            )?;
            if let Some(count) = normal_count.filter(|&c| c > 0) {
                check_len(index, Stream::Normal, primitive.normal_indices(), corners)?;
                check_indices(index, Stream::Normal, primitive.normal_indices(), count)?;
            }
            for list in primitive.uv_lists() {
                check_list(index, Stream::Uv, list, self.uvs(), corners)?;
            }
            for list in primitive.color_lists() {
                check_list(index, Stream::Color, list, self.colors(), corners)?;
            }
        }
        Ok(())
    }
}

/// Check that a primitive's runs agree with its position index array, returning the corner count.
fn check_runs(index: usize, primitive: &Primitive) -> Result<usize, SourceError> {
    let len = primitive.position_indices().len();
    match primitive.kind() {
        PrimitiveKind::Triangles => {
            if len % 3 != 0 {
                return Err(SourceError::RaggedTriangles {
                    primitive: index,
                    len,
                });
            }
        }
        PrimitiveKind::TriangleStrips | PrimitiveKind::TriangleFans => {
            let covered = covered(primitive.vertex_counts());
            if covered != len {
                return Err(SourceError::RunLengthMismatch {
                    primitive: index,
                    covered,
                    len,
                });
            }
        }
        // hole runs consume no indices, so trailing hole data is tolerated
        PrimitiveKind::Polygons => {
            let covered = covered(primitive.vertex_counts());
            if covered > len {
                return Err(SourceError::RunLengthMismatch {
                    primitive: index,
                    covered,
                    len,
                });
            }
        }
    }
    Ok(len)
}

fn covered(counts: &[i32]) -> usize {
    counts.iter().filter(|&&c| c > 0).map(|&c| c as usize).sum()
}

fn check_len(
    primitive: usize,
    stream: Stream,
    indices: &[u32],
    expected: usize,
) -> Result<(), SourceError> {
    if indices.len() != expected {
        return Err(SourceError::IndexCountMismatch {
            primitive,
            stream,
            len: indices.len(),
            expected,
        });
    }
    Ok(())
}

fn check_indices(
    primitive: usize,
    stream: Stream,
    indices: &[u32],
    bound: usize,
) -> Result<(), SourceError> {
    match indices.iter().find(|&&i| i as usize >= bound) {
        Some(&index) => Err(SourceError::IndexOutOfRange {
            primitive,
            stream,
            index,
            bound,
        }),
        None => Ok(()),
    }
}

fn check_list(
    primitive: usize,
    stream: Stream,
    list: &IndexList,
    data: Option<&VertexData>,
    corners: usize,
) -> Result<(), SourceError> {
    let data = data.ok_or(SourceError::MissingStream { primitive, stream })?;
    let source = data
        .initial_indices()
        .position(|initial| initial == list.initial_index)
        .ok_or(SourceError::UnknownInitialIndex {
            primitive,
            stream,
            initial_index: list.initial_index,
        })?;
    check_len(primitive, stream, &list.indices, corners)?;
    // `position` found it, so the source exists
    let bound = data.inputs()[source].vertex_count();
    check_indices(primitive, stream, &list.indices, bound)
}
