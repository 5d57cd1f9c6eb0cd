use crate::{FloatValues, Primitive, PrimitiveKind, VertexData};

/// A fully parsed interchange mesh.
///
/// # Considerations
///
/// * Read-only once built; conversion never mutates it
/// * Positions are the only mandatory stream; normals, UVs, and colors may be absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    positions: FloatValues,
    normals: Option<FloatValues>,
    uvs: Option<VertexData>,
    colors: Option<VertexData>,
    primitives: Vec<Primitive>,
}

impl SourceMesh {
    /// Construct a mesh from a position stream of `3 * n` values.
    pub fn new(positions: impl Into<FloatValues>) -> Self {
        Self {
            positions: positions.into(),
            ..Default::default()
        }
    }

    pub fn with_normals(mut self, normals: impl Into<FloatValues>) -> Self {
        self.normals = Some(normals.into());
        self
    }

    pub fn with_uvs(mut self, uvs: VertexData) -> Self {
        self.uvs = Some(uvs);
        self
    }

    pub fn with_colors(mut self, colors: VertexData) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn push_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    #[inline]
    pub fn positions(&self) -> &FloatValues {
        &self.positions
    }

    /// The number of position vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn normals(&self) -> Option<&FloatValues> {
        self.normals.as_ref()
    }

    /// Whether the mesh declares a non-empty normal stream.
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.as_ref().is_some_and(|n| !n.is_empty())
    }

    #[inline]
    pub fn uvs(&self) -> Option<&VertexData> {
        self.uvs.as_ref()
    }

    #[inline]
    pub fn colors(&self) -> Option<&VertexData> {
        self.colors.as_ref()
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Whether any primitive is a [PrimitiveKind::Polygons] with at least one positive run.
    pub fn has_polygons(&self) -> bool {
        self.primitives.iter().any(|p| {
            p.kind() == PrimitiveKind::Polygons && p.vertex_counts().iter().any(|&c| c > 0)
        })
    }
}
