/// Tag identifying a primitive's material within the interchange document.
pub type MaterialTag = u32;

/// The method by which a primitive's index array is interpreted as faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Every 3 indices form an independent triangle.
    Triangles,
    /// Each run forms a strip; every index after the second forms a triangle with its two
    /// predecessors.
    TriangleStrips,
    /// Each run forms a fan around the run's first index.
    TriangleFans,
    /// Each run with a positive length forms one polygon face.
    Polygons,
}

/// A per-corner index list for one UV or color set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexList {
    /// The logical set this list belongs to, as declared in the interchange document.
    pub set_index: u32,
    /// The initial index of the source this list reads from; see
    /// [VertexData::initial_indices](crate::VertexData::initial_indices).
    pub initial_index: usize,
    /// Per-corner attribute vertex indices, parallel to the primitive's position indices.
    ///
    /// Indices are relative to the start of the referenced source.
    pub indices: Vec<u32>,
}

impl IndexList {
    pub fn new(set_index: u32, initial_index: usize, indices: Vec<u32>) -> Self {
        Self {
            set_index,
            initial_index,
            indices,
        }
    }
}

/// A group of faces sharing a topology kind and a material.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    kind: PrimitiveKind,
    position_indices: Vec<u32>,
    normal_indices: Vec<u32>,
    uv_lists: Vec<IndexList>,
    color_lists: Vec<IndexList>,
    /// Run lengths; empty for [PrimitiveKind::Triangles].
    vertex_counts: Vec<i32>,
    material: MaterialTag,
}

impl Primitive {
    fn new(kind: PrimitiveKind, position_indices: Vec<u32>, vertex_counts: Vec<i32>) -> Self {
        Self {
            kind,
            position_indices,
            normal_indices: Vec::new(),
            uv_lists: Vec::new(),
            color_lists: Vec::new(),
            vertex_counts,
            material: 0,
        }
    }

    /// A triangle list.
    pub fn triangles(position_indices: Vec<u32>) -> Self {
        Self::new(PrimitiveKind::Triangles, position_indices, Vec::new())
    }

    /// A set of triangle strips, one per entry in `vertex_counts`.
    pub fn strips(position_indices: Vec<u32>, vertex_counts: Vec<u32>) -> Self {
        Self::new(
            PrimitiveKind::TriangleStrips,
            position_indices,
            vertex_counts.into_iter().map(run_length).collect(),
        )
    }

    /// A set of triangle fans, one per entry in `vertex_counts`.
    pub fn fans(position_indices: Vec<u32>, vertex_counts: Vec<u32>) -> Self {
        Self::new(
            PrimitiveKind::TriangleFans,
            position_indices,
            vertex_counts.into_iter().map(run_length).collect(),
        )
    }

    /// A set of polygons, one per positive entry in `vertex_counts`.
    pub fn polygons(position_indices: Vec<u32>, vertex_counts: Vec<i32>) -> Self {
        Self::new(PrimitiveKind::Polygons, position_indices, vertex_counts)
    }

    pub fn with_normals(mut self, normal_indices: Vec<u32>) -> Self {
        self.normal_indices = normal_indices;
        self
    }

    pub fn with_uvs(mut self, list: IndexList) -> Self {
        self.uv_lists.push(list);
        self
    }

    pub fn with_colors(mut self, list: IndexList) -> Self {
        self.color_lists.push(list);
        self
    }

    pub fn with_material(mut self, material: MaterialTag) -> Self {
        self.material = material;
        self
    }

    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline]
    pub fn position_indices(&self) -> &[u32] {
        &self.position_indices
    }

    #[inline]
    pub fn normal_indices(&self) -> &[u32] {
        &self.normal_indices
    }

    #[inline]
    pub fn uv_lists(&self) -> &[IndexList] {
        &self.uv_lists
    }

    #[inline]
    pub fn color_lists(&self) -> &[IndexList] {
        &self.color_lists
    }

    #[inline]
    pub fn vertex_counts(&self) -> &[i32] {
        &self.vertex_counts
    }

    #[inline]
    pub fn material(&self) -> MaterialTag {
        self.material
    }
}

#[inline]
fn run_length(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
