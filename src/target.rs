//! Host-native mesh structures produced by conversion.
//!
//! Unlike interchange meshes, host meshes share a single index per corner for positions; every
//! other per-corner attribute (normals, map channels) carries its own pool and its own per-face
//! index array, parallel to the face array.

use nalgebra::{Point3, Vector3};

/// Host material id. `0` is the host default and means "not overridden".
pub type MaterialId = u16;

/// A triangle of a [TriMesh].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriFace {
    /// Indices into [TriMesh::vertices], in winding order.
    pub vertices: [u32; 3],
    pub material: MaterialId,
    /// Visibility of edges `0-1`, `1-2`, and `2-0`.
    pub visible_edges: [bool; 3],
}

impl Default for TriFace {
    fn default() -> Self {
        Self {
            vertices: [0; 3],
            material: 0,
            visible_edges: [false; 3],
        }
    }
}

/// A face of a [PolyMesh], of any degree ≥ 3.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolyFace {
    /// Indices into [PolyMesh::vertices], in winding order.
    pub vertices: Vec<u32>,
    pub material: MaterialId,
}

impl PolyFace {
    #[inline]
    pub fn degree(&self) -> usize {
        self.vertices.len()
    }
}

/// Explicit per-corner normals.
///
/// `faces[f][c]` is the index within `normals` of the normal at corner `c` of face `f`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalSpec<Corners> {
    pub normals: Vec<Vector3<f32>>,
    pub faces: Vec<Corners>,
}

pub type TriNormals = NormalSpec<[u32; 3]>;
pub type PolyNormals = NormalSpec<Vec<u32>>;

/// One map channel (UV or vertex color) of a [TriMesh].
///
/// `faces` is parallel to [TriMesh::faces].
#[derive(Debug, Clone, PartialEq)]
pub struct MapChannel {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

impl MapChannel {
    /// A channel which maps every corner of `face_count` faces to a single origin vertex.
    pub fn zeroed(face_count: usize) -> Self {
        Self {
            vertices: vec![Point3::origin()],
            faces: vec![[0; 3]; face_count],
        }
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<TriFace>,
    pub normals: Option<TriNormals>,
    /// Map channels, indexed by slot. Slot 0 is the vertex color channel and is always present
    /// when any channel is.
    pub channels: Vec<MapChannel>,
}

impl TriMesh {
    /// The channel at `slot`, if allocated.
    #[inline]
    pub fn channel(&self, slot: usize) -> Option<&MapChannel> {
        self.channels.get(slot)
    }
}

/// An indexed polygon mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<PolyFace>,
    pub normals: Option<PolyNormals>,
}

/// The result of converting one interchange mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedMesh {
    Triangle(TriMesh),
    Polygon(PolyMesh),
}

impl ConvertedMesh {
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Triangle(m) => m.vertices.len(),
            Self::Polygon(m) => m.vertices.len(),
        }
    }

    pub fn face_count(&self) -> usize {
        match self {
            Self::Triangle(m) => m.faces.len(),
            Self::Polygon(m) => m.faces.len(),
        }
    }

    pub fn as_triangle(&self) -> Option<&TriMesh> {
        match self {
            Self::Triangle(m) => Some(m),
            Self::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolyMesh> {
        match self {
            Self::Polygon(m) => Some(m),
            Self::Triangle(_) => None,
        }
    }
}
