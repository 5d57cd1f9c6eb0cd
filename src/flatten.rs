//! Decomposition of interchange primitives into host faces.
//!
//! Every conversion pass walks primitives through the iterators in this module, passing whichever
//! index array it is interested in (positions, normals, or one UV/color list). Because the run
//! structure and winding rules only depend on the primitive, the `n`th face yielded for one index
//! array always describes the same face as the `n`th face yielded for any other.
//!
//! # Winding
//!
//! * Triangle lists: every 3 indices, verbatim.
//! * Strips: the triangle ending at `j` is `(j-2, j-1, j)` for even triangles within a run and
//!   `(j-1, j-2, j)` for odd ones, so that all triangles share the first triangle's orientation.
//!   Each run restarts unflipped.
//! * Fans: the triangle ending at `j` is `(s, j-1, j)`, where `s` is the first index of the run.
//! * Polygons: each run with a positive length is one face, verbatim. Non-positive runs mark holes;
//!   they are skipped and consume no indices.

use std::iter::FusedIterator;

use interchange::{Primitive, PrimitiveKind};

/// The host mesh type a traversal is building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Only triangle lists, strips, and fans contribute faces; polygon primitives are ignored.
    Triangle,
    /// Every primitive contributes faces; triangles become faces of degree 3.
    Polygon,
}

/// Iterator over the corner triples of a triangle list, strip set, or fan set.
///
/// Yields nothing for [PrimitiveKind::Polygons].
#[derive(Debug, Clone)]
pub struct Triangles<'p> {
    kind: PrimitiveKind,
    indices: &'p [u32],
    counts: &'p [i32],
    /// Index of the next run to load
    run: usize,
    /// First index of the current run
    start: usize,
    /// One past the last index of the current run
    end: usize,
    /// Index of the last corner of the next triangle
    cursor: usize,
    flip: bool,
}

impl<'p> Triangles<'p> {
    /// Walk `indices` using the topology of a primitive of kind `kind` with run lengths `counts`.
    ///
    /// Runs which extend past the end of `indices` are truncated.
    pub fn new(kind: PrimitiveKind, counts: &'p [i32], indices: &'p [u32]) -> Self {
        Self {
            kind,
            indices,
            counts,
            run: 0,
            start: 0,
            end: 0,
            cursor: 0,
            flip: false,
        }
    }

    fn next_list(&mut self) -> Option<[u32; 3]> {
        let c = self.cursor;
        let tri = self.indices.get(c..c + 3)?;
        self.cursor += 3;
        Some([tri[0], tri[1], tri[2]])
    }

    fn next_run(&mut self) -> Option<()> {
        let count = *self.counts.get(self.run)?;
        self.run += 1;
        self.start = self.end;
        self.end = (self.start + count.max(0) as usize).min(self.indices.len());
        self.cursor = self.start + 2;
        self.flip = false;
        Some(())
    }
}

impl<'p> FusedIterator for Triangles<'p> {}

impl<'p> Iterator for Triangles<'p> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let strip = match self.kind {
            PrimitiveKind::Triangles => return self.next_list(),
            PrimitiveKind::Polygons => return None,
            PrimitiveKind::TriangleStrips => true,
            PrimitiveKind::TriangleFans => false,
        };
        while self.cursor >= self.end {
            self.next_run()?;
        }
        let i = self.indices;
        let j = self.cursor;
        self.cursor += 1;
        Some(if !strip {
            [i[self.start], i[j - 1], i[j]]
        } else if self.flip {
            self.flip = false;
            [i[j - 1], i[j - 2], i[j]]
        } else {
            self.flip = true;
            [i[j - 2], i[j - 1], i[j]]
        })
    }
}

/// Iterator over the faces of a polygon set; see the [module documentation](self).
///
/// Yields nothing for primitives other than [PrimitiveKind::Polygons].
#[derive(Debug, Clone)]
pub struct PolygonRuns<'p> {
    indices: &'p [u32],
    counts: std::slice::Iter<'p, i32>,
    offset: usize,
}

impl<'p> PolygonRuns<'p> {
    pub fn new(kind: PrimitiveKind, counts: &'p [i32], indices: &'p [u32]) -> Self {
        let counts = match kind {
            PrimitiveKind::Polygons => counts,
            _ => &[],
        };
        Self {
            indices,
            counts: counts.iter(),
            offset: 0,
        }
    }
}

impl<'p> FusedIterator for PolygonRuns<'p> {}

impl<'p> Iterator for PolygonRuns<'p> {
    type Item = &'p [u32];

    fn next(&mut self) -> Option<Self::Item> {
        for &count in self.counts.by_ref() {
            // TODO :: reconstruct holes instead of dropping them
            if count <= 0 {
                continue;
            }
            let start = self.offset.min(self.indices.len());
            self.offset += count as usize;
            return Some(&self.indices[start..self.offset.min(self.indices.len())]);
        }
        None
    }
}

/// The corner indices of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corners<'p> {
    Triangle([u32; 3]),
    Polygon(&'p [u32]),
}

impl<'p> Corners<'p> {
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        match self {
            Corners::Triangle(tri) => tri.as_slice(),
            Corners::Polygon(poly) => poly,
        }
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.as_slice().len()
    }
}

/// Iterator over every face a primitive contributes to a polygon mesh.
#[derive(Debug, Clone)]
pub enum Faces<'p> {
    Triangles(Triangles<'p>),
    Polygons(PolygonRuns<'p>),
}

impl<'p> FusedIterator for Faces<'p> {}

impl<'p> Iterator for Faces<'p> {
    type Item = Corners<'p>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Faces::Triangles(t) => t.next().map(Corners::Triangle),
            Faces::Polygons(p) => p.next().map(Corners::Polygon),
        }
    }
}

/// Corner triples of `primitive`, read from `indices`.
///
/// `indices` may be any per-corner array of `primitive`: its position indices, its normal indices,
/// or one of its UV/color lists.
#[inline]
pub fn triangles<'p>(primitive: &'p Primitive, indices: &'p [u32]) -> Triangles<'p> {
    Triangles::new(primitive.kind(), primitive.vertex_counts(), indices)
}

/// Polygon faces of `primitive`, read from `indices`.
#[inline]
pub fn polygons<'p>(primitive: &'p Primitive, indices: &'p [u32]) -> PolygonRuns<'p> {
    PolygonRuns::new(primitive.kind(), primitive.vertex_counts(), indices)
}

/// Every face `primitive` contributes to a mesh of kind `mesh`, read from `indices`.
pub fn faces<'p>(primitive: &'p Primitive, indices: &'p [u32], mesh: MeshKind) -> Faces<'p> {
    match (primitive.kind(), mesh) {
        (PrimitiveKind::Polygons, MeshKind::Polygon) => Faces::Polygons(polygons(primitive, indices)),
        _ => Faces::Triangles(triangles(primitive, indices)),
    }
}

/// Number of triangles a strip or fan run of `count` indices decomposes into.
#[inline]
pub fn run_triangle_count(count: i32) -> usize {
    (count.max(0) as usize).saturating_sub(2)
}

/// Number of triangles [triangles] yields for a well-formed primitive.
pub fn triangle_count(primitive: &Primitive) -> usize {
    match primitive.kind() {
        PrimitiveKind::Triangles => primitive.position_indices().len() / 3,
        PrimitiveKind::TriangleStrips | PrimitiveKind::TriangleFans => primitive
            .vertex_counts()
            .iter()
            .copied()
            .map(run_triangle_count)
            .sum(),
        PrimitiveKind::Polygons => 0,
    }
}

/// Number of faces [polygons] yields for a well-formed primitive.
pub fn polygon_count(primitive: &Primitive) -> usize {
    match primitive.kind() {
        PrimitiveKind::Polygons => primitive.vertex_counts().iter().filter(|&&c| c > 0).count(),
        _ => 0,
    }
}

/// Number of faces [faces] yields for a well-formed primitive.
#[inline]
pub fn face_count(primitive: &Primitive, mesh: MeshKind) -> usize {
    match mesh {
        MeshKind::Triangle => triangle_count(primitive),
        MeshKind::Polygon => triangle_count(primitive) + polygon_count(primitive),
    }
}
