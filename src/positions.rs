use facetport_common::Real;
use interchange::{FloatValues, ValuesVisitor};
use nalgebra::Point3;

use crate::{
    context::ConversionContext,
    error::Error,
    flatten::{self, MeshKind},
    target::{PolyFace, TriFace},
};

/// Reads a stream of `x, y, z` triplets as host points.
struct Points;

impl ValuesVisitor for Points {
    type Output = Vec<Point3<f32>>;

    fn visit<R: Real>(self, values: &[R]) -> Self::Output {
        values
            .chunks_exact(3)
            .map(|c| Point3::new(c[0].narrow(), c[1].narrow(), c[2].narrow()))
            .collect()
    }
}

/// Copy a position stream into host vertices.
///
/// Single precision values are copied exactly; double precision values are rounded to nearest.
/// A trailing partial triplet is ignored.
pub fn vertices(positions: &FloatValues) -> Vec<Point3<f32>> {
    positions.visit(Points)
}

/// Build the faces of a triangle mesh, one per flattened triangle, in traversal order.
#[tracing::instrument(skip_all, fields(faces = ctx.face_count()))]
pub fn tri_faces(ctx: &ConversionContext) -> Result<Vec<TriFace>, Error> {
    debug_assert_eq!(ctx.kind(), MeshKind::Triangle);
    let mut faces = Vec::with_capacity(ctx.face_count());
    for (_, primitive) in ctx.primitives() {
        let material = ctx.material(primitive)?;
        faces.extend(
            flatten::triangles(primitive, primitive.position_indices()).map(|vertices| TriFace {
                vertices,
                material,
                visible_edges: [true; 3],
            }),
        );
    }
    debug_assert_eq!(faces.len(), ctx.face_count());
    Ok(faces)
}

/// Build the faces of a polygon mesh. Triangles from lists, strips, and fans become faces of
/// degree 3.
#[tracing::instrument(skip_all, fields(faces = ctx.face_count()))]
pub fn poly_faces(ctx: &ConversionContext) -> Result<Vec<PolyFace>, Error> {
    debug_assert_eq!(ctx.kind(), MeshKind::Polygon);
    let mut faces = Vec::with_capacity(ctx.face_count());
    for (_, primitive) in ctx.primitives() {
        let material = ctx.material(primitive)?;
        faces.extend(
            flatten::faces(primitive, primitive.position_indices(), MeshKind::Polygon).map(
                |corners| PolyFace {
                    vertices: corners.as_slice().to_vec(),
                    material,
                },
            ),
        );
    }
    debug_assert_eq!(faces.len(), ctx.face_count());
    Ok(faces)
}
