use facetport_common::Real;
use interchange::{FloatValues, Primitive, ValuesVisitor};
use nalgebra::Vector3;

use crate::{
    context::ConversionContext,
    error::NormalError,
    flatten::{self, MeshKind},
    target::{NormalSpec, PolyNormals, TriNormals},
};

/// Reads a stream of `x, y, z` triplets as unit vectors, normalizing at double precision.
struct UnitNormals;

impl ValuesVisitor for UnitNormals {
    type Output = Vec<Vector3<f32>>;

    fn visit<R: Real>(self, values: &[R]) -> Self::Output {
        values
            .chunks_exact(3)
            .map(|c| {
                let v = Vector3::new(c[0].widen(), c[1].widen(), c[2].widen());
                let len = v.norm();
                let v = if len > 0.0 { v / len } else { v };
                v.map(|x| x as f32)
            })
            .collect()
    }
}

/// Build a normal pool from a normal stream. Zero-length normals stay zero.
pub fn pool(normals: &FloatValues) -> Vec<Vector3<f32>> {
    normals.visit(UnitNormals)
}

/// Per-corner normals for a triangle mesh, or `None` if the source mesh declares no normals.
#[tracing::instrument(skip_all)]
pub fn tri_normals(ctx: &ConversionContext) -> Result<Option<TriNormals>, NormalError> {
    debug_assert_eq!(ctx.kind(), MeshKind::Triangle);
    assign(ctx, |_| 3, |p| flatten::triangles(p, p.normal_indices()))
}

/// Per-corner normals for a polygon mesh, or `None` if the source mesh declares no normals.
///
/// `degrees[f]` must be the vertex count of face `f`.
#[tracing::instrument(skip_all)]
pub fn poly_normals(
    ctx: &ConversionContext,
    degrees: &[usize],
) -> Result<Option<PolyNormals>, NormalError> {
    debug_assert_eq!(ctx.kind(), MeshKind::Polygon);
    assign(
        ctx,
        |f| degrees.get(f).copied().unwrap_or(0),
        |p| {
            flatten::faces(p, p.normal_indices(), MeshKind::Polygon)
                .map(|corners| corners.as_slice().to_vec())
        },
    )
}

fn assign<'s, C, I>(
    ctx: &ConversionContext<'s>,
    degree: impl Fn(usize) -> usize,
    corners: impl Fn(&'s Primitive) -> I,
) -> Result<Option<NormalSpec<C>>, NormalError>
where
    C: AsRef<[u32]>,
    I: Iterator<Item = C>,
{
    let Some(values) = ctx.source().normals().filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let normals = pool(values);
    tracing::trace!(pool = normals.len());

    let mut faces: Vec<Option<C>> = std::iter::repeat_with(|| None)
        .take(ctx.face_count())
        .collect();
    for (first, primitive) in ctx.primitives() {
        let count = flatten::face_count(primitive, ctx.kind());
        for (face, c) in faces.iter_mut().skip(first).zip(corners(primitive).take(count)) {
            *face = Some(c);
        }
    }

    let faces = faces
        .into_iter()
        .enumerate()
        .map(|(face, c)| {
            let c = c.ok_or(NormalError::UnsetFace(face))?;
            check(face, c.as_ref(), degree(face), normals.len())?;
            Ok(c)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(NormalSpec { normals, faces }))
}

fn check(face: usize, corners: &[u32], vertices: usize, pool: usize) -> Result<(), NormalError> {
    if corners.len() != vertices {
        return Err(NormalError::DegreeMismatch {
            face,
            vertices,
            normals: corners.len(),
        });
    }
    match corners.iter().find(|&&i| i as usize >= pool) {
        Some(&index) => Err(NormalError::IndexOutOfRange { face, index, pool }),
        None => Ok(()),
    }
}
