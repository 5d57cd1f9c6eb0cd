use interchange::SourceMesh;
use tracing::{debug, warn};

use crate::{
    channel::ChannelAssignment,
    context::ConversionContext,
    error::{ChannelError, Error},
    flatten::MeshKind,
    material::MaterialIdMap,
    normals,
    options::ConvertOptions,
    positions,
    target::{ConvertedMesh, PolyMesh, TriMesh},
    uv,
};

/// The output of a successful [convert] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub mesh: ConvertedMesh,
    /// Material ids handed out to the source's material tags, regardless of
    /// [MaterialMode](crate::MaterialMode).
    pub materials: MaterialIdMap,
    /// Map channel slots of the source's UV/color sets. Always empty for polygon meshes.
    pub channels: ChannelAssignment,
}

/// Convert an interchange mesh to a host mesh.
///
/// A polygon mesh is built if any polygon primitive has a face; otherwise a triangle mesh is built
/// from the triangle lists, strips, and fans. Returns `None` if the source has no faces at all.
///
/// # Errors
/// * [Error::Source] if `source` is malformed; only checked when built with `debug_assertions`
/// * [Error::MaterialOutOfRange] if a material tag cannot become a host material id
/// * [Error::Normal] if per-corner normals could not be assigned to every face
/// * [Error::Channel] if a UV/color list references a source that does not exist
///
/// Running out of map channels is not an error: the sets that fit are kept and a warning is logged.
#[tracing::instrument(skip_all, fields(primitives = source.primitives().len()))]
pub fn convert(source: &SourceMesh, options: &ConvertOptions) -> Result<Option<Conversion>, Error> {
    if cfg!(debug_assertions) {
        source.validate()?;
    }

    let kind = if source.has_polygons() {
        MeshKind::Polygon
    } else {
        MeshKind::Triangle
    };
    let mut ctx = ConversionContext::new(source, *options, kind)?;
    if ctx.face_count() == 0 {
        debug!("source has no faces");
        return Ok(None);
    }
    debug!(?kind, vertices = source.vertex_count(), faces = ctx.face_count());

    let mesh = match kind {
        MeshKind::Triangle => ConvertedMesh::Triangle(triangle_mesh(&mut ctx)?),
        MeshKind::Polygon => ConvertedMesh::Polygon(polygon_mesh(&ctx)?),
    };
    let (materials, channels) = ctx.finish();
    Ok(Some(Conversion {
        mesh,
        materials,
        channels,
    }))
}

fn triangle_mesh(ctx: &mut ConversionContext) -> Result<TriMesh, Error> {
    let vertices = positions::vertices(ctx.source().positions());
    let faces = positions::tri_faces(ctx)?;
    let normals = normals::tri_normals(ctx)?;

    match ctx.assign_channels() {
        Ok(()) => (),
        Err(err @ ChannelError::Exhausted { .. }) => {
            warn!(%err, "remaining UV/color sets will not be imported")
        }
        Err(err) => return Err(err.into()),
    }
    debug!(
        assigned = ctx.channels().len(),
        channels = ctx.channels().channel_count()
    );
    let channels = uv::map_channels(ctx)?;

    Ok(TriMesh {
        vertices,
        faces,
        normals,
        channels,
    })
}

fn polygon_mesh(ctx: &ConversionContext) -> Result<PolyMesh, Error> {
    let vertices = positions::vertices(ctx.source().positions());
    let faces = positions::poly_faces(ctx)?;
    let degrees = faces.iter().map(|f| f.degree()).collect::<Vec<_>>();
    let normals = normals::poly_normals(ctx, &degrees)?;

    Ok(PolyMesh {
        vertices,
        faces,
        normals,
    })
}
