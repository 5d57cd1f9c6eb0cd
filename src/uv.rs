use std::ops::Range;

use facetport_common::Real;
use interchange::{ValuesVisitor, VertexData};
use nalgebra::Point3;

use crate::{
    channel::{channel_lists, ChannelFamily},
    context::ConversionContext,
    error::ChannelError,
    flatten,
    target::MapChannel,
};

/// Reads one source of a multi-source stream as channel vertices.
///
/// Sources narrower than 3 leave the remaining coordinates at 0; a 4th component is dropped.
struct ChannelVertices {
    range: Range<usize>,
    stride: usize,
}

impl ValuesVisitor for ChannelVertices {
    type Output = Vec<Point3<f32>>;

    fn visit<R: Real>(self, values: &[R]) -> Self::Output {
        let values = values.get(self.range).unwrap_or_default();
        values
            .chunks_exact(self.stride)
            .map(|c| {
                let mut p = Point3::origin();
                for (dst, src) in p.coords.iter_mut().zip(c) {
                    *dst = src.narrow();
                }
                p
            })
            .collect()
    }
}

/// Copy the `source`th source of `data` into channel vertices.
pub fn channel_vertices(data: &VertexData, source: usize) -> Vec<Point3<f32>> {
    let Some(input) = data.input(source) else {
        return Vec::new();
    };
    let start = data.value_offset(source);
    data.values().visit(ChannelVertices {
        range: start..start + input.length,
        stride: input.stride.max(1),
    })
}

/// Build every map channel of a triangle mesh from the context's channel assignment.
///
/// Each of the `channel_count` channels starts with a single origin vertex that every corner points
/// at; assigned slots then receive their source's vertices and per-corner indices. Lists whose key
/// went unassigned are skipped.
#[tracing::instrument(skip_all, fields(channels = ctx.channels().channel_count()))]
pub fn map_channels(ctx: &ConversionContext) -> Result<Vec<MapChannel>, ChannelError> {
    let source = ctx.source();
    let mut channels = vec![MapChannel::zeroed(ctx.face_count()); ctx.channels().channel_count()];

    for (key, slot) in ctx.channels().iter() {
        let data = match key.family() {
            ChannelFamily::Uv => source.uvs(),
            ChannelFamily::Color => source.colors(),
        };
        let vertices = data
            .map(|d| channel_vertices(d, key.source()))
            .unwrap_or_default();
        if !vertices.is_empty() {
            channels[slot].vertices = vertices;
        }
    }

    for (index, (first, primitive)) in ctx.primitives().enumerate() {
        let count = flatten::triangle_count(primitive);
        for (family, list) in channel_lists(primitive) {
            let key = ctx.resolver().key(family, index, list)?;
            let Some(slot) = ctx.channels().slot(&key) else {
                tracing::trace!(?key, primitive = index, "unassigned; skipping");
                continue;
            };
            let faces = channels[slot].faces.iter_mut().skip(first);
            for (face, tri) in faces.zip(flatten::triangles(primitive, &list.indices).take(count)) {
                *face = tri;
            }
        }
    }
    Ok(channels)
}
