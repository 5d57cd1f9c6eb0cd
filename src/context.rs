use interchange::{Primitive, SourceMesh};

use crate::{
    channel::{ChannelAssignment, ChannelResolver},
    error::{ChannelError, Error},
    flatten::{self, MeshKind},
    material::MaterialIdMap,
    options::ConvertOptions,
    target::MaterialId,
};

/// State shared by the passes of a single conversion.
///
/// A context is built for one [SourceMesh] and one target mesh kind; nothing in it outlives the
/// call that created it.
#[derive(Debug, Clone)]
pub struct ConversionContext<'s> {
    source: &'s SourceMesh,
    options: ConvertOptions,
    kind: MeshKind,
    /// Index of the first target face of each primitive
    face_offsets: Vec<usize>,
    face_count: usize,
    materials: MaterialIdMap,
    resolver: ChannelResolver,
    channels: ChannelAssignment,
}

impl<'s> ConversionContext<'s> {
    /// # Errors
    /// * [Error::MaterialOutOfRange] if the primitives use more distinct material tags than there
    ///   are host material ids
    pub fn new(source: &'s SourceMesh, options: ConvertOptions, kind: MeshKind) -> Result<Self, Error> {
        let mut face_count = 0;
        let face_offsets = source
            .primitives()
            .iter()
            .map(|p| {
                let first = face_count;
                face_count += flatten::face_count(p, kind);
                first
            })
            .collect();
        Ok(Self {
            source,
            options,
            kind,
            face_offsets,
            face_count,
            materials: MaterialIdMap::from_primitives(source.primitives())?,
            resolver: ChannelResolver::new(source),
            channels: ChannelAssignment::new(options.channel_limit()),
        })
    }

    #[inline]
    pub fn source(&self) -> &'s SourceMesh {
        self.source
    }

    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    #[inline]
    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    /// The total number of faces of the target mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// Iterate over the primitives of the source mesh, along with the index of each one's first
    /// target face.
    pub fn primitives(&self) -> impl Iterator<Item = (usize, &'s Primitive)> + '_ {
        self.face_offsets
            .iter()
            .copied()
            .zip(self.source.primitives())
    }

    /// The host material id of every face of `primitive`.
    pub fn material(&self, primitive: &Primitive) -> Result<MaterialId, Error> {
        self.materials
            .resolve(self.options.material_mode(), primitive.material())
    }

    #[inline]
    pub fn materials(&self) -> &MaterialIdMap {
        &self.materials
    }

    #[inline]
    pub fn resolver(&self) -> &ChannelResolver {
        &self.resolver
    }

    #[inline]
    pub fn channels(&self) -> &ChannelAssignment {
        &self.channels
    }

    /// Run channel assignment over the source mesh; see [ChannelAssignment::assign].
    pub fn assign_channels(&mut self) -> Result<(), ChannelError> {
        self.channels.assign(self.source, &self.resolver)
    }

    /// Consume the context, keeping the parts callers may want to inspect.
    pub fn finish(self) -> (MaterialIdMap, ChannelAssignment) {
        (self.materials, self.channels)
    }
}
