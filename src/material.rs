use std::collections::HashMap;

use interchange::{MaterialTag, Primitive};

use crate::{error::Error, options::MaterialMode, target::MaterialId};

/// Injective map from primitive material tags to host material ids.
///
/// Ids are handed out from 1 in the order primitives first use each tag, tag `0` included. Faces
/// tagged `0` still keep the host default; see [MaterialIdMap::resolve].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialIdMap {
    ids: HashMap<MaterialTag, MaterialId>,
    /// Tags in id order; `order[id - 1]` is the tag mapped to `id`
    order: Vec<MaterialTag>,
}

impl MaterialIdMap {
    /// Build the map for every primitive of a mesh.
    ///
    /// # Errors
    /// * more distinct tags than there are non-default material ids
    pub fn from_primitives(primitives: &[Primitive]) -> Result<Self, Error> {
        let mut res = Self::default();
        for primitive in primitives {
            res.insert(primitive.material())?;
        }
        Ok(res)
    }

    /// Map `tag`, if it is new, returning its id.
    pub fn insert(&mut self, tag: MaterialTag) -> Result<MaterialId, Error> {
        if let Some(&id) = self.ids.get(&tag) {
            return Ok(id);
        }
        let id = MaterialId::try_from(self.order.len() + 1)
            .map_err(|_| Error::MaterialOutOfRange(tag))?;
        self.ids.insert(tag, id);
        self.order.push(tag);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, tag: MaterialTag) -> Option<MaterialId> {
        self.ids.get(&tag).copied()
    }

    /// The host id for `tag` under `mode`. Tag `0` means "no override" and always resolves to `0`.
    pub fn resolve(&self, mode: MaterialMode, tag: MaterialTag) -> Result<MaterialId, Error> {
        match mode {
            _ if tag == 0 => Ok(0),
            MaterialMode::Source => {
                MaterialId::try_from(tag).map_err(|_| Error::MaterialOutOfRange(tag))
            }
            MaterialMode::Remap => self.get(tag).ok_or(Error::MaterialOutOfRange(tag)),
        }
    }

    /// Iterate over `(tag, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialTag, MaterialId)> + '_ {
        self.order
            .iter()
            .zip(1..)
            .map(|(&tag, id)| (tag, id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
