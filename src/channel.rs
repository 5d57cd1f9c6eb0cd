//! Placement of UV and color sets into fixed map channel slots.
//!
//! Host meshes expose a small fixed number of map channels, while interchange documents may declare
//! any number of UV/color sets, each possibly read from several sources. Every distinct
//! `(set, source)` pair used by a primitive becomes a [ChannelKey] and receives its own slot:
//!
//! 1. *Favored pass*: each key is offered the slot its set number naturally maps to; color set 1
//!    (vertex color) favors slot 0, UV set 0 favors slot 1, and every other set favors the slot of
//!    the same number.
//! 2. *First-fit pass*: keys left over take the lowest free slot in `1..=limit`. Slot 0 is never
//!    handed out here.
//!
//! Keys are visited in primitive order, color lists before UV lists, so the result only depends on
//! the mesh.

use std::collections::BTreeMap;

use bitvec::vec::BitVec;
use interchange::{IndexList, Primitive, SourceMesh, VertexData};
use tracing::trace;

use crate::error::ChannelError;

/// The number of user-addressable map channels, excluding slot 0.
pub const MAX_CHANNELS: usize = 99;

/// The number of host channels below slot 0, which are never assigned to sets.
pub const HIDDEN_CHANNELS: usize = 2;

const SLOT_BITS: usize = HIDDEN_CHANNELS + MAX_CHANNELS + 1;

// `clamp(1, MAX_CHANNELS)` panics on an empty range
static_assertions::const_assert!(MAX_CHANNELS >= 1);
// first-fit scans bits up to `HIDDEN_CHANNELS + limit`
static_assertions::const_assert!(HIDDEN_CHANNELS + MAX_CHANNELS < SLOT_BITS);

/// Whether a set holds texture coordinates or vertex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelFamily {
    Uv,
    Color,
}

/// One `(set, source)` pair referenced by a primitive.
///
/// UV and color keys share a keyspace: UV keys store their set index as is and color keys store
/// `-(set_index + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelKey {
    set: i64,
    source: usize,
}

impl ChannelKey {
    #[inline]
    pub fn new(family: ChannelFamily, set_index: u32, source: usize) -> Self {
        let set = match family {
            ChannelFamily::Uv => set_index as i64,
            ChannelFamily::Color => -(set_index as i64 + 1),
        };
        Self { set, source }
    }

    #[inline]
    pub fn uv(set_index: u32, source: usize) -> Self {
        Self::new(ChannelFamily::Uv, set_index, source)
    }

    #[inline]
    pub fn color(set_index: u32, source: usize) -> Self {
        Self::new(ChannelFamily::Color, set_index, source)
    }

    #[inline]
    pub fn family(&self) -> ChannelFamily {
        if self.set < 0 {
            ChannelFamily::Color
        } else {
            ChannelFamily::Uv
        }
    }

    #[inline]
    pub fn set_index(&self) -> u32 {
        match self.family() {
            ChannelFamily::Uv => self.set as u32,
            ChannelFamily::Color => (-self.set - 1) as u32,
        }
    }

    /// Index of the source within its family's [VertexData].
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// The slot this key is offered before falling back to first-fit placement.
    pub fn favored_slot(&self) -> usize {
        let set = self.set_index() as usize;
        match (self.family(), set) {
            (ChannelFamily::Color, 1) => 0,
            (ChannelFamily::Uv, 0) => 1,
            _ => set,
        }
    }
}

/// Translation from *initial indices* to source indices for one [VertexData].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable(BTreeMap<usize, usize>);

impl SourceTable {
    /// If several sources share an initial index (only possible when some are empty), the last one
    /// wins.
    pub fn new(data: Option<&VertexData>) -> Self {
        Self(
            data.into_iter()
                .flat_map(VertexData::initial_indices)
                .enumerate()
                .map(|(source, initial)| (initial, source))
                .collect(),
        )
    }

    #[inline]
    pub fn resolve(&self, initial_index: usize) -> Option<usize> {
        self.0.get(&initial_index).copied()
    }
}

/// Source translation tables for both channel families of a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelResolver {
    uv: SourceTable,
    color: SourceTable,
}

impl ChannelResolver {
    pub fn new(mesh: &SourceMesh) -> Self {
        Self {
            uv: SourceTable::new(mesh.uvs()),
            color: SourceTable::new(mesh.colors()),
        }
    }

    #[inline]
    pub fn table(&self, family: ChannelFamily) -> &SourceTable {
        match family {
            ChannelFamily::Uv => &self.uv,
            ChannelFamily::Color => &self.color,
        }
    }

    /// The key for `list`, which belongs to the `primitive`th primitive.
    pub fn key(
        &self,
        family: ChannelFamily,
        primitive: usize,
        list: &IndexList,
    ) -> Result<ChannelKey, ChannelError> {
        let source = self.table(family).resolve(list.initial_index).ok_or(
            ChannelError::UnresolvedSource {
                primitive,
                initial_index: list.initial_index,
            },
        )?;
        Ok(ChannelKey::new(family, list.set_index, source))
    }
}

/// Every index list of `primitive`, colors first.
pub fn channel_lists(
    primitive: &Primitive,
) -> impl Iterator<Item = (ChannelFamily, &IndexList)> + '_ {
    let colors = primitive
        .color_lists()
        .iter()
        .map(|l| (ChannelFamily::Color, l));
    let uvs = primitive.uv_lists().iter().map(|l| (ChannelFamily::Uv, l));
    colors.chain(uvs)
}

/// Injective map from [ChannelKeys](ChannelKey) to map channel slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAssignment {
    slots: BTreeMap<ChannelKey, usize>,
    /// Bit `HIDDEN_CHANNELS + s` is set ⟺ slot `s` is taken
    used: BitVec,
    high_water: Option<usize>,
    limit: usize,
}

impl Default for ChannelAssignment {
    fn default() -> Self {
        Self::new(MAX_CHANNELS)
    }
}

impl ChannelAssignment {
    /// An empty assignment which hands out slots up to `limit`, clamped to `1..=MAX_CHANNELS`.
    pub fn new(limit: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            used: BitVec::repeat(false, SLOT_BITS),
            high_water: None,
            limit: limit.clamp(1, MAX_CHANNELS),
        }
    }

    /// Assign a slot to every key referenced by `mesh`.
    ///
    /// # Errors
    /// * [ChannelError::UnresolvedSource] if a list's initial index starts no declared source
    /// * [ChannelError::Exhausted] if a key finds no free slot; keys assigned before it keep their
    ///   slots, keys after it are left unassigned
    #[tracing::instrument(skip_all, fields(limit = self.limit))]
    pub fn assign(&mut self, mesh: &SourceMesh, resolver: &ChannelResolver) -> Result<(), ChannelError> {
        for (index, primitive) in mesh.primitives().iter().enumerate() {
            for (family, list) in channel_lists(primitive) {
                let key = resolver.key(family, index, list)?;
                if self.slots.contains_key(&key) {
                    continue;
                }
                let slot = key.favored_slot();
                if slot <= self.limit && !self.is_used(slot) {
                    trace!(?key, slot, "favored");
                    self.insert(key, slot);
                }
            }
        }
        for (index, primitive) in mesh.primitives().iter().enumerate() {
            for (family, list) in channel_lists(primitive) {
                let key = resolver.key(family, index, list)?;
                if self.slots.contains_key(&key) {
                    continue;
                }
                let slot = self.first_free().ok_or(ChannelError::Exhausted {
                    key,
                    limit: self.limit,
                })?;
                trace!(?key, slot, "fallback");
                self.insert(key, slot);
            }
        }
        Ok(())
    }

    fn insert(&mut self, key: ChannelKey, slot: usize) {
        self.slots.insert(key, slot);
        self.used.set(HIDDEN_CHANNELS + slot, true);
        self.high_water = Some(self.high_water.map_or(slot, |h| h.max(slot)));
    }

    /// The lowest free slot in `1..=limit`.
    fn first_free(&self) -> Option<usize> {
        self.used[HIDDEN_CHANNELS + 1..=HIDDEN_CHANNELS + self.limit]
            .first_zero()
            .map(|i| i + 1)
    }

    /// Whether `slot` has been handed out.
    #[inline]
    pub fn is_used(&self, slot: usize) -> bool {
        self.used
            .get(HIDDEN_CHANNELS + slot)
            .is_some_and(|b| *b)
    }

    #[inline]
    pub fn slot(&self, key: &ChannelKey) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Iterate over `(key, slot)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelKey, usize)> + '_ {
        self.slots.iter().map(|(&k, &s)| (k, s))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The highest slot ever assigned.
    #[inline]
    pub fn high_water(&self) -> Option<usize> {
        self.high_water
    }

    /// The number of channels a mesh needs to hold every assigned slot.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.high_water.map_or(0, |h| h + 1)
    }
}
