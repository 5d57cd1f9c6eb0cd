use crate::channel::MAX_CHANNELS;

/// How primitive material tags become host material ids.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialMode {
    /// Use each tag as its own id.
    #[default]
    Source,
    /// Number tags from 1 in the order primitives first use them; see
    /// [MaterialIdMap](crate::MaterialIdMap).
    Remap,
}

/// Settings for a single [convert](crate::convert) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    material_mode: MaterialMode,
    channel_limit: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            material_mode: MaterialMode::default(),
            channel_limit: MAX_CHANNELS,
        }
    }
}

impl ConvertOptions {
    pub fn with_material_mode(mut self, mode: MaterialMode) -> Self {
        self.material_mode = mode;
        self
    }

    /// Set the highest map channel slot sets may be assigned to, clamped to `1..=MAX_CHANNELS`.
    pub fn with_channel_limit(mut self, limit: usize) -> Self {
        self.channel_limit = limit.clamp(1, MAX_CHANNELS);
        self
    }

    #[inline]
    pub fn material_mode(&self) -> MaterialMode {
        self.material_mode
    }

    #[inline]
    pub fn channel_limit(&self) -> usize {
        self.channel_limit
    }
}
