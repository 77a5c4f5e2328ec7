use std::time::Duration;

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 50;
/// Number of delta frame slots per transfer
pub const DEFAULT_CAPACITY: usize = 20;
/// 50x50 terrain shown at 250x250
pub const DEFAULT_SCALE: usize = 5;
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
/// Receiving any slot at or past this index is taken as "transfer complete"
/// under [`LoadingPolicy::SlotThreshold`].
pub const LOADED_SLOT_THRESHOLD: usize = 18;

/// Decides when an incoming transfer stops counting as "loading".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPolicy {
    /// Loading ends once a frame with slot index >= the threshold arrives.
    SlotThreshold(usize),
    /// Loading ends only on an explicit end-of-transfer message.
    EndOfTransfer,
}

impl Default for LoadingPolicy {
    fn default() -> Self {
        Self::SlotThreshold(LOADED_SLOT_THRESHOLD)
    }
}

impl LoadingPolicy {
    pub fn completes_on_slot(&self, slot: usize) -> bool {
        match self {
            Self::SlotThreshold(threshold) => slot >= *threshold,
            Self::EndOfTransfer => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub capacity: usize,
    pub scale: usize,
    pub tick: Duration,
    pub loading_policy: LoadingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            capacity: DEFAULT_CAPACITY,
            scale: DEFAULT_SCALE,
            tick: DEFAULT_TICK,
            loading_policy: LoadingPolicy::default(),
        }
    }
}

impl Config {
    pub fn raster_len(&self) -> usize {
        self.width * self.height
    }

    /// Upscale factor actually applied; 0 renders at the raster's own size.
    pub fn effective_scale(&self) -> usize {
        self.scale.max(1)
    }

    pub fn scaled_width(&self) -> usize {
        self.width * self.effective_scale()
    }

    pub fn scaled_height(&self) -> usize {
        self.height * self.effective_scale()
    }
}
