use crate::frames::DeltaFrameBuffer;
use crate::keyframe::KeyframeStore;
use crate::raster::Raster;
use crate::render::ScaledFrame;
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Outcome of a single playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Slot that was applied
    pub slot: usize,
    pub applied: usize,
    /// Patches dropped for pointing outside the raster
    pub skipped: usize,
    /// Playback ran out of slots and went back to idle
    pub finished: bool,
}

/// Replays the delta frames, one slot per tick, over the working raster.
#[derive(Debug)]
pub struct PlaybackDriver {
    state: PlaybackState,
    cursor: usize,
    capacity: usize,
    scale: usize,
    scaled: Option<ScaledFrame>,
}

impl PlaybackDriver {
    pub fn new(capacity: usize, scale: usize) -> Self {
        Self {
            state: PlaybackState::Idle,
            cursor: 0,
            capacity,
            scale: scale.max(1),
            scaled: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Next slot to apply
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Latest display copy, if anything has been presented yet.
    pub fn scaled(&self) -> Option<&ScaledFrame> {
        self.scaled.as_ref()
    }

    /// Idle -> Playing. Rewinds the working raster to the keyframe and the
    /// cursor to slot 0. Returns `false` if already playing or nothing has
    /// been loaded yet.
    pub fn start(&mut self, keyframes: &mut KeyframeStore) -> bool {
        if self.is_playing() {
            debug!("Playback already running (slot {})", self.cursor);
            return false;
        }
        if let Err(error) = keyframes.rewind() {
            warn!("Cannot start playback: {error}");
            return false;
        }

        self.cursor = 0;
        self.state = PlaybackState::Playing;
        info!("Playback started");

        true
    }

    /// Playing -> Idle. The cursor is left where it was.
    pub fn stop(&mut self) {
        if self.is_playing() {
            info!("Playback stopped at slot {}", self.cursor);
        }
        self.state = PlaybackState::Idle;
    }

    /// Applies the frame under the cursor to `raster`, refreshes the display
    /// copy and moves on. Does nothing while idle.
    ///
    /// Empty slots are applied as zero patches.
    pub fn advance(&mut self, raster: &mut Raster, frames: &DeltaFrameBuffer) -> Option<TickReport> {
        if !self.is_playing() {
            return None;
        }

        let slot = self.cursor;
        let mut applied = 0;
        let mut skipped = 0;

        if let Some(frame) = frames.frame(slot) {
            for &patch in frame.patches() {
                match raster.apply(patch) {
                    Ok(()) => applied += 1,
                    Err(error) => {
                        warn!("Skipping patch in slot {slot}: {error}");
                        skipped += 1;
                    }
                }
            }
        }
        debug!("Applied slot {slot}: {applied} patches, {skipped} skipped");

        self.present(raster);

        self.cursor += 1;
        let finished = self.cursor >= self.capacity;
        if finished {
            self.state = PlaybackState::Idle;
            info!("Playback finished after {} slots", self.cursor);
        }

        Some(TickReport {
            slot,
            applied,
            skipped,
            finished,
        })
    }

    /// Replaces the display copy with a fresh upscale of `raster`.
    pub fn present(&mut self, raster: &Raster) -> &ScaledFrame {
        self.scaled.insert(ScaledFrame::from_raster(raster, self.scale))
    }

    pub fn release(&mut self) {
        self.scaled = None;
    }
}
