use crate::config::Config;
use crate::frames::DeltaFrameBuffer;
use crate::keyframe::KeyframeStore;
use crate::message::{Message, MessageKey, encode_switch};
use crate::playback::{PlaybackDriver, TickReport};
use crate::raster::Raster;
use crate::render::ScaledFrame;
use crate::{Byte, CodecError, Result};
use bitflags::bitflags;
use log::{debug, error, info, warn};

pub const LOADING_TEXT: &str = "loading...";

/// Display collaborator.
pub trait Screen {
    /// Called after every keyframe load and every playback tick.
    fn on_raster_ready(&mut self, frame: &ScaledFrame) -> Result<()>;
    fn show_text(&mut self, text: &str) -> Result<()>;
}

/// Outbound side of the transport.
pub trait Outbox {
    fn send(&mut self, key: MessageKey, payload: &[Byte]) -> Result<()>;
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SessionStatus: u8 {
        /// A transfer is in progress; room switching is blocked
        const LOADING   = 0b0000_0001;
        /// The playback driver is ticking
        const ANIMATING = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Everything one room view needs: the keyframe, its buffered deltas, the
/// playback driver and the collaborators it reports to.
pub struct Session<S, O> {
    config: Config,
    keyframes: KeyframeStore,
    frames: DeltaFrameBuffer,
    driver: PlaybackDriver,
    loading: bool,
    room_index: Byte,
    room_count: Byte,
    room_name: String,
    screen: S,
    outbox: O,
}

impl<S: Screen, O: Outbox> Session<S, O> {
    /// A fresh session waits for its first transfer, so it starts out loading.
    pub fn new(config: Config, screen: S, outbox: O) -> Self {
        let mut session = Self {
            config,
            keyframes: KeyframeStore::new(config.width, config.height),
            frames: DeltaFrameBuffer::with_capacity(config.capacity),
            driver: PlaybackDriver::new(config.capacity, config.effective_scale()),
            loading: true,
            room_index: 0,
            room_count: 0,
            room_name: String::new(),
            screen,
            outbox,
        };
        session.show_text(LOADING_TEXT);

        session
    }

    /// Decodes and handles a raw transport entry. Rejected payloads are
    /// logged and leave the session as it was.
    pub fn receive(&mut self, key: u32, bytes: &[Byte]) -> Result<(), CodecError> {
        let message = MessageKey::try_from(key).and_then(|key| Message::decode(key, bytes));

        match message {
            Ok(message) => self.handle_message(message),
            Err(err) => {
                error!("Dropping message with key {key}: {err}");
                Err(err)
            }
        }
    }

    pub fn handle_message(&mut self, message: Message) -> Result<(), CodecError> {
        let result = match message {
            Message::RoomName(name) => {
                self.set_room_name(name);
                Ok(())
            }
            Message::RoomCount(count) => {
                self.set_room_count(count);
                Ok(())
            }
            Message::Terrain(pixels) => self.load_keyframe(&pixels),
            Message::Frame { slot, payload } => self.store_frame(slot.into(), &payload),
            Message::EndOfTransfer => {
                self.end_transfer();
                Ok(())
            }
        };

        if let Err(err) = &result {
            error!("Rejected payload: {err}");
        }

        result
    }

    /// Installs a new keyframe, halting playback and dropping every buffered
    /// frame (they are deltas against the old keyframe).
    pub fn load_keyframe(&mut self, bytes: &[Byte]) -> Result<(), CodecError> {
        let raster = self.keyframes.load_keyframe(bytes)?;

        self.driver.stop();
        self.frames.clear_all();

        let frame = self.driver.present(raster);
        if let Err(err) = self.screen.on_raster_ready(frame) {
            error!("Failed to display keyframe: {err:#}");
        }

        Ok(())
    }

    pub fn store_frame(&mut self, slot: usize, payload: &[Byte]) -> Result<(), CodecError> {
        self.frames.store_frame(slot, payload)?;

        if self.loading && self.config.loading_policy.completes_on_slot(slot) {
            info!("Received frame {slot}, treating transfer as complete");
            self.loading = false;
        }

        Ok(())
    }

    /// Explicit end-of-transfer signal from the sender.
    pub fn end_transfer(&mut self) {
        if self.loading {
            info!(
                "Transfer complete ({} frames buffered)",
                self.frames.stored_count()
            );
            self.loading = false;
        }
    }

    pub fn set_room_name(&mut self, name: String) {
        debug!("Room name: {name}");
        self.show_text(&name);
        self.room_name = name;
    }

    pub fn set_room_count(&mut self, count: Byte) {
        debug!("Room count: {count}");
        self.room_count = count;
    }

    /// Starts playback from the keyframe, unless already playing or no
    /// keyframe has arrived yet.
    pub fn start_playback(&mut self) -> bool {
        self.driver.start(&mut self.keyframes)
    }

    pub fn stop_playback(&mut self) {
        self.driver.stop();
    }

    /// Periodic tick: applies the next frame and publishes the result.
    pub fn tick(&mut self) -> Option<TickReport> {
        let raster = self.keyframes.current_mut()?;
        let report = self.driver.advance(raster, &self.frames)?;

        let displayed = self
            .driver
            .scaled()
            .map(|frame| self.screen.on_raster_ready(frame));
        if let Some(Err(err)) = displayed {
            error!("Failed to display frame {}: {err:#}", report.slot);
        }

        Some(report)
    }

    /// Moves to the neighbouring room, wrapping around at either end.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.loading {
            debug!("{direction:?} pressed, but still loading");
            return false;
        }
        if self.room_count == 0 {
            warn!("{direction:?} pressed, but the room count is unknown");
            return false;
        }

        let last = self.room_count - 1;
        let target = match direction {
            Direction::Previous if self.room_index == 0 => last,
            Direction::Previous => self.room_index - 1,
            Direction::Next if self.room_index >= last => 0,
            Direction::Next => self.room_index + 1,
        };

        self.request_room_switch(target)
    }

    /// Asks the sender for another room. Ignored while loading; a failed send
    /// is logged and not retried.
    pub fn request_room_switch(&mut self, index: Byte) -> bool {
        if self.loading {
            debug!("Room switch to {index} ignored, still loading");
            return false;
        }

        let (key, payload) = encode_switch(index);
        if let Err(err) = self.outbox.send(key, &payload) {
            error!("Failed to send room switch: {err:#}");
            return false;
        }

        info!("Switching to room {index}");
        self.room_index = index;
        self.loading = true;
        self.show_text(LOADING_TEXT);

        true
    }

    fn show_text(&mut self, text: &str) {
        if let Err(err) = self.screen.show_text(text) {
            error!("Failed to display text: {err:#}");
        }
    }

    pub fn status(&self) -> SessionStatus {
        let mut status = SessionStatus::empty();
        status.set(SessionStatus::LOADING, self.loading);
        status.set(SessionStatus::ANIMATING, self.driver.is_playing());

        status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_playing()
    }

    pub fn cursor(&self) -> usize {
        self.driver.cursor()
    }

    pub fn current(&self) -> Option<&Raster> {
        self.keyframes.current()
    }

    pub fn frames(&self) -> &DeltaFrameBuffer {
        &self.frames
    }

    pub fn scaled(&self) -> Option<&ScaledFrame> {
        self.driver.scaled()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn room_index(&self) -> Byte {
        self.room_index
    }

    pub fn room_count(&self) -> Byte {
        self.room_count
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Drops the rasters, frames and display copy.
    pub fn teardown(&mut self) {
        self.driver.stop();
        self.driver.release();
        self.frames.clear_all();
        self.keyframes.clear();
    }
}
