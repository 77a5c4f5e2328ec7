pub mod config;
pub mod encode;
mod error;
pub mod frames;
pub mod keyframe;
pub mod message;
pub mod patch;
pub mod playback;
pub mod raster;
pub mod render;
pub mod session;

pub use anyhow::{Error, Result};
pub use config::{Config, LoadingPolicy};
pub use error::CodecError;
pub use frames::{DeltaFrame, DeltaFrameBuffer};
pub use keyframe::KeyframeStore;
pub use message::{Message, MessageKey};
pub use patch::Patch;
pub use playback::{PlaybackDriver, PlaybackState, TickReport};
pub use raster::Raster;
pub use render::ScaledFrame;
pub use session::{Direction, Outbox, Screen, Session, SessionStatus};

pub type Byte = u8;
