use crate::Byte;
use derive_more::{Display, Error};

/// Ways an inbound payload or patch can be rejected.
///
/// None of them is fatal: whatever was being replaced stays in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CodecError {
    #[display("keyframe has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[display("frame slot {slot} is out of range")]
    InvalidSlot { slot: usize },
    #[display("malformed payload ({len} bytes)")]
    MalformedPayload { len: usize },
    #[display("patch at ({x}, {y}) lies outside the raster")]
    OutOfRangePatch { x: Byte, y: Byte },
    #[display("unknown message key {key}")]
    UnknownMessageKey { key: u32 },
    #[display("message key {key} is only valid for outbound messages")]
    OutboundOnly { key: u32 },
    #[display("{width}x{height} raster has coordinates that do not fit in a byte")]
    RasterTooLarge { width: usize, height: usize },
    #[display("room count {count} does not fit in a byte")]
    InvalidRoomCount { count: i64 },
    #[display("no keyframe has been loaded")]
    NotLoaded,
}
