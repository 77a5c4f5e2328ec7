use crate::{Byte, CodecError};

/// Longest room name the display accepts, terminating NUL included
pub const MAX_ROOM_NAME_LEN: usize = 32;

/// Keys of the transport dictionary entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    RoomName,
    RoomCount,
    Terrain,
    Frame,
    Switch,
    EndOfTransfer,
}

impl MessageKey {
    pub fn id(self) -> u32 {
        match self {
            Self::RoomName => 0,
            Self::RoomCount => 1,
            Self::Terrain => 2,
            Self::Frame => 3,
            Self::Switch => 4,
            Self::EndOfTransfer => 5,
        }
    }
}

impl TryFrom<u32> for MessageKey {
    type Error = CodecError;

    fn try_from(key: u32) -> Result<Self, Self::Error> {
        Ok(match key {
            0 => Self::RoomName,
            1 => Self::RoomCount,
            2 => Self::Terrain,
            3 => Self::Frame,
            4 => Self::Switch,
            5 => Self::EndOfTransfer,
            _ => return Err(CodecError::UnknownMessageKey { key }),
        })
    }
}

/// Inbound transport payloads, parsed but not yet validated against
/// raster geometry or frame capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    RoomName(String),
    RoomCount(Byte),
    Terrain(Vec<Byte>),
    Frame { slot: Byte, payload: Vec<Byte> },
    EndOfTransfer,
}

impl Message {
    pub fn decode(key: MessageKey, bytes: &[Byte]) -> Result<Self, CodecError> {
        Ok(match key {
            MessageKey::RoomName => Self::RoomName(decode_cstring(bytes)?),
            MessageKey::RoomCount => Self::RoomCount(decode_room_count(bytes)?),
            MessageKey::Terrain => Self::Terrain(bytes.to_vec()),
            MessageKey::Frame => {
                let (&slot, payload) = bytes
                    .split_first()
                    .ok_or(CodecError::MalformedPayload { len: 0 })?;

                Self::Frame {
                    slot,
                    payload: payload.to_vec(),
                }
            }
            MessageKey::EndOfTransfer => Self::EndOfTransfer,
            MessageKey::Switch => return Err(CodecError::OutboundOnly { key: key.id() }),
        })
    }

    pub fn key(&self) -> MessageKey {
        match self {
            Self::RoomName(_) => MessageKey::RoomName,
            Self::RoomCount(_) => MessageKey::RoomCount,
            Self::Terrain(_) => MessageKey::Terrain,
            Self::Frame { .. } => MessageKey::Frame,
            Self::EndOfTransfer => MessageKey::EndOfTransfer,
        }
    }

    pub fn encode(&self) -> (MessageKey, Vec<Byte>) {
        let bytes = match self {
            Self::RoomName(name) => {
                let mut bytes: Vec<Byte> = name
                    .bytes()
                    .take(MAX_ROOM_NAME_LEN - 1)
                    .collect();
                bytes.push(0);
                bytes
            }
            Self::RoomCount(count) => i32::from(*count).to_le_bytes().to_vec(),
            Self::Terrain(pixels) => pixels.clone(),
            Self::Frame { slot, payload } => {
                let mut bytes = Vec::with_capacity(payload.len() + 1);
                bytes.push(*slot);
                bytes.extend_from_slice(payload);
                bytes
            }
            Self::EndOfTransfer => Vec::new(),
        };

        (self.key(), bytes)
    }
}

/// One byte naming the room the user wants to switch to.
pub fn encode_switch(room: Byte) -> (MessageKey, [Byte; 1]) {
    (MessageKey::Switch, [room])
}

fn decode_cstring(bytes: &[Byte]) -> Result<String, CodecError> {
    if bytes.len() > MAX_ROOM_NAME_LEN {
        return Err(CodecError::MalformedPayload { len: bytes.len() });
    }
    let end = bytes.iter().position(|&byte| byte == 0).unwrap_or(bytes.len());

    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

fn decode_room_count(bytes: &[Byte]) -> Result<Byte, CodecError> {
    let count = match *bytes {
        [b0] => i64::from(b0 as i8),
        [b0, b1] => i64::from(i16::from_le_bytes([b0, b1])),
        [b0, b1, b2, b3] => i64::from(i32::from_le_bytes([b0, b1, b2, b3])),
        _ => return Err(CodecError::MalformedPayload { len: bytes.len() }),
    };

    Byte::try_from(count).map_err(|_| CodecError::InvalidRoomCount { count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unknown_key_is_rejected() {
        assert_matches!(
            MessageKey::try_from(42),
            Err(CodecError::UnknownMessageKey { key: 42 })
        );
    }

    #[test]
    fn frame_splits_slot_from_patches() {
        let message = Message::decode(MessageKey::Frame, &[3, 9, 1, 2]);

        assert_matches!(
            message,
            Ok(Message::Frame { slot: 3, payload }) if payload == [9, 1, 2]
        );
    }

    #[test]
    fn empty_frame_message_is_malformed() {
        assert_matches!(
            Message::decode(MessageKey::Frame, &[]),
            Err(CodecError::MalformedPayload { len: 0 })
        );
    }

    #[test]
    fn room_name_stops_at_nul() {
        let message = Message::decode(MessageKey::RoomName, b"W7N3\0garbage");

        assert_matches!(message, Ok(Message::RoomName(name)) if name == "W7N3");
    }

    #[test]
    fn room_name_longer_than_display_is_rejected() {
        assert_matches!(
            Message::decode(MessageKey::RoomName, &[b'a'; 33]),
            Err(CodecError::MalformedPayload { len: 33 })
        );
    }

    #[test]
    fn room_count_accepts_int_widths() {
        assert_matches!(
            Message::decode(MessageKey::RoomCount, &[3]),
            Ok(Message::RoomCount(3))
        );
        assert_matches!(
            Message::decode(MessageKey::RoomCount, &[4, 0]),
            Ok(Message::RoomCount(4))
        );
        assert_matches!(
            Message::decode(MessageKey::RoomCount, &[5, 0, 0, 0]),
            Ok(Message::RoomCount(5))
        );
    }

    #[test]
    fn negative_room_count_is_rejected() {
        assert_matches!(
            Message::decode(MessageKey::RoomCount, &[0xff, 0xff, 0xff, 0xff]),
            Err(CodecError::InvalidRoomCount { count: -1 })
        );
        assert_matches!(
            Message::decode(MessageKey::RoomCount, &[1, 2, 3]),
            Err(CodecError::MalformedPayload { len: 3 })
        );
    }

    #[test]
    fn switch_is_outbound_only() {
        assert_matches!(
            Message::decode(MessageKey::Switch, &[1]),
            Err(CodecError::OutboundOnly { key: 4 })
        );
        assert_eq!(encode_switch(7), (MessageKey::Switch, [7]));
    }

    #[test]
    fn encoded_room_name_is_nul_terminated() {
        let (key, bytes) = Message::RoomName("E1S1".into()).encode();

        assert_eq!(key, MessageKey::RoomName);
        assert_eq!(bytes, b"E1S1\0");
    }
}
