use crate::patch::{PATCH_SIZE, Patch};
use crate::{Byte, CodecError};
use log::debug;

/// Sparse list of patches applied on top of the previous raster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaFrame {
    patches: Vec<Patch>,
}

impl DeltaFrame {
    /// Parses a sequence of (value, x, y) records.
    pub fn decode(payload: &[Byte]) -> Result<Self, CodecError> {
        if payload.len() % PATCH_SIZE != 0 {
            return Err(CodecError::MalformedPayload { len: payload.len() });
        }

        let patches = payload
            .chunks_exact(PATCH_SIZE)
            .map(|record| Patch::new(record[0], record[1], record[2]))
            .collect();

        Ok(Self { patches })
    }

    pub fn encode(&self) -> Vec<Byte> {
        self.patches
            .iter()
            .flat_map(|patch| patch.to_bytes())
            .collect()
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl FromIterator<Patch> for DeltaFrame {
    fn from_iter<I: IntoIterator<Item = Patch>>(iter: I) -> Self {
        Self {
            patches: iter.into_iter().collect(),
        }
    }
}

/// Fixed number of optional frame slots, addressed by index.
#[derive(Debug)]
pub struct DeltaFrameBuffer {
    slots: Vec<Option<DeltaFrame>>,
    highest_received: Option<usize>,
}

impl DeltaFrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            highest_received: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Overwrites `slot` with the patches in `payload`.
    ///
    /// The slot keeps its previous contents if either check fails.
    pub fn store_frame(&mut self, slot: usize, payload: &[Byte]) -> Result<&DeltaFrame, CodecError> {
        if slot >= self.capacity() {
            return Err(CodecError::InvalidSlot { slot });
        }
        let frame = DeltaFrame::decode(payload)?;
        debug!("Stored frame {slot} ({} patches)", frame.len());

        self.highest_received = self.highest_received.max(Some(slot));

        Ok(&*self.slots[slot].insert(frame))
    }

    pub fn frame(&self, slot: usize) -> Option<&DeltaFrame> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Largest slot ever stored, kept across [`Self::clear_all`]. A progress
    /// hint only: slots below it may still be empty.
    pub fn highest_received_slot(&self) -> Option<usize> {
        self.highest_received
    }

    pub fn stored_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_splits_records() {
        let frame = DeltaFrame::decode(&[9, 1, 2, 213, 49, 0]).expect("Failed to decode frame");

        assert_eq!(frame.patches(), &[Patch::new(9, 1, 2), Patch::new(213, 49, 0)]);
    }

    #[test]
    fn decode_rejects_partial_record() {
        assert_matches!(
            DeltaFrame::decode(&[9, 1, 2, 3]),
            Err(CodecError::MalformedPayload { len: 4 })
        );
    }

    #[test]
    fn empty_payload_is_an_empty_frame() {
        let frame = DeltaFrame::decode(&[]).expect("Failed to decode frame");

        assert!(frame.is_empty());
    }

    #[test]
    fn stored_frame_reads_back_unchanged() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);
        let payload = [1, 2, 3, 4, 5, 6, 7, 8, 9];

        buffer.store_frame(4, &payload).expect("Failed to store frame");

        let stored = buffer.frame(4).expect("Frame 4 missing");
        assert_eq!(stored.encode(), payload.to_vec());
        assert_eq!(buffer.stored_count(), 1);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);

        assert_matches!(
            buffer.store_frame(20, &[]),
            Err(CodecError::InvalidSlot { slot: 20 })
        );
        assert_eq!(buffer.highest_received_slot(), None);
    }

    #[test]
    fn malformed_payload_leaves_slot_untouched() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);
        buffer.store_frame(2, &[5, 5, 5]).expect("Failed to store frame");

        assert_matches!(
            buffer.store_frame(2, &[1, 1]),
            Err(CodecError::MalformedPayload { len: 2 })
        );
        assert_eq!(buffer.frame(2).map(DeltaFrame::encode), Some(vec![5, 5, 5]));
    }

    #[test]
    fn storing_again_overwrites_slot() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);
        buffer.store_frame(0, &[1, 1, 1, 2, 2, 2]).expect("Failed to store frame");
        buffer.store_frame(0, &[3, 3, 3]).expect("Failed to store frame");

        assert_eq!(buffer.frame(0).map(DeltaFrame::len), Some(1));
    }

    #[test]
    fn highest_received_slot_tracks_maximum() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);
        buffer.store_frame(7, &[]).expect("Failed to store frame");
        buffer.store_frame(3, &[]).expect("Failed to store frame");

        assert_eq!(buffer.highest_received_slot(), Some(7));
    }

    #[test]
    fn clear_all_empties_every_slot() {
        let mut buffer = DeltaFrameBuffer::with_capacity(20);
        for slot in 0..20 {
            buffer.store_frame(slot, &[1, 0, 0]).expect("Failed to store frame");
        }

        buffer.clear_all();

        assert_eq!(buffer.stored_count(), 0);
        assert_eq!(buffer.highest_received_slot(), Some(19));
        assert!(buffer.frame(0).is_none());
    }
}
