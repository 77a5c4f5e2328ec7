//! Sender side of the codec: turns two consecutive rasters into a frame
//! message payload.

use crate::patch::Patch;
use crate::raster::Raster;
use crate::{Byte, CodecError};

/// Above this share of changed pixels a frame no longer fits the
/// receiver's message buffer.
pub const MAX_CHANGE_RATIO: f32 = 0.3;

/// Every pixel that differs between `old` and `new`, scanned row by row.
pub fn diff_patches(old: &Raster, new: &Raster) -> Result<Vec<Patch>, CodecError> {
    if !old.same_dimensions(new) {
        return Err(CodecError::SizeMismatch {
            expected: old.len(),
            actual: new.len(),
        });
    }

    let (width, height) = (new.width(), new.height());
    let too_large = CodecError::RasterTooLarge { width, height };
    let max_side = usize::from(Byte::MAX) + 1;
    if width > max_side || height > max_side {
        return Err(too_large);
    }

    old.as_bytes()
        .iter()
        .zip(new.as_bytes())
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(idx, (_, &after))| {
            let x = Byte::try_from(idx % width).map_err(|_| too_large)?;
            let y = Byte::try_from(idx / width).map_err(|_| too_large)?;

            Ok(Patch::new(after, x, y))
        })
        .collect()
}

/// Frame message payload: the slot byte followed by one record per
/// changed pixel.
pub fn diff_rasters(slot: Byte, old: &Raster, new: &Raster) -> Result<Vec<Byte>, CodecError> {
    let patches = diff_patches(old, new)?;

    let mut payload = Vec::with_capacity(1 + patches.len() * 3);
    payload.push(slot);
    payload.extend(patches.into_iter().flat_map(Patch::to_bytes));

    Ok(payload)
}

pub fn change_ratio(old: &Raster, new: &Raster) -> Result<f32, CodecError> {
    let changed = diff_patches(old, new)?.len();

    Ok(match new.len() {
        0 => 0.0,
        len => changed as f32 / len as f32,
    })
}
