//! Indexed colours are 8-bit `AARRGGBB` values, two bits per channel.
//!
//! ```text
//! 7  bit  0
//! ---- ----
//! AARR GGBB
//! |||| ||++- Blue
//! |||| ++--- Green
//! ||++------ Red
//! ++-------- Alpha (ignored when rendering; every pixel is drawn opaque)
//! ```

use crate::Byte;
use crate::render::Rgb;
use once_cell::sync::Lazy;

pub const PLAIN: Byte = 213;
pub const ROAD: Byte = 234;
pub const WALL: Byte = 192;
pub const SWAMP: Byte = 216;
pub const STRUCTURE: Byte = 252;
pub const EMPTY_STRUCTURE: Byte = 232;
pub const CREEP: Byte = 199;
pub const CONTROLLER: Byte = 255;
pub const UNKNOWN: Byte = 220;

static PALETTE: Lazy<[Rgb; 256]> = Lazy::new(|| {
    let mut palette = [(0, 0, 0); 256];
    for (value, entry) in palette.iter_mut().enumerate() {
        let value = value as Byte;
        *entry = (
            expand(value >> 4),
            expand(value >> 2),
            expand(value),
        );
    }

    palette
});

fn expand(channel: Byte) -> Byte {
    (channel & 0b11) * 85
}

pub fn rgb(value: Byte) -> Rgb {
    PALETTE[value as usize]
}
