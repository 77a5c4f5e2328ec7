use crate::Byte;

mod frame;
pub mod palette;

pub use frame::ScaledFrame;

pub type Rgb = (Byte, Byte, Byte);
