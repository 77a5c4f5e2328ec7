use crate::patch::Patch;
use crate::{Byte, CodecError};

/// Single-channel indexed-colour image, row-major (`x + y * width`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Byte>,
}

impl Raster {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Copies `bytes` verbatim. The length must be exactly `width * height`.
    pub fn from_bytes(width: usize, height: usize, bytes: &[Byte]) -> Result<Self, CodecError> {
        let expected = width * height;
        if bytes.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: bytes.to_vec(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_bytes(&self) -> &[Byte] {
        &self.pixels
    }

    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x + y * self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Byte> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: Byte) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Writes a single patch, refusing coordinates outside the raster.
    pub fn apply(&mut self, patch: Patch) -> Result<(), CodecError> {
        if self.set_pixel(patch.x.into(), patch.y.into(), patch.value) {
            Ok(())
        } else {
            Err(CodecError::OutOfRangePatch {
                x: patch.x,
                y: patch.y,
            })
        }
    }

    pub fn same_dimensions(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }
}
