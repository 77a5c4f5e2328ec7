use crate::Byte;

/// Size of a single encoded patch record: value, x, y
pub const PATCH_SIZE: usize = 3;

/// "Set pixel (x, y) to value"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Patch {
    pub value: Byte,
    pub x: Byte,
    pub y: Byte,
}

impl Patch {
    pub fn new(value: Byte, x: Byte, y: Byte) -> Self {
        Self { value, x, y }
    }

    pub fn to_bytes(self) -> [Byte; PATCH_SIZE] {
        [self.value, self.x, self.y]
    }
}

impl From<[Byte; PATCH_SIZE]> for Patch {
    fn from([value, x, y]: [Byte; PATCH_SIZE]) -> Self {
        Self { value, x, y }
    }
}
