use crate::raster::Raster;
use crate::{Byte, CodecError};
use log::info;

/// Owns the base raster ("terrain") a transfer's deltas are computed against.
///
/// Two copies are kept: the keyframe as received, and the working raster
/// that playback mutates in place. Restarting playback rewinds the latter
/// from the former.
#[derive(Debug)]
pub struct KeyframeStore {
    width: usize,
    height: usize,
    keyframe: Option<Raster>,
    current: Option<Raster>,
}

impl KeyframeStore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            keyframe: None,
            current: None,
        }
    }

    /// Replaces the stored raster with `bytes`.
    ///
    /// On [`CodecError::SizeMismatch`] the previous raster is left untouched.
    pub fn load_keyframe(&mut self, bytes: &[Byte]) -> Result<&Raster, CodecError> {
        let raster = Raster::from_bytes(self.width, self.height, bytes)?;
        info!("Loaded {}x{} keyframe", self.width, self.height);

        self.keyframe = Some(raster.clone());
        Ok(&*self.current.insert(raster))
    }

    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Raster> {
        self.current.as_mut()
    }

    pub fn keyframe(&self) -> Option<&Raster> {
        self.keyframe.as_ref()
    }

    /// Restores the working raster to the keyframe as it was received.
    pub fn rewind(&mut self) -> Result<&mut Raster, CodecError> {
        let keyframe = self.keyframe.as_ref().ok_or(CodecError::NotLoaded)?;

        match &mut self.current {
            Some(current) => current.clone_from(keyframe),
            None => self.current = Some(keyframe.clone()),
        }

        self.current.as_mut().ok_or(CodecError::NotLoaded)
    }

    pub fn clear(&mut self) {
        self.keyframe = None;
        self.current = None;
    }
}
