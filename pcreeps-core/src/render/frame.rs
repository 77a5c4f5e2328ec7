use crate::Byte;
use crate::raster::Raster;
use crate::render::palette;

/// Display-resolution copy of a raster. Consumers only ever get a shared
/// reference to it; the live raster is never handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledFrame {
    width: usize,
    height: usize,
    pixel_data: Vec<Byte>,
}

impl ScaledFrame {
    /// Nearest-neighbour upscale: every source pixel becomes a
    /// `scale` x `scale` block.
    pub fn from_raster(raster: &Raster, scale: usize) -> Self {
        let scale = scale.max(1);
        let width = raster.width() * scale;
        let height = raster.height() * scale;
        let source = raster.as_bytes();

        let mut pixel_data = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = &source[(y / scale) * raster.width()..][..raster.width()];
            for &pixel in row {
                pixel_data.extend(std::iter::repeat_n(pixel, scale));
            }
        }

        Self {
            width,
            height,
            pixel_data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_data(&self) -> &[Byte] {
        &self.pixel_data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Byte> {
        (x < self.width && y < self.height).then(|| self.pixel_data[x + y * self.width])
    }

    /// Expands the indexed pixels into an RGB24 buffer.
    pub fn to_rgb(&self) -> Vec<Byte> {
        self.pixel_data
            .iter()
            .flat_map(|&pixel| {
                let (r, g, b) = palette::rgb(pixel);
                [r, g, b]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;
    use pretty_assertions::assert_eq;

    #[test]
    fn upscales_each_pixel_into_a_block() {
        let mut raster = Raster::blank(50, 50);
        raster.apply(Patch::new(9, 1, 2)).expect("Failed to patch");

        let frame = ScaledFrame::from_raster(&raster, 5);

        assert_eq!((frame.width(), frame.height()), (250, 250));
        assert_eq!(frame.pixel_data().len(), 250 * 250);
        for y in 10..15 {
            for x in 5..10 {
                assert_eq!(frame.get(x, y), Some(9));
            }
        }
        assert_eq!(frame.get(4, 10), Some(0));
        assert_eq!(frame.get(10, 10), Some(0));
        assert_eq!(frame.get(5, 15), Some(0));
    }

    #[test]
    fn scale_of_one_is_a_plain_copy() {
        let raster = Raster::from_bytes(2, 2, &[1, 2, 3, 4]).expect("Failed to build raster");

        let frame = ScaledFrame::from_raster(&raster, 1);

        assert_eq!(frame.pixel_data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn rgb_buffer_has_three_bytes_per_pixel() {
        let raster = Raster::from_bytes(1, 1, &[0b1111_0000]).expect("Failed to build raster");

        let frame = ScaledFrame::from_raster(&raster, 2);

        assert_eq!(frame.to_rgb(), [255, 0, 0].repeat(4));
    }
}
