//! PNG encoding of map images.

use std::path::Path;

use super::image::MapImage;
use crate::error::ExportError;

/// A pixel type that can be written to PNG.
pub trait PngPixel: Copy {
    const COLOR: png::ColorType;
    const DEPTH: png::BitDepth;

    /// Append this pixel's bytes in PNG sample order.
    fn write_bytes(&self, out: &mut Vec<u8>);
}

impl PngPixel for u8 {
    const COLOR: png::ColorType = png::ColorType::Grayscale;
    const DEPTH: png::BitDepth = png::BitDepth::Eight;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl PngPixel for u16 {
    const COLOR: png::ColorType = png::ColorType::Grayscale;
    const DEPTH: png::BitDepth = png::BitDepth::Sixteen;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        // PNG stores 16-bit samples big-endian.
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl PngPixel for [u8; 4] {
    const COLOR: png::ColorType = png::ColorType::Rgba;
    const DEPTH: png::BitDepth = png::BitDepth::Eight;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl<P: PngPixel> MapImage<P> {
    /// Encode the image as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyImage`] for a zero-sized image, or
    /// [`ExportError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            pixel.write_bytes(&mut data);
        }

        let mut png_buf = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(std::io::Cursor::new(&mut png_buf), self.width, self.height);
            encoder.set_color(P::COLOR);
            encoder.set_depth(P::DEPTH);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
            writer.finish()?;
        }
        Ok(png_buf)
    }

    /// Encode the image and write it to `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_gray8_roundtrips_through_decoder() {
        let mut image: MapImage<u8> = MapImage::new(3, 2);
        image.set_pixel(2, 1, 200);
        let bytes = image.encode_png().unwrap();
        assert_eq!(bytes[..8], PNG_SIGNATURE);

        let (info, data) = decode(&bytes);
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        assert_eq!(data[5], 200);
    }

    #[test]
    fn test_gray16_is_big_endian() {
        let mut image: MapImage<u16> = MapImage::new(1, 1);
        image.set_pixel(0, 0, 0x1234);
        let (info, data) = decode(&image.encode_png().unwrap());
        assert_eq!(info.bit_depth, png::BitDepth::Sixteen);
        assert_eq!(data, vec![0x12, 0x34]);
    }

    #[test]
    fn test_rgba_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let mut image: MapImage<[u8; 4]> = MapImage::new(2, 2);
        image.set_pixel(1, 1, [10, 20, 30, 255]);
        image.save_png(&path).unwrap();

        let (info, data) = decode(&std::fs::read(&path).unwrap());
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&data[12..16], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let image: MapImage<u8> = MapImage::new(0, 4);
        assert!(matches!(
            image.encode_png(),
            Err(ExportError::EmptyImage { width: 0, height: 4 })
        ));
    }
}
