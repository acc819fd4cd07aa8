use crate::refs::{ObjectReferences, RefType};
use crate::ComposeError;
use id_arena::Id;
use image::{ColorType, DynamicImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

enum ImageData {
    /// Baseline RGB JPEGs are embedded as-is
    Jpeg(Vec<u8>),
    Raster(DynamicImage),
}

/// A decoded raster image (the header logo) that can be placed on any page
pub struct Image {
    data: ImageData,
    pub width: u32,
    pub height: u32,
}

pub type ImageId = Id<Image>;

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.data {
            ImageData::Jpeg(_) => "jpeg",
            ImageData::Raster(_) => "raster",
        };
        f.debug_struct("Image")
            .field("kind", &kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode a PNG or JPEG from memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Image, ComposeError> {
        let format = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        let (width, height) = (decoded.width(), decoded.height());

        let data = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => ImageData::Jpeg(bytes),
            _ => ImageData::Raster(decoded),
        };
        Ok(Image {
            data,
            width,
            height,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image, ComposeError> {
        Image::from_bytes(std::fs::read(path)?)
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            ImageData::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // alpha channel goes into a separate greyscale soft mask
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(3, 2, |x, _| Rgba([x as u8 * 80, 10, 200, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("can encode png");
        bytes
    }

    #[test]
    fn decodes_png_with_alpha_mask() {
        let image = Image::from_bytes(tiny_png()).expect("png decodes");
        assert_eq!((image.width, image.height), (3, 2));
        let encoded = image.encode();
        assert!(encoded.mask.is_some());
    }

    #[test]
    fn rejects_unknown_data() {
        assert!(Image::from_bytes(b"definitely not an image".to_vec()).is_err());
    }
}
