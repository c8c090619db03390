//! Raster images placed in the report (the cover logo)
//!
//! Images are decoded once before layout so the cover can size the logo by
//! its aspect ratio, then written as Flate-compressed RGB XObjects. An
//! alpha channel becomes a separate DeviceGray soft mask.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use log::debug;
use pdf_writer::{Filter, Pdf, Ref};

use crate::error::{ReportError, ReportResult};

/// Decoded image ready to be written as an XObject
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Decode PNG or JPEG bytes
    pub fn decode(bytes: &[u8]) -> ReportResult<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(image))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let pixels = (width * height) as usize;
            let mut rgb = Vec::with_capacity(pixels * 3);
            let mut alpha = Vec::with_capacity(pixels);
            for chunk in rgba.as_raw().chunks_exact(4) {
                rgb.extend_from_slice(&chunk[..3]);
                alpha.push(chunk[3]);
            }
            // A fully opaque alpha channel is dropped
            let alpha = alpha.iter().any(|&a| a < u8::MAX).then_some(alpha);
            Self {
                width,
                height,
                rgb,
                alpha,
            }
        } else {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                rgb: rgb.into_raw(),
                alpha: None,
            }
        }
    }

    /// Width divided by height
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Write the image (and its soft mask) and return the image object id
    pub fn write(&self, pdf: &mut Pdf, mut next_ref: impl FnMut() -> Ref) -> ReportResult<Ref> {
        let smask_id = match &self.alpha {
            Some(alpha) => {
                let id = next_ref();
                let data = deflate(alpha)?;
                let mut smask = pdf.image_xobject(id, &data);
                smask.filter(Filter::FlateDecode);
                smask.width(self.width as i32);
                smask.height(self.height as i32);
                smask.color_space().device_gray();
                smask.bits_per_component(8);
                Some(id)
            }
            None => None,
        };

        let image_id = next_ref();
        let data = deflate(&self.rgb)?;
        let mut xobject = pdf.image_xobject(image_id, &data);
        xobject.filter(Filter::FlateDecode);
        xobject.width(self.width as i32);
        xobject.height(self.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(smask_id) = smask_id {
            xobject.s_mask(smask_id);
        }
        debug!(
            "image XObject {} written: {}x{}, soft mask: {}",
            image_id.get(),
            self.width,
            self.height,
            smask_id.is_some()
        );
        Ok(image_id)
    }
}

/// XObject resource name for the image at `index`
pub fn image_resource_name(index: usize) -> String {
    format!("Im{}", index)
}

/// Zlib-compress a stream for `/FlateDecode`
pub fn deflate(data: &[u8]) -> ReportResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ReportError::Serialization(format!("compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| ReportError::Serialization(format!("compression failed: {}", e)))
}
