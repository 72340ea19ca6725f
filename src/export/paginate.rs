//! Raster pagination
//!
//! Cuts the captured page image into page-height slices, encodes each slice
//! as JPEG and places them on paper-sized PDF pages inside the margins. The
//! image is scaled so its full width fills the space between the left and
//! right margins.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use log::debug;

use super::options::{mm_to_pt, PageOptions};
use crate::error::{Error, Result};

/// Resource name of the image drawn on each page.
const IMAGE_NAME: &str = "Im0";

/// Paper and content area of one PDF page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    pub left_pt: f64,
    pub top_pt: f64,
    pub content_width_pt: f64,
    pub content_height_pt: f64,
}

/// Rows of the source image that land on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub top_px: u32,
    pub height_px: u32,
}

impl PageLayout {
    pub fn new(page: &PageOptions) -> Self {
        let (width_mm, height_mm) = page.paper_size_mm();
        let margins = page.margins_mm;

        Self {
            page_width_pt: mm_to_pt(width_mm),
            page_height_pt: mm_to_pt(height_mm),
            left_pt: mm_to_pt(margins.left),
            top_pt: mm_to_pt(margins.top),
            content_width_pt: mm_to_pt(width_mm - margins.left - margins.right).max(1.0),
            content_height_pt: mm_to_pt(height_mm - margins.top - margins.bottom).max(1.0),
        }
    }

    /// Points per image pixel when the image width fills the content width.
    pub fn points_per_pixel(&self, image_width_px: u32) -> f64 {
        self.content_width_pt / f64::from(image_width_px.max(1))
    }

    /// Image rows that fit on one page.
    pub fn rows_per_page(&self, image_width_px: u32) -> u32 {
        let rows = (self.content_height_pt / self.points_per_pixel(image_width_px)).floor();
        (rows as u32).max(1)
    }

    /// Split an image of the given size into consecutive page slices.
    pub fn slices(&self, image_width_px: u32, image_height_px: u32) -> Vec<PageSlice> {
        let rows = self.rows_per_page(image_width_px);
        (0..image_height_px)
            .step_by(rows as usize)
            .map(|top_px| PageSlice {
                top_px,
                height_px: rows.min(image_height_px - top_px),
            })
            .collect()
    }
}

/// One JPEG-encoded slice.
struct EncodedSlice {
    jpeg: Vec<u8>,
    width_px: u32,
    height_px: u32,
}

/// Build a paginated PDF from a PNG capture of the whole document.
pub fn raster_pdf(png: &[u8], page: &PageOptions) -> Result<Vec<u8>> {
    let image = image::load_from_memory_with_format(png, ImageFormat::Png)
        .map_err(|e| Error::Export(format!("Failed to decode capture: {}", e)))?;
    paginate_image(&image, page)
}

/// Slice, encode and assemble an already decoded capture.
pub fn paginate_image(image: &DynamicImage, page: &PageOptions) -> Result<Vec<u8>> {
    let layout = PageLayout::new(page);
    let slices = layout.slices(image.width(), image.height());
    if slices.is_empty() {
        return Err(Error::Export("The captured document is empty".to_string()));
    }

    let quality = page.jpeg_quality_percent().clamp(1, 100) as u8;
    let encoded = slices
        .iter()
        .map(|slice| encode_slice(image, *slice, quality))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Paginated {}x{} capture into {} pages",
        image.width(),
        image.height(),
        encoded.len()
    );
    assemble_pdf(&layout, image.width(), encoded)
}

fn encode_slice(image: &DynamicImage, slice: PageSlice, quality: u8) -> Result<EncodedSlice> {
    let rgb = image
        .crop_imm(0, slice.top_px, image.width(), slice.height_px)
        .to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode_image(&rgb)
        .map_err(|e| Error::Export(format!("Failed to encode page image: {}", e)))?;

    Ok(EncodedSlice {
        jpeg,
        width_px: rgb.width(),
        height_px: rgb.height(),
    })
}

fn pdf_error(e: impl std::fmt::Display) -> Error {
    Error::Export(format!("Failed to write PDF: {}", e))
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Place each slice at the top of its own page.
fn assemble_pdf(
    layout: &PageLayout,
    image_width_px: u32,
    slices: Vec<EncodedSlice>,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let scale = layout.points_per_pixel(image_width_px);
    let mut kids: Vec<Object> = Vec::with_capacity(slices.len());

    for slice in slices {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(slice.width_px),
                "Height" => i64::from(slice.height_px),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            slice.jpeg,
        ));

        let width_pt = f64::from(slice.width_px) * scale;
        let height_pt = f64::from(slice.height_px) * scale;
        let x = layout.left_pt;
        let y = layout.page_height_pt - layout.top_pt - height_pt;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![real(width_pt), 0.into(), 0.into(), real(height_pt), real(x), real(y)],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().map_err(pdf_error)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { IMAGE_NAME => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            real(layout.page_width_pt),
            real(layout.page_height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(pdf_error)?;
    Ok(bytes)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::options::Orientation;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-2
    }

    fn white_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_a4_layout_with_margins() {
        let layout = PageLayout::new(&PageOptions::default());

        assert!(approx(layout.page_width_pt, 595.28));
        assert!(approx(layout.page_height_pt, 841.89));
        assert!(approx(layout.left_pt, 56.69));
        assert!(approx(layout.top_pt, 56.69));
        assert!(approx(layout.content_width_pt, 481.89));
        assert!(approx(layout.content_height_pt, 728.50));
    }

    #[test]
    fn test_landscape_layout() {
        let page = PageOptions {
            orientation: Orientation::Landscape,
            ..PageOptions::default()
        };
        let layout = PageLayout::new(&page);
        assert!(layout.page_width_pt > layout.page_height_pt);
    }

    #[test]
    fn test_capture_width_fills_content_width() {
        let layout = PageLayout::new(&PageOptions::default());
        // 800px at scale 2
        let scale = layout.points_per_pixel(1600);
        assert!(approx(1600.0 * scale, layout.content_width_pt));
    }

    #[test]
    fn test_slices_cover_image() {
        let layout = PageLayout::new(&PageOptions::default());
        let rows = layout.rows_per_page(160);
        let slices = layout.slices(160, 500);

        assert_eq!(rows, 241);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0], PageSlice { top_px: 0, height_px: 241 });
        assert_eq!(slices[1].top_px, 241);
        assert_eq!(slices[2].height_px, 500 - 2 * 241);
        assert_eq!(slices.iter().map(|s| s.height_px).sum::<u32>(), 500);
    }

    #[test]
    fn test_short_image_is_one_page() {
        let layout = PageLayout::new(&PageOptions::default());
        assert_eq!(layout.slices(1600, 300).len(), 1);
        assert!(layout.slices(1600, 0).is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // PDF assembly
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_paginate_image_page_count() {
        let pdf = paginate_image(&white_image(160, 500), &PageOptions::default()).unwrap();

        assert!(pdf.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_raster_pdf_from_png() {
        let mut png = Vec::new();
        white_image(200, 100)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let pdf = raster_pdf(&png, &PageOptions::default()).unwrap();
        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_raster_pdf_rejects_garbage() {
        let result = raster_pdf(b"not a png", &PageOptions::default());
        assert!(matches!(result, Err(Error::Export(_))));
    }

    #[test]
    fn test_empty_capture_fails() {
        let result = paginate_image(&white_image(100, 0), &PageOptions::default());
        assert!(matches!(result, Err(Error::Export(_))));
    }

    #[test]
    fn test_slices_are_jpeg() {
        let slice = encode_slice(
            &white_image(40, 30),
            PageSlice { top_px: 10, height_px: 20 },
            98,
        )
        .unwrap();

        assert_eq!(&slice.jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!((slice.width_px, slice.height_px), (40, 20));
    }
}
