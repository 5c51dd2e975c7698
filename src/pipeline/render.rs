//! Page rasterisation for the oracle: render each page via pdfium and wrap it
//! as a base64 PNG [`ImageData`] attachment.
//!
//! `max_rendered_pixels` caps the longest edge so a large page never turns
//! into an oversized upload. PNG keeps printed marks crisp; lossy artefacts
//! around digits make the model misread them.

use crate::error::SgpaError;
use crate::pipeline::text::{bind_pdfium, map_load_error};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::ImageData;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::io::Cursor;
use tracing::{debug, info};

/// Rasterise and encode every page of an in-memory PDF.
pub async fn render_page_images(
    name: &str,
    bytes: Vec<u8>,
    password: Option<String>,
    max_pixels: u32,
) -> Result<Vec<ImageData>, SgpaError> {
    let name = name.to_string();
    tokio::task::spawn_blocking(move || {
        render_pages_blocking(&name, &bytes, password.as_deref(), max_pixels)
    })
    .await
    .map_err(|e| SgpaError::Internal(format!("Render task panicked: {e}")))?
}

fn render_pages_blocking(
    name: &str,
    bytes: &[u8],
    password: Option<&str>,
    max_pixels: u32,
) -> Result<Vec<ImageData>, SgpaError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| map_load_error(name, e))?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let pages = document.pages();
    info!("Rendering {} pages for the oracle", pages.len());

    let mut images = Vec::with_capacity(pages.len() as usize);
    for index in 0..pages.len() {
        let raster_err = |e: PdfiumError| SgpaError::CorruptPdf {
            name: name.to_string(),
            detail: format!("page {} could not be rendered: {e}", index + 1),
        };

        let page = pages.get(index).map_err(raster_err)?;
        let bitmap = page.render_with_config(&render_config).map_err(raster_err)?;
        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );

        images.push(encode_page(&image).map_err(|e| {
            SgpaError::Internal(format!("PNG encoding of page {} failed: {e}", index + 1))
        })?);
    }

    Ok(images)
}

/// Encode a rendered page as a base64 PNG attachment.
pub fn encode_page(img: &DynamicImage) -> Result<ImageData, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    let b64 = STANDARD.encode(&buf);
    debug!("Encoded page → {} bytes base64", b64.len());
    Ok(ImageData::new(b64, "image/png").with_detail("high"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn encode_small_page() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 12, Rgba([255, 255, 255, 255])));
        let data = encode_page(&img).expect("encode should succeed");
        assert_eq!(data.mime_type, "image/png");
        let png = STANDARD.decode(&data.data).expect("valid base64");
        assert_eq!(&png[1..4], b"PNG");
    }
}
