use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use eframe::egui;
use stablephone_common::warn;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image payload is not a supported picture: {0}")]
    Image(#[from] image::ImageError),
}

/// Decodes a base64 picture as sent by the server. A `data:` URL prefix is
/// tolerated.
pub fn decode_payload(payload: &str) -> Result<egui::ColorImage, ImageDecodeError> {
    let encoded = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    let bytes = STANDARD.decode(encoded.trim())?;
    let rgba = image::load_from_memory(&bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Textures for image payloads, decoded once per distinct payload. Failed
/// decodes are remembered too so a broken image is not retried every frame.
#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<u64, Option<egui::TextureHandle>>,
}

impl ImageCache {
    pub fn texture(&mut self, ctx: &egui::Context, payload: &str) -> Option<egui::TextureHandle> {
        let key = payload_key(payload);
        self.textures
            .entry(key)
            .or_insert_with(|| match decode_payload(payload) {
                Ok(image) => Some(ctx.load_texture(format!("payload-{:016x}", key), image, Default::default())),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

fn payload_key(payload: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    hasher.finish()
}

/// Draws a payload scaled into `max_size`, or a placeholder frame when it
/// cannot be shown. `opacity` fades the picture during a swap.
pub fn show_payload(
    ui: &mut egui::Ui,
    cache: &mut ImageCache,
    payload: &str,
    max_size: egui::Vec2,
    opacity: f32,
) -> egui::Response {
    match cache.texture(ui.ctx(), payload) {
        Some(texture) => {
            let sized = egui::load::SizedTexture::from_handle(&texture);
            ui.add(
                egui::Image::new(sized)
                    .max_size(max_size)
                    .tint(egui::Color32::WHITE.gamma_multiply(opacity))
                    .sense(egui::Sense::click()),
            )
        }
        None => placeholder(ui, max_size, "Image unavailable"),
    }
}

pub fn placeholder(ui: &mut egui::Ui, size: egui::Vec2, text: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 8.0, ui.visuals().faint_bg_color);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_payload(width: u32, height: u32) -> String {
        let picture = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut bytes = Cursor::new(Vec::new());
        picture.write_to(&mut bytes, ImageFormat::Png).unwrap();
        STANDARD.encode(bytes.into_inner())
    }

    #[test]
    fn test_decode_png_payload() {
        let image = decode_payload(&png_payload(3, 2)).unwrap();
        assert_eq!(image.size, [3, 2]);
    }

    #[test]
    fn test_decode_data_url_payload() {
        let payload = format!("data:image/png;base64,{}", png_payload(1, 1));
        assert_eq!(decode_payload(&payload).unwrap().size, [1, 1]);
    }

    #[test]
    fn test_broken_payloads_are_errors() {
        assert!(matches!(decode_payload("%%%"), Err(ImageDecodeError::Base64(_))));
        assert!(matches!(
            decode_payload(&STANDARD.encode(b"not a picture")),
            Err(ImageDecodeError::Image(_))
        ));
    }

    #[test]
    fn test_cache_decodes_each_payload_once() {
        let ctx = egui::Context::default();
        let mut cache = ImageCache::default();
        let payload = png_payload(2, 2);

        assert!(cache.texture(&ctx, &payload).is_some());
        assert!(cache.texture(&ctx, &payload).is_some());
        assert!(cache.texture(&ctx, "%%%").is_none());
        assert_eq!(cache.textures.len(), 2);

        cache.clear();
        assert_eq!(cache.textures.len(), 0);
    }
}
