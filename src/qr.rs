use qrcode::render::svg;
use qrcode::QrCode;
use tracing::warn;

use crate::constants::QR_MIN_DIMENSION;

pub fn qr_svg(data: &str) -> Option<String> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }
    let code = match QrCode::new(data.as_bytes()) {
        Ok(code) => code,
        Err(err) => {
            warn!(?err, "failed to encode QR code");
            return None;
        }
    };
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Some(image)
}
