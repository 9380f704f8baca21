//! QR code rendering for certificate links.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use certify_core::error::{CertifyError, Result};
use image::Luma;
use qrcode::QrCode;

/// Generate a QR code PNG image from the given data string.
pub fn generate_qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| CertifyError::Render(format!("failed to create QR code: {e}")))?;

    let image = code.render::<Luma<u8>>().quiet_zone(true).build();
    let mut png_bytes: Vec<u8> = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    image::ImageEncoder::write_image(
        encoder,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )
    .map_err(|e| CertifyError::Render(format!("failed to encode QR code PNG: {e}")))?;

    Ok(png_bytes)
}

/// The QR code for `data` as a `data:image/png;base64,...` URI.
pub fn qr_data_uri(data: &str) -> Result<String> {
    let png = generate_qr_png(data)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}
