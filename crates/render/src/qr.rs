//! `qrcode`-backed symbol renderer.

use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use tracing::{debug, warn};

use qrlab_config::EcLevel;

use crate::error::RenderError;
use crate::{RenderRequest, RenderedSymbol, SymbolRenderer};

fn to_qr_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

/// Renders symbols with the `qrcode` crate
///
/// The module grid is stretched to fill the requested canvas exactly, with
/// an optional light quiet zone (in modules) around it.
#[derive(Debug, Clone, Default)]
pub struct QrCodeRenderer {
    quiet_zone: u32,
}

impl QrCodeRenderer {
    /// Renderer without a quiet zone
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that surrounds the grid with `modules` light modules
    pub fn with_quiet_zone(modules: u32) -> Self {
        Self {
            quiet_zone: modules,
        }
    }
}

impl SymbolRenderer for QrCodeRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderedSymbol, RenderError> {
        if request.width == 0 || request.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: request.width,
                height: request.height,
            });
        }

        let code = QrCode::with_error_correction_level(
            request.payload.as_bytes(),
            to_qr_level(request.ec_level),
        )
        .inspect_err(|e| warn!("QrCodeRenderer::render: encoding failed: {e}"))?;

        let modules = code.width();
        let colors = code.to_colors();
        let total = modules + 2 * self.quiet_zone as usize;

        let dark = Rgba(request.foreground.to_rgba());
        let light = Rgba(request.background.to_rgba());
        let (width, height) = (request.width, request.height);
        let quiet = self.quiet_zone as usize;

        let image = RgbaImage::from_fn(width, height, |x, y| {
            let gx = x as usize * total / width as usize;
            let gy = y as usize * total / height as usize;
            let inside = (quiet..quiet + modules).contains(&gx) && (quiet..quiet + modules).contains(&gy);
            if inside && colors[(gy - quiet) * modules + (gx - quiet)] == Color::Dark {
                dark
            } else {
                light
            }
        });

        debug!(
            "QrCodeRenderer::render: {} bytes -> {}x{} modules at {}x{} px",
            request.payload.len(),
            modules,
            modules,
            width,
            height
        );

        Ok(RenderedSymbol {
            display_width: width,
            display_height: height,
            // Grid width is at most 177
            modules: modules as u32,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrlab_config::{HexColor, QrSettings};

    fn request(payload: &str, size: u32) -> RenderRequest {
        RenderRequest::from_settings(&QrSettings {
            payload: payload.to_string(),
            pixel_size: size,
            ..Default::default()
        })
    }

    #[test]
    fn test_render_default_url() {
        let symbol = QrCodeRenderer::new().render(&request("https://example.com", 256)).unwrap();
        assert_eq!(symbol.display_width, 256);
        assert_eq!(symbol.display_height, 256);
        assert_eq!(symbol.image.dimensions(), (256, 256));
        assert_eq!(symbol.display_area(), 65_536);
        // 19 bytes at M needs version 2
        assert_eq!(symbol.modules, 25);
    }

    #[test]
    fn test_finder_pattern_corner_is_dark() {
        let symbol = QrCodeRenderer::new().render(&request("hi", 210)).unwrap();
        assert_eq!(*symbol.image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*symbol.image.get_pixel(209, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let symbol = QrCodeRenderer::with_quiet_zone(4).render(&request("hi", 290)).unwrap();
        assert_eq!(*symbol.image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_uses_requested_colors() {
        let mut req = request("hi", 210);
        req.foreground = HexColor::rgb(10, 20, 30);
        req.background = HexColor::rgb(200, 210, 220);
        let symbol = QrCodeRenderer::new().render(&req).unwrap();
        let mut seen_dark = false;
        let mut seen_light = false;
        for pixel in symbol.image.pixels() {
            match pixel.0 {
                [10, 20, 30, 255] => seen_dark = true,
                [200, 210, 220, 255] => seen_light = true,
                other => panic!("unexpected pixel {other:?}"),
            }
        }
        assert!(seen_dark && seen_light);
    }

    #[test]
    fn test_payload_too_long_fails() {
        let huge = "x".repeat(4000);
        let mut req = request(&huge, 256);
        req.ec_level = EcLevel::H;
        assert!(matches!(QrCodeRenderer::new().render(&req), Err(RenderError::Encode(_))));
    }

    #[test]
    fn test_zero_size_fails() {
        let mut req = request("hi", 256);
        req.width = 0;
        assert!(matches!(
            QrCodeRenderer::new().render(&req),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }
}
