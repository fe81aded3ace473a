//! Tile composition.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use stackscope_protocols::CaptureError;

use crate::plan::CapturePlan;

/// One captured viewport.
#[derive(Debug, Clone)]
pub struct Tile {
    pub index: usize,
    /// Encoded image bytes as returned by the device.
    pub bytes: Vec<u8>,
    /// CSS pixels at the top of the capture already covered by the previous
    /// tile. Non-zero when the browser clamped the scroll at the document end.
    pub overlap: f64,
}

/// Compose tiles onto a canvas sized by `plan`.
///
/// Tile `i` is drawn at `plan.tile_y(i)`; anything past the canvas bottom is
/// clipped.
pub fn stitch_tiles(plan: &CapturePlan, tiles: &[Tile]) -> Result<RgbImage, CaptureError> {
    let mut canvas = RgbImage::from_pixel(plan.canvas_width, plan.canvas_height, Rgb([255, 255, 255]));

    for tile in tiles {
        let dest_y = plan.tile_y(tile.index);
        if dest_y >= plan.canvas_height {
            continue;
        }

        let mut image = image::load_from_memory(&tile.bytes)
            .map_err(|e| CaptureError::Image(format!("Failed to decode tile {}: {}", tile.index, e)))?
            .to_rgb8();
        if plan.scale < 1.0 {
            let width = scaled(image.width(), plan.scale);
            let height = scaled(image.height(), plan.scale);
            image = imageops::resize(&image, width, height, FilterType::Triangle);
        }

        let offset = plan.css_to_canvas(tile.overlap).min(image.height());
        let height = (image.height() - offset).min(plan.canvas_height - dest_y);
        let width = image.width().min(plan.canvas_width);
        if height == 0 || width == 0 {
            continue;
        }
        let visible = imageops::crop_imm(&image, 0, offset, width, height).to_image();
        imageops::replace(&mut canvas, &visible, 0, i64::from(dest_y));
    }

    Ok(canvas)
}

/// Rounded up: tile `i + 1` starts at most `ceil(tile height)` rows below
/// tile `i`, so consecutive tiles always meet.
fn scaled(length: u32, scale: f64) -> u32 {
    (f64::from(length) * scale).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use stackscope_config::CaptureConfig;
    use stackscope_protocols::PageMetrics;
    use std::io::Cursor;

    const RED: Rgb<u8> = Rgb([220, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 200, 0]);
    const BLUE: Rgb<u8> = Rgb([37, 99, 235]);

    /// PNG whose first `split` rows are `top` and the rest `bottom`.
    fn png(width: u32, height: u32, split: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |_, y| if y < split { top } else { bottom });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn plan(total: f64, dpr: f64, config: &CaptureConfig) -> CapturePlan {
        let metrics = PageMetrics {
            viewport_width: 100.0,
            viewport_height: 50.0,
            total_height: total,
            device_pixel_ratio: dpr,
            ..Default::default()
        };
        CapturePlan::new(&metrics, config).unwrap()
    }

    #[test]
    fn test_tiles_stacked_and_clipped() {
        let plan = plan(80.0, 1.0, &CaptureConfig::default());
        let tiles = vec![
            Tile {
                index: 0,
                bytes: png(100, 50, 50, RED, RED),
                overlap: 0.0,
            },
            Tile {
                index: 1,
                bytes: png(100, 50, 50, GREEN, GREEN),
                overlap: 0.0,
            },
        ];
        let canvas = stitch_tiles(&plan, &tiles).unwrap();
        assert_eq!(canvas.dimensions(), (100, 80));
        assert_eq!(*canvas.get_pixel(10, 10), RED);
        assert_eq!(*canvas.get_pixel(10, 49), RED);
        assert_eq!(*canvas.get_pixel(10, 50), GREEN);
        assert_eq!(*canvas.get_pixel(10, 79), GREEN);
    }

    #[test]
    fn test_clamped_scroll_skips_overlap() {
        let plan = plan(80.0, 1.0, &CaptureConfig::default());
        // Scrolled to 30 instead of 50: the first 20 rows repeat tile 0.
        let tiles = vec![
            Tile {
                index: 0,
                bytes: png(100, 50, 50, RED, RED),
                overlap: 0.0,
            },
            Tile {
                index: 1,
                bytes: png(100, 50, 20, RED, GREEN),
                overlap: 20.0,
            },
        ];
        let canvas = stitch_tiles(&plan, &tiles).unwrap();
        assert_eq!(*canvas.get_pixel(10, 49), RED);
        assert_eq!(*canvas.get_pixel(10, 50), GREEN);
        assert_eq!(*canvas.get_pixel(10, 79), GREEN);
    }

    #[test]
    fn test_downscaled_tiles() {
        let config = CaptureConfig {
            max_canvas_width: 100,
            ..Default::default()
        };
        let plan = plan(100.0, 2.0, &config);
        assert_eq!(plan.scale, 0.5);
        let tiles = vec![
            Tile {
                index: 0,
                bytes: png(200, 100, 100, RED, RED),
                overlap: 0.0,
            },
            Tile {
                index: 1,
                bytes: png(200, 100, 100, GREEN, GREEN),
                overlap: 0.0,
            },
        ];
        let canvas = stitch_tiles(&plan, &tiles).unwrap();
        assert_eq!(canvas.dimensions(), (100, 100));
        assert_eq!(*canvas.get_pixel(50, 25), RED);
        assert_eq!(*canvas.get_pixel(50, 75), GREEN);
    }

    #[test]
    fn test_fractional_scale_leaves_no_gaps() {
        let config = CaptureConfig {
            max_canvas_width: 200,
            ..Default::default()
        };
        let metrics = PageMetrics {
            viewport_width: 1000.0,
            viewport_height: 502.0,
            total_height: 1506.0,
            device_pixel_ratio: 1.0,
            ..Default::default()
        };
        let plan = CapturePlan::new(&metrics, &config).unwrap();
        assert_eq!(plan.tile_count, 3);
        assert_eq!((plan.canvas_width, plan.canvas_height), (200, 301));

        let tiles: Vec<Tile> = (0..3)
            .map(|index| Tile {
                index,
                bytes: png(1000, 502, 502, BLUE, BLUE),
                overlap: 0.0,
            })
            .collect();
        let canvas = stitch_tiles(&plan, &tiles).unwrap();
        let white_rows: Vec<u32> = (0..canvas.height())
            .filter(|&y| *canvas.get_pixel(100, y) == Rgb([255, 255, 255]))
            .collect();
        assert!(white_rows.is_empty(), "unpainted rows: {white_rows:?}");
    }

    #[test]
    fn test_undecodable_tile() {
        let plan = plan(50.0, 1.0, &CaptureConfig::default());
        let tiles = vec![Tile {
            index: 0,
            bytes: b"not an image".to_vec(),
            overlap: 0.0,
        }];
        assert!(matches!(stitch_tiles(&plan, &tiles), Err(CaptureError::Image(_))));
    }
}
