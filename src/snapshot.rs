use std::path::{Path, PathBuf};

use eframe::egui::Vec2;
use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::color::Rgb;
use crate::scene::Shape;
use crate::Error;

/// Paints `shapes` onto a black canvas. Text is left out: there is no font
/// rasteriser here.
pub fn rasterize(shapes: &[Shape], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    for shape in shapes {
        match shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => fill_circle(&mut image, *center, *radius, *color),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => stroke_segment(&mut image, *from, *to, *width, *color),
            Shape::Path {
                points,
                width,
                color,
            } => {
                for pair in points.windows(2) {
                    stroke_segment(&mut image, pair[0], pair[1], *width, *color);
                }
            }
            Shape::Text { .. } => {}
        }
    }
    image
}

/// Rasterises and writes a timestamped PNG into `directory`.
pub fn save(shapes: &[Shape], width: u32, height: u32, directory: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(directory).map_err(|e| Error::io(directory, e))?;
    let name = format!(
        "moodstone-{}.png",
        chrono::Local::now().format("%Y%m%d-%H%M%S%.3f")
    );
    let path = directory.join(name);
    debug!(shapes = shapes.len(), width, height, "rasterizing snapshot");
    rasterize(shapes, width, height).save(&path)?;
    info!(path = %path.display(), "snapshot saved");
    Ok(path)
}

fn put(image: &mut RgbaImage, x: i64, y: i64, color: Rgb) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    image.put_pixel(x as u32, y as u32, Rgba([color.r, color.g, color.b, 255]));
}

/// Pixel bounds of a box around `lo..=hi`, or `None` when not finite.
fn span(lo: f32, hi: f32) -> Option<(i64, i64)> {
    if lo.is_finite() && hi.is_finite() {
        Some((lo.floor() as i64, hi.ceil() as i64))
    } else {
        None
    }
}

fn fill_circle(image: &mut RgbaImage, center: Vec2, radius: f32, color: Rgb) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        span(center.x - radius, center.x + radius),
        span(center.y - radius, center.y + radius),
    ) else {
        return;
    };
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(i64::from(image.width()));
    let y1 = y1.min(i64::from(image.height()));
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius * radius {
                put(image, x, y, color);
            }
        }
    }
}

fn stroke_segment(image: &mut RgbaImage, from: Vec2, to: Vec2, width: f32, color: Rgb) {
    let half = (width * 0.5).max(0.5);
    let (Some((x0, x1)), Some((y0, y1))) = (
        span(from.x.min(to.x) - half, from.x.max(to.x) + half),
        span(from.y.min(to.y) - half, from.y.max(to.y) + half),
    ) else {
        return;
    };
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(i64::from(image.width()));
    let y1 = y1.min(i64::from(image.height()));

    let dir = to - from;
    let len_sq = dir.x * dir.x + dir.y * dir.y;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let rel = p - from;
            let t = if len_sq > 0.0 {
                ((rel.x * dir.x + rel.y * dir.y) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            if (p - (from + dir * t)).length() <= half {
                put(image, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_circle() {
        let shapes = vec![Shape::Circle {
            center: Vec2::new(10.0, 10.0),
            radius: 4.0,
            color: Rgb::new(255, 0, 0),
        }];
        let image = rasterize(&shapes, 20, 20);
        assert_eq!(pixel(&image, 10, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&image, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&image, 16, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn test_line_and_path() {
        let shapes = vec![
            Shape::Line {
                from: Vec2::new(0.0, 5.0),
                to: Vec2::new(20.0, 5.0),
                width: 2.0,
                color: Rgb::new(0, 255, 0),
            },
            Shape::Path {
                points: vec![Vec2::new(5.0, 10.0), Vec2::new(5.0, 19.0), Vec2::new(15.0, 19.0)],
                width: 2.0,
                color: Rgb::new(0, 0, 255),
            },
        ];
        let image = rasterize(&shapes, 20, 20);
        assert_eq!(pixel(&image, 12, 5), [0, 255, 0, 255]);
        assert_eq!(pixel(&image, 5, 14), [0, 0, 255, 255]);
        assert_eq!(pixel(&image, 10, 18), [0, 0, 255, 255]);
        assert_eq!(pixel(&image, 12, 12), [0, 0, 0, 255]);
    }

    #[test]
    fn test_offscreen_and_broken_shapes() {
        let shapes = vec![
            Shape::Circle {
                center: Vec2::new(-50.0, -50.0),
                radius: 10.0,
                color: Rgb::new(255, 255, 255),
            },
            Shape::Circle {
                center: Vec2::new(f32::NAN, 5.0),
                radius: 3.0,
                color: Rgb::new(255, 255, 255),
            },
            Shape::Text {
                position: Vec2::new(5.0, 5.0),
                text: "ignored".to_string(),
                size: 12.0,
                bold: false,
                color: Rgb::new(255, 255, 255),
            },
        ];
        let image = rasterize(&shapes, 10, 10);
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shots");
        let shapes = vec![Shape::Circle {
            center: Vec2::new(8.0, 8.0),
            radius: 3.0,
            color: Rgb::new(10, 20, 30),
        }];
        let path = save(&shapes, 16, 16, &target).unwrap();
        assert!(path.starts_with(&target));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.get_pixel(8, 8).0, [10, 20, 30, 255]);
    }
}
