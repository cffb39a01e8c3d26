use anyhow::Result;
use image::{Rgba, RgbaImage};
use log::info;
use std::path::Path;

use crate::physic_engine::types::{Color, Vec2};
use crate::renderer_engine::{Canvas2D, CompositeOperation, LineCap, Rect, StrokeStyle};

/// Nombre de pixels d'une surface, calculé en `usize` (pas de débordement `u32`).
#[inline]
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Canvas logiciel : buffer RGBA flottant prémultiplié, export PNG via `image`.
///
/// Les segments sont rasterisés comme des capsules (distance au segment) avec un
/// anti-aliasing d'un pixel; chaque pixel n'est composé qu'une fois par segment.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    composite: CompositeOperation,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; buffer_len(width, height)],
            composite: CompositeOperation::SourceOver,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel prémultiplié en `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Somme des alphas : mesure grossière de "ce qui est allumé".
    pub fn coverage(&self) -> f32 {
        self.pixels.iter().map(|p| p.w).sum()
    }

    /// Image composée sur fond noir (alpha opaque).
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[self.index(x, y)];
            let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgba([to_u8(p.x), to_u8(p.y), to_u8(p.z), 255])
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image().save(path.as_ref())?;
        info!("🖼️ Frame saved: {}", path.as_ref().display());
        Ok(())
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let a = color.w * coverage;
        if a <= 0.0 {
            return;
        }
        let src = Color::new(color.x * a, color.y * a, color.z * a, a);
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx];

        *dst = match self.composite {
            CompositeOperation::SourceOver => src + *dst * (1.0 - a),
            CompositeOperation::Lighter => (*dst + src).min(Color::ONE),
            CompositeOperation::DestinationOut => *dst * (1.0 - a),
        };
    }

    /// Boîte englobante (en pixels) bornée au canvas, ou `None` si hors champ.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if max.x < 0.0 || max.y < 0.0 || min.x >= self.width as f32 || min.y >= self.height as f32 {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil() as u32).min(self.width.saturating_sub(1));
        let y1 = (max.y.ceil() as u32).min(self.height.saturating_sub(1));
        Some((x0, y0, x1, y1))
    }

    fn stroke_segment(&mut self, a: Vec2, b: Vec2, style: &StrokeStyle) {
        let radius = (style.width * 0.5).max(0.5);
        let color = style.color.to_rgba();
        let ab = b - a;
        let len_sq = ab.length_squared();

        // extension le long du segment selon le style d'extrémité
        let ext = match style.cap {
            LineCap::Round | LineCap::Square => radius,
            LineCap::Butt => 0.0,
        };
        if len_sq == 0.0 && style.cap == LineCap::Butt {
            return;
        }

        let pad = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(a.min(b) - pad, a.max(b) + pad) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = if len_sq == 0.0 {
                    match style.cap {
                        LineCap::Square => {
                            let d = (p - a).abs();
                            d.x.max(d.y)
                        }
                        _ => p.distance(a),
                    }
                } else {
                    let len = len_sq.sqrt();
                    let along = (p - a).dot(ab) / len;
                    if along < -ext || along > len + ext {
                        continue;
                    }
                    match style.cap {
                        LineCap::Round => {
                            let t = (along / len).clamp(0.0, 1.0);
                            p.distance(a + ab * t)
                        }
                        // distance perpendiculaire à la droite porteuse
                        _ => (p - a).perp_dot(ab).abs() / len,
                    }
                };

                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

impl Canvas2D for RasterCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::ZERO; buffer_len(width, height)];
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.composite = op;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = Vec2::new(rect.x, rect.y);
        let max = min + Vec2::new(rect.width, rect.height) - Vec2::ONE;
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        if let Some((x0, y0, x1, y1)) = self.clip(min, max) {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        match points {
            [] => {}
            [p] => self.stroke_segment(*p, *p, style),
            _ => {
                for pair in points.windows(2) {
                    self.stroke_segment(pair[0], pair[1], style);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
    }
}
