use glam::Vec4;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use glam::Vec2;

/// Couleur RGBA (composantes dans [0, 1]), même convention que le renderer
pub type Color = Vec4;

// ------------------------
// MinMax
// ------------------------
/// Intervalle `{ min, max }` tel qu'il apparaît dans la configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

impl<T> MinMax<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Copy> MinMax<T> {
    /// Retourne l'intervalle ordonné (`min <= max`), même si la config est inversée.
    pub fn normalized(&self) -> (T, T) {
        match [self.min, self.max]
            .into_iter()
            .minmax_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        {
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::NoElements => (self.min, self.max),
        }
    }
}

// ------------------------
// Point
// ------------------------
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

// ------------------------
// Hsla
// ------------------------
/// Couleur HSL + alpha. La saturation est toujours 100%, comme pour un `hsla()` CSS.
///
/// `hue` en degrés (toléré hors [0, 360], ramené par modulo à la conversion),
/// `lightness` en pourcents, `alpha` dans [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            lightness,
            alpha,
        }
    }

    /// Conversion HSL → RGB (saturation 100%), alpha conservé.
    pub fn to_rgba(&self) -> Color {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let s = 1.0;

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };

        Color::new(
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
            self.alpha.clamp(0.0, 1.0),
        )
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, 100%, {}%, {})",
            self.hue, self.lightness, self.alpha
        )
    }
}
