//! Calcul de la cible d'une fusée : angle de lancement, direction et bornage.

use rand::Rng;

use crate::physic_engine::config::{AngleKeyword, Boundaries, LaunchAngle};
use crate::physic_engine::helpers::{get_distance, random_float};
use crate::physic_engine::types::{Point, Vec2};

/// Angle max du mode `"random"` (demi-cercle supérieur)
pub const RANDOM_ANGLE_MAX_DEG: f32 = 180.0;

/// Résout l'angle de lancement configuré en degrés (`None` si aucun angle n'est imposé).
pub fn resolve_angle(rng: &mut impl Rng, angle: Option<&LaunchAngle>) -> Option<f32> {
    match angle? {
        LaunchAngle::Degrees(deg) => Some(*deg),
        LaunchAngle::Range(range) => Some(random_float(rng, range.min, range.max)),
        LaunchAngle::Keyword(AngleKeyword::Random) => {
            Some(random_float(rng, 0.0, RANDOM_ANGLE_MAX_DEG))
        }
    }
}

/// Direction unitaire pour un angle en degrés, repère écran (y vers le bas).
pub fn direction_from_angle(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Direction unitaire de `start` vers `end`; vers le haut si les points sont confondus.
pub fn normalize_direction(start: Point, end: Point) -> Vec2 {
    let distance = get_distance(start.x, start.y, end.x, end.y);
    if distance == 0.0 {
        return Vec2::new(0.0, -1.0);
    }
    Vec2::new((end.x - start.x) / distance, (end.y - start.y) / distance)
}

/// Ramène `(x, y)` dans le rectangle `[bx, bw - bx] x [by, bh - by]`.
///
/// Une largeur/hauteur de bornes nulle (ou négative) est remplacée par la taille du canvas.
pub fn clamp_target(x: f32, y: f32, boundaries: &Boundaries, canvas_size: Vec2) -> Point {
    let size = boundaries.effective_size(canvas_size);
    let max_x = size.x - boundaries.x;
    let max_y = size.y - boundaries.y;

    // min/max plutôt que clamp : pas de panique si le rectangle est dégénéré
    Point::new(x.max(boundaries.x).min(max_x), y.max(boundaries.y).min(max_y))
}
