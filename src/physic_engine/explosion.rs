use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::physic_engine::helpers::{random_float, random_int, sample_float, sample_int};
use crate::physic_engine::types::{Hsla, MinMax, Point, Vec2};
use crate::renderer_engine::{Canvas2D, LineCap, LineJoin, StrokeStyle};

/// Seuil d'opacité minimal en dessous duquel un fragment est considéré éteint
pub const ALPHA_EPSILON: f32 = 1e-3;
/// Variation de teinte autour de la teinte de la fusée (±)
const HUE_SPREAD: i32 = 20;
/// Vitesse initiale d'un fragment (px/frame)
const SPEED_RANGE: (f32, f32) = (1.0, 10.0);
/// Borne basse du facteur d'alpha aléatoire en mode scintillement
const FLICKER_MIN_ALPHA: f32 = 0.5;

/// Paramètres de construction d'un fragment, identiques pour toute une gerbe
/// (sauf `flickering` et `line_width`, tirés par fragment).
#[derive(Debug, Clone, Copy)]
pub struct ExplosionParams {
    pub pos: Point,
    pub hue: f32,
    pub friction: f32,
    pub gravity: f32,
    pub flickering: bool,
    pub line_width: f32,
    pub explosion_length: usize,
    pub brightness: MinMax<i32>,
    pub decay: MinMax<f32>,
}

/// Fragment d'explosion : vitesse amortie par la friction, tirée vers le bas par la gravité.
#[derive(Debug, Clone)]
pub struct Explosion {
    pos: Vec2,
    vel: Vec2,
    friction: f32,
    gravity: f32,
    hue: f32,
    brightness: f32,
    decay_range: (f32, f32),
    decay: f32,
    alpha: f32,
    flickering: bool,
    line_width: f32,
    coordinates: VecDeque<Vec2>,
    terminal: bool,
}

impl Explosion {
    pub fn new(params: ExplosionParams, rng: &mut impl Rng) -> Self {
        let pos = Vec2::from(params.pos);
        let angle = random_float(rng, 0.0, TAU);
        let speed = random_float(rng, SPEED_RANGE.0, SPEED_RANGE.1);
        let hue = params.hue.round() as i32;
        let decay_range = params.decay.normalized();

        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            friction: params.friction,
            gravity: params.gravity,
            hue: random_int(rng, hue - HUE_SPREAD, hue + HUE_SPREAD) as f32,
            brightness: sample_int(rng, &params.brightness) as f32,
            decay_range,
            decay: random_float(rng, decay_range.0, decay_range.1).max(ALPHA_EPSILON),
            alpha: 1.0,
            flickering: params.flickering,
            line_width: params.line_width,
            coordinates: std::iter::repeat_n(pos, params.explosion_length.max(1)).collect(),
            terminal: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn is_flickering(&self) -> bool {
        self.flickering
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Avance le fragment d'une frame; `on_complete` est appelé une seule fois,
    /// quand l'opacité passe sous le seuil d'extinction.
    pub fn update<F>(&mut self, rng: &mut impl Rng, on_complete: F)
    where
        F: FnOnce(),
    {
        if self.terminal {
            return;
        }

        self.coordinates.pop_front();
        self.coordinates.push_back(self.pos);

        self.vel *= self.friction;
        self.vel.y += self.gravity;
        self.pos += self.vel;

        // scintillement : décroissance retirée à chaque frame dans l'intervalle
        let step = if self.flickering {
            sample_float(rng, &MinMax::new(self.decay_range.0, self.decay_range.1))
                .max(ALPHA_EPSILON)
        } else {
            self.decay
        };
        self.alpha = (self.alpha - step).max(0.0);

        if self.alpha <= self.decay {
            self.terminal = true;
            on_complete();
        }
    }

    /// Dessine la traînée : plus fine et plus transparente vers les positions anciennes.
    pub fn draw(&self, canvas: &mut dyn Canvas2D, cap: LineCap, rng: &mut impl Rng) {
        let (lightness, alpha) = if self.flickering {
            (
                random_float(rng, 0.0, self.brightness),
                self.alpha * random_float(rng, FLICKER_MIN_ALPHA, 1.0),
            )
        } else {
            (self.brightness, self.alpha)
        };

        let n = self.coordinates.len() as f32;
        let points = self
            .coordinates
            .iter()
            .copied()
            .chain(std::iter::once(self.pos));

        let mut previous: Option<Vec2> = None;
        for (i, p) in points.enumerate() {
            if let Some(prev) = previous {
                let k = i as f32 / n;
                canvas.stroke_polyline(
                    &[prev, p],
                    &StrokeStyle {
                        width: self.line_width * k,
                        cap,
                        join: LineJoin::Round,
                        color: Hsla::new(self.hue, lightness, alpha * k),
                    },
                );
            }
            previous = Some(p);
        }
    }
}
