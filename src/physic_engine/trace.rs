use rand::Rng;
use std::collections::VecDeque;

use crate::physic_engine::helpers::{random_float, random_int};
use crate::physic_engine::types::{Hsla, Point, Vec2};
use crate::renderer_engine::{Canvas2D, LineCap, LineJoin, StrokeStyle};

/// Luminosité de la tête de la fusée
const HEAD_LIGHTNESS: f32 = 90.0;
/// Progression minimale par update : une fusée finit toujours par arriver
const MIN_PROGRESS_STEP: f32 = 1e-3;
/// Amplitude du bruit appliqué à la vitesse de chaque fusée (±10%)
const SPEED_JITTER: f32 = 0.1;

/// Paramètres de construction d'une [`Trace`], résolus par le moteur au moment du spawn.
#[derive(Debug, Clone, Copy)]
pub struct TraceParams {
    pub origin: Point,
    pub target: Point,
    pub hue: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub trace_length: usize,
}

/// Fusée en vol : interpolation de `origin` vers `target` selon `progress`.
#[derive(Debug, Clone)]
pub struct Trace {
    pos: Vec2,
    origin: Vec2,
    target: Vec2,
    progress: f32,
    speed: f32,
    acceleration: f32,
    jitter: f32,
    hue: f32,
    brightness: f32,
    /// Positions récentes, de la plus ancienne à la plus récente
    coordinates: VecDeque<Vec2>,
    terminal: bool,
}

impl Trace {
    pub fn new(params: TraceParams, rng: &mut impl Rng) -> Self {
        let origin = Vec2::from(params.origin);
        let len = params.trace_length.max(1);

        Self {
            pos: origin,
            origin,
            target: params.target.into(),
            progress: 0.0,
            speed: params.speed,
            acceleration: params.acceleration,
            jitter: random_float(rng, 1.0 - SPEED_JITTER, 1.0 + SPEED_JITTER),
            hue: params.hue,
            brightness: random_int(rng, 50, 70) as f32,
            coordinates: std::iter::repeat_n(origin, len).collect(),
            terminal: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn trail(&self) -> impl Iterator<Item = &Vec2> {
        self.coordinates.iter()
    }

    /// Avance la fusée d'une frame.
    ///
    /// Quand `progress` atteint 1, `on_complete(x, y, hue)` est appelé une seule fois
    /// avec le point d'arrivée et la fusée devient terminale (les updates suivants
    /// ne font plus rien).
    pub fn update<F>(&mut self, on_complete: F)
    where
        F: FnOnce(f32, f32, f32),
    {
        if self.terminal {
            return;
        }

        let step = self.speed * self.jitter / 100.0 * (1.0 + self.progress * self.acceleration);
        self.progress += step.max(MIN_PROGRESS_STEP);

        self.pos = self.origin.lerp(self.target, self.progress.min(1.0));
        self.coordinates.pop_front();
        self.coordinates.push_back(self.pos);

        if self.progress >= 1.0 {
            self.terminal = true;
            on_complete(self.pos.x, self.pos.y, self.hue);
        }
    }

    /// Dessine la traînée (segments de plus en plus opaques vers la tête) puis la tête.
    pub fn draw(&self, canvas: &mut dyn Canvas2D, line_width: f32, cap: LineCap) {
        let segments = self.coordinates.len().saturating_sub(1).max(1) as f32;
        let mut style = StrokeStyle {
            width: line_width,
            cap,
            join: LineJoin::Round,
            color: Hsla::new(self.hue, self.brightness, 1.0),
        };

        for (i, (a, b)) in self
            .coordinates
            .iter()
            .zip(self.coordinates.iter().skip(1))
            .enumerate()
        {
            style.color.alpha = (i + 1) as f32 / segments;
            canvas.stroke_polyline(&[*a, *b], &style);
        }

        style.color = Hsla::new(self.hue, HEAD_LIGHTNESS, 1.0);
        canvas.stroke_polyline(&[self.pos], &style);
    }
}
