use crate::physic_engine::config::LineStyle;
use crate::physic_engine::types::{Color, Hsla, Vec2};

/// Mode de composition (équivalent `globalCompositeOperation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOperation {
    /// Dessin normal
    #[default]
    SourceOver,
    /// Additif : les couleurs se cumulent
    Lighter,
    /// Soustractif : l'alpha source efface la destination
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Square,
    Butt,
}

impl From<LineStyle> for LineCap {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Round => LineCap::Round,
            LineStyle::Square => LineCap::Square,
            LineStyle::Butt => LineCap::Butt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub color: Hsla,
}

/// 🔧 Trait `Canvas2D`
///
/// Surface de dessin 2D fournie par l'hôte. Le moteur ne fait qu'émettre des
/// primitives, il ne relit jamais les pixels.
pub trait Canvas2D {
    /// Taille courante de la surface (pixels).
    fn size(&self) -> Vec2;

    /// Redimensionne la surface (le contenu peut être perdu).
    fn resize(&mut self, width: u32, height: u32);

    /// Mode de composition des primitives suivantes.
    fn set_composite_operation(&mut self, op: CompositeOperation);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Trace une polyligne ouverte. Un seul point (ou deux confondus) dessine un point.
    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle);

    /// Efface toute la surface (transparent), quel que soit le mode de composition.
    fn clear(&mut self);
}
