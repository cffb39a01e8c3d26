use crate::physic_engine::types::{Color, Vec2};
use crate::renderer_engine::{Canvas2D, CompositeOperation, Rect, StrokeStyle};

/// Primitive reçue par un [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Composite(CompositeOperation),
    FillRect { rect: Rect, color: Color },
    Stroke { points: Vec<Vec2>, style: StrokeStyle },
    Clear,
    Resize { width: u32, height: u32 },
}

/// Canvas qui ne dessine rien et journalise les primitives reçues.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Vide le journal et retourne son contenu.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Vec2], &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }

    pub fn strokes_count(&self) -> usize {
        self.strokes().count()
    }
}

impl Canvas2D for RecordingCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.commands.push(DrawCommand::Composite(op));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }
}
