pub mod r#trait;
pub use r#trait::{Canvas2D, CompositeOperation, LineCap, LineJoin, Rect, StrokeStyle};

pub mod raster_canvas;
pub use self::raster_canvas::RasterCanvas;

#[cfg(any(test, feature = "test_helpers"))]
pub mod recording_canvas;
#[cfg(any(test, feature = "test_helpers"))]
pub use self::recording_canvas::{DrawCommand, RecordingCanvas};
