use fireworks_canvas::audio_engine::AudioEngine;
use fireworks_canvas::physic_engine::{FireworksOptions, Vec2};
use fireworks_canvas::window_engine::PointerState;
use std::cell::RefCell;

/// Backend audio qui journalise chaque son joué (position, gain).
#[allow(dead_code)]
#[derive(Default)]
pub struct LoggingAudio {
    pub log: RefCell<Vec<((f32, f32), f32)>>,
}

#[allow(dead_code)]
impl LoggingAudio {
    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl AudioEngine for LoggingAudio {
    fn play_explosion(&self, pos: (f32, f32), gain: f32) {
        self.log.borrow_mut().push((pos, gain));
    }
}

/// Pointeur figé, piloté directement par le test.
#[allow(dead_code)]
pub struct FixedPointer {
    pub pos: Vec2,
    pub active: bool,
}

#[allow(dead_code)]
impl FixedPointer {
    pub fn idle() -> Self {
        Self {
            pos: Vec2::NAN,
            active: false,
        }
    }

    pub fn pressed(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            active: true,
        }
    }
}

impl PointerState for FixedPointer {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Options dont les bornes suivent exactement un canvas `width x height`.
#[allow(dead_code)]
pub fn options_for(width: f32, height: f32) -> FireworksOptions {
    let mut options = FireworksOptions::default();
    options.boundaries.width = width;
    options.boundaries.height = height;
    options
}

/// Durée d'une frame à 60 fps (ms).
#[allow(dead_code)]
pub const FRAME_MS: f64 = 1000.0 / 60.0;
