pub mod fireworks;
pub use fireworks::{DrainOutcome, Fireworks};
// Renderer engine (surface de dessin)
pub mod renderer_engine;
pub use renderer_engine::Canvas2D;
// Audio engine
pub mod audio_engine;
pub use audio_engine::AudioEngine;
// Physic engine
pub mod physic_engine;
pub use physic_engine::{FireworksEngine, FireworksOptions};
// Scheduler + pointeur
pub mod window_engine;

// Utilities
pub mod utils;
