pub mod r#trait;
pub use r#trait::{AudioEngine, SilentAudio};

pub mod sound;
pub use sound::Sound;
