pub mod types;
pub use self::types::{Color, Hsla, MinMax, Point, Vec2};

pub mod helpers;

pub mod config;
pub use self::config::{FireworksOptions, FireworksOptionsBuilder, OptionsUpdate};

pub mod targeting;

pub mod trace;
pub use self::trace::Trace;

pub mod explosion;
pub use self::explosion::Explosion;

pub mod live_set;

pub mod fireworks_engine;
pub use self::fireworks_engine::{FireworksEngine, FrameContext};
