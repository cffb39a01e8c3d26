pub mod raf;
pub use raf::RequestAnimationFrame;

pub mod pointer;
pub use pointer::{Mouse, PointerState};
