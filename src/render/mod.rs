//! Turns parsed files into RGBA images.

pub mod anims;
pub mod canvas;
pub mod legacy;
pub mod level;
pub mod tileset;

pub use level::{CropBox, LevelRenderer, Rabbit};
