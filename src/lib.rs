//! Decoders and preview renderers for the Jazz Jackrabbit game-data
//! formats: J2A animation libraries, J2T tilesets, J2L levels, and the
//! episode-1 BLOCKS/LEVEL/PLANET files.

pub mod binary;
pub mod error;
pub mod events;
pub mod formats;
pub mod palette;
pub mod render;

pub use error::{Error, Result};
