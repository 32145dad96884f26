//! The 1994-era file family: RLE-compressed substreams instead of zlib,
//! and an irregular substream directory that has to be walked to be sized.

pub mod blocks;
pub mod level;
pub mod planet;
pub mod rle;

pub use blocks::LegacyBlocks;
pub use level::LegacyLevel;
pub use planet::LegacyPlanet;
pub use rle::RunLengthDecoder;

/// Transparent palette slot in the legacy tileset palettes.
pub const TRANSPARENT_INDEX: usize = 127;
