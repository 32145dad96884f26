use thiserror::Error;

/// Crate-wide decode/render error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("read of {len} bytes at offset {offset} crosses buffer end ({buffer_len} bytes)")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    #[error("run-length block ended before its declared {expected} bytes were produced")]
    TruncatedInput { expected: usize },

    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    #[error("substream {index} inflated to {actual} bytes, header declares {expected}")]
    DecompressionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map references dictionary word {index}, dictionary has {dictionary_len} entries")]
    UnknownWordIndex {
        index: usize,
        dictionary_len: usize,
    },

    #[error("map of {len} tiles does not match declared {width}x{height} dimensions")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("animated tile {tile_id} chains deeper than {limit} levels")]
    AnimationResolutionOverflow { tile_id: u32, limit: usize },

    #[error("tile code {tile_id} selects animation {index}, level defines {count}")]
    UnknownAnimatedTile {
        tile_id: u32,
        index: usize,
        count: usize,
    },

    #[error("sprite data exhausted at row {row} of {height}")]
    TruncatedSpriteData { row: u16, height: u16 },

    #[error("event code {0} is not in the event table")]
    UnknownEventCode(u16),

    #[error("event redirect chain revisits code {0}")]
    RedirectCycle(u16),

    #[error("animation library {library} has no frame (set {set}, anim {anim}, frame {frame})")]
    MissingAnimationFrame {
        library: String,
        set: usize,
        anim: usize,
        frame: usize,
    },

    #[error("crop box has no area")]
    EmptyCrop,

    #[error("{width}x{height} render exceeds the {budget}-pixel budget")]
    PreviewTooLarge {
        width: i64,
        height: i64,
        budget: i64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
