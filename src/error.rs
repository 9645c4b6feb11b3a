use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while bringing the game up.
///
/// Per-tick code never produces one of these; once startup succeeds the
/// loop runs on already-validated state.
#[derive(Debug)]
pub enum GameError {
    /// A file could not be opened or read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The map document is not valid JSON or does not have the expected shape.
    MapDecode {
        /// Map file, or `<inline>` for documents decoded from a string.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },
    /// A chunk's data length does not match `width * height`.
    InvalidChunk {
        /// Name of the layer holding the chunk.
        layer: String,
        /// Position of the chunk inside the layer.
        index: usize,
        /// `width * height`.
        expected: usize,
        /// Actual `data` length.
        actual: usize,
    },
    /// A texture or music file is missing or cannot be decoded.
    AssetLoad {
        /// Asset path.
        path: PathBuf,
        /// Backend message.
        reason: String,
    },
    /// Sprite sheet grid does not fit the texture.
    InvalidSpriteSheet(String),
    /// The configuration file exists but cannot be decoded.
    Config {
        /// Config file.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            GameError::MapDecode { path, source } => {
                write!(f, "Failed to decode map {}: {}", path.display(), source)
            }
            GameError::InvalidChunk {
                layer,
                index,
                expected,
                actual,
            } => write!(
                f,
                "Invalid chunk {} in layer '{}': expected {} tiles, found {}",
                index, layer, expected, actual
            ),
            GameError::AssetLoad { path, reason } => {
                write!(f, "Failed to load asset {}: {}", path.display(), reason)
            }
            GameError::InvalidSpriteSheet(msg) => write!(f, "Invalid sprite sheet: {}", msg),
            GameError::Config { path, source } => {
                write!(f, "Invalid config {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            GameError::MapDecode { source, .. } | GameError::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}
