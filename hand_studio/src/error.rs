use std::io;
use std::path::PathBuf;

use hand_canvas::ObjectError;
use hand_gesture::GestureError;
use hand_pong::GameConfigError;

/// Everything that can stop the studio from starting or keep running.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("could not open window: {0}")]
    Window(String),

    #[error("could not read config {path:?}: {source}")]
    ConfigIo { path: PathBuf, source: io::Error },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },

    #[error("could not read recording {path:?}: {source}")]
    Replay { path: PathBuf, source: io::Error },

    #[error("object id {0} is used more than once")]
    DuplicateObject(u32),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Gesture(#[from] GestureError),

    #[error("invalid object: {0}")]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Game(#[from] GameConfigError),
}
