use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("plane needs at least one segment per axis")]
    InvalidGeometry,
}
