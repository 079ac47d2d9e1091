use storeloc_core::ConfigError;
use storeloc_directions::DirectionsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error(transparent)]
    Directions(#[from] DirectionsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session's event inbox has no live senders left.
    #[error("store locator session closed")]
    SessionClosed,
}
