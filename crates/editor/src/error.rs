use voyage_core::error::summarize;
use voyage_core::validation::FieldViolation;

/// Errors surfaced by an editor. Each one is also stored on the editor as
/// its `last_error` message.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The draft has violations; nothing was sent.
    #[error("Please fix the highlighted fields: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    /// Invalid route id, a 404 from the backend, or an unknown sub-item.
    #[error("{0}")]
    NotFound(String),

    #[error("Failed to load {entity}: {message}")]
    Load { entity: &'static str, message: String },

    /// Create or update was rejected. Nothing was committed.
    #[error("Failed to save {entity}: {message}")]
    Save { entity: &'static str, message: String },

    /// The entity was saved but an image upload failed.
    #[error("{entity} saved, but image upload failed: {message}")]
    Upload { entity: &'static str, message: String },

    #[error("Failed to delete {entity} image: {message}")]
    Delete { entity: &'static str, message: String },

    #[error("No {list} entry at index {index}")]
    OutOfRange { list: &'static str, index: usize },

    #[error("{0} is not supported for this entity")]
    Unsupported(&'static str),

    /// A submission is in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// The editor has nothing loaded (still loading, load failed, or the
    /// submission already completed).
    #[error("Editor is not ready: {0}")]
    NotReady(&'static str),
}
