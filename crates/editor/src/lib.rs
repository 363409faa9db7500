//! Entity editors: drafts, pending uploads and the ordered save pipeline.
//!
//! Editors talk to the backend only through [`EntityBackend`] and
//! [`ProfileBackend`], which the `voyage-client` services implement.

pub mod backend;
pub mod editor;
pub mod error;
pub mod pending;
pub mod previews;
pub mod profile;

pub use backend::{EntityBackend, EntityOf, PayloadOf, ProfileBackend};
pub use editor::{EditorState, EntityEditor, NavigateTo, SubmitOutcome};
pub use error::EditorError;
pub use pending::{PendingFile, PendingUploads, SlotKey};
pub use previews::{PreviewInfo, PreviewRef, PreviewRegistry};
pub use profile::ProfileEditor;
