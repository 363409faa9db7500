//! Local preview handles for selected files.
//!
//! Every file picked in an editor gets a preview reference, an opaque
//! `preview:<uuid>` handle a front-end can render before the file is
//! uploaded. The registry tracks which references are live so a leak shows
//! up as a non-zero [`PreviewRegistry::active_count`] once every editor is
//! gone.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use voyage_client::LocalFile;

/// Opaque handle to a local preview.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a preview reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Default)]
struct RegistryState {
    active: HashMap<PreviewRef, PreviewInfo>,
    created: usize,
    released: usize,
}

/// Shared registry of live previews. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a preview for `file`.
    pub fn create(&self, file: &LocalFile) -> PreviewRef {
        let preview = PreviewRef(format!("preview:{}", uuid::Uuid::new_v4()));
        let info = PreviewInfo {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            size: file.len(),
        };
        let mut state = self.state();
        state.active.insert(preview.clone(), info);
        state.created += 1;
        tracing::trace!(preview = %preview, file = %file.file_name, "Preview created");
        preview
    }

    /// Release a preview. Releasing twice is a no-op and returns `false`.
    pub fn release(&self, preview: &PreviewRef) -> bool {
        let mut state = self.state();
        let removed = state.active.remove(preview).is_some();
        if removed {
            state.released += 1;
            tracing::trace!(preview = %preview, "Preview released");
        }
        removed
    }

    pub fn resolve(&self, preview: &PreviewRef) -> Option<PreviewInfo> {
        self.state().active.get(preview).cloned()
    }

    pub fn is_active(&self, preview: &PreviewRef) -> bool {
        self.state().active.contains_key(preview)
    }

    pub fn active_count(&self) -> usize {
        self.state().active.len()
    }

    pub fn created_count(&self) -> usize {
        self.state().created
    }

    pub fn released_count(&self) -> usize {
        self.state().released
    }
}
