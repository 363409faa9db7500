//! Editing the signed-in admin's profile.
//!
//! Same shape as the entity pipeline, one level smaller: save the fields,
//! then upload the picked image if there is one.

use voyage_client::LocalFile;
use voyage_core::drafts::ProfileDraft;
use voyage_core::models::AdminProfile;

use crate::backend::ProfileBackend;
use crate::error::EditorError;
use crate::pending::PendingUploads;
use crate::previews::{PreviewRef, PreviewRegistry};

const ENTITY: &str = "profile";

pub struct ProfileEditor<B: ProfileBackend> {
    backend: B,
    draft: ProfileDraft,
    profile: Option<AdminProfile>,
    pending: PendingUploads,
    last_error: Option<String>,
}

impl<B: ProfileBackend> ProfileEditor<B> {
    /// Fetch the profile and start editing it.
    pub async fn load(backend: B, previews: PreviewRegistry) -> Result<Self, EditorError> {
        let profile = backend.fetch().await.map_err(|e| EditorError::Load {
            entity: ENTITY,
            message: e.user_message(),
        })?;
        Ok(Self {
            backend,
            draft: ProfileDraft::from_profile(&profile),
            profile: Some(profile),
            pending: PendingUploads::new(previews),
            last_error: None,
        })
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    pub fn profile(&self) -> Option<&AdminProfile> {
        self.profile.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pick a new profile image, replacing any earlier pick.
    pub fn select_image(&mut self, file: LocalFile) -> PreviewRef {
        self.pending.replace_primary(file)
    }

    pub fn clear_image(&mut self) {
        self.pending.release_primary();
    }

    pub fn image_preview(&self) -> Option<PreviewRef> {
        self.pending.primary_previews().into_iter().next()
    }

    /// Save the fields, then the image.
    pub async fn save(&mut self) -> Result<&AdminProfile, EditorError> {
        let result = self.run_save().await;
        match &result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                tracing::error!(error = %e, "Profile save failed");
                self.last_error = Some(e.to_string());
            }
        }
        result?;
        self.profile
            .as_ref()
            .ok_or(EditorError::NotReady("profile not loaded"))
    }

    async fn run_save(&mut self) -> Result<(), EditorError> {
        let violations = self.draft.validate();
        if !violations.is_empty() {
            return Err(EditorError::Validation(violations));
        }

        let saved = self
            .backend
            .update(&self.draft.to_update())
            .await
            .map_err(|e| EditorError::Save {
                entity: ENTITY,
                message: e.user_message(),
            })?;
        self.draft = ProfileDraft::from_profile(&saved);
        self.profile = Some(saved);
        tracing::info!("Profile saved");

        let files = self.pending.primary_files();
        if let Some(file) = files.first() {
            let updated = self
                .backend
                .upload_image(file)
                .await
                .map_err(|e| EditorError::Upload {
                    entity: ENTITY,
                    message: e.user_message(),
                })?;
            self.pending.release_primary();
            self.profile = Some(updated);
            tracing::info!(file = %file.file_name, "Profile image uploaded");
        }
        Ok(())
    }
}
