//! Create/edit workflow for one entity.
//!
//! An [`EntityEditor`] owns a draft, the last persisted server copy and the
//! set of files picked for upload. [`EntityEditor::submit`] runs the save
//! pipeline:
//!
//! 1. create or update the entity without any binary content;
//! 2. upload the primary images in one multipart request;
//! 3. upload sub-item images concurrently, one request per item that has
//!    both a server id and a pending file;
//! 4. release every remaining preview and report where to navigate.
//!
//! Stages run strictly in order and a failed stage ends the run. Nothing is
//! retried and nothing already committed is rolled back. The persisted copy
//! is only ever replaced by a server response.

use futures::future::join_all;
use voyage_client::{ApiError, LocalFile};
use voyage_core::drafts::{Draft, ImageItems, ImageSelection};
use voyage_core::route::parse_route_id;
use voyage_core::types::DbId;

use crate::backend::{EntityBackend, EntityOf};
use crate::error::EditorError;
use crate::pending::{PendingUploads, SlotKey};
use crate::previews::{PreviewRef, PreviewRegistry};

/// Lifecycle of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Ready,
    Submitting,
    Done,
    /// The last submission failed. Editing continues from here.
    Failed,
    /// Nothing could be loaded. The editor refuses to submit.
    Unavailable,
}

/// Where the caller should go after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateTo {
    Detail(DbId),
    /// The create response carried no id.
    List,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome<E> {
    pub navigate: NavigateTo,
    /// Server copy after the last successful stage.
    pub entity: E,
}

pub struct EntityEditor<B: EntityBackend> {
    backend: B,
    draft: B::Draft,
    persisted: Option<EntityOf<B>>,
    /// Id updates go to. Set by a load or by the first successful save.
    target: Option<DbId>,
    state: EditorState,
    last_error: Option<String>,
    pending: PendingUploads,
}

impl<B: EntityBackend> EntityEditor<B> {
    /// Editor for a new entity, starting from a seeded draft.
    pub fn for_create(backend: B, previews: PreviewRegistry) -> Self {
        Self {
            backend,
            draft: B::Draft::seeded(),
            persisted: None,
            target: None,
            state: EditorState::Ready,
            last_error: None,
            pending: PendingUploads::new(previews),
        }
    }

    /// Editor for the entity named by a raw route segment.
    ///
    /// Never fails: an invalid id or a failed load leaves the editor
    /// [`EditorState::Unavailable`] with the reason in
    /// [`last_error`](Self::last_error).
    pub async fn for_edit(backend: B, previews: PreviewRegistry, raw_id: Option<&str>) -> Self {
        let mut editor = Self::for_create(backend, previews);
        editor.draft = B::Draft::default();
        editor.state = EditorState::Loading;

        match parse_route_id(<B::Draft as Draft>::ENTITY, raw_id) {
            Ok(id) => {
                // The outcome is recorded on the editor.
                let _ = editor.load(id).await;
            }
            Err(e) => {
                editor.last_error = Some(e.to_string());
                editor.state = EditorState::Unavailable;
            }
        }
        editor
    }

    /// Fetch `id` and rebuild the draft from it. Pending files are dropped.
    pub async fn load(&mut self, id: DbId) -> Result<(), EditorError> {
        if self.state == EditorState::Submitting {
            return Err(EditorError::Busy);
        }
        let entity = <B::Draft as Draft>::ENTITY;
        self.state = EditorState::Loading;

        match self.backend.fetch(id).await {
            Ok(loaded) => {
                self.draft = B::Draft::from_entity(&loaded);
                self.persisted = Some(loaded);
                self.target = Some(id);
                self.pending.release_all();
                self.last_error = None;
                self.state = EditorState::Ready;
                tracing::debug!(entity, id, "Entity loaded into editor");
                Ok(())
            }
            Err(e) => {
                let err = if e.is_not_found() {
                    EditorError::NotFound(format!("{entity} with id {id} not found"))
                } else {
                    EditorError::Load {
                        entity,
                        message: e.user_message(),
                    }
                };
                tracing::error!(entity, id, error = %e, "Failed to load entity");
                self.last_error = Some(err.to_string());
                self.state = EditorState::Unavailable;
                Err(err)
            }
        }
    }

    // ---- accessors ----

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn draft(&self) -> &B::Draft {
        &self.draft
    }

    pub fn persisted(&self) -> Option<&EntityOf<B>> {
        self.persisted.as_ref()
    }

    /// Server id of the entity, once it exists.
    pub fn entity_id(&self) -> Option<DbId> {
        self.target
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn pending(&self) -> &PendingUploads {
        &self.pending
    }

    /// Mutable access to the draft for scalar and plain sub-list edits.
    ///
    /// Use [`add_item`](Self::add_item) and
    /// [`remove_item`](Self::remove_item) for image-carrying items so their
    /// pending files follow them.
    pub fn draft_mut(&mut self) -> Result<&mut B::Draft, EditorError> {
        self.ensure_editable()?;
        Ok(&mut self.draft)
    }

    // ---- primary images ----

    /// Pick a primary image. Single-image entities replace their previous
    /// choice; multi-image entities append.
    pub fn select_primary_file(&mut self, file: LocalFile) -> Result<PreviewRef, EditorError> {
        self.ensure_editable()?;
        match <B::Draft as Draft>::PRIMARY_IMAGES {
            ImageSelection::None => Err(EditorError::Unsupported("Image upload")),
            ImageSelection::Single => Ok(self.pending.replace_primary(file)),
            ImageSelection::Multiple => Ok(self.pending.push_primary(file)),
        }
    }

    /// Drop a picked primary image by its position among the pending ones.
    pub fn remove_primary_file(&mut self, index: usize) -> Result<(), EditorError> {
        self.ensure_editable()?;
        if self.pending.remove_primary(index) {
            Ok(())
        } else {
            Err(EditorError::OutOfRange {
                list: "pending images",
                index,
            })
        }
    }

    pub fn primary_previews(&self) -> Vec<PreviewRef> {
        self.pending.primary_previews()
    }

    // ---- submission ----

    /// Validate and run the save pipeline.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<EntityOf<B>>, EditorError> {
        self.ensure_editable()?;
        let entity = <B::Draft as Draft>::ENTITY;

        let violations = self.draft.validate();
        if !violations.is_empty() {
            let err = EditorError::Validation(violations);
            tracing::debug!(entity, error = %err, "Submission blocked by validation");
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.state = EditorState::Submitting;
        self.last_error = None;

        match self.run_pipeline().await {
            Ok(outcome) => {
                self.state = EditorState::Done;
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(entity, id = ?self.target, error = %err, "Submission failed");
                self.last_error = Some(err.to_string());
                self.state = EditorState::Failed;
                Err(err)
            }
        }
    }

    async fn run_pipeline(&mut self) -> Result<SubmitOutcome<EntityOf<B>>, EditorError> {
        let entity = <B::Draft as Draft>::ENTITY;
        let payload = self.draft.to_payload();

        // Stage 1: scalars and sub-lists.
        let saved = match self.target {
            Some(id) => self.backend.update(id, &payload).await,
            None => self.backend.create(&payload).await,
        }
        .map_err(|e| EditorError::Save {
            entity,
            message: e.user_message(),
        })?;

        let Some(id) = B::Draft::entity_id(&saved) else {
            tracing::warn!(entity, "Save response carried no id, skipping uploads");
            self.pending.release_all();
            self.persisted = Some(saved.clone());
            return Ok(SubmitOutcome {
                navigate: NavigateTo::List,
                entity: saved,
            });
        };
        tracing::info!(entity, id, "Entity saved");

        let response_ids = B::Draft::entity_image_item_ids(&saved);
        self.draft.assign_image_item_ids(&response_ids);
        self.pending.rebind(&self.draft.image_item_ids());
        self.target = Some(id);
        self.persisted = Some(saved);

        // Stage 2: primary images.
        if self.pending.primary_len() > 0 {
            let files = self.pending.primary_files();
            let updated = self
                .backend
                .upload_images(id, &files)
                .await
                .map_err(|e| EditorError::Upload {
                    entity,
                    message: e.user_message(),
                })?;
            tracing::info!(entity, id, uploads = files.len(), "Primary images uploaded");
            self.pending.release_primary();
            self.persisted = Some(updated);
        }

        // Stage 3: sub-item images.
        self.upload_item_images(id).await?;

        // Stage 4.
        self.pending.release_all();
        let entity = self.persisted.clone().ok_or(EditorError::NotReady("nothing persisted"))?;
        Ok(SubmitOutcome {
            navigate: NavigateTo::Detail(id),
            entity,
        })
    }

    /// Upload every ready sub-item image at once. Successful items leave the
    /// pending set; the first failure in item order is reported after all
    /// requests have finished.
    async fn upload_item_images(&mut self, id: DbId) -> Result<(), EditorError> {
        let entity = <B::Draft as Draft>::ENTITY;
        let uploads = self.pending.ready_item_uploads(&self.draft.image_item_ids());
        if uploads.is_empty() {
            return Ok(());
        }

        let backend = &self.backend;
        let results = join_all(
            uploads
                .iter()
                .map(|(item_id, file)| backend.upload_item_image(id, *item_id, file)),
        )
        .await;

        let mut first_failure: Option<(DbId, ApiError)> = None;
        let mut latest = None;
        let mut succeeded = 0usize;
        for ((item_id, _), result) in uploads.iter().zip(results) {
            match result {
                Ok(updated) => {
                    self.pending.complete_item(*item_id);
                    latest = Some(updated);
                    succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(entity, id, item_id, error = %e, "Sub-item image upload failed");
                    if first_failure.is_none() {
                        first_failure = Some((*item_id, e));
                    }
                }
            }
        }
        tracing::info!(entity, id, uploads = uploads.len(), succeeded, "Sub-item uploads finished");

        // Each response reflects only its own upload, so after several of
        // them the entity is fetched once to get a consistent copy.
        if uploads.len() > 1 {
            match self.backend.fetch(id).await {
                Ok(fresh) => latest = Some(fresh),
                Err(e) => tracing::warn!(entity, id, error = %e, "Refresh after uploads failed"),
            }
        }
        if let Some(updated) = latest {
            self.persisted = Some(updated);
        }

        match first_failure {
            None => Ok(()),
            Some((item_id, e)) => Err(EditorError::Upload {
                entity,
                message: format!("item {item_id}: {}", e.user_message()),
            }),
        }
    }

    // ---- image deletes ----

    /// Delete the persisted gallery image at `index`. The server response
    /// becomes the new persisted copy.
    pub async fn delete_image(&mut self, index: usize) -> Result<&EntityOf<B>, EditorError> {
        self.ensure_editable()?;
        let result = self.request_image_delete(index).await;
        self.finish_delete(result)
    }

    async fn request_image_delete(&self, index: usize) -> Result<EntityOf<B>, EditorError> {
        let entity = <B::Draft as Draft>::ENTITY;
        let (id, persisted) = self.saved_entity()?;
        if index >= B::Draft::image_count(persisted) {
            return Err(EditorError::OutOfRange {
                list: "images",
                index,
            });
        }

        let updated = self
            .backend
            .delete_image(id, index)
            .await
            .map_err(|e| self.delete_failed(e))?;
        tracing::info!(entity, id, index, "Image deleted");
        Ok(updated)
    }

    /// Record a delete outcome on the editor. A success replaces the
    /// persisted copy; a failure becomes `last_error`.
    fn finish_delete(
        &mut self,
        result: Result<EntityOf<B>, EditorError>,
    ) -> Result<&EntityOf<B>, EditorError> {
        match result {
            Ok(updated) => {
                self.last_error = None;
                Ok(self.persisted.insert(updated))
            }
            Err(err) => {
                tracing::error!(
                    entity = <B::Draft as Draft>::ENTITY,
                    id = ?self.target,
                    error = %err,
                    "Image delete failed"
                );
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn saved_entity(&self) -> Result<(DbId, &EntityOf<B>), EditorError> {
        match (self.target, self.persisted.as_ref()) {
            (Some(id), Some(persisted)) => Ok((id, persisted)),
            _ => Err(EditorError::NotReady("entity has not been saved")),
        }
    }

    fn delete_failed(&self, e: ApiError) -> EditorError {
        EditorError::Delete {
            entity: <B::Draft as Draft>::ENTITY,
            message: e.user_message(),
        }
    }

    /// Gate for anything that changes the draft or talks to the backend.
    fn ensure_editable(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Ready => Ok(()),
            EditorState::Failed => {
                self.state = EditorState::Ready;
                Ok(())
            }
            EditorState::Submitting => Err(EditorError::Busy),
            EditorState::Loading => Err(EditorError::NotReady("still loading")),
            EditorState::Unavailable => Err(EditorError::NotReady("nothing loaded")),
            EditorState::Done => Err(EditorError::NotReady("submission complete")),
        }
    }
}

// ---------------------------------------------------------------------------
// Image-carrying sub-items
// ---------------------------------------------------------------------------

impl<B> EntityEditor<B>
where
    B: EntityBackend,
    B::Draft: ImageItems,
{
    fn item_key(&self, index: usize) -> Result<SlotKey, EditorError> {
        let ids = self.draft.image_item_ids();
        match ids.get(index) {
            Some(id) => Ok(SlotKey::for_item(index, *id)),
            None => Err(EditorError::OutOfRange {
                list: <B::Draft as ImageItems>::ITEM_LIST,
                index,
            }),
        }
    }

    pub fn add_item(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.draft.push_image_item();
        Ok(())
    }

    /// Remove the item at `index`, releasing its pending file.
    pub fn remove_item(&mut self, index: usize) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let key = self.item_key(index)?;
        let id = match key {
            SlotKey::Item(id) => Some(id),
            SlotKey::Position(_) => None,
        };
        self.draft.remove_image_item(index);
        self.pending.item_removed(index, id);
        Ok(())
    }

    /// Pick an image for the item at `index`, replacing any earlier pick.
    pub fn select_item_file(
        &mut self,
        index: usize,
        file: LocalFile,
    ) -> Result<PreviewRef, EditorError> {
        self.ensure_editable()?;
        let key = self.item_key(index)?;
        Ok(self.pending.select_item(key, file))
    }

    /// Forget the image picked for the item at `index`. `Ok(false)` when
    /// there was none.
    pub fn clear_item_file(&mut self, index: usize) -> Result<bool, EditorError> {
        self.ensure_editable()?;
        let key = self.item_key(index)?;
        Ok(self.pending.clear_item(key))
    }

    pub fn item_preview(&self, index: usize) -> Option<PreviewRef> {
        let key = self.item_key(index).ok()?;
        self.pending.item(key).map(|p| p.preview.clone())
    }

    /// Delete the server-side image of the persisted item `item_id`.
    pub async fn delete_item_image(&mut self, item_id: DbId) -> Result<&EntityOf<B>, EditorError> {
        self.ensure_editable()?;
        let result = self.request_item_image_delete(item_id).await;
        self.finish_delete(result)
    }

    async fn request_item_image_delete(&self, item_id: DbId) -> Result<EntityOf<B>, EditorError> {
        let entity = <B::Draft as Draft>::ENTITY;
        let (id, persisted) = self.saved_entity()?;
        if !B::Draft::entity_image_item_ids(persisted).contains(&Some(item_id)) {
            return Err(EditorError::NotFound(format!(
                "{} {item_id} not found",
                <B::Draft as ImageItems>::ITEM_LIST
            )));
        }

        let updated = self
            .backend
            .delete_item_image(id, item_id)
            .await
            .map_err(|e| self.delete_failed(e))?;
        tracing::info!(entity, id, item_id, "Sub-item image deleted");
        Ok(updated)
    }
}
