//! Create and update through the entity editors.
//!
//! Drafts come from JSON files; picked images go through the same pending
//! upload pipeline an interactive form would use.

use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use voyage_client::services::{DestinationService, HotelService, PackService};
use voyage_client::ApiClient;
use voyage_core::drafts::{DestinationDraft, Draft, HotelDraft, PackDraft};
use voyage_editor::{EditorState, EntityBackend, EntityEditor, EntityOf, NavigateTo, PreviewRegistry};

use crate::app::read_file;
use crate::cli::{DestinationArgs, HotelArgs, PackArgs};
use crate::output;

/// Editor for a new entity, or for the one named by `raw_id`.
pub async fn open<B: EntityBackend>(
    backend: B,
    previews: PreviewRegistry,
    raw_id: Option<&str>,
) -> anyhow::Result<EntityEditor<B>> {
    let Some(raw_id) = raw_id else {
        return Ok(EntityEditor::for_create(backend, previews));
    };
    let editor = EntityEditor::for_edit(backend, previews, Some(raw_id)).await;
    if editor.state() != EditorState::Ready {
        bail!(
            "{}",
            editor.last_error().unwrap_or("Failed to open the editor")
        );
    }
    Ok(editor)
}

async fn read_draft<D: DeserializeOwned>(path: &Path) -> anyhow::Result<D> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a valid draft", path.display()))
}

async fn submit<B>(mut editor: EntityEditor<B>) -> anyhow::Result<()>
where
    B: EntityBackend,
    EntityOf<B>: Serialize,
{
    let entity = <B::Draft as Draft>::ENTITY;
    let outcome = editor.submit().await?;
    match outcome.navigate {
        NavigateTo::Detail(id) => println!("Saved {entity} {id}."),
        NavigateTo::List => println!("Saved {entity}; the server did not return its id."),
    }
    output::json(&outcome.entity)
}

pub async fn hotel(
    api: &ApiClient,
    previews: &PreviewRegistry,
    raw_id: Option<&str>,
    args: HotelArgs,
) -> anyhow::Result<()> {
    let draft: HotelDraft = read_draft(&args.draft).await?;
    let mut editor = open(HotelService::new(api.clone()), previews.clone(), raw_id).await?;
    *editor.draft_mut()? = draft;

    if let Some(path) = &args.image {
        editor.select_primary_file(read_file(path).await?)?;
    }
    for (index, path) in &args.room_images {
        editor.select_item_file(*index, read_file(path).await?)?;
    }
    submit(editor).await
}

pub async fn destination(
    api: &ApiClient,
    previews: &PreviewRegistry,
    raw_id: Option<&str>,
    args: DestinationArgs,
) -> anyhow::Result<()> {
    let draft: DestinationDraft = read_draft(&args.draft).await?;
    let mut editor = open(DestinationService::new(api.clone()), previews.clone(), raw_id).await?;
    *editor.draft_mut()? = draft;

    for path in &args.images {
        editor.select_primary_file(read_file(path).await?)?;
    }
    submit(editor).await
}

pub async fn pack(
    api: &ApiClient,
    previews: &PreviewRegistry,
    raw_id: Option<&str>,
    args: PackArgs,
) -> anyhow::Result<()> {
    let draft: PackDraft = read_draft(&args.draft).await?;
    let mut editor = open(PackService::new(api.clone()), previews.clone(), raw_id).await?;
    *editor.draft_mut()? = draft;
    submit(editor).await
}
