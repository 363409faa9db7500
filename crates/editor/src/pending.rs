//! Files selected in an editor but not yet uploaded.
//!
//! Primary images form an ordered list. Sub-item images live in slots keyed
//! by the item's server id when it has one, by its list position otherwise.
//! Every pending file owns exactly one live preview; any path that drops a
//! file from the set releases that preview.

use std::collections::BTreeMap;

use voyage_client::LocalFile;
use voyage_core::types::DbId;

use crate::previews::{PreviewRef, PreviewRegistry};

/// Address of a sub-item image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKey {
    /// An item the server has not assigned an id yet.
    Position(usize),
    Item(DbId),
}

impl SlotKey {
    /// Slot for the item at `position` whose server id is `id`.
    pub fn for_item(position: usize, id: Option<DbId>) -> Self {
        match id {
            Some(id) => Self::Item(id),
            None => Self::Position(position),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PendingFile {
    pub file: LocalFile,
    pub preview: PreviewRef,
}

#[derive(Debug)]
pub struct PendingUploads {
    registry: PreviewRegistry,
    primary: Vec<PendingFile>,
    items: BTreeMap<SlotKey, PendingFile>,
}

impl PendingUploads {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            primary: Vec::new(),
            items: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.items.is_empty()
    }

    // ---- primary images ----

    /// Replace the primary selection with `file`.
    pub fn replace_primary(&mut self, file: LocalFile) -> PreviewRef {
        self.release_primary();
        self.push_primary(file)
    }

    /// Append `file` to the primary selection.
    pub fn push_primary(&mut self, file: LocalFile) -> PreviewRef {
        let preview = self.registry.create(&file);
        self.primary.push(PendingFile {
            file,
            preview: preview.clone(),
        });
        preview
    }

    /// Drop the primary file at `index`. `false` when out of range.
    pub fn remove_primary(&mut self, index: usize) -> bool {
        if index >= self.primary.len() {
            return false;
        }
        let pending = self.primary.remove(index);
        self.registry.release(&pending.preview);
        true
    }

    pub fn primary_len(&self) -> usize {
        self.primary.len()
    }

    pub fn primary_previews(&self) -> Vec<PreviewRef> {
        self.primary.iter().map(|p| p.preview.clone()).collect()
    }

    pub fn primary_files(&self) -> Vec<LocalFile> {
        self.primary.iter().map(|p| p.file.clone()).collect()
    }

    pub fn release_primary(&mut self) {
        for pending in self.primary.drain(..) {
            self.registry.release(&pending.preview);
        }
    }

    // ---- sub-item slots ----

    /// Put `file` in `key`, releasing whatever the slot held before.
    pub fn select_item(&mut self, key: SlotKey, file: LocalFile) -> PreviewRef {
        let preview = self.registry.create(&file);
        let previous = self.items.insert(
            key,
            PendingFile {
                file,
                preview: preview.clone(),
            },
        );
        if let Some(previous) = previous {
            self.registry.release(&previous.preview);
        }
        preview
    }

    /// Empty a slot. `false` when it held nothing.
    pub fn clear_item(&mut self, key: SlotKey) -> bool {
        match self.items.remove(&key) {
            Some(pending) => {
                self.registry.release(&pending.preview);
                true
            }
            None => false,
        }
    }

    pub fn item(&self, key: SlotKey) -> Option<&PendingFile> {
        self.items.get(&key)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The item at `position` (server id `id`) left the list: release its
    /// slot and move later positional slots down by one so they stay with
    /// their items.
    pub fn item_removed(&mut self, position: usize, id: Option<DbId>) {
        self.clear_item(SlotKey::for_item(position, id));

        // Keys come out ascending, so each target position is already free.
        let later: Vec<usize> = self
            .items
            .keys()
            .filter_map(|key| match key {
                SlotKey::Position(p) if *p > position => Some(*p),
                _ => None,
            })
            .collect();
        for p in later {
            if let Some(pending) = self.items.remove(&SlotKey::Position(p)) {
                self.items.insert(SlotKey::Position(p - 1), pending);
            }
        }
    }

    /// Re-key slots after the server assigned ids.
    ///
    /// `ids` holds the id of each item in list order. Positional slots whose
    /// item now has an id move to [`SlotKey::Item`]. Slots that no longer
    /// match any item are released.
    pub fn rebind(&mut self, ids: &[Option<DbId>]) {
        let slots = std::mem::take(&mut self.items);
        for (key, pending) in slots {
            let target = match key {
                SlotKey::Position(p) => match ids.get(p) {
                    Some(Some(id)) => Some(SlotKey::Item(*id)),
                    Some(None) => Some(key),
                    None => None,
                },
                SlotKey::Item(id) => ids.contains(&Some(id)).then_some(key),
            };
            match target {
                Some(target) => {
                    if let Some(displaced) = self.items.insert(target, pending) {
                        self.registry.release(&displaced.preview);
                    }
                }
                None => {
                    tracing::debug!(slot = ?key, "Dropping stale image slot");
                    self.registry.release(&pending.preview);
                }
            }
        }
    }

    /// `(item id, file)` for every item that has both an id and a pending
    /// file, in list order.
    pub fn ready_item_uploads(&self, ids: &[Option<DbId>]) -> Vec<(DbId, LocalFile)> {
        ids.iter()
            .flatten()
            .filter_map(|id| {
                self.items
                    .get(&SlotKey::Item(*id))
                    .map(|pending| (*id, pending.file.clone()))
            })
            .collect()
    }

    /// An item's image reached the server; drop its slot.
    pub fn complete_item(&mut self, id: DbId) {
        self.clear_item(SlotKey::Item(id));
    }

    pub fn release_all(&mut self) {
        self.release_primary();
        for (_, pending) in std::mem::take(&mut self.items) {
            self.registry.release(&pending.preview);
        }
    }
}

impl Drop for PendingUploads {
    fn drop(&mut self) {
        self.release_all();
    }
}
