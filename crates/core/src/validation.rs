//! Draft validation primitives -- pure logic, no network access.
//!
//! Drafts collect [`FieldViolation`]s into a [`Violations`] accumulator.
//! An empty result means the draft may be submitted; anything else
//! blocks submission before a single request is issued.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Message used for every empty required field.
pub const REQUIRED_MESSAGE: &str = "is required";

/// A single field-level violation.
///
/// `field` is a path into the draft, e.g. `name` or `rooms[1].name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Accumulator for violations found while walking a draft.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unconditionally.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.items.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Require a non-blank string. Whitespace-only counts as empty.
    pub fn require_text(&mut self, field: impl Into<String>, value: &str) {
        if value.trim().is_empty() {
            self.push(field, REQUIRED_MESSAGE);
        }
    }

    /// Require an `Option` to be populated.
    pub fn require_some<T>(&mut self, field: impl Into<String>, value: &Option<T>) {
        if value.is_none() {
            self.push(field, REQUIRED_MESSAGE);
        }
    }

    /// Require `value >= min`. Values that do not compare at all (NaN)
    /// fail as well.
    pub fn require_at_least<T>(&mut self, field: impl Into<String>, value: T, min: T)
    where
        T: PartialOrd + std::fmt::Display,
    {
        match value.partial_cmp(&min) {
            Some(Ordering::Equal | Ordering::Greater) => {}
            Some(Ordering::Less) | None => self.push(field, format!("must be at least {min}")),
        }
    }

    /// Validate every item of a sub-list, prefixing paths with `list[index]`.
    pub fn each<T>(
        &mut self,
        list: &str,
        items: &[T],
        mut check: impl FnMut(&mut ItemScope<'_>, &T),
    ) {
        for (index, item) in items.iter().enumerate() {
            let mut scope = ItemScope {
                prefix: format!("{list}[{index}]"),
                inner: self,
            };
            check(&mut scope, item);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.items
    }
}

/// Borrowed view of [`Violations`] that prefixes field names with the
/// position of the sub-list item being checked.
pub struct ItemScope<'a> {
    prefix: String,
    inner: &'a mut Violations,
}

impl ItemScope<'_> {
    pub fn require_text(&mut self, field: &str, value: &str) {
        let path = format!("{}.{field}", self.prefix);
        self.inner.require_text(path, value);
    }

    pub fn require_at_least<T>(&mut self, field: &str, value: T, min: T)
    where
        T: PartialOrd + std::fmt::Display,
    {
        let path = format!("{}.{field}", self.prefix);
        self.inner.require_at_least(path, value, min);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
