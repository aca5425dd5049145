//! Authoritative owner of the ordered file selection.

use std::num::NonZeroUsize;

use shared::{domain::FileHandle, error::RejectionReason};
use tracing::{debug, info, warn};

use crate::validate::{exceeds_max, is_image_type};

/// Ordered selection plus its max-count constraint.
///
/// Insertion order is the canonical display and removal order. Duplicate
/// handle identities are permitted; that is an explicit non-invariant.
/// Mutations run synchronously to completion and either commit wholesale or
/// leave the stored selection exactly as it was.
#[derive(Debug, Default)]
pub struct SelectionStore {
    files: Vec<FileHandle>,
    max_uploads: Option<NonZeroUsize>,
}

impl SelectionStore {
    pub fn new(max_uploads: Option<NonZeroUsize>) -> Self {
        Self {
            files: Vec::new(),
            max_uploads,
        }
    }

    pub fn selection(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn max_uploads(&self) -> Option<NonZeroUsize> {
        self.max_uploads
    }

    /// Replaces the whole selection with `candidate`.
    ///
    /// Rejects over-cap candidates with `TooManyFiles` and candidates holding
    /// any non-image entry with `InvalidFileType`; a rejection leaves the
    /// stored selection untouched, so no partial update is ever observable.
    pub fn replace(
        &mut self,
        candidate: Vec<FileHandle>,
    ) -> Result<&[FileHandle], RejectionReason> {
        if exceeds_max(candidate.len(), self.max_uploads) {
            let limit = self.max_uploads.map(NonZeroUsize::get).unwrap_or(0);
            warn!(candidates = candidate.len(), limit, "selection over cap");
            return Err(RejectionReason::TooManyFiles { limit });
        }
        if let Some(offender) = candidate.iter().find(|f| !is_image_type(f.mime_type())) {
            warn!(
                name = offender.name(),
                mime_type = offender.mime_type(),
                "non-image entry in selection"
            );
            return Err(RejectionReason::InvalidFileType {
                name: offender.name().to_owned(),
            });
        }
        info!(count = candidate.len(), "selection replaced");
        self.files = candidate;
        Ok(&self.files)
    }

    /// Removes the entry at `index`; out-of-range is a no-op. Removal only
    /// shrinks the selection, so it can never violate a constraint.
    pub fn remove_at(&mut self, index: usize) -> &[FileHandle] {
        if index < self.files.len() {
            let removed = self.files.remove(index);
            debug!(index, name = removed.name(), "entry removed");
        }
        &self.files
    }

    pub fn clear(&mut self) -> &[FileHandle] {
        self.files.clear();
        &self.files
    }

    /// Updates the cap. Tightening below the current length truncates to the
    /// first `n` entries instead of rejecting; returns whether truncation
    /// happened. Deliberate asymmetry with [`replace`](Self::replace), which
    /// rejects over-cap candidates outright.
    pub fn set_max_uploads(&mut self, max_uploads: Option<NonZeroUsize>) -> bool {
        self.max_uploads = max_uploads;
        match max_uploads {
            Some(max) if self.files.len() > max.get() => {
                debug!(
                    from = self.files.len(),
                    to = max.get(),
                    "cap tightened, truncating selection"
                );
                self.files.truncate(max.get());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
