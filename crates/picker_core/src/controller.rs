//! Gesture intake and effect emission.
//!
//! The controller is an explicit state struct plus a reducer: every user
//! gesture runs synchronously to completion against the selection store and
//! comes back as a list of effects for the host to apply. The core is the
//! source of truth; the native file input is a presentation mirror that is
//! resynced after every accepted or rejected mutation, never trusted in the
//! other direction.

use std::num::NonZeroUsize;

use shared::{domain::FileHandle, error::RejectionReason};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::preview::{self, DecodeDone, PreviewEntry, PreviewState};
use crate::store::SelectionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKey {
    /// Forward-delete: focus moves to the entry that slides into the freed
    /// index.
    Forward,
    /// Backspace: focus moves to the entry before the freed index.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    OutsideClick,
    Cancel,
}

/// A user gesture, as reported by the host boundary.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// The platform file picker produced a new candidate set.
    Pick(Vec<FileHandle>),
    /// Keyboard delete on one preview entry.
    DeleteAt { index: usize, key: DeleteKey },
    /// The clear button.
    Clear,
    /// Runtime change of the upload cap.
    SetMaxUploads(Option<NonZeroUsize>),
    /// Open the read-only enlarged view of one preview entry.
    Inspect(usize),
    /// Close the enlarged view.
    Dismiss(DismissReason),
}

/// What the host must do after a gesture. Effects are ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write this file list back onto the native input. Emitted after every
    /// mutation attempt, including rejections, since the native widget may
    /// have already mutated itself before validation ran.
    SyncMirror(Vec<FileHandle>),
    /// Surface the warning text to the user.
    Warn(RejectionReason),
    /// The preview list was rebuilt; re-render from `previews()`.
    RenderPreviews,
    /// Move input focus to this preview entry.
    FocusPreview(usize),
    OpenInspector { index: usize },
    CloseInspector,
}

/// Selection store, derived previews, and decode intake in one place.
///
/// `handle` spawns decode tasks, so the controller must live inside a Tokio
/// runtime. Mutations never interleave; the only concurrency is the decode
/// tasks, whose completions are serialized through one channel and filtered
/// by generation at intake.
pub struct SelectionController {
    store: SelectionStore,
    previews: Vec<PreviewEntry>,
    generation: u64,
    inspector: Option<usize>,
    done_tx: UnboundedSender<DecodeDone>,
    done_rx: UnboundedReceiver<DecodeDone>,
}

impl SelectionController {
    pub fn new(max_uploads: Option<NonZeroUsize>) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            store: SelectionStore::new(max_uploads),
            previews: Vec::new(),
            generation: 0,
            inspector: None,
            done_tx,
            done_rx,
        }
    }

    pub fn selection(&self) -> &[FileHandle] {
        self.store.selection()
    }

    pub fn previews(&self) -> &[PreviewEntry] {
        &self.previews
    }

    pub fn max_uploads(&self) -> Option<NonZeroUsize> {
        self.store.max_uploads()
    }

    /// Currently inspected preview index, if the modal is open.
    pub fn inspector(&self) -> Option<usize> {
        self.inspector
    }

    pub fn handle(&mut self, gesture: Gesture) -> Vec<Effect> {
        match gesture {
            Gesture::Pick(candidate) => self.pick(candidate),
            Gesture::DeleteAt { index, key } => self.delete_at(index, key),
            Gesture::Clear => self.clear(),
            Gesture::SetMaxUploads(max) => self.set_max_uploads(max),
            Gesture::Inspect(index) => self.inspect(index),
            Gesture::Dismiss(reason) => self.dismiss(reason),
        }
    }

    fn pick(&mut self, candidate: Vec<FileHandle>) -> Vec<Effect> {
        match self.store.replace(candidate) {
            Ok(_) => {
                self.reproject();
                vec![
                    Effect::SyncMirror(self.store.selection().to_vec()),
                    Effect::RenderPreviews,
                ]
            }
            Err(reason) => {
                warn!(%reason, "pick rejected");
                // Store is unchanged; the mirror is restored from it.
                vec![
                    Effect::SyncMirror(self.store.selection().to_vec()),
                    Effect::Warn(reason),
                ]
            }
        }
    }

    fn delete_at(&mut self, index: usize, key: DeleteKey) -> Vec<Effect> {
        let before = self.store.selection().len();
        self.store.remove_at(index);
        let after = self.store.selection().len();
        if after == before {
            // Out-of-range delete is a no-op, not an error.
            return Vec::new();
        }
        self.reproject();
        let mut effects = vec![
            Effect::SyncMirror(self.store.selection().to_vec()),
            Effect::RenderPreviews,
        ];
        let target = match key {
            DeleteKey::Forward => Some(index),
            DeleteKey::Backward => index.checked_sub(1),
        };
        if let Some(target) = target.filter(|t| *t < after) {
            effects.push(Effect::FocusPreview(target));
        }
        effects
    }

    fn clear(&mut self) -> Vec<Effect> {
        self.store.clear();
        self.reproject();
        vec![
            Effect::SyncMirror(Vec::new()),
            Effect::RenderPreviews,
        ]
    }

    fn set_max_uploads(&mut self, max: Option<NonZeroUsize>) -> Vec<Effect> {
        if !self.store.set_max_uploads(max) {
            return Vec::new();
        }
        self.reproject();
        vec![
            Effect::SyncMirror(self.store.selection().to_vec()),
            Effect::RenderPreviews,
        ]
    }

    fn inspect(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.previews.len() {
            return Vec::new();
        }
        self.inspector = Some(index);
        vec![Effect::OpenInspector { index }]
    }

    fn dismiss(&mut self, _reason: DismissReason) -> Vec<Effect> {
        if self.inspector.take().is_some() {
            vec![Effect::CloseInspector]
        } else {
            Vec::new()
        }
    }

    /// Rebuilds the preview list under a fresh generation and schedules one
    /// decode per entry. Anything still in flight for the old generation
    /// will be discarded at intake.
    fn reproject(&mut self) {
        self.generation += 1;
        let (entries, jobs) = preview::project(self.store.selection(), self.generation);
        self.previews = entries;
        for job in jobs {
            preview::spawn_decode(job, self.done_tx.clone());
        }
    }

    /// Drains every decode completion that is already waiting; returns how
    /// many were applied (stale ones count as drained, not applied).
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.done_rx.try_recv() {
                Ok(done) => {
                    if preview::apply_completion(&mut self.previews, self.generation, done) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Awaits completions until no current-generation entry is pending.
    pub async fn settle_previews(&mut self) {
        while self
            .previews
            .iter()
            .any(|e| matches!(e.state, PreviewState::Pending))
        {
            let Some(done) = self.done_rx.recv().await else {
                return;
            };
            preview::apply_completion(&mut self.previews, self.generation, done);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
