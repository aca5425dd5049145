//! Preview projection and asynchronous thumbnail decoding.
//!
//! Every selection change rebuilds the whole `PreviewEntry` list (no
//! diffing; the list is small, bounded by the upload cap in practice) and
//! schedules one fire-and-forget decode task per entry. Completions come
//! back over a channel tagged with the generation they were scheduled
//! under; a completion whose generation no longer matches targets a list
//! that has already been discarded and is dropped on the floor.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use shared::domain::FileHandle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Longest thumbnail edge, in pixels.
const THUMBNAIL_MAX_EDGE: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// `data:image/png;base64,…` thumbnail, ready for an `img` src.
    pub data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewState {
    Pending,
    Ready(PreviewImage),
    Failed { reason: String },
}

/// One preview descriptor, position-aligned with the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub index: usize,
    pub file_name: String,
    pub mime_type: String,
    pub state: PreviewState,
}

/// A scheduled decode for one entry of one projection generation.
#[derive(Debug, Clone)]
pub struct DecodeJob {
    pub generation: u64,
    pub index: usize,
    pub file: FileHandle,
}

/// Completion of a decode task. `result` is a presentation fact either way;
/// corrupt bytes become `Err`, never a panic.
#[derive(Debug)]
pub struct DecodeDone {
    pub generation: u64,
    pub index: usize,
    pub result: Result<PreviewImage, String>,
}

/// Derives the preview list for `selection`, one `Pending` entry plus one
/// decode job per file, both keyed by the file's current index.
pub fn project(selection: &[FileHandle], generation: u64) -> (Vec<PreviewEntry>, Vec<DecodeJob>) {
    let mut entries = Vec::with_capacity(selection.len());
    let mut jobs = Vec::with_capacity(selection.len());
    for (index, file) in selection.iter().enumerate() {
        entries.push(PreviewEntry {
            index,
            file_name: file.name().to_owned(),
            mime_type: file.mime_type().to_owned(),
            state: PreviewState::Pending,
        });
        jobs.push(DecodeJob {
            generation,
            index,
            file: file.clone(),
        });
    }
    (entries, jobs)
}

/// Spawns the decode for one job. Fire and forget: there is no cancellation,
/// stale completions are filtered at intake instead.
pub fn spawn_decode(job: DecodeJob, tx: UnboundedSender<DecodeDone>) {
    tokio::spawn(async move {
        let DecodeJob {
            generation,
            index,
            file,
        } = job;
        let result = tokio::task::spawn_blocking(move || decode_thumbnail(file.bytes()))
            .await
            .unwrap_or_else(|join_err| Err(format!("decode task failed: {join_err}")));
        // Receiver dropping just means the controller is gone.
        let _ = tx.send(DecodeDone {
            generation,
            index,
            result,
        });
    });
}

/// Applies one completion to the current preview list. Returns whether the
/// completion was applied; stale generations and out-of-range indices are
/// discarded. Completion only fills a single entry's state in place, never
/// reorders or resizes the list.
pub fn apply_completion(
    previews: &mut [PreviewEntry],
    current_generation: u64,
    done: DecodeDone,
) -> bool {
    if done.generation != current_generation {
        debug!(
            stale = done.generation,
            current = current_generation,
            index = done.index,
            "discarding stale decode completion"
        );
        return false;
    }
    let Some(entry) = previews.get_mut(done.index) else {
        debug!(index = done.index, "decode completion for missing entry");
        return false;
    };
    entry.state = match done.result {
        Ok(image) => PreviewState::Ready(image),
        Err(reason) => PreviewState::Failed { reason },
    };
    true
}

fn decode_thumbnail(bytes: &[u8]) -> Result<PreviewImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let (w, h) = (decoded.width(), decoded.height());
    let thumbnail = if w.max(h) > THUMBNAIL_MAX_EDGE {
        decoded.resize(
            THUMBNAIL_MAX_EDGE,
            THUMBNAIL_MAX_EDGE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = thumbnail.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(PreviewImage {
        width,
        height,
        data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
    })
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;
