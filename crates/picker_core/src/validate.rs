//! Pure validation predicates over primitive inputs.

use std::num::NonZeroUsize;

/// True iff the declared mime type marks the file as an image. Advisory
/// only, not a content sniff.
pub fn is_image_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// True iff a cap is set and the candidate count is over it.
pub fn exceeds_max(candidate_count: usize, max_uploads: Option<NonZeroUsize>) -> bool {
    match max_uploads {
        Some(max) => candidate_count > max.get(),
        None => false,
    }
}
