use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a candidate selection was rejected.
///
/// Both variants are recoverable and user-correctable; the store is left
/// untouched and the caller resyncs the presentation mirror. The `Display`
/// text is the user-facing warning; delivery (modal, toast, alert) is up to
/// the host.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("You can only upload up to {limit} files.")]
    TooManyFiles { limit: usize },
    /// `name` records the first offending file for logs; the message stays
    /// generic.
    #[error("You can only upload image files.")]
    InvalidFileType { name: String },
}
