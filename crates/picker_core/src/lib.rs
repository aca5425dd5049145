//! Selection-state core for a multi-image upload widget.
//!
//! Owns the ordered list of picked files, validates mutations against a
//! max-count cap and an image-type whitelist, projects an asynchronously
//! decoded thumbnail list, and turns user gestures into effects for the
//! host to apply. Rendering, markup, and upload transport live outside.

pub mod config;
pub mod controller;
pub mod preview;
pub mod store;
pub mod validate;

pub use config::PickerOptions;
pub use controller::{DeleteKey, DismissReason, Effect, Gesture, SelectionController};
pub use preview::{PreviewEntry, PreviewImage, PreviewState};
pub use store::SelectionStore;
