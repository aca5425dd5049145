//! Option layering for the demo binary: `picker.toml`, then environment,
//! then command line, last writer wins.

use std::fs;

use picker_core::config::{parse_max_uploads, PickerOptions};

pub fn load_options(flag_max_uploads: Option<&str>) -> PickerOptions {
    let mut options = PickerOptions::default();

    if let Ok(raw) = fs::read_to_string("picker.toml") {
        if let Ok(file_opts) = toml::from_str::<PickerOptions>(&raw) {
            options = file_opts;
        }
    }

    if let Ok(v) = std::env::var("PICKER__MAX_UPLOADS") {
        options.max_uploads = parse_max_uploads(&v);
    }

    if let Some(v) = flag_max_uploads {
        options.max_uploads = parse_max_uploads(v);
    }

    options
}
