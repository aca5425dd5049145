//! Host-page stand-in for the selection core: picks files from disk paths,
//! drives the controller through a few gestures, and prints what a real
//! renderer would consume.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use picker_core::{Effect, Gesture, PreviewState, SelectionController};
use shared::domain::{FileHandle, FileSummary};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Files to hand to the picker, in selection order.
    paths: Vec<PathBuf>,
    /// Upload cap; zero or non-numeric means unbounded.
    #[arg(long)]
    max_uploads: Option<String>,
    /// Indices to forward-delete after the pick, in order.
    #[arg(long)]
    delete: Vec<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let options = config::load_options(args.max_uploads.as_deref());
    let mut controller = SelectionController::new(options.max_uploads);

    let mut candidate = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        candidate.push(read_handle(path)?);
    }

    apply(controller.handle(Gesture::Pick(candidate)));
    controller.settle_previews().await;
    print_previews(&controller);

    for index in args.delete {
        apply(controller.handle(Gesture::DeleteAt {
            index,
            key: picker_core::DeleteKey::Forward,
        }));
        controller.settle_previews().await;
        print_previews(&controller);
    }

    let summary: Vec<FileSummary> = controller
        .selection()
        .iter()
        .map(FileHandle::summary)
        .collect();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn read_handle(path: &Path) -> Result<FileHandle> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_else(|| "application/octet-stream".to_owned());
    Ok(FileHandle::new(name, mime_type, bytes))
}

fn apply(effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::SyncMirror(files) => {
                info!(count = files.len(), "native input resynced");
            }
            Effect::Warn(reason) => eprintln!("{reason}"),
            Effect::RenderPreviews => info!("preview list rebuilt"),
            Effect::FocusPreview(index) => println!("focus -> preview {index}"),
            Effect::OpenInspector { index } => println!("inspector opened on {index}"),
            Effect::CloseInspector => println!("inspector closed"),
        }
    }
}

fn print_previews(controller: &SelectionController) {
    for entry in controller.previews() {
        let status = match &entry.state {
            PreviewState::Pending => "pending".to_owned(),
            PreviewState::Ready(image) => {
                format!("{}x{} thumbnail, {} chars", image.width, image.height, image.data_uri.len())
            }
            PreviewState::Failed { reason } => format!("failed: {reason}"),
        };
        println!("[{}] {} ({}) {}", entry.index, entry.file_name, entry.mime_type, status);
    }
}
