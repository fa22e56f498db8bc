//! File dialogs, document I/O and clipboard export driven by toolbar actions.

use std::{fs, path::Path};

use anyhow::Context;
use arboard::{Clipboard, ImageData};
use draft_core::{document::export_file_name, render::RasterSurface, Session};
use shared::error::DraftError;

/// Asks for a destination and writes the exported document there.
/// `Ok(false)` means the dialog was cancelled.
pub fn export_with_dialog(session: &Session) -> anyhow::Result<bool> {
    let file_name = export_file_name(chrono::Local::now().date_naive());
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Weave draft", &["json"])
        .set_file_name(&file_name)
        .save_file()
    else {
        return Ok(false);
    };
    export_to_path(session, &path)?;
    Ok(true)
}

pub fn export_to_path(session: &Session, path: &Path) -> anyhow::Result<()> {
    let bytes = session.export_document(chrono::Utc::now())?;
    fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote draft");
    Ok(())
}

/// Asks for a document and loads it into the session.
pub fn import_with_dialog(session: &mut Session) -> Result<bool, DraftError> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Weave draft", &["json"])
        .pick_file()
    else {
        return Ok(false);
    };
    import_from_path(session, &path)?;
    Ok(true)
}

/// File-system failures come back as [`DraftError::Io`] and are not reported
/// by the session; document errors are.
pub fn import_from_path(session: &mut Session, path: &Path) -> Result<(), DraftError> {
    let bytes = fs::read(path)?;
    session.import_document(&bytes)
}

/// Renders the full canvas off-screen and places it on the clipboard.
pub fn copy_canvas_to_clipboard(session: &Session) -> Result<(), String> {
    let mut surface = RasterSurface::for_settings(session.settings());
    session
        .render(&mut surface)
        .map_err(|err| err.to_string())?;
    let image = surface.into_image();
    write_clipboard_image(image.as_raw(), image.width() as usize, image.height() as usize)
}

fn write_clipboard_image(rgba: &[u8], width: usize, height: usize) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard
        .set_image(ImageData {
            width,
            height,
            bytes: std::borrow::Cow::Owned(rgba.to_vec()),
        })
        .map_err(|err| err.to_string())
}
