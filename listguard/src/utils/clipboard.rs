// listguard/src/utils/clipboard.rs
//! System clipboard access, available with the `clipboard` feature.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard support was not compiled in (rebuild with --features clipboard)")]
    Unsupported,
    #[cfg(feature = "clipboard")]
    #[error("clipboard error: {0}")]
    Backend(#[from] arboard::Error),
}

#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    log::debug!("Copied {} bytes to the clipboard.", text.len());
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_text: &str) -> Result<(), ClipboardError> {
    Err(ClipboardError::Unsupported)
}
