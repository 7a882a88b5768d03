/// Shared data structures for the upload flow
///
/// These structs represent the image a user picked or dropped, and the
/// in-memory preview the UI shows while it is being analyzed.

use std::path::{Path, PathBuf};

use iced::widget::image;

use crate::error::SelectionError;

/// MIME type used when neither the extension nor the content says otherwise
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Where a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Native file dialog; relies on the dialog's extension filter
    Picker,
    /// Dropped onto the window; must be an `image/*` type
    Drop,
}

/// An image chosen for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSelection {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
    origin: SelectionOrigin,
}

impl ImageSelection {
    /// Validate and wrap a selection.
    ///
    /// Content must be non-empty. Only the drop path enforces an
    /// `image/*` MIME type.
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
        origin: SelectionOrigin,
    ) -> Result<Self, SelectionError> {
        let file_name = file_name.into();
        let mime = mime.into();

        if origin == SelectionOrigin::Drop && !is_image_mime(&mime) {
            return Err(SelectionError::NotAnImage { file_name, mime });
        }
        if bytes.is_empty() {
            return Err(SelectionError::Empty(file_name));
        }

        Ok(Self {
            file_name,
            mime,
            bytes,
            origin,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn origin(&self) -> SelectionOrigin {
        self.origin
    }
}

/// Locally derived preview of the current selection.
///
/// Owned by the upload controller; dropping it releases the decoded image.
#[derive(Debug, Clone)]
pub struct Preview {
    id: u64,
    file_name: String,
    handle: image::Handle,
}

impl Preview {
    pub fn new(id: u64, selection: &ImageSelection) -> Self {
        Self {
            id,
            file_name: selection.file_name.clone(),
            handle: image::Handle::from_bytes(selection.bytes.clone()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn handle(&self) -> &image::Handle {
        &self.handle
    }
}

/// True for `image/*` MIME types (case-insensitive)
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// MIME type implied by a file's extension, if it names a known image format
pub fn mime_from_path(path: &Path) -> Option<String> {
    ::image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// MIME type sniffed from file content
pub fn mime_from_content(bytes: &[u8]) -> Option<String> {
    ::image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// Read a picked or dropped file into a selection.
///
/// Dropped files are checked by extension before anything is read, so a
/// dropped text file never touches the disk or the network.
pub async fn load_selection(
    path: PathBuf,
    origin: SelectionOrigin,
) -> Result<ImageSelection, SelectionError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let by_extension = mime_from_path(&path);

    if origin == SelectionOrigin::Drop {
        let mime = by_extension.clone().unwrap_or_else(|| UNKNOWN_MIME.to_string());
        if !is_image_mime(&mime) {
            return Err(SelectionError::NotAnImage { file_name, mime });
        }
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| SelectionError::Unreadable {
            file_name: file_name.clone(),
            reason: e.to_string(),
        })?;

    let mime = by_extension
        .or_else(|| mime_from_content(&bytes))
        .unwrap_or_else(|| UNKNOWN_MIME.to_string());

    tracing::debug!(file = %file_name, %mime, size = bytes.len(), ?origin, "Loaded selection");

    ImageSelection::new(file_name, mime, bytes, origin)
}
