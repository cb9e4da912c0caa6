//! Admin form payloads.
//!
//! Raw forms are validated with `validator` and converted into typed payloads
//! consumed by the editor workflow.

use actix_multipart::form::tempfile::TempFile;

use crate::domain::upload::SelectedFile;

pub mod categories;
pub mod delete;
pub mod products;

/// Builds a [`SelectedFile`] from uploaded parts. An empty part means the file
/// input was left blank.
pub fn selected_file(
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
) -> Option<SelectedFile> {
    if bytes.is_empty() {
        return None;
    }
    Some(SelectedFile::new(
        file_name.unwrap_or_else(|| "image".to_string()),
        content_type,
        bytes,
    ))
}

/// Reads an uploaded temp file into memory.
pub fn read_image(file: Option<TempFile>) -> std::io::Result<Option<SelectedFile>> {
    let Some(file) = file else {
        return Ok(None);
    };
    if file.size == 0 {
        return Ok(None);
    }
    let bytes = std::fs::read(file.file.path())?;
    Ok(selected_file(
        file.file_name,
        file.content_type.map(|m| m.to_string()),
        bytes,
    ))
}
