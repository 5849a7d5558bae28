//! Multipart form handling.
//!
//! Write endpoints that carry files use one convention: a `data` part
//! holding the JSON payload plus any number of named file parts. Files
//! are pushed to object storage first; handlers only ever persist public
//! URLs.

use axum::extract::Multipart;
use pedika_common::{AppError, AppResult, StorageBackend, generate_storage_key};
use serde::de::DeserializeOwned;

/// One uploaded file part.
#[derive(Debug)]
pub struct FormFile {
    /// Multipart field name the file arrived under.
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A parsed multipart form: the `data` JSON part plus file parts.
#[derive(Debug, Default)]
pub struct ParsedForm {
    data: Option<String>,
    files: Vec<FormFile>,
}

impl ParsedForm {
    /// Deserialize the `data` part.
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        let raw = self
            .data
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Missing data field".to_string()))?;
        serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid data field: {e}")))
    }

    /// Deserialize the `data` part, or return the default when absent.
    ///
    /// Used by endpoints where the form may carry only a file.
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> AppResult<T> {
        match self.data.as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| AppError::BadRequest(format!("Invalid data field: {e}"))),
            None => Ok(T::default()),
        }
    }

    /// All files uploaded under a field name.
    pub fn files_named(&self, field: &str) -> Vec<&FormFile> {
        self.files.iter().filter(|f| f.field == field).collect()
    }

    /// The first file uploaded under a field name, if any.
    #[must_use]
    pub fn first_file(&self, field: &str) -> Option<&FormFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

/// Read an entire multipart body into memory.
pub async fn parse_form(mut multipart: Multipart) -> AppResult<ParsedForm> {
    let mut form = ParsedForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(filename) = field.file_name() {
            let filename = filename.to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file part: {e}")))?
                .to_vec();

            form.files.push(FormFile {
                field: name,
                filename,
                content_type,
                bytes,
            });
        } else if name == "data" {
            form.data = Some(
                field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read data part: {e}")))?,
            );
        }
    }

    Ok(form)
}

/// Upload files and return their public URLs, in order.
pub async fn store_files(
    storage: &dyn StorageBackend,
    owner_id: i32,
    files: &[&FormFile],
) -> AppResult<Vec<String>> {
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let key = generate_storage_key(owner_id, &file.filename);
        let uploaded = storage.upload(&key, &file.bytes, &file.content_type).await?;
        urls.push(uploaded.url);
    }
    Ok(urls)
}

/// Upload a single optional file and return its public URL.
pub async fn store_file(
    storage: &dyn StorageBackend,
    owner_id: i32,
    file: Option<&FormFile>,
) -> AppResult<Option<String>> {
    match file {
        Some(file) => {
            let key = generate_storage_key(owner_id, &file.filename);
            let uploaded = storage.upload(&key, &file.bytes, &file.content_type).await?;
            Ok(Some(uploaded.url))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_requires_data_part() {
        let form = ParsedForm::default();
        let result: AppResult<serde_json::Value> = form.json();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_json_or_default_without_data() {
        let form = ParsedForm::default();
        let value: serde_json::Map<String, serde_json::Value> =
            form.json_or_default().unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_files_named_filters_by_field() {
        let form = ParsedForm {
            data: None,
            files: vec![
                FormFile {
                    field: "evidence".to_string(),
                    filename: "bukti-1.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    bytes: vec![1],
                },
                FormFile {
                    field: "photo".to_string(),
                    filename: "foto.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: vec![2],
                },
                FormFile {
                    field: "evidence".to_string(),
                    filename: "bukti-2.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    bytes: vec![3],
                },
            ],
        };

        assert_eq!(form.files_named("evidence").len(), 2);
        assert_eq!(form.first_file("photo").unwrap().filename, "foto.png");
        assert!(form.first_file("document").is_none());
    }
}
