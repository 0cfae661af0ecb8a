use std::path::Path;

use lexiscan_types::Failure;

/// Multipart field the service reads the image from
pub const IMAGE_FIELD: &str = "image";

/// The single file part of one upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Read the selected file. Nothing selected, a missing path, a directory
    /// or an unreadable file is a validation failure.
    pub async fn read(selection: Option<&Path>) -> Result<Self, Failure> {
        let path = selection.ok_or_else(|| Failure::Validation("No image file selected".to_string()))?;

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            tracing::debug!("metadata for {} failed: {}", path.display(), e);
            Failure::Validation(format!("Selected file does not exist: {}", path.display()))
        })?;

        if metadata.is_dir() {
            return Err(Failure::Validation(format!(
                "Selected path is a directory: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Failure::Validation(format!("Selected path has no file name: {}", path.display())))?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::warn!("Reading {} failed: {}", path.display(), e);
            Failure::Validation(format!("Could not read selected file: {}", path.display()))
        })?;

        tracing::debug!("Read {} ({} bytes)", file_name, bytes.len());
        Ok(Self { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn nothing_selected_is_validation_failure() {
        let err = UploadRequest::read(None).await.unwrap_err();
        assert_eq!(err, Failure::Validation("No image file selected".to_string()));
    }

    #[tokio::test]
    async fn missing_file_and_directory_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = UploadRequest::read(Some(&dir.path().join("nope.png"))).await.unwrap_err();
        assert!(matches!(err, Failure::Validation(msg) if msg.contains("does not exist")));

        let err = UploadRequest::read(Some(dir.path())).await.unwrap_err();
        assert!(matches!(err, Failure::Validation(msg) if msg.contains("directory")));
    }

    #[tokio::test]
    async fn reads_bytes_and_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"\xff\xd8\xff").unwrap();

        let request = UploadRequest::read(Some(&path)).await.unwrap();
        assert_eq!(request.file_name, "page.jpg");
        assert_eq!(request.bytes, b"\xff\xd8\xff");
    }

    #[tokio::test]
    async fn empty_file_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::File::create(&path).unwrap();

        let request = UploadRequest::read(Some(&path)).await.unwrap();
        assert!(request.bytes.is_empty());
    }
}
