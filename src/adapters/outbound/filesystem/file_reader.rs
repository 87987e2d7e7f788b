use crate::ddg::domain::DdgPayload;
use crate::ports::outbound::PayloadReader;
use crate::shared::error::DdgError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading DDG payloads from the file system
///
/// Files go through the shared security checks (no symlinks, regular files
/// only, size limit) before they are parsed.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadReader for FileSystemReader {
    fn read_payload(&self, path: &Path) -> Result<DdgPayload> {
        if !path.exists() {
            return Err(DdgError::PayloadNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "No payload file at \"{}\".\n   \
                     Export the materialized paths as JSON and pass the file with --payload.",
                    path.display()
                ),
            }
            .into());
        }

        let content = read_regular_file(path, "DDG payload")?;

        serde_json::from_str(&content).map_err(|e| {
            DdgError::PayloadParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddg::domain::PayloadEntry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_payload_success() {
        let temp_dir = TempDir::new().unwrap();
        let payload_path = temp_dir.path().join("payload.json");
        fs::write(
            &payload_path,
            r#"[[{"service": "B", "operation": "op2"}, {"service": "A", "operation": "op1"}]]"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let payload = reader.read_payload(&payload_path).unwrap();

        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0][1], PayloadEntry::new("A", "op1"));
    }

    #[test]
    fn test_read_payload_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_payload(&temp_dir.path().join("missing.json"));

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("DDG payload file not found"));
    }

    #[test]
    fn test_read_payload_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let payload_path = temp_dir.path().join("payload.json");
        fs::write(&payload_path, "{ not json").unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_payload(&payload_path).unwrap_err();

        match err.downcast_ref::<DdgError>() {
            Some(DdgError::PayloadParseError { path, .. }) => assert_eq!(path, &payload_path),
            other => panic!("Expected PayloadParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_read_payload_wrong_shape() {
        let temp_dir = TempDir::new().unwrap();
        let payload_path = temp_dir.path().join("payload.json");
        fs::write(&payload_path, r#"{"paths": []}"#).unwrap();

        let reader = FileSystemReader::new();
        let err_string = format!("{}", reader.read_payload(&payload_path).unwrap_err());
        assert!(err_string.contains("Failed to parse DDG payload"));
    }

    #[test]
    fn test_read_payload_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let err_string = format!("{}", reader.read_payload(temp_dir.path()).unwrap_err());
        assert!(err_string.contains("not a regular file"));
    }
}
