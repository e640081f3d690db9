//! Document rendering and writing
//!
//! The document is rendered as JSON indented with three spaces and written to
//! stdout or to a file readable only by its owner.

use crate::domain::{ExportDocument, NomadExportError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const INDENT: &[u8] = b"   ";

/// Render a document as indented JSON
pub fn render(document: &ExportDocument) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| NomadExportError::Serialization(e.to_string()))
}

/// Write a document to `path`, or to stdout when `path` is `None`
pub fn write_document(document: &ExportDocument, path: Option<&str>) -> Result<()> {
    let mut rendered = render(document)?;
    rendered.push('\n');

    match path {
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            write_private_file(Path::new(path), rendered.as_bytes()).map_err(|e| {
                NomadExportError::Io(format!("Failed to write data to file {path}: {e}"))
            })?;
            tracing::info!(file = %path, bytes = rendered.len(), "Data written to file");
        }
    }

    Ok(())
}

fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NamespaceEntry, NamespaceName, NamespaceRecord};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn document() -> ExportDocument {
        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            NamespaceName::new("default").unwrap(),
            NamespaceEntry::new(NamespaceRecord::new(json!({"Name": "default"})), BTreeMap::new()),
        );
        ExportDocument::new(namespaces)
    }

    #[test]
    fn test_render_uses_three_space_indent() {
        let rendered = render(&document()).unwrap();
        let expected = "{\n   \"namespaces\": {\n      \"default\": {\n         \"definition\": {\n            \"Name\": \"default\"\n         }\n      }\n   }\n}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(render(&ExportDocument::default()).unwrap(), "{}");
    }

    #[test]
    fn test_write_document_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");

        write_document(&document(), Some(path.to_str().unwrap())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, document());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_write_document_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_document(&ExportDocument::default(), Some(path.to_str().unwrap())).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_document_bad_path() {
        let err = write_document(&document(), Some("/nonexistent/dir/export.json")).unwrap_err();
        assert!(matches!(err, NomadExportError::Io(_)));
    }
}
