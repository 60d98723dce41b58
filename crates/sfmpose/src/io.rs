//! Reading and writing documents on disk.

use std::fs;
use std::path::Path;

use sfmpose_core::{ConvertOptions, Diagnostics, OutputDocument, Result, SfmDocument, SfmError};

/// Reads and parses an SfM document.
///
/// Unreadable files surface as [`SfmError::IoError`]; text that is not
/// JSON, or JSON that does not fit the schema, as [`SfmError::MalformedInput`].
pub fn read_document(path: impl AsRef<Path>) -> Result<SfmDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let document = SfmDocument::from_json_str(&text)?;
    log::debug!(
        "read {}: {} views, {} intrinsics, {} poses",
        path.display(),
        document.views.len(),
        document.intrinsics.len(),
        document.poses.len()
    );
    Ok(document)
}

/// Loads conversion options from a JSON file.
pub fn load_options(path: impl AsRef<Path>) -> Result<ConvertOptions> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| SfmError::ConfigError(format!("{}: {e}", path.display())))?;
    ConvertOptions::from_json_str(&text)
}

/// Serializes an output document.
pub fn to_json(document: &OutputDocument, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(text)
}

/// Writes an output document, replacing any existing file.
pub fn write_output(path: impl AsRef<Path>, document: &OutputDocument, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(document, pretty)?)?;
    log::debug!("wrote {} records to {}", document.len(), path.display());
    Ok(())
}

/// Writes diagnostics as a pretty-printed JSON array.
pub fn write_diagnostics(path: impl AsRef<Path>, diagnostics: &Diagnostics) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(diagnostics)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use sfmpose_core::OutputPoseRecord;

    use super::*;

    #[test]
    fn test_to_json_compact_and_pretty() {
        let doc = OutputDocument {
            data: vec![OutputPoseRecord::new(1, [0.5; 9], [2.0; 3])],
        };
        let compact = to_json(&doc, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with(r#"{"data":[{"frame":1,"#));

        let pretty = to_json(&doc, true).unwrap();
        assert!(pretty.contains('\n'));
        let back: OutputDocument = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_document("/nonexistent/cameras.sfm").unwrap_err();
        assert!(matches!(err, SfmError::IoError(_)));
    }

    #[test]
    fn test_load_missing_options() {
        let err = load_options("/nonexistent/options.json").unwrap_err();
        assert!(matches!(err, SfmError::ConfigError(_)));
    }
}
