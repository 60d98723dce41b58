//! Configuration options for a conversion.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SfmError};

/// Options controlling how a document is converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// What to do when a rotation or center component fails to parse.
    pub partial_records: PartialRecordPolicy,

    /// What to do when several poses share an identifier.
    pub duplicate_pose_ids: DuplicatePoseIdPolicy,

    /// How views are matched to poses.
    pub lookup: PoseLookup,

    /// Whether the output document is pretty-printed.
    pub pretty_output: bool,
}

impl ConvertOptions {
    /// Parses options from JSON text. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SfmError::ConfigError(e.to_string()))
    }

    /// Options that drop any view with an unparseable component and reject
    /// duplicate pose identifiers.
    pub fn strict() -> Self {
        Self {
            partial_records: PartialRecordPolicy::DropView,
            duplicate_pose_ids: DuplicatePoseIdPolicy::Reject,
            ..Self::default()
        }
    }
}

/// Handling of rotation/center components that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PartialRecordPolicy {
    /// Keep the record and leave the failed component at `0.0`.
    ///
    /// This is the historical behaviour of the format's tooling.
    #[default]
    ZeroFill,
    /// Drop the whole view.
    DropView,
}

/// Handling of poses that share an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePoseIdPolicy {
    /// Resolve to the first pose declared with the identifier.
    #[default]
    FirstWins,
    /// Fail the conversion with [`SfmError::DuplicatePoseId`].
    Reject,
}

/// Pose lookup strategy. Both give identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PoseLookup {
    /// Scan the pose list for every view.
    #[default]
    LinearScan,
    /// Build a hash index once per conversion.
    Indexed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.partial_records, PartialRecordPolicy::ZeroFill);
        assert_eq!(options.duplicate_pose_ids, DuplicatePoseIdPolicy::FirstWins);
        assert_eq!(options.lookup, PoseLookup::LinearScan);
        assert!(!options.pretty_output);
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            ConvertOptions::from_json_str(r#"{ "partialRecords": "dropView", "lookup": "indexed" }"#)
                .unwrap();
        assert_eq!(options.partial_records, PartialRecordPolicy::DropView);
        assert_eq!(options.lookup, PoseLookup::Indexed);
        assert_eq!(options.duplicate_pose_ids, DuplicatePoseIdPolicy::FirstWins);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ConvertOptions::from_json_str(r#"{ "lookup": "bogus" }"#).unwrap_err();
        assert!(matches!(err, SfmError::ConfigError(_)));
    }

    #[test]
    fn test_strict() {
        let options = ConvertOptions::strict();
        assert_eq!(options.partial_records, PartialRecordPolicy::DropView);
        assert_eq!(options.duplicate_pose_ids, DuplicatePoseIdPolicy::Reject);
    }
}
