//! Structured, non-fatal conversion diagnostics.
//!
//! The pipeline collects these instead of printing them; callers decide how
//! to surface them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoercionError, ResolutionError};

/// Which field of a view (or its pose) a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "index", rename_all = "camelCase")]
pub enum Field {
    FrameId,
    PoseId,
    Rotation(usize),
    Center(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameId => f.write_str("frameId"),
            Self::PoseId => f.write_str("poseId"),
            Self::Rotation(i) => write!(f, "rotation[{i}]"),
            Self::Center(i) => write!(f, "center[{i}]"),
        }
    }
}

/// Where in the input a diagnostic was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticContext {
    /// Position of the view in the input `views` array.
    pub view_index: usize,
    pub view_id: String,
    /// Pose the view references, when resolution got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose_id: Option<String>,
    pub field: Field,
}

impl fmt::Display for DiagnosticContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view #{} (id '{}')", self.view_index, self.view_id)?;
        if let Some(pose_id) = &self.pose_id {
            write!(f, " pose '{pose_id}'")?;
        }
        write!(f, " {}", self.field)
    }
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A text field did not parse as a number.
    Coercion,
    /// A pose reference matched no pose.
    Resolution,
    /// An array had more components than the output layout holds.
    ExtraComponents,
}

/// What the pipeline did in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// The view produced no record.
    SkippedView,
    /// The component was written as `0.0` and the record kept.
    ZeroFilled,
    /// Nothing was dropped.
    Ignored,
}

/// One recoverable problem found during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub context: DiagnosticContext,
    pub kind: DiagnosticKind,
    pub action: Action,
    pub message: String,
}

impl Diagnostic {
    pub fn coercion(context: DiagnosticContext, error: &CoercionError, action: Action) -> Self {
        Self {
            context,
            kind: DiagnosticKind::Coercion,
            action,
            message: error.to_string(),
        }
    }

    pub fn resolution(context: DiagnosticContext, error: &ResolutionError) -> Self {
        Self {
            context,
            kind: DiagnosticKind::Resolution,
            action: Action::SkippedView,
            message: error.to_string(),
        }
    }

    pub fn extra_components(context: DiagnosticContext, expected: usize, extra: usize) -> Self {
        Self {
            context,
            kind: DiagnosticKind::ExtraComponents,
            action: Action::Ignored,
            message: format!("expected {expected} components, ignored {extra} more"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// Ordered list of diagnostics from one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Returns the number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.0.iter().filter(|d| d.kind == kind).count()
    }

    /// Returns the diagnostics raised for one input view.
    pub fn for_view(&self, view_index: usize) -> impl Iterator<Item = &Diagnostic> {
        self.0
            .iter()
            .filter(move |d| d.context.view_index == view_index)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn context(field: Field) -> DiagnosticContext {
        DiagnosticContext {
            view_index: 3,
            view_id: "v3".to_string(),
            pose_id: Some("p9".to_string()),
            field,
        }
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::coercion(
            context(Field::Rotation(4)),
            &CoercionError::NonFinite("nan".to_string()),
            Action::ZeroFilled,
        );
        assert_eq!(
            d.to_string(),
            "view #3 (id 'v3') pose 'p9' rotation[4]: non-finite value 'nan'"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let d = Diagnostic::resolution(
            DiagnosticContext {
                pose_id: None,
                ..context(Field::PoseId)
            },
            &ResolutionError::UnknownPose("missing".to_string()),
        );
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({
                "context": { "viewIndex": 3, "viewId": "v3", "field": { "name": "poseId" } },
                "kind": "resolution",
                "action": "skippedView",
                "message": "cannot find pose 'missing'"
            })
        );
        assert_eq!(
            serde_json::to_value(Field::Center(2)).unwrap(),
            json!({ "name": "center", "index": 2 })
        );
    }

    #[test]
    fn test_counts() {
        let mut list = Diagnostics::new();
        list.push(Diagnostic::extra_components(context(Field::Center(3)), 3, 1));
        list.push(Diagnostic::coercion(
            context(Field::FrameId),
            &CoercionError::Empty,
            Action::SkippedView,
        ));
        assert_eq!(list.count(DiagnosticKind::Coercion), 1);
        assert_eq!(list.count(DiagnosticKind::Resolution), 0);
        assert_eq!(list.for_view(3).count(), 2);
        assert_eq!(list.for_view(0).count(), 0);
    }
}
