//! The view-by-view conversion pipeline.
//!
//! For each view, in input order:
//! 1. the frame id is coerced to an integer; on failure the view is skipped;
//! 2. the pose reference is resolved; on failure the view is skipped;
//! 3. the nine rotation and three center components are coerced one by one;
//!    failures are handled by [`PartialRecordPolicy`];
//! 4. the record is appended to the output.
//!
//! Every recoverable failure is recorded as a [`Diagnostic`]. Only
//! structural problems (see [`SfmError`]) abort the conversion.

use serde::{Deserialize, Serialize};

use crate::coercion::{coerce_components, coerce_int};
use crate::diagnostics::{Action, Diagnostic, DiagnosticContext, Diagnostics, Field};
use crate::error::{Result, SfmError};
use crate::options::{ConvertOptions, DuplicatePoseIdPolicy, PartialRecordPolicy, PoseLookup};
use crate::output::{OutputDocument, OutputPoseRecord};
use crate::resolver::{find_duplicate_pose_id, LinearScan, PoseIndex, PoseSource};
use crate::schema::{SfmDocument, View};

const ROTATION_LEN: usize = 9;
const CENTER_LEN: usize = 3;

/// Counters for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub views_total: usize,
    pub records_emitted: usize,
    pub views_skipped: usize,
}

/// Everything a conversion produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    pub document: OutputDocument,
    pub diagnostics: Diagnostics,
    pub stats: ConversionStats,
}

/// Converts an already-parsed JSON value.
///
/// Fails with [`SfmError::MalformedInput`] if the value does not fit the
/// SfM schema.
pub fn convert_value(value: serde_json::Value, options: &ConvertOptions) -> Result<ConversionReport> {
    let document = SfmDocument::from_value(value)?;
    convert(&document, options)
}

/// Converts a document into a pose table.
///
/// Only fails when `options` rejects duplicate pose identifiers and the
/// document contains some.
pub fn convert(document: &SfmDocument, options: &ConvertOptions) -> Result<ConversionReport> {
    let policy = options.partial_records;
    let reject = options.duplicate_pose_ids == DuplicatePoseIdPolicy::Reject;

    let report = match options.lookup {
        PoseLookup::Indexed => {
            let index = if reject {
                PoseIndex::new_strict(&document.poses)?
            } else {
                PoseIndex::new(&document.poses)
            };
            if index.duplicates() > 0 {
                log::debug!("{} pose(s) shadowed by an earlier pose id", index.duplicates());
            }
            convert_with(&document.views, &index, policy)
        }
        PoseLookup::LinearScan => {
            if reject {
                if let Some(id) = find_duplicate_pose_id(&document.poses) {
                    return Err(SfmError::DuplicatePoseId(id.to_owned()));
                }
            }
            convert_with(&document.views, &LinearScan(&document.poses), policy)
        }
    };

    log::debug!(
        "converted {} of {} views ({} diagnostics)",
        report.stats.records_emitted,
        report.stats.views_total,
        report.diagnostics.len()
    );
    Ok(report)
}

/// Converts views against an arbitrary pose source.
pub fn convert_with<'a>(
    views: &[View],
    poses: &dyn PoseSource<'a>,
    policy: PartialRecordPolicy,
) -> ConversionReport {
    let mut data = Vec::with_capacity(views.len());
    let mut diagnostics = Diagnostics::new();

    for (index, view) in views.iter().enumerate() {
        match convert_view(index, view, poses, policy, &mut diagnostics) {
            Some(record) => data.push(record),
            None => log::debug!("skipped view #{index} (id '{}')", view.view_id),
        }
    }

    let stats = ConversionStats {
        views_total: views.len(),
        records_emitted: data.len(),
        views_skipped: views.len() - data.len(),
    };
    ConversionReport {
        document: OutputDocument { data },
        diagnostics,
        stats,
    }
}

fn convert_view<'a>(
    index: usize,
    view: &View,
    poses: &dyn PoseSource<'a>,
    policy: PartialRecordPolicy,
    diagnostics: &mut Diagnostics,
) -> Option<OutputPoseRecord> {
    let context = |field: Field, pose_id: Option<&str>| DiagnosticContext {
        view_index: index,
        view_id: view.view_id.clone(),
        pose_id: pose_id.map(str::to_owned),
        field,
    };

    let frame = match coerce_int(&view.frame_id) {
        Ok(frame) => frame,
        Err(e) => {
            diagnostics.push(Diagnostic::coercion(
                context(Field::FrameId, None),
                &e,
                Action::SkippedView,
            ));
            return None;
        }
    };

    let pose = match poses.lookup(&view.pose_id) {
        Ok(pose) => pose,
        Err(e) => {
            diagnostics.push(Diagnostic::resolution(
                context(Field::PoseId, Some(view.pose_id.as_str())),
                &e,
            ));
            return None;
        }
    };

    let pose_id = Some(view.pose_id.as_str());
    let transform = &pose.pose.transform;
    let rotation = coerce_components::<ROTATION_LEN>(&transform.rotation);
    let center = coerce_components::<CENTER_LEN>(&transform.center);

    let complete = rotation.is_complete() && center.is_complete();
    let action = match policy {
        PartialRecordPolicy::ZeroFill => Action::ZeroFilled,
        PartialRecordPolicy::DropView => Action::SkippedView,
    };

    for (i, e) in &rotation.errors {
        diagnostics.push(Diagnostic::coercion(
            context(Field::Rotation(*i), pose_id),
            e,
            action,
        ));
    }
    for (i, e) in &center.errors {
        diagnostics.push(Diagnostic::coercion(
            context(Field::Center(*i), pose_id),
            e,
            action,
        ));
    }
    if rotation.extra > 0 {
        diagnostics.push(Diagnostic::extra_components(
            context(Field::Rotation(ROTATION_LEN), pose_id),
            ROTATION_LEN,
            rotation.extra,
        ));
    }
    if center.extra > 0 {
        diagnostics.push(Diagnostic::extra_components(
            context(Field::Center(CENTER_LEN), pose_id),
            CENTER_LEN,
            center.extra,
        ));
    }

    if !complete && policy == PartialRecordPolicy::DropView {
        return None;
    }

    Some(OutputPoseRecord::new(frame, rotation.values, center.values))
}
