//! File-level conversion and diagnostic reporting.

use std::path::Path;

use sfmpose_core::{ConversionReport, ConvertOptions, DiagnosticKind, Result, SfmDocument};

use crate::io::{read_document, write_output};

/// Converts an SfM file and writes the pose table.
///
/// Diagnostics are logged through [`report_diagnostics`] and returned in
/// the report. Nothing is written if the input is malformed.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let document = read_document(input)?;
    let report = sfmpose_core::convert(&document, options)?;
    report_diagnostics(&report);
    write_output(output, &report.document, options.pretty_output)?;
    Ok(report)
}

/// Converts SfM JSON text, returning the report without logging.
pub fn convert_str(text: &str, options: &ConvertOptions) -> Result<ConversionReport> {
    let document = SfmDocument::from_json_str(text)?;
    sfmpose_core::convert(&document, options)
}

/// Logs every diagnostic at warn level, then a one-line summary.
pub fn report_diagnostics(report: &ConversionReport) {
    for diagnostic in &report.diagnostics {
        log::warn!("{diagnostic}");
    }

    let stats = &report.stats;
    log::info!(
        "{} of {} views converted, {} skipped ({} coercion, {} resolution diagnostics)",
        stats.records_emitted,
        stats.views_total,
        stats.views_skipped,
        report.diagnostics.count(DiagnosticKind::Coercion),
        report.diagnostics.count(DiagnosticKind::Resolution),
    );
}
