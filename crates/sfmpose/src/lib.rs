//! sfmpose-rs: convert Structure-from-Motion reconstructions into pose tables.
//!
//! An SfM document lists camera views, intrinsics and poses with every
//! number stored as text. This crate links each view to its pose, coerces
//! the frame number, rotation and center, and emits a compact table keyed by
//! frame.
//!
//! # Quick Start
//!
//! ```no_run
//! use sfmpose::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let report = convert_file("cameras.sfm", "poses.json", &ConvertOptions::default())?;
//!     println!("{} poses written", report.document.len());
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! A document that does not fit the schema fails the whole conversion. A
//! view whose frame id is not an integer, or whose pose cannot be found,
//! is skipped and reported as a [`Diagnostic`]. A rotation or center
//! component that does not parse is handled by [`PartialRecordPolicy`].

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod conversion;
pub mod io;

// Re-export core types
pub use sfmpose_core::{
    coerce_float, coerce_int, convert, convert_value, resolve, Action, CoercionError,
    ConversionReport, ConversionStats, ConvertOptions, DMat3, DVec3, Diagnostic,
    DiagnosticContext, DiagnosticKind, Diagnostics, DuplicatePoseIdPolicy, Field, Intrinsic,
    OutputDocument, OutputPoseRecord, PartialRecordPolicy, Pose, PoseIndex, PoseLookup,
    PoseTransform, ResolutionError, Result, SfmDocument, SfmError, View,
};

pub use conversion::{convert_file, convert_str, report_diagnostics};
pub use io::{load_options, read_document, to_json, write_diagnostics, write_output};

/// Initializes logging from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
