//! Core model and conversion pipeline for sfmpose-rs.
//!
//! This crate turns an SfM reconstruction document into a pose table keyed
//! by frame number:
//! - [`SfmDocument`] is the tolerant, text-typed input model
//! - [`coercion`] turns text tokens into numbers
//! - [`resolver`] links views to poses by identifier
//! - [`convert`] drives the per-view pipeline and returns an
//!   [`OutputDocument`] together with structured [`Diagnostics`]
//!
//! Nothing here performs I/O or prints; see the `sfmpose` crate for that.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors return plain values which don't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod coercion;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod schema;

pub use coercion::{coerce_components, coerce_float, coerce_int, ComponentCoercion};
pub use diagnostics::{Action, Diagnostic, DiagnosticContext, DiagnosticKind, Diagnostics, Field};
pub use error::{CoercionError, ResolutionError, Result, SfmError};
pub use options::{ConvertOptions, DuplicatePoseIdPolicy, PartialRecordPolicy, PoseLookup};
pub use output::{OutputDocument, OutputPoseRecord, PoseTransform};
pub use pipeline::{convert, convert_value, convert_with, ConversionReport, ConversionStats};
pub use resolver::{find_duplicate_pose_id, resolve, LinearScan, PoseIndex, PoseSource};
pub use schema::{Intrinsic, Pose, PoseState, RawTransform, SfmDocument, View, ViewMetadata};

// Re-export glam types for convenience
pub use glam::{DMat3, DVec3};
