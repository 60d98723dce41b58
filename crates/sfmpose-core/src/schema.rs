//! Typed model of an SfM reconstruction document.
//!
//! The model is deliberately loose: every scalar is kept as text, nested
//! objects and arrays default when absent or `null`, and unknown keys are
//! ignored. Numeric interpretation happens later in [`crate::coercion`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SfmError};

/// A complete SfM document: views, intrinsics and poses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SfmDocument {
    /// File format version, one component per entry.
    #[serde(deserialize_with = "text::list")]
    pub version: Vec<String>,
    #[serde(deserialize_with = "text::list")]
    pub features_folders: Vec<String>,
    #[serde(deserialize_with = "text::list")]
    pub matches_folders: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub views: Vec<View>,
    #[serde(deserialize_with = "nullable")]
    pub intrinsics: Vec<Intrinsic>,
    #[serde(deserialize_with = "nullable")]
    pub poses: Vec<Pose>,
}

impl SfmDocument {
    /// Interprets an already-parsed JSON value as an SfM document.
    ///
    /// Fails with [`SfmError::MalformedInput`] when the value is not an
    /// object or one of its known fields has an incompatible shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(SfmError::MalformedInput(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| SfmError::MalformedInput(e.to_string()))
    }

    /// Parses JSON text into an SfM document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| SfmError::MalformedInput(e.to_string()))?;
        Self::from_value(value)
    }
}

/// One camera observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct View {
    #[serde(deserialize_with = "text::scalar")]
    pub view_id: String,
    /// Identifier of the [`Pose`] this view was resected into.
    #[serde(deserialize_with = "text::scalar")]
    pub pose_id: String,
    /// Frame number, as text.
    #[serde(deserialize_with = "text::scalar")]
    pub frame_id: String,
    #[serde(deserialize_with = "text::scalar")]
    pub intrinsic_id: String,
    #[serde(deserialize_with = "text::scalar")]
    pub resection_id: String,
    #[serde(deserialize_with = "text::scalar")]
    pub path: String,
    #[serde(deserialize_with = "text::scalar")]
    pub width: String,
    #[serde(deserialize_with = "text::scalar")]
    pub height: String,
    #[serde(deserialize_with = "nullable")]
    pub metadata: ViewMetadata,
}

/// Image metadata attached to a view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewMetadata {
    #[serde(rename = "ImageDescription", deserialize_with = "text::scalar")]
    pub image_description: String,
    #[serde(rename = "jpeg:subsampling", deserialize_with = "text::scalar")]
    pub jpeg_subsampling: String,
    #[serde(rename = "oiio:ColorSpace", deserialize_with = "text::scalar")]
    pub oiio_color_space: String,
    /// Any other metadata keys (EXIF and friends), kept verbatim.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// Camera calibration. Carried for schema completeness only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Intrinsic {
    #[serde(deserialize_with = "text::scalar")]
    pub intrinsic_id: String,
    #[serde(deserialize_with = "text::scalar")]
    pub width: String,
    #[serde(deserialize_with = "text::scalar")]
    pub height: String,
    #[serde(deserialize_with = "text::scalar")]
    pub sensor_width: String,
    #[serde(deserialize_with = "text::scalar")]
    pub sensor_height: String,
    #[serde(deserialize_with = "text::scalar")]
    pub serial_number: String,
    /// Camera model name, e.g. `radial3`.
    #[serde(rename = "type", deserialize_with = "text::scalar")]
    pub model: String,
    #[serde(deserialize_with = "text::scalar")]
    pub initialization_mode: String,
    #[serde(deserialize_with = "text::scalar")]
    pub initial_focal_length: String,
    #[serde(deserialize_with = "text::scalar")]
    pub focal_length: String,
    #[serde(deserialize_with = "text::scalar")]
    pub pixel_ratio: String,
    #[serde(deserialize_with = "text::scalar")]
    pub pixel_ratio_locked: String,
    #[serde(deserialize_with = "text::list")]
    pub principal_point: Vec<String>,
    #[serde(deserialize_with = "text::scalar")]
    pub distortion_initialization_mode: String,
    #[serde(deserialize_with = "text::list")]
    pub distortion_params: Vec<String>,
    #[serde(deserialize_with = "text::scalar")]
    pub locked: String,
}

/// A camera transform, keyed by `poseId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pose {
    #[serde(deserialize_with = "text::scalar")]
    pub pose_id: String,
    #[serde(deserialize_with = "nullable")]
    pub pose: PoseState,
}

/// The `pose` body of a [`Pose`] record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseState {
    #[serde(deserialize_with = "nullable")]
    pub transform: RawTransform,
    #[serde(deserialize_with = "text::scalar")]
    pub locked: String,
}

/// Rotation and center as text tokens, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTransform {
    /// Row-major 3x3 rotation, nine tokens when well formed.
    #[serde(deserialize_with = "text::list")]
    pub rotation: Vec<String>,
    /// Camera center, three tokens when well formed.
    #[serde(deserialize_with = "text::list")]
    pub center: Vec<String>,
}

/// Treats an explicit `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Lenient text decoding for scalar slots.
///
/// Strings pass through, numbers and booleans are rendered back to text and
/// `null` becomes the empty string. Arrays and objects are rejected.
mod text {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(ScalarVisitor)
        }
    }

    struct Token(String);

    impl<'de> Deserialize<'de> for Token {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(ScalarVisitor).map(Token)
        }
    }

    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an array of scalars or null")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(Token(token)) = seq.next_element()? {
                out.push(token);
            }
            Ok(out)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Vec<String>, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Vec<String>, E> {
            Ok(Vec::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Vec<String>, D::Error> {
            d.deserialize_any(ListVisitor)
        }
    }

    pub fn scalar<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        d.deserialize_any(ScalarVisitor)
    }

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        d.deserialize_any(ListVisitor)
    }
}
