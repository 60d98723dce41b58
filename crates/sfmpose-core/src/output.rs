//! The emitted pose table.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// The converted document: one record per successfully converted view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Records in input view order.
    pub data: Vec<OutputPoseRecord>,
}

impl OutputDocument {
    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no view was converted.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &OutputPoseRecord> {
        self.data.iter()
    }

    /// Returns every record carrying the given frame number.
    pub fn records_for_frame(&self, frame: i64) -> impl Iterator<Item = &OutputPoseRecord> {
        self.data.iter().filter(move |r| r.frame == frame)
    }
}

/// The pose of one view, keyed by its frame number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputPoseRecord {
    pub frame: i64,
    pub transform: PoseTransform,
}

impl OutputPoseRecord {
    /// Creates a record from a frame number and its transform.
    pub fn new(frame: i64, rotation: [f64; 9], center: [f64; 3]) -> Self {
        Self {
            frame,
            transform: PoseTransform { rotation, center },
        }
    }

    /// Gets the rotation as a matrix. The stored array is read row by row.
    pub fn rotation_matrix(&self) -> DMat3 {
        DMat3::from_cols_array(&self.transform.rotation).transpose()
    }

    /// Gets the camera center as a vector.
    pub fn center_point(&self) -> DVec3 {
        DVec3::from_array(self.transform.center)
    }
}

/// Numeric rotation and center of a pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseTransform {
    /// Row-major 3x3 rotation matrix.
    pub rotation: [f64; 9],
    /// Camera center in world coordinates.
    pub center: [f64; 3],
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_shape() {
        let doc = OutputDocument {
            data: vec![OutputPoseRecord::new(
                42,
                [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, 0.0],
            )],
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [{
                    "frame": 42,
                    "transform": {
                        "rotation": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
                        "center": [0.0, 0.0, 0.0]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_empty_document_serializes_empty_array() {
        let text = serde_json::to_string(&OutputDocument::default()).unwrap();
        assert_eq!(text, r#"{"data":[]}"#);
    }

    #[test]
    fn test_rotation_matrix_is_row_major() {
        let record = OutputPoseRecord::new(
            0,
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            [1.0, -2.0, 3.5],
        );
        let m = record.rotation_matrix();
        // First row is (1, 2, 3), so the first column starts 1, 4, 7.
        assert_eq!(m.x_axis, DVec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.row(0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(record.center_point(), DVec3::new(1.0, -2.0, 3.5));
    }

    #[test]
    fn test_records_for_frame() {
        let doc = OutputDocument {
            data: vec![
                OutputPoseRecord::new(1, [0.0; 9], [0.0; 3]),
                OutputPoseRecord::new(2, [0.0; 9], [1.0; 3]),
                OutputPoseRecord::new(1, [0.0; 9], [2.0; 3]),
            ],
        };
        assert_eq!(doc.records_for_frame(1).count(), 2);
        assert_eq!(doc.records_for_frame(3).count(), 0);
        assert_eq!(doc.len(), 3);
    }
}
