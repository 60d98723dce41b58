//! Pose lookup by identifier.
//!
//! Two strategies are available behind [`PoseSource`]: a linear scan over
//! the pose list ([`LinearScan`]) and a hash index built once per
//! conversion ([`PoseIndex`]). Both return the first pose declared with a
//! given identifier.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{ResolutionError, Result, SfmError};
use crate::schema::Pose;

/// Looks up poses by `poseId`.
pub trait PoseSource<'a> {
    /// Returns the first pose carrying `pose_id`.
    fn lookup(&self, pose_id: &str) -> std::result::Result<&'a Pose, ResolutionError>;
}

/// Scans the pose list for the first pose carrying `pose_id`.
pub fn resolve<'a>(
    pose_id: &str,
    poses: &'a [Pose],
) -> std::result::Result<&'a Pose, ResolutionError> {
    poses
        .iter()
        .find(|p| p.pose_id == pose_id)
        .ok_or_else(|| ResolutionError::UnknownPose(pose_id.to_owned()))
}

/// Returns the first identifier declared by more than one pose.
pub fn find_duplicate_pose_id(poses: &[Pose]) -> Option<&str> {
    let mut seen = std::collections::HashSet::with_capacity(poses.len());
    poses
        .iter()
        .map(|p| p.pose_id.as_str())
        .find(|id| !seen.insert(*id))
}

/// [`PoseSource`] backed by [`resolve`].
#[derive(Debug, Clone, Copy)]
pub struct LinearScan<'a>(pub &'a [Pose]);

impl<'a> PoseSource<'a> for LinearScan<'a> {
    fn lookup(&self, pose_id: &str) -> std::result::Result<&'a Pose, ResolutionError> {
        resolve(pose_id, self.0)
    }
}

/// Hash index from pose identifier to pose.
#[derive(Debug, Default)]
pub struct PoseIndex<'a> {
    poses: HashMap<&'a str, &'a Pose>,
    duplicates: usize,
}

impl<'a> PoseIndex<'a> {
    /// Builds the index, keeping the first pose for each identifier.
    pub fn new(poses: &'a [Pose]) -> Self {
        let mut index = Self {
            poses: HashMap::with_capacity(poses.len()),
            duplicates: 0,
        };
        for pose in poses {
            match index.poses.entry(pose.pose_id.as_str()) {
                Entry::Occupied(_) => index.duplicates += 1,
                Entry::Vacant(slot) => {
                    slot.insert(pose);
                }
            }
        }
        index
    }

    /// Builds the index, failing on the first repeated identifier.
    pub fn new_strict(poses: &'a [Pose]) -> Result<Self> {
        let mut map = HashMap::with_capacity(poses.len());
        for pose in poses {
            if map.insert(pose.pose_id.as_str(), pose).is_some() {
                return Err(SfmError::DuplicatePoseId(pose.pose_id.clone()));
            }
        }
        Ok(Self {
            poses: map,
            duplicates: 0,
        })
    }

    /// Returns the number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if the index holds no poses.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Returns how many poses were shadowed by an earlier pose with the same id.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Checks if a pose with the given identifier exists.
    pub fn contains(&self, pose_id: &str) -> bool {
        self.poses.contains_key(pose_id)
    }
}

impl<'a> PoseSource<'a> for PoseIndex<'a> {
    fn lookup(&self, pose_id: &str) -> std::result::Result<&'a Pose, ResolutionError> {
        self.poses
            .get(pose_id)
            .copied()
            .ok_or_else(|| ResolutionError::UnknownPose(pose_id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PoseState, RawTransform};

    fn pose(id: &str, locked: &str) -> Pose {
        Pose {
            pose_id: id.to_string(),
            pose: PoseState {
                transform: RawTransform::default(),
                locked: locked.to_string(),
            },
        }
    }

    #[test]
    fn test_resolve_exact_match() {
        let poses = vec![pose("a", "0"), pose("b", "1")];
        assert_eq!(resolve("b", &poses).unwrap().pose.locked, "1");
        assert_eq!(
            resolve("B", &poses),
            Err(ResolutionError::UnknownPose("B".to_string()))
        );
        assert!(resolve("", &poses).is_err());
    }

    #[test]
    fn test_first_match_wins() {
        let poses = vec![pose("a", "first"), pose("a", "second")];
        assert_eq!(resolve("a", &poses).unwrap().pose.locked, "first");

        let index = PoseIndex::new(&poses);
        assert_eq!(index.lookup("a").unwrap().pose.locked, "first");
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);
    }

    #[test]
    fn test_strict_index_rejects_duplicates() {
        let poses = vec![pose("a", "0"), pose("b", "0"), pose("a", "0")];
        let err = PoseIndex::new_strict(&poses).unwrap_err();
        assert!(matches!(err, SfmError::DuplicatePoseId(ref id) if id == "a"));
        assert_eq!(find_duplicate_pose_id(&poses), Some("a"));

        let unique = vec![pose("a", "0"), pose("b", "0")];
        assert!(PoseIndex::new_strict(&unique).is_ok());
        assert_eq!(find_duplicate_pose_id(&unique), None);
    }

    #[test]
    fn test_sources_agree() {
        let poses = vec![pose("x", "1"), pose("y", "2"), pose("x", "3")];
        let scan = LinearScan(&poses);
        let index = PoseIndex::new(&poses);
        for id in ["x", "y", "z", ""] {
            assert_eq!(scan.lookup(id), index.lookup(id), "{id}");
        }
        assert!(index.contains("y"));
        assert!(!index.is_empty());
    }
}
