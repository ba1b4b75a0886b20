/// Value types exchanged between the history manager and the editor.
use serde::{Deserialize, Serialize};

/// A full-state capture of the document at one point in time.
///
/// `content` is the complete serialized textual form of the document (not
/// a diff); `selection` is the complete serialized selection/cursor path.
/// Snapshots are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Serialized document content.
    pub content: String,
    /// Serialized selection path.
    pub selection: String,
}

/// Options for [`HistoryManager::restore`].
///
/// [`HistoryManager::restore`]: crate::manager::HistoryManager::restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoreOptions {
    /// When `Some`, overrides the document's notification-suppression flag
    /// for the duration of the restore. When `None`, the flag is left at
    /// its existing value for the override but still reinstated afterwards
    /// to the pre-call value.
    pub suppress_change_notifications: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            content: "x^{2}+1".to_string(),
            selection: "0.3".to_string(),
        }
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snap = sample_snapshot();
        let json = serde_json::to_string(&snap).expect("serialize");
        let decoded: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, snap);
    }

    #[test]
    fn test_empty_snapshot_serde_roundtrip() {
        let snap = Snapshot {
            content: String::new(),
            selection: String::new(),
        };
        let json = serde_json::to_string(&snap).expect("serialize");
        let decoded: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert!(decoded.content.is_empty());
        assert!(decoded.selection.is_empty());
    }

    #[test]
    fn test_large_content_serde_roundtrip() {
        let snap = Snapshot {
            content: "x+".repeat(100_000),
            selection: "0".to_string(),
        };
        let json = serde_json::to_string(&snap).expect("serialize");
        let decoded: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.content.len(), 200_000);
    }

    #[test]
    fn test_restore_options_default_leaves_flag_unset() {
        let options = RestoreOptions::default();
        assert_eq!(options.suppress_change_notifications, None);
    }
}
