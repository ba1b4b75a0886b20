/// Configuration for the history core.

/// Maximum number of snapshots kept on the stack before the oldest
/// is evicted.
const DEFAULT_MAX_DEPTH: usize = 1000;

/// Configuration for the history system.
///
/// Fixed at construction of the [`HistoryManager`]; not reconfigurable
/// afterwards.
///
/// [`HistoryManager`]: crate::manager::HistoryManager
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Max snapshots retained. Once exceeded, the history window slides
    /// forward: the oldest entry is dropped on each new push.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: resolve_max_depth(),
        }
    }
}

/// Resolves the history depth bound.
///
/// Resolution order:
/// 1. `MATH_PAD_HISTORY_DEPTH` environment variable
/// 2. built-in default (1000)
pub fn resolve_max_depth() -> usize {
    parse_depth(std::env::var("MATH_PAD_HISTORY_DEPTH").ok().as_deref())
}

fn parse_depth(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_MAX_DEPTH)
}
