/// Bounded-depth, linear undo/redo history for a structured math
/// expression document.
///
/// Provides a `HistoryManager` that records full-state snapshots of a
/// document reached through the `DocumentAdapter` trait, steps backward
/// and forward through them, coalesces rapid edit bursts into single
/// entries, and offers save/restore independent of the history stack.
pub mod adapter;
pub mod config;
pub mod manager;
pub mod snapshot;

pub use adapter::{
    ApplyOptions, ContentFormat, DocumentAdapter, EditMode, InsertionMode, LifecycleHooks, NoHooks,
    SelectionMode, TransitionKind,
};
pub use config::HistoryConfig;
pub use manager::HistoryManager;
pub use snapshot::{RestoreOptions, Snapshot};
