//! Trait seam between the history manager and the embedding editor.
//!
//! The manager never touches the document model directly. It reads and
//! writes document state through [`DocumentAdapter`], and reports state
//! transitions through [`LifecycleHooks`]. The editor implements both;
//! tests implement them with small in-memory fakes.

use anyhow::Result;

/// How content handed to [`DocumentAdapter::apply_content`] should be
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// Interpret the content, applying the editor's usual input rules.
    Auto,
    /// Take the content as-is. Used when re-materializing prior state,
    /// which must not be reinterpreted.
    Literal,
}

/// Editing mode the content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Structured math expression content.
    Math,
    /// Plain text content.
    Text,
}

/// Where applied content lands relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionMode {
    /// Replace the entire document.
    ReplaceAll,
    /// Replace the current selection.
    ReplaceSelection,
    /// Insert before the current selection.
    InsertBefore,
    /// Insert after the current selection.
    InsertAfter,
}

/// Where the selection lands after content is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Collapse the selection after the inserted content.
    After,
    /// Collapse the selection before the inserted content.
    Before,
    /// Select the inserted content itself.
    Item,
    /// Move the selection to the first placeholder in the content.
    Placeholder,
}

/// Options accompanying a [`DocumentAdapter::apply_content`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// How to interpret the content.
    pub format: ContentFormat,
    /// Editing mode the content belongs to.
    pub mode: EditMode,
    /// Where the content lands.
    pub insertion: InsertionMode,
    /// Where the selection lands afterwards.
    pub selection: SelectionMode,
    /// Whether automatic fence/bracket completion may run on the content.
    pub smart_fence: bool,
    /// When `Some`, requests the adapter suppress (or fire) change
    /// notifications for this application regardless of its current flag.
    pub suppress_change_notifications: Option<bool>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            format: ContentFormat::Auto,
            mode: EditMode::Math,
            insertion: InsertionMode::ReplaceSelection,
            selection: SelectionMode::After,
            smart_fence: true,
            suppress_change_notifications: None,
        }
    }
}

/// Operations the history manager needs from the document model.
///
/// `serialize_content` and `serialize_selection` must produce textual
/// forms that `apply_content`/`apply_selection` accept back unchanged;
/// that round-trip is what makes snapshots restorable.
pub trait DocumentAdapter {
    /// Returns the full serialized textual form of the document.
    fn serialize_content(&self) -> String;

    /// Returns the full serialized form of the current selection.
    fn serialize_selection(&self) -> String;

    /// Returns a serialized selection addressing the start of the
    /// document root. Applied when restoring an absent snapshot.
    fn root_selection(&self) -> String;

    /// Replaces or inserts document content per `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be applied (malformed or
    /// inapplicable to the current document).
    fn apply_content(&mut self, content: &str, options: &ApplyOptions) -> Result<()>;

    /// Moves the selection to the given serialized path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or does not resolve.
    fn apply_selection(&mut self, path: &str) -> Result<()>;

    /// Whether change notifications are currently suppressed.
    fn notifications_suppressed(&self) -> bool;

    /// Sets the notification-suppression flag.
    fn set_notifications_suppressed(&mut self, suppressed: bool);
}

/// Kind of history transition reported to [`LifecycleHooks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Stepping backward through history.
    Undo,
    /// Stepping forward through history.
    Redo,
    /// Recording a new history entry.
    Snapshot,
}

/// Callbacks invoked synchronously around history transitions.
///
/// Both methods default to doing nothing, so implementors only override
/// what they observe. A hook must not call back into the manager; the
/// manager is mid-mutation when hooks run and reentrancy is unguarded.
pub trait LifecycleHooks {
    /// Called before the transition mutates history or document state.
    fn before_transition(&mut self, _kind: TransitionKind) {}

    /// Called after the transition completes.
    fn after_transition(&mut self, _kind: TransitionKind) {}
}

/// Hook implementation that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LifecycleHooks for NoHooks {}
