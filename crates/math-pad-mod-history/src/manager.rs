/// Bounded-depth, linear undo/redo manager.
///
/// Keeps an ordered sequence of full-state snapshots plus a cursor into
/// it. New snapshots discard the redo region and evict the oldest entry
/// once the depth bound is exceeded, so the history window slides forward
/// under sustained editing.
use anyhow::{Context, Result};
use tracing::trace;

use crate::adapter::{
    ApplyOptions, ContentFormat, DocumentAdapter, EditMode, InsertionMode, LifecycleHooks,
    SelectionMode, TransitionKind,
};
use crate::config::HistoryConfig;
use crate::snapshot::{RestoreOptions, Snapshot};

/// Manages undo/redo history for a single document.
///
/// The manager owns the snapshot stack exclusively and lives exactly as
/// long as the document it instruments. All operations are synchronous;
/// there is no suspension point between a check like [`can_undo`] and the
/// operation it gates.
///
/// [`can_undo`]: Self::can_undo
pub struct HistoryManager {
    /// Snapshot stack, index 0 oldest.
    entries: Vec<Snapshot>,
    /// Current position in `entries`; `None` while empty.
    cursor: Option<usize>,
    /// One-way latch; snapshots are no-ops until recording starts.
    recording: bool,
    /// Whether the next coalescing snapshot replaces the previous entry.
    coalesce_pending: bool,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("entries_len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("recording", &self.recording)
            .field("coalesce_pending", &self.coalesce_pending)
            .field("max_depth", &self.config.max_depth)
            .finish()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryManager {
    /// Creates an empty manager. Recording starts disabled; call
    /// [`start_recording`] before the first snapshot.
    ///
    /// [`start_recording`]: Self::start_recording
    pub fn new(config: HistoryConfig) -> Self {
        // A zero depth would evict every push immediately.
        let config = HistoryConfig {
            max_depth: config.max_depth.max(1),
        };
        Self {
            entries: Vec::new(),
            cursor: None,
            recording: false,
            coalesce_pending: false,
            config,
        }
    }

    /// Clears all history. No side effects on the document. Idempotent.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Enables snapshot recording.
    ///
    /// One-way: there is no corresponding stop within the manager's
    /// lifetime.
    pub fn start_recording(&mut self) {
        self.recording = true;
    }

    /// Whether recording has started.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Number of entries on the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position in the stack, `None` while empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether stepping backward is possible.
    ///
    /// The entry at index 0, when present, is the floor state (usually
    /// the state at which recording began) and is not itself undoable.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Whether stepping forward is possible.
    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(i) => i + 1 < self.entries.len(),
            None => !self.entries.is_empty(),
        }
    }

    /// Records the current document state as a new history entry.
    ///
    /// No-op until [`start_recording`] has been called. Any redo region
    /// past the cursor is permanently discarded, not merely hidden. Once
    /// the stack exceeds the depth bound, the oldest entry is dropped and
    /// the cursor keeps pointing at the same logical entry.
    ///
    /// [`start_recording`]: Self::start_recording
    pub fn snapshot<D, H>(&mut self, doc: &D, hooks: &mut H)
    where
        D: DocumentAdapter + ?Sized,
        H: LifecycleHooks + ?Sized,
    {
        if !self.recording {
            return;
        }
        hooks.before_transition(TransitionKind::Snapshot);

        let keep = self.cursor.map_or(0, |i| i + 1);
        if self.entries.len() > keep {
            trace!(discarded = self.entries.len() - keep, "redo region discarded");
        }
        self.entries.truncate(keep);

        let captured = self.save(doc);
        self.entries.push(captured);
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.config.max_depth {
            self.entries.remove(0);
            self.cursor = self.cursor.map(|i| i - 1);
            trace!(max_depth = self.config.max_depth, "oldest entry evicted");
        }
        trace!(entries = self.entries.len(), cursor = ?self.cursor, "snapshot pushed");

        hooks.after_transition(TransitionKind::Snapshot);
        self.coalesce_pending = false;
    }

    /// Records the current document state, collapsing bursts into one
    /// entry.
    ///
    /// Consecutive calls with no plain [`snapshot`] in between retain only
    /// the latest state as a single entry, so a run of keystrokes undoes
    /// as one step. Any other history operation breaks the run.
    ///
    /// [`snapshot`]: Self::snapshot
    pub fn snapshot_and_coalesce<D, H>(&mut self, doc: &D, hooks: &mut H)
    where
        D: DocumentAdapter + ?Sized,
        H: LifecycleHooks + ?Sized,
    {
        if self.coalesce_pending {
            self.pop();
        }
        self.snapshot(doc, hooks);
        self.coalesce_pending = true;
    }

    /// Discards the most recent entry and moves the cursor back by one.
    ///
    /// No-op unless [`can_undo`]. Pure stack manipulation; the document
    /// is untouched. Exists as the discard half of coalescing and for
    /// tests; editor commands should not call it directly.
    ///
    /// [`can_undo`]: Self::can_undo
    pub fn pop(&mut self) {
        if !self.can_undo() {
            return;
        }
        self.entries.pop();
        self.cursor = self.cursor.map(|i| i - 1);
    }

    /// Steps backward one entry, restoring it to the document.
    ///
    /// No-op unless [`can_undo`]. The target entry is restored before the
    /// cursor moves, so a failed restore leaves history where it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the document adapter rejects the entry's
    /// content or selection.
    ///
    /// [`can_undo`]: Self::can_undo
    pub fn undo<D, H>(&mut self, doc: &mut D, hooks: &mut H) -> Result<()>
    where
        D: DocumentAdapter + ?Sized,
        H: LifecycleHooks + ?Sized,
    {
        let Some(i) = self.cursor else {
            return Ok(());
        };
        if i == 0 {
            return Ok(());
        }
        hooks.before_transition(TransitionKind::Undo);

        self.restore(doc, Some(&self.entries[i - 1]), &RestoreOptions::default())?;
        self.cursor = Some(i - 1);
        trace!(cursor = i - 1, "undo applied");

        hooks.after_transition(TransitionKind::Undo);
        self.coalesce_pending = false;
        Ok(())
    }

    /// Steps forward one entry, restoring it to the document.
    ///
    /// No-op unless [`can_redo`]. The cursor moves before the entry is
    /// restored.
    ///
    /// # Errors
    ///
    /// Returns an error if the document adapter rejects the entry's
    /// content or selection.
    ///
    /// [`can_redo`]: Self::can_redo
    pub fn redo<D, H>(&mut self, doc: &mut D, hooks: &mut H) -> Result<()>
    where
        D: DocumentAdapter + ?Sized,
        H: LifecycleHooks + ?Sized,
    {
        if !self.can_redo() {
            return Ok(());
        }
        hooks.before_transition(TransitionKind::Redo);

        let next = self.cursor.map_or(0, |i| i + 1);
        self.cursor = Some(next);
        self.restore(doc, Some(&self.entries[next]), &RestoreOptions::default())?;
        trace!(cursor = next, "redo applied");

        hooks.after_transition(TransitionKind::Redo);
        self.coalesce_pending = false;
        Ok(())
    }

    /// Captures the current document state without touching history.
    ///
    /// The returned snapshot can be handed back to [`restore`] later,
    /// independent of any undo/redo activity in between.
    ///
    /// [`restore`]: Self::restore
    pub fn save<D>(&self, doc: &D) -> Snapshot
    where
        D: DocumentAdapter + ?Sized,
    {
        Snapshot {
            content: doc.serialize_content(),
            selection: doc.serialize_selection(),
        }
    }

    /// Applies a snapshot to the document without touching history.
    ///
    /// An absent snapshot means "empty document, selection at the
    /// document root". The adapter's notification-suppression flag is
    /// held, optionally overridden for the duration, and reinstated on
    /// every exit path, including the failure path.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter rejects the snapshot's content or
    /// selection (possible for externally constructed snapshots). The
    /// failure propagates; nothing is caught or retried here.
    pub fn restore<D>(
        &self,
        doc: &mut D,
        snapshot: Option<&Snapshot>,
        options: &RestoreOptions,
    ) -> Result<()>
    where
        D: DocumentAdapter + ?Sized,
    {
        let held = doc.notifications_suppressed();
        if let Some(suppress) = options.suppress_change_notifications {
            doc.set_notifications_suppressed(suppress);
        }
        let result = apply_snapshot(doc, snapshot, options);
        doc.set_notifications_suppressed(held);
        result
    }
}

/// Replaces document content and selection from a snapshot.
///
/// The content goes in as a full-document literal replacement with smart
/// fencing off: it is a faithful re-materialization of prior state and
/// must not be reinterpreted on the way back in.
fn apply_snapshot<D>(
    doc: &mut D,
    snapshot: Option<&Snapshot>,
    options: &RestoreOptions,
) -> Result<()>
where
    D: DocumentAdapter + ?Sized,
{
    let content = snapshot.map_or("", |s| s.content.as_str());
    doc.apply_content(
        content,
        &ApplyOptions {
            format: ContentFormat::Literal,
            mode: EditMode::Math,
            insertion: InsertionMode::ReplaceAll,
            selection: SelectionMode::After,
            smart_fence: false,
            suppress_change_notifications: options.suppress_change_notifications,
        },
    )
    .context("Failed to apply snapshot content")?;

    match snapshot {
        Some(s) => doc
            .apply_selection(&s.selection)
            .context("Failed to apply snapshot selection")?,
        None => {
            let root = doc.root_selection();
            doc.apply_selection(&root)
                .context("Failed to apply root selection")?;
        }
    }
    Ok(())
}
