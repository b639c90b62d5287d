/// Which button the user picked on the unsaved-changes dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsavedChoice {
    SaveThenAct,
    ActWithoutSaving,
    Cancel,
}

type ActionFn = Box<dyn FnOnce()>;
type SaveFn = Box<dyn FnOnce() -> bool>;

struct PendingPrompt {
    action_long: String,
    action_short: String,
    action: ActionFn,
    save: SaveFn,
}

/// Tracks unsaved changes for one editor instance and gates destructive
/// actions behind a confirmation prompt. The crate owns no clock: callers
/// pass the current time in seconds to every time-sensitive call.
pub struct ChangesManager {
    on_disk: bool,
    unsaved_changes: usize,
    unsaved_time: f32,
    prompt: Option<PendingPrompt>,
}

impl Default for ChangesManager {
    fn default() -> Self {
        Self { on_disk: true, unsaved_changes: 0, unsaved_time: 0.0, prompt: None }
    }
}

impl ChangesManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new change. The first change since the last save stamps
    /// `now`; later changes only bump the count.
    pub fn mark_as_changed(&mut self, now: f32) {
        if self.unsaved_changes == 0 {
            self.unsaved_time = now;
        }
        self.unsaved_changes += 1;
    }

    /// Marks the edited content as missing from disk, which also counts as
    /// an unsaved change.
    pub fn mark_as_non_existent(&mut self, now: f32) {
        self.on_disk = false;
        self.mark_as_changed(now);
    }

    /// Clears the unsaved state after a successful save. The prompt flow
    /// never calls this itself; the save callback's surroundings do.
    pub fn mark_as_saved(&mut self) {
        self.unsaved_changes = 0;
        self.unsaved_time = 0.0;
        self.on_disk = true;
    }

    /// Forces a clean slate, used when (re)loading content.
    pub fn reset(&mut self) {
        self.unsaved_changes = 0;
        self.unsaved_time = 0.0;
        self.on_disk = true;
        self.prompt = None;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes != 0
    }

    pub fn unsaved_changes(&self) -> usize {
        self.unsaved_changes
    }

    pub fn exists_on_disk(&self) -> bool {
        self.on_disk
    }

    /// Seconds since the state last went from saved to unsaved; 0 while
    /// clean.
    pub fn unsaved_time_delta(&self, now: f32) -> f32 {
        if self.unsaved_changes == 0 {
            0.0
        } else {
            now - self.unsaved_time
        }
    }

    /// Whether the user has been sitting on unsaved work for longer than
    /// `threshold_seconds`.
    pub fn needs_reminder(&self, now: f32, threshold_seconds: f32) -> bool {
        threshold_seconds > 0.0 && self.unsaved_time_delta(now) >= threshold_seconds
    }

    /// Runs `action` immediately when there is nothing unsaved and returns
    /// false. Otherwise stashes the action and `save` behind a pending
    /// prompt for the caller's dialog and returns true; the caller reports
    /// the user's pick via [`resolve_prompt`](Self::resolve_prompt).
    pub fn ask_if_unsaved<A, S>(
        &mut self,
        action_long: impl Into<String>,
        action_short: impl Into<String>,
        action: A,
        save: S,
    ) -> bool
    where
        A: FnOnce() + 'static,
        S: FnOnce() -> bool + 'static,
    {
        if self.unsaved_changes > 0 {
            self.prompt = Some(PendingPrompt {
                action_long: action_long.into(),
                action_short: action_short.into(),
                action: Box::new(action),
                save: Box::new(save),
            });
            true
        } else {
            action();
            false
        }
    }

    /// Resolves the pending prompt. `SaveThenAct` runs the save callback
    /// and only performs the action when the save reported success;
    /// `ActWithoutSaving` skips straight to the action; `Cancel` drops
    /// both. Returns whether a prompt was pending.
    pub fn resolve_prompt(&mut self, choice: UnsavedChoice) -> bool {
        let Some(prompt) = self.prompt.take() else {
            return false;
        };
        match choice {
            UnsavedChoice::SaveThenAct => {
                if (prompt.save)() {
                    (prompt.action)();
                }
            }
            UnsavedChoice::ActWithoutSaving => (prompt.action)(),
            UnsavedChoice::Cancel => {}
        }
        true
    }

    pub fn has_pending_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    /// Long description of the pending action, for the dialog body.
    pub fn prompt_action_long(&self) -> Option<&str> {
        self.prompt.as_ref().map(|prompt| prompt.action_long.as_str())
    }

    /// Short description of the pending action, for the dialog buttons.
    pub fn prompt_action_short(&self) -> Option<&str> {
        self.prompt.as_ref().map(|prompt| prompt.action_short.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn clean_state_runs_actions_immediately() {
        let mut changes = ChangesManager::new();
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        let deferred =
            changes.ask_if_unsaved("discard the area", "discard", move || ran_clone.set(true), || true);
        assert!(!deferred);
        assert!(ran.get());
        assert!(!changes.has_pending_prompt());
    }

    #[test]
    fn dirty_state_defers_behind_a_prompt() {
        let mut changes = ChangesManager::new();
        changes.mark_as_changed(1.0);
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        let deferred =
            changes.ask_if_unsaved("load another file", "load", move || ran_clone.set(true), || true);
        assert!(deferred);
        assert!(!ran.get());
        assert_eq!(changes.prompt_action_short(), Some("load"));

        assert!(changes.resolve_prompt(UnsavedChoice::ActWithoutSaving));
        assert!(ran.get());
        assert!(!changes.has_pending_prompt());
    }

    #[test]
    fn failed_save_blocks_the_action() {
        let mut changes = ChangesManager::new();
        changes.mark_as_changed(1.0);
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        changes.ask_if_unsaved("quit", "quit", move || ran_clone.set(true), || false);
        changes.resolve_prompt(UnsavedChoice::SaveThenAct);
        assert!(!ran.get(), "action must not run when the save fails");
    }

    #[test]
    fn cancel_drops_the_prompt() {
        let mut changes = ChangesManager::new();
        changes.mark_as_changed(1.0);
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        changes.ask_if_unsaved("quit", "quit", move || ran_clone.set(true), || true);
        changes.resolve_prompt(UnsavedChoice::Cancel);
        assert!(!ran.get());
        assert!(!changes.has_pending_prompt());
        assert!(!changes.resolve_prompt(UnsavedChoice::Cancel), "nothing left to resolve");
    }
}
