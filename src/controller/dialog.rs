use super::notice::Notice;

/// Lifecycle of a modal form.
///
/// `Idle -> Editing -> Submitting -> Succeeded | Failed`. A failed submit keeps
/// the dialog open for another attempt; nothing is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// A modal with its state and the last notice it raised.
#[derive(Debug, Clone, Default)]
pub struct Dialog {
    state: DialogState,
    notice: Option<Notice>,
}

impl Dialog {
    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Editing | DialogState::Submitting | DialogState::Failed)
    }

    pub fn open(&mut self) {
        self.state = DialogState::Editing;
        self.notice = None;
    }

    pub fn close(&mut self) {
        self.state = DialogState::Idle;
    }

    /// Marks a request as in flight. Only an open, idle form can submit.
    pub fn begin_submit(&mut self) -> bool {
        match self.state {
            DialogState::Editing | DialogState::Failed => {
                self.state = DialogState::Submitting;
                true
            }
            _ => false,
        }
    }

    /// A client-side check failed; nothing was sent.
    pub fn reject(&mut self, notice: Notice) {
        self.state = DialogState::Editing;
        self.notice = Some(notice);
    }

    pub fn succeed(&mut self, notice: Notice) {
        self.state = DialogState::Succeeded;
        self.notice = Some(notice);
    }

    pub fn fail(&mut self, notice: Notice) {
        self.state = DialogState::Failed;
        self.notice = Some(notice);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_open_dialog() {
        let mut dialog = Dialog::default();
        assert!(!dialog.begin_submit());

        dialog.open();
        assert!(dialog.begin_submit());
        assert_eq!(dialog.state(), DialogState::Submitting);
        // Already in flight.
        assert!(!dialog.begin_submit());
    }

    #[test]
    fn failure_keeps_dialog_open() {
        let mut dialog = Dialog::default();
        dialog.open();
        dialog.begin_submit();
        dialog.fail(Notice::error("Order Status", "Error adding order"));

        assert!(dialog.is_open());
        assert_eq!(dialog.notice().map(|n| n.message.as_str()), Some("Error adding order"));
        assert!(dialog.begin_submit());
    }

    #[test]
    fn success_closes_dialog() {
        let mut dialog = Dialog::default();
        dialog.open();
        dialog.begin_submit();
        dialog.succeed(Notice::success("Order Status", "done"));
        assert!(!dialog.is_open());
        assert_eq!(dialog.state(), DialogState::Succeeded);
        assert!(dialog.dismiss_notice().is_some());
        assert!(dialog.notice().is_none());
    }

    #[test]
    fn rejection_returns_to_editing() {
        let mut dialog = Dialog::default();
        dialog.open();
        dialog.reject(Notice::error("Order Status", "Quantity exceeds available stock."));
        assert_eq!(dialog.state(), DialogState::Editing);
    }
}
