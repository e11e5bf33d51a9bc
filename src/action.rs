/// Everything a command or a context-menu item can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ComputeTotalTime,
    InsertTaskNotFinished,
    InsertTaskFinished,
    InsertClockTime,
    CopyLink,
}

impl Action {
    /// Stable command identifier
    pub fn id(&self) -> &'static str {
        match self {
            Action::ComputeTotalTime => "compute-total-time",
            Action::InsertTaskNotFinished => "insert-task-not-finished",
            Action::InsertTaskFinished => "insert-task-finished",
            Action::InsertClockTime => "insert-clock-time",
            Action::CopyLink => "copy-link",
        }
    }

    /// Localization key of the command name
    pub fn name_key(&self) -> &'static str {
        match self {
            Action::ComputeTotalTime => "command.compute_total_time",
            Action::InsertTaskNotFinished => "command.insert_task_not_finished",
            Action::InsertTaskFinished => "command.insert_task_finished",
            Action::InsertClockTime => "command.insert_clock_time",
            Action::CopyLink => "command.copy_link",
        }
    }

    /// All actions, in registration order
    pub fn all() -> &'static [Action] {
        &[
            Action::ComputeTotalTime,
            Action::InsertTaskNotFinished,
            Action::InsertTaskFinished,
            Action::InsertClockTime,
            Action::CopyLink,
        ]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|action| action.id() == id)
    }
}
