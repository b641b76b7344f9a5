//! Assignment checklists.
//!
//! Subtask completion is tracked independently of the parent's own `done`
//! flag. Names are unique within one assignment.

use serde::{Deserialize, Serialize};

use super::{Task, TaskDetails};
use crate::error::TaskError;

/// One checklist entry of an assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl Subtask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }
}

impl Task {
    /// Mutable checklist of an assignment, `None` for other kinds.
    pub fn subtasks_mut(&mut self) -> Option<&mut Vec<Subtask>> {
        match &mut self.details {
            TaskDetails::Assignment { subtasks } => Some(subtasks),
            _ => None,
        }
    }
}

/// Append `names` to `list`, rejecting any name already present.
///
/// Validation covers the whole batch before anything is appended, so a
/// rejected call leaves `list` untouched. Blank names are skipped.
pub fn append_unique<I, S>(list: &mut Vec<Subtask>, names: I) -> Result<usize, TaskError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut incoming: Vec<String> = Vec::new();
    for name in names {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            continue;
        }
        let clashes = list.iter().any(|s| s.description == name) || incoming.contains(&name);
        if clashes {
            return Err(TaskError::DuplicateSubtask(name));
        }
        incoming.push(name);
    }

    let added = incoming.len();
    list.extend(incoming.into_iter().map(Subtask::new));
    Ok(added)
}

/// Mark the subtask at `index` as done.
pub fn complete(list: &mut [Subtask], index: usize) -> Result<(), TaskError> {
    let len = list.len();
    let subtask = list
        .get_mut(index)
        .ok_or(TaskError::SubtaskNotFound { index, len })?;
    subtask.done = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_rejects_existing_and_repeated_names() {
        let mut list = vec![Subtask::new("draft")];

        let err = append_unique(&mut list, ["outline", "draft"]).unwrap_err();
        assert_eq!(err, TaskError::DuplicateSubtask("draft".into()));
        assert_eq!(list.len(), 1, "rejected batch must not be partially applied");

        let err = append_unique(&mut list, ["cite", "cite"]).unwrap_err();
        assert_eq!(err, TaskError::DuplicateSubtask("cite".into()));

        let added = append_unique(&mut list, ["outline", " ", "cite"]).unwrap();
        assert_eq!(added, 2);
        let names: Vec<_> = list.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(names, ["draft", "outline", "cite"]);
    }

    #[test]
    fn complete_marks_only_the_target() {
        let mut list = vec![Subtask::new("a"), Subtask::new("b")];
        complete(&mut list, 1).unwrap();
        assert!(!list[0].done);
        assert!(list[1].done);

        assert_eq!(
            complete(&mut list, 2),
            Err(TaskError::SubtaskNotFound { index: 2, len: 2 })
        );
    }

    #[test]
    fn only_assignments_expose_a_checklist() {
        let at = chrono::Utc::now();
        let mut assignment = Task::assignment("essay", at).unwrap();
        assert!(assignment.subtasks_mut().is_some());

        let mut meeting = Task::meeting("sync", at).unwrap();
        assert!(meeting.subtasks_mut().is_none());
    }
}
