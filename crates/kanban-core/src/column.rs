//! Column Model
//!
//! Workflow stages shown left-to-right on a board.

/// Default column set as (id, title). The title doubles as the wire status.
pub const DEFAULT_COLUMNS: [(&str, &str); 4] = [
    ("todo", "To Do"),
    ("inprogress", "In Progress"),
    ("review", "Review"),
    ("completed", "Completed"),
];

/// Derive a column id from a status string: lower-cased, all whitespace removed.
///
/// `"In Progress"` and `" in progress "` both map to `"inprogress"`.
pub fn column_id_for_status(status: &str) -> String {
    status
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Wire status for a default column id, if it is one
pub fn default_status_key(id: &str) -> Option<&'static str> {
    DEFAULT_COLUMNS
        .iter()
        .find(|(default_id, _)| *default_id == id)
        .map(|(_, status)| *status)
}

/// A board column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    /// Display label, free to change
    pub title: String,
    /// Status string sent to the task service when a card lands here
    pub status_key: String,
    /// Left-to-right rank
    pub order: usize,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status_key: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status_key: status_key.into(),
            order,
        }
    }

    /// A user-created column. Its id and status key are frozen from the title.
    pub fn from_title(title: &str, order: usize) -> Self {
        let title = title.trim();
        Self::new(column_id_for_status(title), title, title, order)
    }

    pub fn is_default(&self) -> bool {
        default_status_key(&self.id).is_some()
    }
}

/// The four default columns in display order
pub fn default_columns() -> Vec<Column> {
    DEFAULT_COLUMNS
        .iter()
        .enumerate()
        .map(|(order, (id, title))| Column::new(*id, *title, *title, order))
        .collect()
}

/// Reassign `order` from slice position so ranks stay a permutation of `0..N`
pub(crate) fn renumber(columns: &mut [Column]) {
    for (order, column) in columns.iter_mut().enumerate() {
        column.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_for_status() {
        assert_eq!(column_id_for_status("In Progress"), "inprogress");
        assert_eq!(column_id_for_status("  To\tDo "), "todo");
        assert_eq!(column_id_for_status("COMPLETED"), "completed");
        assert_eq!(column_id_for_status(""), "");
    }

    #[test]
    fn test_default_columns_match_status_transform() {
        for column in default_columns() {
            assert_eq!(column_id_for_status(&column.status_key), column.id);
            assert!(column.is_default());
        }
    }

    #[test]
    fn test_user_column_freezes_status_key() {
        let column = Column::from_title(" QA Check ", 4);
        assert_eq!(column.id, "qacheck");
        assert_eq!(column.title, "QA Check");
        assert_eq!(column.status_key, "QA Check");
        assert!(!column.is_default());
    }

    #[test]
    fn test_default_status_key_lookup() {
        assert_eq!(default_status_key("inprogress"), Some("In Progress"));
        assert_eq!(default_status_key("qa"), None);
    }
}
