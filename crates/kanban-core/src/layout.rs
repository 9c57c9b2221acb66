//! Column Layout Persistence
//!
//! Saves each board's column arrangement under `kanban-columns-<boardId>`
//! in a key-value backend (browser local storage, memory, ...). Decoding
//! never panics: a malformed value falls back to the default columns.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::column::{default_status_key, Column};
use crate::error::{BoardError, BoardResult};

pub const LAYOUT_KEY_PREFIX: &str = "kanban-columns-";

/// Storage key for a board's layout
pub fn layout_key(board_id: &str) -> String {
    format!("{}{}", LAYOUT_KEY_PREFIX, board_id)
}

/// Raw key-value storage for serialized layouts
pub trait LayoutBackend {
    fn read(&self, key: &str) -> BoardResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> BoardResult<()>;
}

/// Persisted shape of one column; array position is its order
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnDescriptor {
    id: String,
    title: String,
    /// Older layouts stored only id and title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_key: Option<String>,
}

/// Serialize columns in display order
pub fn encode_layout(columns: &[Column]) -> BoardResult<String> {
    let mut ordered: Vec<&Column> = columns.iter().collect();
    ordered.sort_by_key(|c| c.order);

    let descriptors: Vec<ColumnDescriptor> = ordered
        .into_iter()
        .map(|c| ColumnDescriptor {
            id: c.id.clone(),
            title: c.title.clone(),
            status_key: Some(c.status_key.clone()),
        })
        .collect();
    serde_json::to_string(&descriptors).map_err(|e| BoardError::Layout(e.to_string()))
}

/// Parse and validate a stored layout
pub fn decode_layout(raw: &str) -> BoardResult<Vec<Column>> {
    let descriptors: Vec<ColumnDescriptor> =
        serde_json::from_str(raw).map_err(|e| BoardError::Layout(e.to_string()))?;

    if descriptors.is_empty() {
        return Err(BoardError::Layout("layout has no columns".to_string()));
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(descriptors.len());
    for (order, descriptor) in descriptors.into_iter().enumerate() {
        if descriptor.id.trim().is_empty() || descriptor.title.trim().is_empty() {
            return Err(BoardError::Layout(format!("column {} has a blank id or title", order)));
        }
        if !seen.insert(descriptor.id.clone()) {
            return Err(BoardError::Layout(format!("duplicate column id '{}'", descriptor.id)));
        }
        let status_key = descriptor
            .status_key
            .or_else(|| default_status_key(&descriptor.id).map(str::to_string))
            .unwrap_or_else(|| descriptor.title.clone());
        columns.push(Column::new(descriptor.id, descriptor.title, status_key, order));
    }
    Ok(columns)
}

/// Per-board layout port over a backend
pub struct ColumnLayouts<B: LayoutBackend> {
    backend: B,
    /// Keys already reported as unreadable
    reported: RefCell<HashSet<String>>,
}

impl<B: LayoutBackend> ColumnLayouts<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            reported: RefCell::new(HashSet::new()),
        }
    }

    /// Saved columns for a board, or `None` to use the defaults
    pub fn load(&self, board_id: &str) -> Option<Vec<Column>> {
        let key = layout_key(board_id);
        let result = self
            .backend
            .read(&key)
            .and_then(|raw| raw.map(|raw| decode_layout(&raw)).transpose());

        match result {
            Ok(columns) => columns,
            Err(e) => {
                if self.reported.borrow_mut().insert(key.clone()) {
                    log::warn!("ignoring stored layout {}: {}; using default columns", key, e);
                }
                None
            }
        }
    }

    pub fn save(&self, board_id: &str, columns: &[Column]) -> BoardResult<()> {
        let encoded = encode_layout(columns)?;
        self.backend.write(&layout_key(board_id), &encoded)
    }
}

/// In-memory backend; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryLayoutBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, for inspection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl LayoutBackend for MemoryLayoutBackend {
    fn read(&self, key: &str) -> BoardResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> BoardResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
