//! Browser Local Storage
//!
//! Column layouts live in `window.localStorage`; last write wins across tabs.

use kanban_core::{BoardError, BoardResult, LayoutBackend};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

fn storage() -> BoardResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| BoardError::Storage("no window".to_string()))?
        .local_storage()
        .map_err(|e| BoardError::Storage(format!("localStorage unavailable: {:?}", e)))?
        .ok_or_else(|| BoardError::Storage("localStorage disabled".to_string()))
}

impl LayoutBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> BoardResult<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|e| BoardError::Storage(format!("read {}: {:?}", key, e)))
    }

    fn write(&self, key: &str, value: &str) -> BoardResult<()> {
        storage()?
            .set_item(key, value)
            .map_err(|e| BoardError::Storage(format!("write {}: {:?}", key, e)))
    }
}
