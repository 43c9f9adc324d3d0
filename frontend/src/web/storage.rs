//! LocalStorage 封装模块
//!
//! 会话键以原始字符串保存（不经过 JSON 编码），
//! 与后端约定的 `token` / `role` / `userName` / `authUser` / `userId` 一致。

use gloo_storage::{LocalStorage, Storage};
use tm_portal::{PortalError, PortalResult, SessionStore};

/// 浏览器本地存储
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| PortalError::config(format!("localStorage write failed: {:?}", e)))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
