//! LocalStorage 封装
//!
//! 直接使用 `web_sys::Storage`。隐私模式下 localStorage 可能不可用，
//! 所有操作失败时都静默返回 None / false。

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 读取并反序列化；内容损坏时当作不存在
    pub fn get_parsed<T>(key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        parse(&Self::get(key)?)
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
