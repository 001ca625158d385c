//! 认证能力接口
//!
//! 后端即服务 (Supabase Auth) 的会话模型，以及前端依赖的 `AuthProvider` 抽象。

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> Option<&str> {
        [&self.user_metadata.full_name, &self.user_metadata.name]
            .into_iter()
            .filter_map(|n| n.as_deref().map(str::trim))
            .find(|n| !n.is_empty())
    }
}

/// 客户端 SDK 持久化在浏览器中的会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    /// Unix 秒
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl AuthSession {
    /// 解析 SDK 写入 LocalStorage 的 JSON，格式不符时返回 None
    pub fn from_storage_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now_secs)
    }
}

/// SDK 存放会话的 LocalStorage 键：`sb-<project-ref>-auth-token`
///
/// project ref 取自项目地址的第一级子域名，如 `https://abcd.supabase.co` → `abcd`。
pub fn session_storage_key(project_url: &str) -> Option<String> {
    let host = project_url
        .trim()
        .split_once("://")
        .map_or(project_url.trim(), |(_, rest)| rest)
        .split(['/', ':'])
        .next()?;
    let project_ref = host.split('.').next().filter(|r| !r.is_empty())?;
    Some(format!("sb-{}-auth-token", project_ref))
}

#[async_trait::async_trait(?Send)]
pub trait AuthProvider {
    type Error: Display;

    /// 本地缓存的会话（不发网络请求）
    fn stored_session(&self) -> Option<AuthSession>;

    /// 向服务端确认会话仍然有效，返回当前用户
    async fn current_user(&self) -> Result<Option<AuthUser>, Self::Error>;

    async fn sign_out(&self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{
        "access_token": "eyJhbGciOi",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1900000000,
        "refresh_token": "r1",
        "user": {
            "id": "4f1c",
            "aud": "authenticated",
            "email": "a@example.org",
            "user_metadata": { "full_name": "A. Example" }
        }
    }"#;

    #[test]
    fn test_parse_stored_session() {
        let session = AuthSession::from_storage_json(STORED).unwrap();
        assert_eq!(session.user.email.as_deref(), Some("a@example.org"));
        assert_eq!(session.user.display_name(), Some("A. Example"));
        assert!(!session.is_expired(1_800_000_000));
        assert!(session.is_expired(1_900_000_000));
    }

    #[test]
    fn test_garbage_storage_is_ignored() {
        assert!(AuthSession::from_storage_json("not json").is_none());
        assert!(AuthSession::from_storage_json("{}").is_none());
    }

    #[test]
    fn test_session_storage_key() {
        assert_eq!(
            session_storage_key("https://abcd1234.supabase.co").as_deref(),
            Some("sb-abcd1234-auth-token")
        );
        assert_eq!(
            session_storage_key("https://abcd1234.supabase.co/").as_deref(),
            Some("sb-abcd1234-auth-token")
        );
        assert_eq!(
            session_storage_key("http://localhost:54321").as_deref(),
            Some("sb-localhost-auth-token")
        );
        assert_eq!(session_storage_key(""), None);
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let user: AuthUser = serde_json::from_str(
            r#"{"id":"1","user_metadata":{"full_name":"  ","name":"Sam"}}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), Some("Sam"));

        let user: AuthUser = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(user.display_name(), None);
    }
}
