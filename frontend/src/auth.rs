//! 认证模块
//!
//! 站点本身不需要登录。若访客在 Supabase 上已有会话，捐赠表单用它预填
//! 姓名与邮箱，页头显示当前用户并允许登出。

use crate::config::{SUPABASE_ANON_KEY, SUPABASE_URL};
use crate::web::LocalStorage;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramadan_giving_shared::auth::{AuthProvider, AuthSession, AuthUser, session_storage_key};

// =========================================================
// Supabase Auth 客户端
// =========================================================

/// 与 `@supabase/supabase-js` 共用 LocalStorage 中的会话
pub struct SupabaseAuth {
    project_url: String,
    anon_key: String,
    storage_key: String,
}

impl SupabaseAuth {
    /// 未配置项目地址时返回 None
    pub fn from_config() -> Option<Self> {
        let project_url = SUPABASE_URL.trim_end_matches('/');
        if project_url.is_empty() || SUPABASE_ANON_KEY.is_empty() {
            return None;
        }
        Some(Self {
            project_url: project_url.to_string(),
            anon_key: SUPABASE_ANON_KEY.to_string(),
            storage_key: session_storage_key(project_url)?,
        })
    }

    fn now_secs() -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    type Error = String;

    fn stored_session(&self) -> Option<AuthSession> {
        LocalStorage::get_parsed(&self.storage_key, AuthSession::from_storage_json)
            .filter(|s| !s.is_expired(Self::now_secs()))
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, String> {
        let Some(session) = self.stored_session() else {
            return Ok(None);
        };

        let res = Request::get(&format!("{}/auth/v1/user", self.project_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        match res.status() {
            // 令牌被吊销或已过期，视为未登录
            401 | 403 => Ok(None),
            s if (200..300).contains(&s) => {
                res.json::<AuthUser>().await.map(Some).map_err(|e| e.to_string())
            }
            s => Err(format!("Auth service returned {}", s)),
        }
    }

    async fn sign_out(&self) -> Result<(), String> {
        let session = self.stored_session();
        // 无论服务端是否成功，本地会话都要清除
        LocalStorage::delete(&self.storage_key);

        let Some(session) = session else {
            return Ok(());
        };
        let res = Request::post(&format!("{}/auth/v1/logout", self.project_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if res.ok() {
            Ok(())
        } else {
            Err(format!("Sign-out failed: {}", res.status()))
        }
    }
}

// =========================================================
// 认证上下文
// =========================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_loading: bool,
}

/// 通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 当前用户（派生信号）
    pub fn user_signal(&self) -> Signal<Option<AuthUser>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 先用本地会话立即显示，再向服务端确认。
pub fn init_auth(ctx: &AuthContext) {
    let Some(auth) = SupabaseAuth::from_config() else {
        return;
    };

    let cached = auth.stored_session().map(|s| s.user);
    let has_session = cached.is_some();
    ctx.set_state.set(AuthState {
        user: cached,
        is_loading: has_session,
    });
    if !has_session {
        return;
    }

    let set_state = ctx.set_state;
    spawn_local(async move {
        match auth.current_user().await {
            Ok(user) => set_state.set(AuthState {
                user,
                is_loading: false,
            }),
            Err(e) => {
                // 网络问题时保留本地会话
                web_sys::console::warn_1(&format!("[Auth] Verification failed: {}", e).into());
                set_state.update(|s| s.is_loading = false);
            }
        }
    });
}

/// 注销并清除状态
pub fn logout(ctx: &AuthContext) {
    let Some(auth) = SupabaseAuth::from_config() else {
        return;
    };
    ctx.set_state.set(AuthState::default());

    spawn_local(async move {
        if let Err(e) = auth.sign_out().await {
            web_sys::console::warn_1(&format!("[Auth] {}", e).into());
        }
    });
}
