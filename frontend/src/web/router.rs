//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路由表本身 (`SiteRoute`) 定义在 shared 中，静态导出也使用同一份。
//!
//! 站点是静态导出的：每个路由都有自己的 `index.html`，刷新或直接访问
//! 任何公开路径都能拿到同一个应用壳，再由这里解析当前路径。

use leptos::prelude::*;
use ramadan_giving_shared::site::SiteRoute;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 读取当前 URL 的查询参数
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
        .filter(|v| !v.is_empty())
}

/// 去掉地址栏中的查询参数（不触发导航）
pub fn clear_query(route: SiteRoute) {
    replace_history_state(route.to_path());
}

fn set_document_title(route: SiteRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(route.title());
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<SiteRoute>,
    set_route: WriteSignal<SiteRoute>,
}

impl RouterService {
    fn new() -> Self {
        let initial_route = SiteRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        Self {
            current_route,
            set_route,
        }
    }

    pub fn current_route(&self) -> ReadSignal<SiteRoute> {
        self.current_route
    }

    /// 导航到站内路径
    ///
    /// 地址栏保留传入的路径（含查询参数），页面由解析出的路由决定。
    pub fn navigate(&self, path: &str) {
        let target_route = SiteRoute::from_path(path);
        push_history_state(path);
        self.set_route.set(target_route);

        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(SiteRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    fn sync_document_title(&self) {
        let current_route = self.current_route;
        Effect::new(move |_| set_document_title(current_route.get()));
    }
}

fn provide_router() -> RouterService {
    let router = RouterService::new();

    router.init_popstate_listener();
    router.sync_document_title();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(SiteRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接
///
/// 普通点击走 History API；带修饰键的点击（新标签页等）交给浏览器。
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
