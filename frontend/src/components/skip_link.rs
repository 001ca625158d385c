use leptos::prelude::*;

/// 主内容区域的 id，布局中的 `<main>` 使用同一个值
pub const MAIN_CONTENT_ID: &str = "main-content";

/// 键盘用户的“跳到主要内容”链接，获得焦点前不可见
#[component]
pub fn SkipLink() -> impl IntoView {
    view! {
        <a
            href=format!("#{}", MAIN_CONTENT_ID)
            class="sr-only focus:not-sr-only focus:fixed focus:left-4 focus:top-4 focus:z-50 btn btn-primary btn-sm"
        >
            "Skip to main content"
        </a>
    }
}
