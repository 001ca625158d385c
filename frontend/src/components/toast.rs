//! 全局提示 (toast)
//!
//! 任意组件通过 `use_toast().push(notice)` 显示提示，5 秒后自动消失。

use crate::components::icons::X;
use leptos::prelude::*;
use ramadan_giving_shared::donation::{Notice, NoticeKind};
use std::time::Duration;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    notice: Notice,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| list.push(Toast { id, notice }));

        let this = *self;
        set_timeout(move || this.dismiss(id), TOAST_LIFETIME);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 渲染所有提示，放在布局根部
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_toast();

    view! {
        <div class="toast toast-top toast-end z-50" role="status" aria-live="polite">
            <For
                each=move || ctx.toasts.get()
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.notice.kind {
                        NoticeKind::Error => "alert alert-error shadow-lg",
                        NoticeKind::Info => "alert alert-info shadow-lg",
                    };
                    view! {
                        <div class=class>
                            <span>{toast.notice.message}</span>
                            <button
                                class="btn btn-ghost btn-xs btn-circle"
                                aria-label="Dismiss"
                                on:click=move |_| ctx.dismiss(id)
                            >
                                <X attr:class="h-4 w-4" />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
