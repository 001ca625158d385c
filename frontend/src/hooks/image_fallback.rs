//! 外部图片解析 hook
//!
//! 输入变化时发起新请求，旧请求的结果按票据丢弃；组件卸载时作废在途请求。
//! 状态机和解析流程都在 `shared::image`，这里只负责把快照接到信号上。

use crate::api::ApiImageResolver;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramadan_giving_shared::image::{ImageFallback, ImageFallbackState, load_image};
use std::cell::RefCell;
use std::rc::Rc;

pub fn use_image_fallback(input: Signal<Option<String>>) -> Signal<ImageFallback> {
    let state = StoredValue::new_local(Rc::new(RefCell::new(ImageFallbackState::new())));
    let snapshot = RwSignal::new(ImageFallback::default());

    Effect::new(move |_| {
        let input = input.get();
        let Some(state) = state.try_get_value() else {
            return;
        };
        spawn_local(async move {
            // 组件已卸载时信号已被释放，try_set 直接丢弃
            load_image(&state, &ApiImageResolver, input.as_deref(), |s| {
                snapshot.try_set(s);
            })
            .await;
        });
    });

    on_cleanup(move || {
        state.try_with_value(|s| s.borrow_mut().cancel());
    });

    snapshot.into()
}
