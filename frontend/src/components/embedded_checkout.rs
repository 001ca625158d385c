//! Stripe Embedded Checkout 封装
//!
//! 页面通过 `<script src="https://js.stripe.com/v3/">` 加载 SDK。
//! 流程：`Stripe(pk)` → `initEmbeddedCheckout({ fetchClientSecret, onComplete })`
//! → `mount(container)`；组件卸载时 `destroy()`，同一页面同时只能存在一个实例。

use crate::config::STRIPE_PUBLISHABLE_KEY;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    type StripeJs;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn stripe(publishable_key: &str) -> Result<StripeJs, JsValue>;

    #[wasm_bindgen(method, catch, js_name = initEmbeddedCheckout)]
    fn init_embedded_checkout(this: &StripeJs, options: &JsValue)
    -> Result<js_sys::Promise, JsValue>;

    type EmbeddedCheckoutJs;

    #[wasm_bindgen(method, catch)]
    fn mount(this: &EmbeddedCheckoutJs, container: &web_sys::HtmlElement) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &EmbeddedCheckoutJs);
}

/// 已挂载的实例；回调闭包与实例同生命周期
struct CheckoutHandle {
    checkout: EmbeddedCheckoutJs,
    _fetch_client_secret: Closure<dyn FnMut() -> js_sys::Promise>,
    _on_complete: Closure<dyn FnMut()>,
}

impl CheckoutHandle {
    fn destroy(self) {
        self.checkout.destroy();
    }
}

fn js_error_message(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "The payment form could not be loaded".to_string())
}

async fn mount_checkout(
    container: web_sys::HtmlElement,
    client_secret: String,
    on_complete: Callback<()>,
) -> Result<CheckoutHandle, String> {
    if STRIPE_PUBLISHABLE_KEY.is_empty() {
        return Err("Payments are not configured on this site".to_string());
    }
    let stripe = stripe(STRIPE_PUBLISHABLE_KEY).map_err(js_error_message)?;

    // 会话已由 Worker 创建，这里直接交出 client secret
    let fetch_client_secret = Closure::<dyn FnMut() -> js_sys::Promise>::new(move || {
        js_sys::Promise::resolve(&JsValue::from_str(&client_secret))
    });
    let on_complete_js = Closure::<dyn FnMut()>::new(move || on_complete.run(()));

    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &"fetchClientSecret".into(),
        fetch_client_secret.as_ref(),
    )
    .map_err(js_error_message)?;
    js_sys::Reflect::set(&options, &"onComplete".into(), on_complete_js.as_ref())
        .map_err(js_error_message)?;

    let promise = stripe
        .init_embedded_checkout(&options)
        .map_err(js_error_message)?;
    let checkout: EmbeddedCheckoutJs = JsFuture::from(promise)
        .await
        .map_err(js_error_message)?
        .unchecked_into();
    checkout.mount(&container).map_err(js_error_message)?;

    Ok(CheckoutHandle {
        checkout,
        _fetch_client_secret: fetch_client_secret,
        _on_complete: on_complete_js,
    })
}

/// 嵌入式结算组件
///
/// - `on_complete`：SDK 报告完成（是否真正付款由调用方查询会话状态决定）
/// - `on_error`：SDK 加载或初始化失败
#[component]
pub fn EmbeddedCheckout(
    #[prop(into)] client_secret: String,
    on_complete: Callback<()>,
    on_error: Callback<String>,
) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let handle = StoredValue::new_local(None::<CheckoutHandle>);
    let started = StoredValue::new(false);

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        if started.get_value() {
            return;
        }
        started.set_value(true);

        let client_secret = client_secret.clone();
        let el: web_sys::HtmlElement = el.into();
        spawn_local(async move {
            match mount_checkout(el, client_secret, on_complete).await {
                Ok(mounted) => {
                    // 初始化期间组件已卸载：立即销毁
                    if let Some(orphan) = handle.try_set_value(Some(mounted)).flatten() {
                        orphan.destroy();
                    }
                }
                Err(message) => {
                    web_sys::console::error_1(&format!("[Checkout] {}", message).into());
                    on_error.run(message);
                }
            }
        });
    });

    on_cleanup(move || {
        if let Some(Some(mounted)) = handle.try_update_value(|h| h.take()) {
            mounted.destroy();
        }
    });

    view! {
        <div class="min-h-[420px]">
            <div node_ref=container id="checkout"></div>
        </div>
    }
}
