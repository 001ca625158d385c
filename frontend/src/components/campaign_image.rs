use crate::hooks::image_fallback::use_image_fallback;
use leptos::prelude::*;
use ramadan_giving_shared::image::CampaignImage as ImageRef;

/// 活动封面
///
/// 直接地址优先，否则使用外部页面解析出的预览图；两者都没有时显示渐变占位。
/// 解析中降低不透明度，没有错误状态。
#[component]
pub fn CampaignImage(
    image: ImageRef,
    #[prop(into)] alt: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let direct = image.direct_url().map(str::to_string);
    let external = image.external_url().map(str::to_string);
    let fetched = use_image_fallback(Signal::derive(move || external.clone()));

    let display = move || direct.clone().or_else(|| fetched.get().url);
    let loading = move || fetched.get().loading;

    view! {
        <div
            class=format!(
                "relative overflow-hidden bg-gradient-to-br from-primary/70 via-secondary/50 to-accent/60 {}",
                class,
            )
            role="img"
            aria-label=alt
            aria-busy=move || loading().to_string()
        >
            {move || display().map(|url| view! {
                <div
                    class="absolute inset-0 bg-cover bg-center transition-opacity duration-300"
                    class:opacity-60=loading
                    style=format!("background-image: url('{}')", url.replace('\'', "%27"))
                ></div>
            })}
        </div>
    }
}
