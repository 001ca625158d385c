//! Ramadan Giving 前端应用
//!
//! - `web::router`: 基于 History API 的路由服务
//! - `auth`: 可选的登录状态（仅用于预填捐赠表单）
//! - `api`: Worker API 客户端
//! - `components` / `pages`: UI 层

mod api;
mod auth;
mod config;

mod components {
    pub mod campaign_image;
    pub mod donation_form;
    pub mod embedded_checkout;
    pub mod icons;
    pub mod layout;
    pub mod skip_link;
    pub mod team_section;
    pub mod toast;
}

mod hooks {
    pub mod image_fallback;
}

mod pages {
    pub mod about;
    pub mod campaigns;
    pub mod donate;
    pub mod home;
    pub mod not_found;
}

// 原生 Web API 的轻量封装
pub(crate) mod web {
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::layout::Layout;
use crate::components::toast::ToastContext;
use crate::pages::about::AboutPage;
use crate::pages::campaigns::CampaignsPage;
use crate::pages::donate::DonatePage;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFoundPage;
use leptos::prelude::*;
use ramadan_giving_shared::site::SiteRoute;
use web::router::{Router, RouterOutlet};

fn route_matcher(route: SiteRoute) -> AnyView {
    match route {
        SiteRoute::Home => view! { <HomePage /> }.into_any(),
        SiteRoute::Donate => view! { <DonatePage /> }.into_any(),
        SiteRoute::Campaigns => view! { <CampaignsPage /> }.into_any(),
        SiteRoute::About => view! { <AboutPage /> }.into_any(),
        SiteRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    provide_context(ToastContext::new());

    view! {
        <Router>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
        </Router>
    }
}
