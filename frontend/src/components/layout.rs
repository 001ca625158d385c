use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Moon};
use crate::components::skip_link::{MAIN_CONTENT_ID, SkipLink};
use crate::components::toast::ToastHost;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use ramadan_giving_shared::site::{SiteConfig, SiteRoute};

#[component]
fn NavLinks() -> impl IntoView {
    let router = use_router();

    SiteRoute::PUBLIC
        .into_iter()
        .filter(|r| *r != SiteRoute::Donate)
        .map(|route| {
            let active = move || router.current_route().get() == route;
            view! {
                <li>
                    <Link to=route.to_path()>
                        <span class:font-semibold=active aria-current=move || active().then_some("page")>
                            {route.nav_label()}
                        </span>
                    </Link>
                </li>
            }
        })
        .collect_view()
}

/// 已登录时显示用户与登出按钮
#[component]
fn AccountMenu() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    view! {
        {move || user.get().map(|u| {
            let label = u
                .display_name()
                .map(str::to_string)
                .or(u.email.clone())
                .unwrap_or_else(|| "Signed in".to_string());
            view! {
                <div class="flex items-center gap-2">
                    <span class="text-sm hidden md:inline">{label}</span>
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm btn-square"
                        aria-label="Sign out"
                        on:click=move |_| logout(&auth)
                    >
                        <LogOut attr:class="h-4 w-4" />
                    </button>
                </div>
            }
        })}
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let site = SiteConfig::default();
    let year = js_sys::Date::new_0().get_full_year();
    let site_name = site.name.clone();

    view! {
        <SkipLink />
        <header class="navbar bg-base-100 shadow-sm sticky top-0 z-40">
            <div class="navbar-start">
                <Link to="/" class="btn btn-ghost text-xl gap-2">
                    <Moon attr:class="h-6 w-6 text-primary" />
                    {site_name}
                </Link>
            </div>
            <nav class="navbar-center hidden md:flex" aria-label="Main">
                <ul class="menu menu-horizontal px-1">
                    <NavLinks />
                </ul>
            </nav>
            <div class="navbar-end gap-2">
                <AccountMenu />
                <Link to=SiteRoute::Donate.to_path() class="btn btn-primary">
                    "Donate"
                </Link>
            </div>
        </header>

        <main id=MAIN_CONTENT_ID tabindex="-1" class="min-h-[70vh] bg-base-200 focus:outline-none">
            {children()}
        </main>

        <footer class="footer footer-center p-8 bg-base-300 text-base-content">
            <nav aria-label="Footer">
                <ul class="flex gap-4">
                    <NavLinks />
                </ul>
            </nav>
            <aside>
                <p>{format!("© {} {}. {}", year, site.name, site.description)}</p>
            </aside>
        </footer>

        <ToastHost />
    }
}
