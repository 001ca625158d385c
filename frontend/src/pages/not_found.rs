use crate::web::router::Link;
use leptos::prelude::*;
use ramadan_giving_shared::site::SiteRoute;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-primary">"404"</h1>
                <p class="text-xl mt-4">"We couldn't find that page."</p>
                <Link to=SiteRoute::Home.to_path() class="btn btn-link mt-4">"Back to the home page"</Link>
            </div>
        </div>
    }
}
