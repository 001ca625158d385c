use crate::components::campaign_image::CampaignImage;
use crate::components::icons::Heart;
use crate::components::team_section::ImpactSection;
use crate::web::router::Link;
use leptos::prelude::*;
use ramadan_giving_shared::content::campaigns;
use ramadan_giving_shared::site::{SiteConfig, SiteRoute};

#[component]
pub fn HomePage() -> impl IntoView {
    let site = SiteConfig::default();

    view! {
        <section class="hero min-h-[60vh] bg-gradient-to-b from-primary/10 to-base-200">
            <div class="hero-content text-center">
                <div class="max-w-2xl">
                    <h1 class="text-5xl font-bold">"Give during the blessed month"</h1>
                    <p class="py-6 text-lg text-base-content/80">{site.description}</p>
                    <Link to=SiteRoute::Donate.to_path() class="btn btn-primary btn-lg gap-2">
                        <Heart attr:class="h-5 w-5" />
                        "Donate now"
                    </Link>
                </div>
            </div>
        </section>

        <ImpactSection />

        <section class="py-12 bg-base-100">
            <div class="max-w-6xl mx-auto px-4">
                <div class="flex items-end justify-between">
                    <h2 class="text-3xl font-bold">"Current campaigns"</h2>
                    <Link to=SiteRoute::Campaigns.to_path() class="link link-primary">"See all"</Link>
                </div>
                <div class="grid gap-6 mt-8 md:grid-cols-3">
                    {campaigns()
                        .into_iter()
                        .map(|c| view! {
                            <article class="card bg-base-200 shadow">
                                <CampaignImage image=c.image alt=c.title class="h-40 rounded-t-box" />
                                <div class="card-body">
                                    <h3 class="card-title">{c.title}</h3>
                                    <p class="text-sm text-base-content/70">{c.summary}</p>
                                </div>
                            </article>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
