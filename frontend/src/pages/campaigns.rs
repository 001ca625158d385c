use crate::components::campaign_image::CampaignImage;
use crate::web::router::Link;
use leptos::prelude::*;
use ramadan_giving_shared::content::campaigns;
use ramadan_giving_shared::site::SiteRoute;

#[component]
pub fn CampaignsPage() -> impl IntoView {
    view! {
        <section class="max-w-5xl mx-auto px-4 py-12">
            <h1 class="text-4xl font-bold">"Campaigns"</h1>
            <p class="mt-2 text-base-content/70">
                "Choose where your gift goes, or give to the general fund from the donate page."
            </p>

            <div class="mt-8 flex flex-col gap-6">
                {campaigns()
                    .into_iter()
                    .map(|c| {
                        let href = format!("{}?campaign={}", SiteRoute::Donate.to_path(), c.slug);
                        view! {
                            <article class="card md:card-side bg-base-100 shadow-md">
                                <CampaignImage
                                    image=c.image
                                    alt=c.title
                                    class="h-48 md:h-auto md:w-72 shrink-0 rounded-t-box md:rounded-l-box md:rounded-tr-none"
                                />
                                <div class="card-body">
                                    <h2 class="card-title">{c.title}</h2>
                                    <p class="text-base-content/70">{c.summary}</p>
                                    <p class="text-sm">
                                        "Goal: " <span class="font-semibold">{c.goal.to_string()}</span>
                                    </p>
                                    <div class="card-actions justify-end">
                                        <Link to=href class="btn btn-primary btn-sm">"Support this campaign"</Link>
                                    </div>
                                </div>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
