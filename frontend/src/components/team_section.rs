//! 固定卡片区块：团队介绍、善款用途

use leptos::prelude::*;
use ramadan_giving_shared::content::{IMPACT, SectionCard, TEAM};

#[component]
fn CardGrid(
    #[prop(into)] heading: String,
    #[prop(into, optional)] intro: Option<String>,
    cards: &'static [SectionCard],
) -> impl IntoView {
    view! {
        <section class="py-12">
            <div class="max-w-6xl mx-auto px-4">
                <h2 class="text-3xl font-bold text-center">{heading}</h2>
                {intro.map(|text| view! {
                    <p class="text-center text-base-content/70 mt-2 max-w-2xl mx-auto">{text}</p>
                })}
                <div class="grid gap-6 mt-8 sm:grid-cols-2 lg:grid-cols-4">
                    {cards
                        .iter()
                        .map(|card| view! {
                            <article class="card bg-base-100 shadow-md">
                                <figure class="aspect-[4/3] bg-base-200">
                                    <img
                                        src=card.image
                                        alt=card.title
                                        loading="lazy"
                                        class="h-full w-full object-cover"
                                    />
                                </figure>
                                <div class="card-body">
                                    <h3 class="card-title text-lg">{card.title}</h3>
                                    <p class="text-sm text-base-content/70">{card.description}</p>
                                </div>
                            </article>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn TeamSection() -> impl IntoView {
    view! {
        <CardGrid
            heading="Who we are"
            intro="An all-volunteer team working with local partners during the holy month."
            cards=&TEAM
        />
    }
}

#[component]
pub fn ImpactSection() -> impl IntoView {
    view! {
        <CardGrid heading="How your gift helps" cards=&IMPACT />
    }
}
