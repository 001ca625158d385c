use crate::components::team_section::{ImpactSection, TeamSection};
use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="max-w-3xl mx-auto px-4 pt-12">
            <h1 class="text-4xl font-bold">"About us"</h1>
            <p class="mt-4 text-lg text-base-content/80">
                "Ramadan Giving began as a handful of neighbours delivering iftar to families who were "
                "fasting alone. Today our volunteers work with mosques, food banks and orphanages "
                "so that every gift reaches someone before Eid."
            </p>
            <p class="mt-4 text-base-content/70">
                "Payments are handled by Stripe. We never see or store your card details."
            </p>
        </section>
        <TeamSection />
        <ImpactSection />
    }
}
