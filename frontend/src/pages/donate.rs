//! 捐赠页
//!
//! `?campaign=<slug>` 预选活动；`?session_id=` 来自支付方跳转返回（仅在需要
//! 跳转的支付方式下出现），此时先确认会话再展示结果。

use crate::api::DonationApi;
use crate::components::donation_form::{DonationForm, ReceiptSummary};
use crate::components::toast::use_toast;
use crate::web::router::{clear_query, query_param};
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramadan_giving_shared::content::find_campaign;
use ramadan_giving_shared::donation::{Notice, Receipt};
use ramadan_giving_shared::payment::PaymentSessionProvider;
use ramadan_giving_shared::protocol::SessionStatus;
use ramadan_giving_shared::site::SiteRoute;

fn receipt_from_status(status: SessionStatus) -> Option<Receipt> {
    let amount = status.amount_total?;
    Some(Receipt {
        amount,
        frequency: status.frequency,
        donor_name: None,
        processing: status.is_processing(),
        email: status.customer_email.unwrap_or_default(),
        session_id: Some(status.id),
    })
}

#[component]
pub fn DonatePage() -> impl IntoView {
    let campaign = query_param("campaign").and_then(|slug| find_campaign(&slug));
    let returned = RwSignal::new(None::<Receipt>);
    let confirming = RwSignal::new(false);
    let toast = use_toast();

    if let Some(session_id) = query_param("session_id") {
        confirming.set(true);
        spawn_local(async move {
            match DonationApi.session_status(&session_id).await {
                Ok(status) if status.is_successful() => match receipt_from_status(status) {
                    Some(receipt) => {
                        returned.try_set(Some(receipt));
                    }
                    None => toast.push(Notice::info("Thank you! Your donation was received.")),
                },
                Ok(_) => toast.push(Notice::error(
                    "The payment was not completed. You can try again below.",
                )),
                Err(e) => toast.push(Notice::error(format!(
                    "We could not confirm your payment ({}).",
                    e
                ))),
            }
            confirming.try_set(false);
            clear_query(SiteRoute::Donate);
        });
    }

    let heading = campaign
        .as_ref()
        .map(|c| format!("Support {}", c.title))
        .unwrap_or_else(|| "Make a donation".to_string());
    let summary = campaign.as_ref().map(|c| c.summary);
    let slug = campaign.map(|c| c.slug.to_string());

    view! {
        <section class="max-w-3xl mx-auto px-4 py-12 flex flex-col gap-8">
            <div class="text-center">
                <h1 class="text-4xl font-bold">{heading}</h1>
                {summary.map(|s| view! { <p class="mt-3 text-base-content/70">{s}</p> })}
            </div>

            {move || {
                if confirming.get() {
                    view! {
                        <div class="flex justify-center py-16" aria-busy="true">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any()
                } else if let Some(receipt) = returned.get() {
                    view! {
                        <div class="card bg-base-100 shadow-xl w-full max-w-xl mx-auto">
                            <div class="card-body">
                                <ReceiptSummary receipt=receipt />
                            </div>
                        </div>
                    }
                    .into_any()
                } else {
                    match slug.clone() {
                        Some(slug) => view! { <DonationForm campaign=slug /> }.into_any(),
                        None => view! { <DonationForm /> }.into_any(),
                    }
                }
            }}
        </section>
    }
}
