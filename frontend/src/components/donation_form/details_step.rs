use super::payment_step::request_session;
use crate::components::icons::{ArrowLeft, Lock};
use leptos::prelude::*;
use ramadan_giving_shared::donation::{DonationFlow, DonationStep};

/// 第二步：姓名、邮箱、匿名、献词
#[component]
pub fn DetailsStep(flow: RwSignal<DonationFlow>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let donor = move || flow.with(|f| f.draft().donor.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match flow.try_update(|f| f.advance()) {
            Some(Ok(DonationStep::Payment)) => {
                error.set(None);
                request_session(flow);
            }
            Some(Err(e)) => error.set(Some(e.to_string())),
            _ => {}
        }
    };

    view! {
        <form class="flex flex-col gap-4" on:submit=on_submit novalidate>
            <p class="text-sm text-base-content/70">
                {move || flow.with(|f| {
                    let amount = f.current_amount().map(|a| a.to_string()).unwrap_or_default();
                    format!("{} {} donation", amount, f.draft().frequency.label().to_lowercase())
                })}
            </p>

            <div class="form-control">
                <label class="label" for="donor-name">
                    <span class="label-text">"Full name"</span>
                </label>
                <input
                    id="donor-name"
                    type="text"
                    autocomplete="name"
                    class="input input-bordered w-full"
                    prop:value=move || donor().name
                    prop:disabled=move || donor().anonymous
                    on:input=move |ev| flow.update(|f| f.set_name(event_target_value(&ev)))
                />
            </div>

            <div class="form-control">
                <label class="label" for="donor-email">
                    <span class="label-text">"Email (for your receipt)"</span>
                </label>
                <input
                    id="donor-email"
                    type="email"
                    autocomplete="email"
                    required
                    class="input input-bordered w-full"
                    prop:value=move || donor().email
                    on:input=move |ev| flow.update(|f| f.set_email(event_target_value(&ev)))
                />
            </div>

            <label class="label cursor-pointer justify-start gap-3">
                <input
                    type="checkbox"
                    class="checkbox checkbox-primary"
                    prop:checked=move || donor().anonymous
                    on:change=move |ev| flow.update(|f| f.set_anonymous(event_target_checked(&ev)))
                />
                <span class="label-text">"Give anonymously"</span>
            </label>

            <div class="form-control">
                <label class="label" for="donor-dedication">
                    <span class="label-text">"Dedicate this gift (optional)"</span>
                </label>
                <textarea
                    id="donor-dedication"
                    rows="2"
                    maxlength="500"
                    class="textarea textarea-bordered w-full"
                    placeholder="In memory of..."
                    prop:value=move || donor().dedication.unwrap_or_default()
                    on:input=move |ev| flow.update(|f| f.set_dedication(event_target_value(&ev)))
                ></textarea>
            </div>

            <Show when=move || error.get().is_some()>
                <p role="alert" class="text-error text-sm">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="card-actions justify-between">
                <button
                    type="button"
                    class="btn btn-ghost gap-2"
                    on:click=move |_| {
                        flow.update(|f| {
                            f.back();
                        });
                    }
                >
                    <ArrowLeft attr:class="h-4 w-4" />
                    "Back"
                </button>
                <button type="submit" class="btn btn-primary gap-2">
                    <Lock attr:class="h-4 w-4" />
                    "Continue to payment"
                </button>
            </div>
        </form>
    }
}
