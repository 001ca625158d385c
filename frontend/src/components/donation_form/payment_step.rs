use crate::api::DonationApi;
use crate::components::embedded_checkout::EmbeddedCheckout;
use crate::components::icons::{ArrowLeft, RefreshCw};
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramadan_giving_shared::donation::{DonationFlow, StepError};
use ramadan_giving_shared::payment::PaymentSessionProvider;
use ramadan_giving_shared::{Amount, MIN_CHARGE_CENTS};

/// 向 Worker 请求结算会话；过期票据的结果由状态机丢弃
pub fn request_session(flow: RwSignal<DonationFlow>) {
    let Some(Ok((ticket, request))) = flow.try_update(|f| f.begin_checkout()) else {
        return;
    };

    spawn_local(async move {
        match DonationApi.create_session(&request).await {
            Ok(session) => {
                flow.try_update(|f| f.attach_session(ticket, session));
            }
            Err(e) => {
                flow.try_update(|f| {
                    f.checkout_failed(ticket, format!("Could not start checkout: {}", e))
                });
            }
        }
    });
}

/// 第三步：嵌入式结算
///
/// SDK 的完成回调只说明表单已提交，真正的结果以会话状态为准。
#[component]
pub fn PaymentStep(flow: RwSignal<DonationFlow>) -> impl IntoView {
    let session = Memo::new(move |_| flow.with(|f| f.session().cloned()));
    let creating = Memo::new(move |_| flow.with(|f| f.is_creating_session()));
    let below_minimum = Memo::new(move |_| flow.with(|f| f.below_charge_minimum()));
    let confirming = RwSignal::new(false);

    let on_complete = Callback::new(move |_: ()| {
        let Some(id) = flow.with_untracked(|f| f.session().map(|s| s.id.clone())) else {
            return;
        };
        confirming.set(true);

        spawn_local(async move {
            let outcome = DonationApi.session_status(&id).await;
            flow.try_update(|f| match outcome {
                Ok(status) => match f.confirm_payment(&status) {
                    Ok(_) => {}
                    Err(StepError::PaymentIncomplete) => {
                        f.payment_failed("The payment was not completed. Please try again.");
                    }
                    Err(e) => {
                        web_sys::console::warn_1(&format!("[Checkout] {}", e).into());
                    }
                },
                Err(e) => {
                    f.payment_failed(format!(
                        "We could not confirm your payment ({}). Check your email for a receipt before trying again.",
                        e
                    ));
                }
            });
            confirming.try_set(false);
        });
    });

    let on_error = Callback::new(move |message: String| {
        flow.try_update(|f| f.payment_failed(message));
    });

    let retry = move |_| request_session(flow);

    view! {
        <Show when=move || confirming.get()>
            <div class="alert">
                <span class="loading loading-spinner loading-sm"></span>
                "Confirming your donation..."
            </div>
        </Show>

        {move || match session.get() {
            Some(s) => view! {
                <EmbeddedCheckout client_secret=s.client_secret on_complete=on_complete on_error=on_error />
            }
            .into_any(),
            None if creating.get() => view! {
                <div class="flex justify-center py-16" aria-busy="true">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            None if below_minimum.get() => view! {
                <div role="alert" class="alert alert-warning">
                    {format!(
                        "Card payments start at {}. Go back to choose a larger amount.",
                        Amount::from_cents(MIN_CHARGE_CENTS)
                    )}
                </div>
            }
            .into_any(),
            None => view! {
                <div class="flex flex-col items-center gap-4 py-10 text-center">
                    <p class="text-base-content/70">"The payment form is not available right now."</p>
                    <button type="button" class="btn btn-primary gap-2" on:click=retry>
                        <RefreshCw attr:class="h-4 w-4" />
                        "Try again"
                    </button>
                </div>
            }
            .into_any(),
        }}

        <div class="card-actions justify-start">
            <button
                type="button"
                class="btn btn-ghost gap-2"
                prop:disabled=move || confirming.get()
                on:click=move |_| {
                    flow.update(|f| {
                        f.back();
                    });
                }
            >
                <ArrowLeft attr:class="h-4 w-4" />
                "Back"
            </button>
        </div>
    }
}
