use crate::components::icons::{Check, Heart};
use leptos::prelude::*;
use ramadan_giving_shared::donation::{DonationFlow, Receipt};

/// 确认信息（向导完成与支付跳转返回共用）
#[component]
pub fn ReceiptSummary(receipt: Receipt) -> impl IntoView {
    let headline = if receipt.frequency.is_recurring() {
        format!("{} every month", receipt.amount)
    } else {
        receipt.amount.to_string()
    };
    let greeting = match &receipt.donor_name {
        Some(name) => format!("Thank you, {}!", name),
        None => "Thank you!".to_string(),
    };

    view! {
        <div class="flex flex-col items-center gap-3 text-center py-6">
            <div class="rounded-full bg-success/15 p-4 text-success">
                <Check attr:class="h-8 w-8" />
            </div>
            <p class="text-xl font-semibold">{greeting}</p>
            <p class="text-4xl font-bold text-primary">{headline}</p>
            {receipt.processing.then(|| view! {
                <p class="text-sm text-base-content/70">
                    "Your bank payment is processing. It can take a few business days to clear."
                </p>
            })}
            {(!receipt.email.is_empty()).then(|| view! {
                <p class="text-base-content/70">
                    "A receipt is on its way to " <span class="font-medium">{receipt.email}</span>
                </p>
            })}
        </div>
    }
}

/// 第四步：确认页
#[component]
pub fn SuccessStep(flow: RwSignal<DonationFlow>) -> impl IntoView {
    let receipt = flow.with_untracked(|f| f.receipt().cloned());

    view! {
        {receipt.map(|receipt| view! { <ReceiptSummary receipt=receipt /> })}
        <div class="card-actions justify-center">
            <button type="button" class="btn btn-outline gap-2" on:click=move |_| flow.update(|f| f.reset())>
                <Heart attr:class="h-4 w-4" />
                "Give again"
            </button>
        </div>
    }
}
