//! 统一捐赠表单
//!
//! 步骤：金额 → 捐赠者信息 → 支付 → 完成。状态机是 shared 中的
//! `DonationFlow`，这里把它放进一个 `RwSignal`，各步骤组件只负责渲染与转发输入。

mod amount_step;
mod details_step;
mod payment_step;
mod success_step;

use crate::auth::use_auth;
use crate::components::toast::use_toast;
use amount_step::AmountStep;
use details_step::DetailsStep;
use leptos::prelude::*;
use payment_step::PaymentStep;
use ramadan_giving_shared::donation::{DonationFlow, DonationStep};
use success_step::SuccessStep;

pub use success_step::ReceiptSummary;

const STEPS: [DonationStep; 4] = [
    DonationStep::Amount,
    DonationStep::Details,
    DonationStep::Payment,
    DonationStep::Success,
];

#[component]
fn StepIndicator(step: Memo<DonationStep>) -> impl IntoView {
    view! {
        <ul class="steps w-full text-xs" aria-label="Donation progress">
            {STEPS
                .iter()
                .map(|s| {
                    let s = *s;
                    view! {
                        <li
                            class="step"
                            class:step-primary=move || s.index() <= step.get().index()
                            aria-current=move || (s == step.get()).then_some("step")
                        >
                            {s.title()}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn DonationForm(
    /// 活动 slug，来自 `/donate/?campaign=`
    #[prop(optional)]
    campaign: Option<String>,
) -> impl IntoView {
    let flow = RwSignal::new(match campaign {
        Some(slug) => DonationFlow::for_campaign(slug),
        None => DonationFlow::new(),
    });
    // 步骤不变时不重建子组件（支付组件只能挂载一次）
    let step = Memo::new(move |_| flow.with(|f| f.step()));

    // 已登录时预填姓名与邮箱
    let auth = use_auth();
    Effect::new(move |_| {
        if let Some(user) = auth.state.with(|s| s.user.clone()) {
            flow.update(|f| f.prefill_from(&user));
        }
    });

    // 状态机中的提示转为 toast
    let toast = use_toast();
    Effect::new(move |_| {
        if let Some(notice) = flow.with(|f| f.notice().cloned()) {
            toast.push(notice);
            flow.update(|f| f.dismiss_notice());
        }
    });

    view! {
        <div class="card bg-base-100 shadow-xl w-full max-w-xl mx-auto">
            <div class="card-body gap-6">
                <StepIndicator step=step />
                <h2 class="card-title text-2xl">{move || step.get().title()}</h2>
                {move || match step.get() {
                    DonationStep::Amount => view! { <AmountStep flow=flow /> }.into_any(),
                    DonationStep::Details => view! { <DetailsStep flow=flow /> }.into_any(),
                    DonationStep::Payment => view! { <PaymentStep flow=flow /> }.into_any(),
                    DonationStep::Success => view! { <SuccessStep flow=flow /> }.into_any(),
                }}
            </div>
        </div>
    }
}
