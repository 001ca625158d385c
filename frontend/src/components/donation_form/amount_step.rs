use crate::components::icons::ArrowRight;
use leptos::prelude::*;
use ramadan_giving_shared::DonationFrequency;
use ramadan_giving_shared::donation::{AmountSelection, DonationFlow, PRESET_AMOUNTS};

/// 第一步：预设金额或自定义金额，单次/每月切换
#[component]
pub fn AmountStep(flow: RwSignal<DonationFlow>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);

    let selection = move || flow.with(|f| f.draft().selection.clone());
    let custom_value = move || match selection() {
        AmountSelection::Custom(raw) => raw,
        _ => String::new(),
    };
    let frequency = move || flow.with(|f| f.draft().frequency);

    let on_continue = move |_| match flow.try_update(|f| f.advance()) {
        Some(Err(e)) => error.set(Some(e.to_string())),
        _ => error.set(None),
    };

    view! {
        <div class="join w-full" role="group" aria-label="Donation frequency">
            {[DonationFrequency::OneTime, DonationFrequency::Monthly]
                .into_iter()
                .map(|freq| view! {
                    <button
                        type="button"
                        class="btn join-item flex-1"
                        class:btn-primary=move || frequency() == freq
                        aria-pressed=move || (frequency() == freq).to_string()
                        on:click=move |_| flow.update(|f| f.set_frequency(freq))
                    >
                        {freq.label()}
                    </button>
                })
                .collect_view()}
        </div>

        <div class="grid grid-cols-3 gap-3">
            {PRESET_AMOUNTS
                .into_iter()
                .map(|amount| {
                    let selected = move || selection() == AmountSelection::Preset(amount);
                    view! {
                        <button
                            type="button"
                            class="btn btn-lg"
                            class:btn-primary=selected
                            class:btn-outline=move || !selected()
                            aria-pressed=move || selected().to_string()
                            on:click=move |_| {
                                error.set(None);
                                flow.update(|f| f.select_preset(amount));
                            }
                        >
                            {amount.to_string()}
                        </button>
                    }
                })
                .collect_view()}
        </div>

        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">"Other amount"</span>
            </div>
            <label class="input input-bordered flex items-center gap-2">
                "$"
                <input
                    type="text"
                    inputmode="decimal"
                    class="grow"
                    placeholder="75"
                    prop:value=custom_value
                    on:input=move |ev| {
                        error.set(None);
                        flow.update(|f| f.set_custom_amount(event_target_value(&ev)));
                    }
                />
            </label>
        </label>

        <Show when=move || error.get().is_some()>
            <p role="alert" class="text-error text-sm">{move || error.get().unwrap_or_default()}</p>
        </Show>

        <div class="card-actions justify-end">
            <button type="button" class="btn btn-primary gap-2" on:click=on_continue>
                {move || match flow.with(|f| f.current_amount()) {
                    Some(amount) if frequency().is_recurring() => format!("Give {} monthly", amount),
                    Some(amount) => format!("Give {}", amount),
                    None => "Continue".to_string(),
                }}
                <ArrowRight attr:class="h-4 w-4" />
            </button>
        </div>
    }
}
