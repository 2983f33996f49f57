//! One component per kiosk screen.

use kiosk::kiosk::{Action, Kiosk, Screen};
use leptos::prelude::*;

mod checkout;
mod shop;

/// Render whichever screen the kiosk is on. Re-renders only on screen change.
#[component]
pub(crate) fn ActiveScreen(
    screen: Memo<Screen>,
    kiosk: RwSignal<Kiosk>,
    dispatch: Callback<Action>,
) -> impl IntoView {
    move || match screen.get() {
        Screen::Welcome => view! { <shop::Welcome dispatch=dispatch /> }.into_any(),
        Screen::Scan => view! { <shop::Scan kiosk=kiosk dispatch=dispatch /> }.into_any(),
        Screen::Cart => view! { <shop::CartScreen kiosk=kiosk dispatch=dispatch /> }.into_any(),
        Screen::Weight => view! { <shop::Weight kiosk=kiosk dispatch=dispatch /> }.into_any(),
        Screen::PaymentMethods => {
            view! { <checkout::PaymentMethods kiosk=kiosk dispatch=dispatch /> }.into_any()
        }
        Screen::Qris => view! { <checkout::Qris kiosk=kiosk dispatch=dispatch /> }.into_any(),
        Screen::CardPayment => {
            view! { <checkout::CardPayment kiosk=kiosk dispatch=dispatch /> }.into_any()
        }
        Screen::Success => view! { <checkout::Success kiosk=kiosk dispatch=dispatch /> }.into_any(),
        Screen::Receipt => {
            view! { <checkout::ReceiptScreen kiosk=kiosk dispatch=dispatch /> }.into_any()
        }
        Screen::Bagging => view! { <checkout::Bagging dispatch=dispatch /> }.into_any(),
        Screen::Exit => view! { <checkout::Exit dispatch=dispatch /> }.into_any(),
    }
}

/// Full-width call to action.
#[component]
fn PrimaryButton(
    label: &'static str,
    action: Action,
    dispatch: Callback<Action>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="w-full rounded-xl bg-blue-700 px-6 py-4 text-lg font-semibold text-white shadow disabled:cursor-not-allowed disabled:opacity-40"
            disabled=move || disabled.get()
            on:click=move |_| dispatch.run(action.clone())
        >
            {label}
        </button>
    }
}

#[component]
fn SecondaryButton(label: &'static str, action: Action, dispatch: Callback<Action>) -> impl IntoView {
    view! {
        <button
            type="button"
            class="w-full rounded-xl bg-slate-200 px-6 py-3 font-medium text-slate-700"
            on:click=move |_| dispatch.run(action.clone())
        >
            {label}
        </button>
    }
}
