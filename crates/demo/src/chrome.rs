//! Header, toasts and the staff-assistance modal shared by every screen.

use kiosk::{
    assistance::{Assistance, AssistanceReason},
    kiosk::{Action, Kiosk},
};
use leptos::prelude::*;

#[component]
pub(crate) fn Header(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let item_count = move || kiosk.with(Kiosk::item_count);

    view! {
        <header class="flex items-center justify-between bg-blue-700 px-6 py-3 text-white shadow">
            <div class="flex items-center gap-3">
                <span class="rounded bg-yellow-400 px-2 py-1 text-lg font-black text-blue-800">
                    "YOGYA"
                </span>
                <span class="text-sm font-medium opacity-80">"Self-Checkout"</span>
            </div>
            <div class="flex items-center gap-4">
                <span
                    class="rounded-full bg-white/20 px-3 py-1 text-sm font-semibold"
                    aria-label=move || format!("{} barang di keranjang", item_count())
                >
                    {move || format!("🛒 {}", item_count())}
                </span>
                <button
                    type="button"
                    class="rounded-full bg-white px-4 py-1 text-sm font-semibold text-blue-700"
                    on:click=move |_| dispatch.run(Action::OpenAssistance)
                >
                    "Bantuan"
                </button>
            </div>
        </header>
    }
}

/// Last rejected action, shown until the next accepted one.
#[component]
pub(crate) fn Notice(notice: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div
                class="fixed bottom-4 left-1/2 -translate-x-1/2 rounded-lg bg-amber-100 px-4 py-2 text-sm text-amber-900 shadow"
                role="alert"
            >
                {move || notice.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn ScanToast(kiosk: RwSignal<Kiosk>) -> impl IntoView {
    let toast = move || kiosk.with(|kiosk| kiosk.scanner().toast().map(|toast| toast.name.clone()));

    view! {
        <Show when=move || toast().is_some()>
            <div
                class="fixed top-20 right-6 rounded-lg bg-green-600 px-4 py-3 text-white shadow-lg"
                role="status"
                aria-live="polite"
            >
                <p class="text-xs uppercase tracking-wide opacity-80">"Berhasil dipindai"</p>
                <p class="font-semibold">{move || toast().unwrap_or_default()}</p>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn NetworkToast(kiosk: RwSignal<Kiosk>) -> impl IntoView {
    let visible = move || kiosk.with(|kiosk| kiosk.network().toast_visible());
    let online = move || kiosk.with(|kiosk| kiosk.network().is_online());

    view! {
        <Show when=visible>
            <div
                class=move || {
                    let tone = if online() { "bg-green-600" } else { "bg-red-600" };

                    format!("fixed top-4 left-1/2 -translate-x-1/2 rounded-lg px-4 py-2 text-white shadow {tone}")
                }
                role="status"
            >
                {move || if online() { "Koneksi tersambung kembali" } else { "Tidak ada koneksi internet" }}
            </div>
        </Show>
    }
}

#[component]
fn ReasonButton(
    reason: AssistanceReason,
    selected: Signal<Option<AssistanceReason>>,
    dispatch: Callback<Action>,
) -> impl IntoView {
    let class = move || {
        if selected.get() == Some(reason) {
            "rounded-lg border-2 border-blue-600 bg-blue-50 px-4 py-3 text-left font-medium"
        } else {
            "rounded-lg border-2 border-slate-200 px-4 py-3 text-left font-medium"
        }
    };

    view! {
        <button
            type="button"
            class=class
            on:click=move |_| dispatch.run(Action::SelectAssistanceReason(reason))
        >
            {reason.label()}
        </button>
    }
}

#[component]
pub(crate) fn AssistanceModal(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let assistance = Memo::new(move |_| kiosk.with(|kiosk| *kiosk.assistance()));
    let selected = Signal::derive(move || match assistance.get() {
        Assistance::Selecting { reason } => reason,
        Assistance::Waiting { reason } => Some(reason),
        Assistance::Closed => None,
    });

    view! {
        <Show when=move || assistance.get().is_open()>
            <div class="fixed inset-0 flex items-center justify-center bg-black/50" role="dialog">
                <div class="w-full max-w-md rounded-2xl bg-white p-6 shadow-xl">
                    {move || match assistance.get() {
                        Assistance::Waiting { reason } => view! {
                            <div class="space-y-4 text-center">
                                <p class="text-lg font-semibold">"Petugas sedang menuju ke sini"</p>
                                <p class="text-sm text-slate-500">{reason.label()}</p>
                                <button
                                    type="button"
                                    class="rounded-lg bg-slate-200 px-4 py-2 font-medium"
                                    on:click=move |_| dispatch.run(Action::CancelStaffCall)
                                >
                                    "Batalkan panggilan"
                                </button>
                            </div>
                        }
                        .into_any(),
                        _ => view! {
                            <div class="space-y-4">
                                <p class="text-lg font-semibold">"Butuh bantuan?"</p>
                                <div class="grid gap-2">
                                    {AssistanceReason::ALL
                                        .into_iter()
                                        .map(|reason| view! {
                                            <ReasonButton reason=reason selected=selected dispatch=dispatch />
                                        })
                                        .collect_view()}
                                </div>
                                <div class="flex justify-end gap-2">
                                    <button
                                        type="button"
                                        class="rounded-lg bg-slate-200 px-4 py-2 font-medium"
                                        on:click=move |_| dispatch.run(Action::CloseAssistance)
                                    >
                                        "Tutup"
                                    </button>
                                    <button
                                        type="button"
                                        class="rounded-lg bg-blue-700 px-4 py-2 font-medium text-white disabled:opacity-40"
                                        disabled=move || selected.get().is_none()
                                        on:click=move |_| dispatch.run(Action::CallStaff)
                                    >
                                        "Panggil petugas"
                                    </button>
                                </div>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
