use kiosk::{
    devices::CardStage,
    kiosk::{Action, Kiosk},
    payment::{PaymentMethod, PaymentOutcome},
};
use leptos::prelude::*;

use crate::format::{countdown, kilograms, remaining, rupiah, tax_label, unit_price};

use super::{PrimaryButton, SecondaryButton};

fn outcome_message(outcome: PaymentOutcome) -> Option<&'static str> {
    match outcome {
        PaymentOutcome::Approved => None,
        PaymentOutcome::Declined => Some("Kartu ditolak. Silakan pilih metode lain."),
        PaymentOutcome::TimedOut => Some("Waktu pembayaran QRIS habis. Silakan coba lagi."),
        PaymentOutcome::Cancelled => Some("Pembayaran dibatalkan."),
    }
}

#[component]
fn AmountDue(kiosk: RwSignal<Kiosk>) -> impl IntoView {
    view! {
        <div class="text-center">
            <p class="text-sm text-slate-500">"Total pembayaran"</p>
            <p class="text-4xl font-bold">{move || kiosk.with(|kiosk| rupiah(&kiosk.totals().total))}</p>
        </div>
    }
}

#[component]
fn MethodButton(
    method: PaymentMethod,
    title: &'static str,
    subtitle: &'static str,
    dispatch: Callback<Action>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="rounded-2xl border-2 border-slate-200 bg-white p-6 text-left shadow hover:border-blue-600"
            on:click=move |_| dispatch.run(Action::SelectPayment(method))
        >
            <p class="text-xl font-semibold">{title}</p>
            <p class="text-sm text-slate-500">{subtitle}</p>
        </button>
    }
}

#[component]
pub(super) fn PaymentMethods(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let message = move || kiosk.with(|kiosk| kiosk.last_outcome().and_then(outcome_message));

    view! {
        <section class="mx-auto flex w-full max-w-2xl flex-1 flex-col gap-6 p-6">
            <AmountDue kiosk=kiosk />
            <Show when=move || message().is_some()>
                <p class="rounded-lg bg-amber-100 px-4 py-2 text-center text-amber-900" role="alert">
                    {move || message().unwrap_or_default()}
                </p>
            </Show>
            <div class="grid gap-4 md:grid-cols-2">
                <MethodButton
                    method=PaymentMethod::Qris
                    title="QRIS"
                    subtitle="Pindai dengan aplikasi e-wallet atau m-banking"
                    dispatch=dispatch
                />
                <MethodButton
                    method=PaymentMethod::Card
                    title="Kartu Debit / Kredit"
                    subtitle="Masukkan atau tempelkan kartu"
                    dispatch=dispatch
                />
            </div>
            <SecondaryButton label="Kembali ke Keranjang" action=Action::BackToCart dispatch=dispatch />
        </section>
    }
}

#[component]
pub(super) fn Qris(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let qr = kiosk.with_untracked(|kiosk| kiosk.payment_qr_url(250));
    let left = move || kiosk.with(|kiosk| kiosk.qris().remaining());
    let bar = move || {
        let fraction = kiosk.with(|kiosk| kiosk.qris().remaining_fraction());

        format!("width: {:.1}%", fraction * 100.0)
    };

    view! {
        <section class="mx-auto flex w-full max-w-md flex-1 flex-col items-center gap-6 p-6">
            <AmountDue kiosk=kiosk />
            <img src=qr alt="Kode QRIS" class="h-64 w-64 rounded-xl bg-white p-3 shadow" />
            <div class="w-full space-y-2">
                <div class="h-2 w-full overflow-hidden rounded-full bg-slate-200">
                    <div class="h-full bg-blue-600 transition-all" style=bar></div>
                </div>
                <p class="text-center font-mono text-2xl" aria-label=move || remaining(left())>
                    {move || countdown(left())}
                </p>
            </div>
            <p class="text-center text-sm text-slate-500">"Menunggu konfirmasi pembayaran..."</p>
            <SecondaryButton label="Batal" action=Action::CancelPayment dispatch=dispatch />
        </section>
    }
}

fn stage_copy(stage: CardStage, attempts: u32) -> (&'static str, String) {
    match stage {
        CardStage::Insert => (
            "💳",
            if attempts > 1 {
                format!("Percobaan ke-{attempts}: masukkan atau tempelkan kartu")
            } else {
                "Masukkan atau tempelkan kartu Anda".to_string()
            },
        ),
        CardStage::Processing => ("⏳", "Memproses pembayaran...".to_string()),
        CardStage::Approved => ("✅", "Pembayaran disetujui".to_string()),
        CardStage::Declined => ("❌", "Kartu ditolak".to_string()),
    }
}

#[component]
pub(super) fn CardPayment(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let stage = Memo::new(move |_| kiosk.with(|kiosk| kiosk.card().stage()));
    let attempts = move || kiosk.with(|kiosk| kiosk.card().attempts());
    let cancellable = move || kiosk.with(Kiosk::can_cancel_card);

    view! {
        <section class="mx-auto flex w-full max-w-md flex-1 flex-col items-center gap-6 p-6 text-center">
            <AmountDue kiosk=kiosk />
            {move || {
                let (icon, text) = stage_copy(stage.get(), attempts());

                view! {
                    <div class="space-y-3">
                        <p class="text-6xl">{icon}</p>
                        <p class="text-lg font-medium">{text}</p>
                    </div>
                }
            }}
            <Show when=move || stage.get() == CardStage::Insert>
                <PrimaryButton label="Tempelkan Kartu" action=Action::TapCard dispatch=dispatch />
            </Show>
            <Show when=move || stage.get() == CardStage::Declined>
                <PrimaryButton label="Coba Lagi" action=Action::RetryCard dispatch=dispatch />
            </Show>
            <Show when=cancellable>
                <SecondaryButton label="Batal" action=Action::CancelPayment dispatch=dispatch />
            </Show>
        </section>
    }
}

#[component]
pub(super) fn Success(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let order = kiosk.with_untracked(|kiosk| kiosk.order().map(|order| order.to_string()));

    view! {
        <section class="mx-auto flex w-full max-w-md flex-1 flex-col items-center justify-center gap-6 p-6 text-center">
            <p class="text-7xl">"✅"</p>
            <h2 class="text-3xl font-bold">"Pembayaran Berhasil"</h2>
            <p class="text-slate-600">
                "Nomor pesanan "
                <span class="font-mono font-semibold">{order.unwrap_or_default()}</span>
            </p>
            <PrimaryButton label="Lihat Struk" action=Action::ViewReceipt dispatch=dispatch />
        </section>
    }
}

#[component]
pub(super) fn ReceiptScreen(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let (receipt, qr, tax) = kiosk.with_untracked(|kiosk| {
        (
            kiosk.receipt(),
            kiosk.receipt_qr_url(150),
            tax_label(kiosk.config().tax_rate),
        )
    });

    let body = match receipt {
        Ok(receipt) => {
            let order = receipt.order().map(|order| order.to_string()).unwrap_or_default();
            let totals = *receipt.totals();

            view! {
                <div class="space-y-4 rounded-2xl bg-white p-6 font-mono text-sm shadow">
                    <div class="text-center">
                        <p class="font-sans text-lg font-black">"YOGYA"</p>
                        <p>{order}</p>
                    </div>
                    <ul class="space-y-2 border-y border-dashed border-slate-300 py-3">
                        {receipt
                            .lines()
                            .iter()
                            .map(|line| {
                                let detail = match line.weight {
                                    Some(weight) => format!(
                                        "{} × {}",
                                        kilograms(weight.kilograms()),
                                        unit_price(&line.unit_price, true),
                                    ),
                                    None => format!("{} × {}", line.quantity, rupiah(&line.unit_price)),
                                };

                                view! {
                                    <li>
                                        <p>{line.name.clone()}</p>
                                        <p class="flex justify-between text-slate-500">
                                            <span>{detail}</span>
                                            <span class="text-slate-900">{rupiah(&line.total)}</span>
                                        </p>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <dl class="space-y-1">
                        <div class="flex justify-between">
                            <dt>"Subtotal"</dt>
                            <dd>{rupiah(&totals.subtotal)}</dd>
                        </div>
                        <div class="flex justify-between">
                            <dt>{tax}</dt>
                            <dd>{rupiah(&totals.tax)}</dd>
                        </div>
                        <div class="flex justify-between font-bold">
                            <dt>"Total"</dt>
                            <dd>{rupiah(&totals.total)}</dd>
                        </div>
                    </dl>
                    {qr.map(|src| view! {
                        <img src=src alt="QR struk" class="mx-auto h-32 w-32" />
                    })}
                </div>
            }
            .into_any()
        }
        Err(error) => view! {
            <p class="rounded-lg bg-red-50 p-4 text-sm text-red-700">{error.to_string()}</p>
        }
        .into_any(),
    };

    view! {
        <section class="mx-auto flex w-full max-w-md flex-1 flex-col gap-6 p-6">
            {body}
            <PrimaryButton label="Selesai" action=Action::FinishReceipt dispatch=dispatch />
        </section>
    }
}

#[component]
pub(super) fn Bagging(dispatch: Callback<Action>) -> impl IntoView {
    view! {
        <section class="mx-auto flex w-full max-w-md flex-1 flex-col items-center justify-center gap-6 p-6 text-center">
            <p class="text-7xl">"🛍️"</p>
            <h2 class="text-2xl font-semibold">"Silakan masukkan belanjaan ke kantong"</h2>
            <p class="text-slate-500">"Jangan lupa barang dan struk Anda"</p>
            <PrimaryButton label="Sudah Selesai" action=Action::CompleteBagging dispatch=dispatch />
        </section>
    }
}

#[component]
pub(super) fn Exit(dispatch: Callback<Action>) -> impl IntoView {
    view! {
        <section class="flex flex-1 flex-col items-center justify-center gap-6 bg-gradient-to-b from-blue-700 to-blue-900 p-6 text-center text-white">
            <h2 class="text-4xl font-bold">"Terima Kasih"</h2>
            <p class="text-lg opacity-80">"Sampai jumpa kembali di YOGYA"</p>
            <button
                type="button"
                class="rounded-full bg-white px-8 py-3 font-semibold text-blue-800"
                on:click=move |_| dispatch.run(Action::Reset)
            >
                "Transaksi Baru"
            </button>
        </section>
    }
}
