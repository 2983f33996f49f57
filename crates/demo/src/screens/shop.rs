use kiosk::{
    cart::LineId,
    config::FlowLayout,
    kiosk::{Action, Kiosk},
    pricing::line_total,
    products::ProductKey,
};
use leptos::prelude::*;

use crate::format::{kilograms, rupiah, tax_label, unit_price};

use super::{PrimaryButton, SecondaryButton};

#[component]
pub(super) fn Welcome(dispatch: Callback<Action>) -> impl IntoView {
    view! {
        <section class="flex flex-1 flex-col items-center justify-center gap-8 bg-gradient-to-b from-blue-700 to-blue-900 px-6 text-center text-white">
            <span class="rounded-lg bg-yellow-400 px-4 py-2 text-4xl font-black text-blue-800">
                "YOGYA"
            </span>
            <div class="space-y-2">
                <h1 class="text-4xl font-bold">"Selamat Datang"</h1>
                <p class="text-lg opacity-80">"Pindai dan bayar belanjaan Anda sendiri"</p>
            </div>
            <button
                type="button"
                class="rounded-full bg-white px-10 py-4 text-xl font-semibold text-blue-800 shadow-lg"
                on:click=move |_| dispatch.run(Action::Start)
            >
                "Mulai Belanja"
            </button>
        </section>
    }
}

/// Camera scan button, weigh button and the barcode reader hint.
#[component]
fn ScannerPanel(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let scanning = move || kiosk.with(|kiosk| kiosk.scanner().is_scanning());
    let typed = move || kiosk.with(|kiosk| kiosk.wedge().buffer().to_string());

    view! {
        <div class="space-y-3 rounded-2xl bg-white p-5 shadow">
            <button
                type="button"
                class="flex h-32 w-full items-center justify-center rounded-xl border-2 border-dashed border-blue-300 bg-blue-50 text-lg font-semibold text-blue-700"
                disabled=scanning
                on:click=move |_| dispatch.run(Action::RequestScan)
            >
                {move || if scanning() { "Memindai..." } else { "Ketuk untuk memindai barang" }}
            </button>
            <SecondaryButton label="Timbang Buah & Sayur" action=Action::OpenWeighing dispatch=dispatch />
            <p class="text-center text-xs text-slate-500">
                "Atau gunakan pemindai barcode. "
                <span class="font-mono">{typed}</span>
            </p>
        </div>
    }
}

/// A cart line flattened for display.
#[derive(Debug, Clone, PartialEq)]
struct LineRow {
    id: LineId,
    name: String,
    image: String,
    detail: String,
    quantity: u32,
    weighed: bool,
    total: String,
}

fn line_rows(kiosk: &Kiosk) -> Vec<LineRow> {
    kiosk
        .cart()
        .iter()
        .map(|item| {
            let product = item.product();
            let detail = match item.weight() {
                Some(weight) => format!(
                    "{} × {}",
                    kilograms(weight.kilograms()),
                    unit_price(item.unit_price(), true)
                ),
                None => unit_price(item.unit_price(), false),
            };

            LineRow {
                id: item.id(),
                name: product.name.clone(),
                image: product.image.clone(),
                detail,
                quantity: item.quantity(),
                weighed: item.is_weighed(),
                total: line_total(item).map(|total| rupiah(&total)).unwrap_or_default(),
            }
        })
        .collect()
}

#[component]
fn CartLine(row: LineRow, dispatch: Callback<Action>) -> impl IntoView {
    let line = row.id;

    view! {
        <li class="flex items-center gap-3 py-3">
            <img src=row.image alt="" class="h-14 w-14 rounded-lg object-cover" />
            <div class="min-w-0 flex-1">
                <p class="truncate font-medium">{row.name}</p>
                <p class="text-xs text-slate-500">{row.detail}</p>
            </div>
            <div class="flex items-center gap-2">
                <button
                    type="button"
                    class="h-8 w-8 rounded-full bg-slate-200 font-bold"
                    aria-label="Kurangi"
                    on:click=move |_| dispatch.run(Action::ChangeQuantity { line, delta: -1 })
                >
                    "−"
                </button>
                <span class="w-6 text-center font-semibold">{row.quantity}</span>
                <button
                    type="button"
                    class="h-8 w-8 rounded-full bg-slate-200 font-bold disabled:opacity-30"
                    aria-label="Tambah"
                    disabled=row.weighed
                    on:click=move |_| dispatch.run(Action::ChangeQuantity { line, delta: 1 })
                >
                    "+"
                </button>
            </div>
            <p class="w-24 text-right font-semibold">{row.total}</p>
            <button
                type="button"
                class="text-sm text-red-600"
                aria-label="Hapus"
                on:click=move |_| dispatch.run(Action::RemoveLine(line))
            >
                "✕"
            </button>
        </li>
    }
}

#[component]
fn CartLines(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let rows = Memo::new(move |_| kiosk.with(line_rows));

    move || {
        let rows = rows.get();

        if rows.is_empty() {
            return view! {
                <p class="py-10 text-center text-slate-400">"Keranjang masih kosong"</p>
            }
            .into_any();
        }

        view! {
            <ul class="divide-y divide-slate-100">
                {rows
                    .into_iter()
                    .map(|row| view! { <CartLine row=row dispatch=dispatch /> })
                    .collect_view()}
            </ul>
        }
        .into_any()
    }
}

#[component]
pub(super) fn TotalsPanel(kiosk: RwSignal<Kiosk>) -> impl IntoView {
    let totals = move || kiosk.with(|kiosk| *kiosk.totals());
    let tax = tax_label(kiosk.with_untracked(|kiosk| kiosk.config().tax_rate));

    view! {
        <dl class="space-y-1 text-sm">
            <div class="flex justify-between">
                <dt>"Subtotal"</dt>
                <dd>{move || rupiah(&totals().subtotal)}</dd>
            </div>
            <div class="flex justify-between">
                <dt>{tax}</dt>
                <dd>{move || rupiah(&totals().tax)}</dd>
            </div>
            <div class="flex justify-between border-t border-slate-200 pt-2 text-lg font-bold">
                <dt>"Total"</dt>
                <dd>{move || rupiah(&totals().total)}</dd>
            </div>
        </dl>
    }
}

/// Scan screen of the separate-scan layout.
#[component]
pub(super) fn Scan(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let empty = Signal::derive(move || kiosk.with(|kiosk| kiosk.cart().is_empty()));
    let count = move || kiosk.with(Kiosk::item_count);

    view! {
        <section class="mx-auto flex w-full max-w-xl flex-1 flex-col gap-4 p-6">
            <ScannerPanel kiosk=kiosk dispatch=dispatch />
            <p class="text-center text-slate-600">{move || format!("{} barang dipindai", count())}</p>
            <PrimaryButton label="Lihat Keranjang" action=Action::ReviewCart dispatch=dispatch disabled=empty />
            <SecondaryButton label="Kembali" action=Action::BackToWelcome dispatch=dispatch />
        </section>
    }
}

#[component]
pub(super) fn CartScreen(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let layout = kiosk.with_untracked(|kiosk| kiosk.config().layout);
    let blocked = Signal::derive(move || !kiosk.with(Kiosk::can_checkout));
    let offline = move || kiosk.with(|kiosk| kiosk.config().require_network && !kiosk.network().is_online());

    let back = match layout {
        FlowLayout::Combined => Action::BackToWelcome,
        FlowLayout::SeparateScan => Action::BackToScan,
    };

    view! {
        <section class="mx-auto grid w-full max-w-5xl flex-1 gap-6 p-6 md:grid-cols-[2fr_1fr]">
            <div class="space-y-4">
                {(layout == FlowLayout::Combined)
                    .then(|| view! { <ScannerPanel kiosk=kiosk dispatch=dispatch /> })}
                <div class="rounded-2xl bg-white p-5 shadow">
                    <h2 class="mb-2 text-lg font-semibold">"Keranjang"</h2>
                    <CartLines kiosk=kiosk dispatch=dispatch />
                </div>
            </div>
            <aside class="space-y-4 self-start rounded-2xl bg-white p-5 shadow">
                <TotalsPanel kiosk=kiosk />
                <Show when=offline>
                    <p class="text-sm text-red-600">"Pembayaran memerlukan koneksi internet"</p>
                </Show>
                <PrimaryButton label="Bayar" action=Action::Checkout dispatch=dispatch disabled=blocked />
                <SecondaryButton label="Kembali" action=back dispatch=dispatch />
            </aside>
        </section>
    }
}

#[component]
fn ProduceTile(
    product: ProductKey,
    name: String,
    image: String,
    price: String,
    kiosk: RwSignal<Kiosk>,
    dispatch: Callback<Action>,
) -> impl IntoView {
    let class = move || {
        if kiosk.with(|kiosk| kiosk.scale().product() == Some(product)) {
            "rounded-xl border-4 border-blue-600 bg-white p-3 text-left shadow"
        } else {
            "rounded-xl border-4 border-transparent bg-white p-3 text-left shadow"
        }
    };

    view! {
        <button type="button" class=class on:click=move |_| dispatch.run(Action::SelectProduce(product))>
            <img src=image alt="" class="mb-2 h-24 w-full rounded-lg object-cover" />
            <p class="font-medium">{name}</p>
            <p class="text-sm text-slate-500">{price}</p>
        </button>
    }
}

#[component]
pub(super) fn Weight(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) -> impl IntoView {
    let produce = kiosk.with_untracked(|kiosk| {
        let catalog = kiosk.catalog();

        catalog
            .weighable()
            .into_iter()
            .filter_map(|key| {
                catalog.get(key).map(|product| {
                    (key, product.name.clone(), product.image.clone(), unit_price(&product.price, true))
                })
            })
            .collect::<Vec<_>>()
    });

    let reading = move || kiosk.with(|kiosk| kilograms(kiosk.scale().reading()));
    let weighing = move || kiosk.with(|kiosk| kiosk.scale().is_weighing());
    let unready = Signal::derive(move || {
        kiosk.with(|kiosk| kiosk.scale().product().is_none() || kiosk.scale().is_weighing())
    });

    view! {
        <section class="mx-auto flex w-full max-w-4xl flex-1 flex-col gap-6 p-6">
            <h2 class="text-2xl font-semibold">"Pilih produk lalu letakkan di timbangan"</h2>
            <div class="grid grid-cols-2 gap-4 md:grid-cols-4">
                {produce
                    .into_iter()
                    .map(|(product, name, image, price)| {
                        view! {
                            <ProduceTile
                                product=product
                                name=name
                                image=image
                                price=price
                                kiosk=kiosk
                                dispatch=dispatch
                            />
                        }
                    })
                    .collect_view()}
            </div>
            <div class="rounded-2xl bg-slate-900 p-6 text-center font-mono text-5xl text-green-400">
                {reading}
                <Show when=weighing>
                    <p class="mt-2 font-sans text-sm text-slate-400">"Menimbang..."</p>
                </Show>
            </div>
            <div class="grid gap-3 md:grid-cols-2">
                <SecondaryButton label="Batal" action=Action::CancelWeighing dispatch=dispatch />
                <PrimaryButton label="Tambahkan" action=Action::ConfirmWeight dispatch=dispatch disabled=unready />
            </div>
        </section>
    }
}
