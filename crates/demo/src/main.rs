//! Leptos Self-Checkout Kiosk Demo Application

use std::time::Duration;

use kiosk::{
    catalog::Catalog,
    config::KioskConfig,
    kiosk::{Action, Kiosk},
};
use leptos::{
    ev,
    leptos_dom::helpers::{set_interval_with_handle, window_event_listener},
    logging,
    prelude::*,
};

mod chrome;
mod format;
mod screens;

/// Real time between two advances of the kiosk clock.
const TICK: Duration = Duration::from_millis(50);

/// Forward an action to the kiosk, surfacing rejections as a notice.
fn forward(kiosk: RwSignal<Kiosk>, notice: RwSignal<Option<String>>, action: Action) {
    let name = action.name();
    let mut rejected = None;

    kiosk.update(|kiosk| {
        if let Err(error) = kiosk.dispatch(action) {
            rejected = Some(error.to_string());
        }
    });

    if let Some(message) = &rejected {
        logging::warn!("{name} rejected: {message}");
    }

    notice.set(rejected);
}

fn browser_online() -> bool {
    web_sys::window().is_none_or(|window| window.navigator().on_line())
}

/// Install the clock ticker and the window listeners that feed the kiosk.
fn install_drivers(kiosk: RwSignal<Kiosk>, dispatch: Callback<Action>) {
    match set_interval_with_handle(
        move || {
            kiosk.update(|kiosk| {
                if let Err(error) = kiosk.advance(TICK) {
                    logging::error!("timer failed: {error}");
                }
            });
        },
        TICK,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(error) => logging::error!("could not start the kiosk clock: {error:?}"),
    }

    let online = window_event_listener(ev::online, move |_| dispatch.run(Action::NetworkChanged(true)));
    let offline =
        window_event_listener(ev::offline, move |_| dispatch.run(Action::NetworkChanged(false)));

    let keydown = window_event_listener(ev::keydown, move |event| {
        if !kiosk.with_untracked(Kiosk::accepts_barcodes) {
            return;
        }

        let modifier = event.ctrl_key() || event.alt_key() || event.meta_key();

        dispatch.run(Action::KeyPressed {
            key: event.key(),
            modifier,
        });
    });

    on_cleanup(move || {
        online.remove();
        offline.remove();
        keydown.remove();
    });
}

/// Main demo app shell.
#[component]
fn App() -> impl IntoView {
    match Catalog::bundled() {
        Ok(catalog) => {
            let kiosk = RwSignal::new(Kiosk::new(KioskConfig::default(), catalog));
            let notice = RwSignal::new(None::<String>);
            let dispatch = Callback::new(move |action: Action| forward(kiosk, notice, action));

            if !browser_online() {
                dispatch.run(Action::NetworkChanged(false));
            }

            install_drivers(kiosk, dispatch);

            let screen = Memo::new(move |_| kiosk.with(Kiosk::screen));

            view! {
                <main class="relative flex min-h-screen flex-col bg-slate-100 text-slate-900">
                    <Show when=move || screen.get().shows_header()>
                        <chrome::Header kiosk=kiosk dispatch=dispatch />
                    </Show>
                    <div class="flex flex-1 flex-col">
                        <screens::ActiveScreen screen=screen kiosk=kiosk dispatch=dispatch />
                    </div>
                    <chrome::Notice notice=notice />
                    <chrome::ScanToast kiosk=kiosk />
                    <chrome::NetworkToast kiosk=kiosk />
                    <chrome::AssistanceModal kiosk=kiosk dispatch=dispatch />
                </main>
            }
            .into_any()
        }
        Err(error) => view! {
            <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error.to_string()}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

/// Main entry point
fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
