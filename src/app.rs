use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{format_money, FetchOutcome, FetchTicket, InventorySession},
    infra::value_api::ValueClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::InventoryPage,
        shell::Shell,
    },
    util::assets,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Inventory {},
}

#[component]
pub fn App() -> Element {
    let session = use_signal(InventorySession::default);
    use_context_provider(|| session);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Performs the network call for `ticket` and commits the result.
///
/// Results of superseded tickets are dropped by the session, so overlapping
/// fetches never overwrite a newer snapshot.
pub async fn run_fetch(
    mut session: Signal<InventorySession>,
    toasts: Signal<Vec<ToastMessage>>,
    ticket: FetchTicket,
) {
    let outcome = match ValueClient::new() {
        Ok(client) => client.fetch_valuation(&ticket.identifier).await,
        Err(err) => Err(err),
    };

    match session.with_mut(|st| st.complete_fetch(&ticket, outcome)) {
        FetchOutcome::Loaded { items, total } => push_toast(
            toasts,
            ToastKind::Success,
            format!("Loaded {items} items worth {}.", format_money(total)),
        ),
        FetchOutcome::Failed(message) => push_toast(
            toasts,
            ToastKind::Error,
            format!("Failed to load inventory: {message}"),
        ),
        FetchOutcome::Superseded => {}
    }
}

#[component]
pub fn Inventory() -> Element {
    rsx! { Shell { InventoryPage {} } }
}
