use dioxus::prelude::*;

use crate::{
    app::run_fetch,
    domain::{format_money, InventorySession, ItemId, SortKey, ViewMode},
    ui::components::{
        inventory_table::InventoryTable,
        item_grid::ItemGrid,
        kpi_card::KpiCard,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn InventoryPage() -> Element {
    let mut session = use_context::<Signal<InventorySession>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let state = session.read();
    let identifier = state.identifier().to_string();
    let loading = state.is_loading();
    let view = state.view();
    let sort = state.sort();
    let item_count = state.item_count();
    let total = state.total();
    let summary = state.summary();
    let has_selection = !state.selection().is_empty();
    let error = state.error().map(str::to_string);
    let total_hint = state.snapshot().and_then(|snapshot| {
        snapshot.total_mismatch().then(|| {
            format!(
                "Reported by backend; rows sum to {}",
                format_money(snapshot.row_sum())
            )
        })
    });
    let fetched_hint = state.snapshot().map(|snapshot| {
        format!(
            "Fetched {} UTC for {}",
            snapshot.fetched_label(),
            snapshot.identifier
        )
    });
    let rows: Vec<_> = state
        .sorted_rows()
        .into_iter()
        .map(|row| {
            let selected = state.is_selected(&row.key);
            (row, selected)
        })
        .collect();
    drop(state);

    let mut on_fetch = move |_: ()| match session.with_mut(|st| st.begin_fetch()) {
        Ok(ticket) => {
            spawn(run_fetch(session, toasts, ticket));
        }
        Err(err) => push_toast(toasts, ToastKind::Warning, err.to_string()),
    };
    let on_toggle = move |key: ItemId| session.with_mut(|st| st.toggle_selection(&key));
    let on_sort = move |key: SortKey| session.with_mut(|st| st.toggle_sort(key));

    let table_class = if view == ViewMode::Table { "active" } else { "" };
    let grid_class = if view == ViewMode::Grid { "active" } else { "" };

    rsx! {
        div {
            class: "inventory-toolbar",
            input {
                class: "identifier-input",
                id: "steamId",
                name: "steamId",
                autocomplete: "off",
                placeholder: "SteamID (e.g. 7656119...)",
                value: "{identifier}",
                oninput: move |evt| session.with_mut(|st| st.set_identifier(evt.value())),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        on_fetch(());
                    }
                },
            }
            button {
                class: "btn-primary",
                disabled: loading,
                onclick: move |_| on_fetch(()),
                if loading { "Loading..." } else { "Fetch" }
            }
            div {
                class: "view-toggle",
                button {
                    class: table_class,
                    onclick: move |_| session.with_mut(|st| st.set_view(ViewMode::Table)),
                    "Table"
                }
                button {
                    class: grid_class,
                    onclick: move |_| session.with_mut(|st| st.set_view(ViewMode::Grid)),
                    "Cards"
                }
            }
            if let Some(hint) = fetched_hint {
                span { class: "push-right kpi-description", "{hint}" }
            }
        }

        div {
            class: "kpi-row",
            KpiCard { title: "Items", value: item_count.to_string() }
            KpiCard { title: "Total value", value: format_money(total), description: total_hint }
            KpiCard { title: "Selected", value: summary.count.to_string() }
            KpiCard { title: "Selected value", value: format_money(summary.value) }
        }

        div {
            class: "selection-bar",
            div {
                class: "push-right",
                button {
                    class: "btn-ghost",
                    disabled: item_count == 0,
                    onclick: move |_| session.with_mut(|st| st.select_all()),
                    "Select all"
                }
                " "
                button {
                    class: "btn-ghost",
                    disabled: !has_selection,
                    onclick: move |_| session.with_mut(|st| st.clear_selection()),
                    "✕ Clear"
                }
            }
        }

        if let Some(message) = error {
            div { class: "error-box", "{message}" }
        }

        match view {
            ViewMode::Grid => rsx! {
                ItemGrid { rows, on_toggle }
            },
            ViewMode::Table => rsx! {
                InventoryTable { rows, sort, on_sort, on_toggle }
            },
        }
    }
}
