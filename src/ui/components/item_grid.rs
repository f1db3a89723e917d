use dioxus::prelude::*;

use crate::domain::{format_money, format_quantity, ItemId, Row};

#[component]
pub fn ItemGrid(rows: Vec<(Row, bool)>, on_toggle: EventHandler<ItemId>) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: "empty-state", "No items yet." }
        };
    }

    rsx! {
        div {
            class: "item-grid",
            for (row, selected) in rows {
                ItemCard { key: "{row.key}", row, selected, on_toggle }
            }
        }
    }
}

#[component]
fn ItemCard(row: Row, selected: bool, on_toggle: EventHandler<ItemId>) -> Element {
    let card_class = if selected { "item-card selected" } else { "item-card" };
    let toggle_key = row.key.clone();
    rsx! {
        div {
            class: card_class,
            onclick: move |_| on_toggle.call(toggle_key.clone()),
            div {
                class: "item-card-image",
                if let Some(src) = row.image_url.clone() {
                    img { src: "{src}", alt: "{row.name}", loading: "lazy" }
                }
                span { class: "amount-badge", {format_quantity(row.quantity)} }
            }
            div { class: "item-card-name", title: "{row.name}", "{row.name}" }
            div {
                class: "item-card-prices",
                div {
                    div { class: "price-label", "Unit price" }
                    div { class: "unit-value", {format_money(row.unit_price)} }
                }
                div {
                    div { class: "price-label", "Total value" }
                    div { class: "total-value", {format_money(row.line_total)} }
                }
            }
        }
    }
}
