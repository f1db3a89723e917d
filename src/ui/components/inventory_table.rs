use dioxus::prelude::*;

use crate::domain::{format_money, format_quantity, ItemId, Row, SortKey, SortSpec};

const SORTABLE_COLUMNS: [SortKey; 4] = [
    SortKey::Name,
    SortKey::Quantity,
    SortKey::UnitPrice,
    SortKey::LineTotal,
];

#[component]
pub fn InventoryTable(
    rows: Vec<(Row, bool)>,
    sort: SortSpec,
    on_sort: EventHandler<SortKey>,
    on_toggle: EventHandler<ItemId>,
) -> Element {
    let is_empty = rows.is_empty();
    let headers = SORTABLE_COLUMNS.map(|key| {
        let class = if key == SortKey::Name {
            "sortable"
        } else {
            "sortable numeric"
        };
        (key, class, format!("{} {}", key.label(), sort.indicator(key)))
    });
    rsx! {
        div {
            class: "table-wrap",
            table {
                class: "inventory-table",
                thead {
                    tr {
                        th {}
                        for (key, class, label) in headers {
                            th {
                                class,
                                onclick: move |_| on_sort.call(key),
                                "{label}"
                            }
                        }
                    }
                }
                tbody {
                    for (row, selected) in rows {
                        InventoryRowView {
                            key: "{row.key}",
                            row,
                            selected,
                            on_toggle,
                        }
                    }
                    if is_empty {
                        tr {
                            td { class: "empty-state", colspan: "5", "No items yet." }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn InventoryRowView(row: Row, selected: bool, on_toggle: EventHandler<ItemId>) -> Element {
    let row_class = if selected { "item-row selected" } else { "item-row" };
    let toggle_key = row.key.clone();
    rsx! {
        tr {
            class: row_class,
            onclick: move |_| on_toggle.call(toggle_key.clone()),
            td {
                div {
                    class: "thumb",
                    if let Some(src) = row.image_url.clone() {
                        img { src: "{src}", alt: "{row.name}", loading: "lazy" }
                    }
                }
            }
            td { class: "strong", "{row.name}" }
            td { class: "numeric", {format_quantity(row.quantity)} }
            td { class: "numeric", {format_money(row.unit_price)} }
            td { class: "numeric strong", {format_money(row.line_total)} }
        }
    }
}
