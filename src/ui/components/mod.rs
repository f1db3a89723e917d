pub mod inventory_table;
pub mod item_grid;
pub mod kpi_card;
pub mod toast;
