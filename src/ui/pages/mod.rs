pub mod inventory;

pub use inventory::InventoryPage;
