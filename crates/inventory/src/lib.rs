//! Inventory domain module.
//!
//! Stock levels, status classification and the stock book that owns them,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod book;
pub mod stock;

pub use book::{
    AddStockItem, AdjustStock, DISPENSE_STEP, StockAdjusted, StockBook, StockCommand, StockEvent,
    StockItemAdded, StockSummary,
};
pub use stock::{StockItem, StockStatus, adjust, classify};
