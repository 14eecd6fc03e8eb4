//! Sales domain module.
//!
//! The working cart, the immutable sale record and the sales ledger that
//! turns one into the other, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod cart;
pub mod ledger;
pub mod sale;

pub use cart::{Cart, SaleItem, SaleTotals, TAX_RATE_BPS};
pub use ledger::{CompleteSale, SaleCompleted, SalesLedger, SalesLedgerCommand, SalesLedgerEvent};
pub use sale::{PaymentMethod, Sale, SaleId, SaleStatus};
