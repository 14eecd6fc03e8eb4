use chrono::NaiveDate;
use serde::Serialize;

use medishop_core::{Aggregate, DomainError, Money, execute};
use medishop_events::Event;

use crate::cart::Cart;
use crate::sale::{PaymentMethod, Sale, SaleId};

/// Command: CompleteSale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteSale {
    pub cart: Cart,
    pub payment_method: PaymentMethod,
    pub on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesLedgerCommand {
    CompleteSale(CompleteSale),
}

/// Event: SaleCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleCompleted {
    pub sale: Sale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SalesLedgerEvent {
    SaleCompleted(SaleCompleted),
}

impl Event for SalesLedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SalesLedgerEvent::SaleCompleted(_) => "sales.sale.completed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Aggregate: sales history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesLedger {
    sales: Vec<Sale>,
    #[serde(skip)]
    version: u64,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed sales, most recent first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn get(&self, sale_id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id() == sale_id)
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Identifier the next completed sale will receive.
    pub fn next_sale_id(&self) -> SaleId {
        SaleId::from_number(u32::try_from(self.sales.len() + 1).unwrap_or(u32::MAX))
    }

    pub fn revenue(&self) -> Money {
        self.sales.iter().map(Sale::total).sum()
    }

    /// Turn `cart` into a sale and return the new ledger together with it.
    ///
    /// Rejects an empty cart. `self` is never modified.
    pub fn complete(
        &self,
        cart: Cart,
        payment_method: PaymentMethod,
        on: NaiveDate,
    ) -> Result<(SalesLedger, Sale), DomainError> {
        let cmd = SalesLedgerCommand::CompleteSale(CompleteSale {
            cart,
            payment_method,
            on,
        });
        let (next, events) = execute(self, &cmd)?;
        let sale = events
            .into_iter()
            .map(|SalesLedgerEvent::SaleCompleted(e)| e.sale)
            .next()
            .ok_or_else(|| DomainError::invariant("completing a sale emitted no event"))?;
        Ok((next, sale))
    }
}

impl Aggregate for SalesLedger {
    type Command = SalesLedgerCommand;
    type Event = SalesLedgerEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SalesLedgerEvent::SaleCompleted(e) => {
                self.sales.insert(0, e.sale.clone());
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SalesLedgerCommand::CompleteSale(cmd) => self.handle_complete(cmd),
        }
    }
}

impl SalesLedger {
    fn handle_complete(&self, cmd: &CompleteSale) -> Result<Vec<SalesLedgerEvent>, DomainError> {
        if cmd.cart.is_empty() {
            return Err(DomainError::validation("Please add items to the sale"));
        }

        let sale = Sale::completed(
            self.next_sale_id(),
            cmd.on,
            cmd.cart.clone(),
            cmd.payment_method,
        );

        Ok(vec![SalesLedgerEvent::SaleCompleted(SaleCompleted { sale })])
    }
}
