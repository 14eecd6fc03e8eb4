use chrono::NaiveDate;
use serde::Serialize;

use medishop_core::{Aggregate, DomainError, DomainResult, StockItemId, entity::position_of};
use medishop_events::Event;

use crate::stock::{StockItem, StockStatus, adjust};

/// Units removed by a single "dispense" action.
pub const DISPENSE_STEP: i64 = 10;

/// Command: AddStockItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStockItem {
    pub item_id: StockItemId,
    pub medicine_name: String,
    pub current_stock: u32,
    pub minimum_level: u32,
    pub maximum_level: u32,
    pub reorder_quantity: u32,
    pub on: NaiveDate,
}

/// Command: AdjustStock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustStock {
    pub item_id: StockItemId,
    pub delta: i64,
    pub on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCommand {
    AddStockItem(AddStockItem),
    AdjustStock(AdjustStock),
}

/// Event: StockItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemAdded {
    pub item_id: StockItemId,
    pub medicine_name: String,
    pub current_stock: u32,
    pub minimum_level: u32,
    pub maximum_level: u32,
    pub reorder_quantity: u32,
    pub on: NaiveDate,
}

/// Event: StockAdjusted.
///
/// `current_stock`/`status` describe the record after the adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjusted {
    pub item_id: StockItemId,
    pub delta: i64,
    pub previous_stock: u32,
    pub current_stock: u32,
    pub status: StockStatus,
    pub on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StockEvent {
    StockItemAdded(StockItemAdded),
    StockAdjusted(StockAdjusted),
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::StockItemAdded(_) => "inventory.stock.item_added",
            StockEvent::StockAdjusted(_) => "inventory.stock.adjusted",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Aggregate: the ordered collection of stock records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockBook {
    items: Vec<StockItem>,
    #[serde(skip)]
    version: u64,
}

impl StockBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn get(&self, item_id: StockItemId) -> Option<&StockItem> {
        self.items.iter().find(|i| i.id_typed() == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items currently in `status`.
    pub fn with_status(&self, status: StockStatus) -> impl Iterator<Item = &StockItem> {
        self.items.iter().filter(move |i| i.status() == status)
    }

    /// Restock `item_id` by its configured reorder quantity.
    pub fn restock_command(&self, item_id: StockItemId, on: NaiveDate) -> DomainResult<AdjustStock> {
        let item = self.get(item_id).ok_or_else(DomainError::not_found)?;
        Ok(AdjustStock {
            item_id,
            delta: i64::from(item.reorder_quantity()),
            on,
        })
    }

    /// Remove one dispense step from `item_id`.
    pub fn dispense_command(&self, item_id: StockItemId, on: NaiveDate) -> DomainResult<AdjustStock> {
        if self.get(item_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(AdjustStock {
            item_id,
            delta: -DISPENSE_STEP,
            on,
        })
    }

    pub fn summary(&self) -> StockSummary {
        StockSummary::of(self)
    }
}

impl Aggregate for StockBook {
    type Command = StockCommand;
    type Event = StockEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StockEvent::StockItemAdded(e) => {
                self.items.push(StockItem::new(
                    e.item_id,
                    e.medicine_name.clone(),
                    e.current_stock,
                    e.minimum_level,
                    e.maximum_level,
                    e.reorder_quantity,
                    e.on,
                ));
            }
            StockEvent::StockAdjusted(e) => {
                if let Some(pos) = position_of(&self.items, &e.item_id) {
                    self.items[pos] = adjust(&self.items[pos], e.delta, e.on);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StockCommand::AddStockItem(cmd) => self.handle_add(cmd),
            StockCommand::AdjustStock(cmd) => self.handle_adjust(cmd),
        }
    }
}

impl StockBook {
    fn handle_add(&self, cmd: &AddStockItem) -> Result<Vec<StockEvent>, DomainError> {
        if self.get(cmd.item_id).is_some() {
            return Err(DomainError::conflict("stock item already exists"));
        }
        if cmd.medicine_name.trim().is_empty() {
            return Err(DomainError::validation("medicine name cannot be empty"));
        }
        if cmd.minimum_level > cmd.maximum_level {
            return Err(DomainError::validation(
                "minimum level cannot exceed maximum level",
            ));
        }

        Ok(vec![StockEvent::StockItemAdded(StockItemAdded {
            item_id: cmd.item_id,
            medicine_name: cmd.medicine_name.trim().to_string(),
            current_stock: cmd.current_stock,
            minimum_level: cmd.minimum_level,
            maximum_level: cmd.maximum_level,
            reorder_quantity: cmd.reorder_quantity,
            on: cmd.on,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustStock) -> Result<Vec<StockEvent>, DomainError> {
        let item = self.get(cmd.item_id).ok_or_else(DomainError::not_found)?;
        let after = adjust(item, cmd.delta, cmd.on);

        Ok(vec![StockEvent::StockAdjusted(StockAdjusted {
            item_id: cmd.item_id,
            delta: cmd.delta,
            previous_stock: item.current_stock(),
            current_stock: after.current_stock(),
            status: after.status(),
            on: cmd.on,
        })])
    }
}

/// Headline figures for the stock view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_items: usize,
    pub total_units: u64,
    pub critical_items: usize,
    pub low_items: usize,
    /// Empty when nothing is critical or low.
    pub alerts: Vec<String>,
}

impl StockSummary {
    pub fn of(book: &StockBook) -> Self {
        let critical_items = book.with_status(StockStatus::Critical).count();
        let low_items = book.with_status(StockStatus::Low).count();

        let mut alerts = Vec::new();
        if critical_items > 0 {
            alerts.push(format!(
                "{critical_items} medicine(s) at critical level - immediate reorder required"
            ));
        }
        if low_items > 0 {
            alerts.push(format!("{low_items} medicine(s) at low stock level"));
        }

        Self {
            total_items: book.len(),
            total_units: book.items().iter().map(|i| u64::from(i.current_stock())).sum(),
            critical_items,
            low_items,
            alerts,
        }
    }
}
