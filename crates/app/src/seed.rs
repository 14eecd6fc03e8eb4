//! Sample data the shop starts with.

use chrono::NaiveDate;
use serde::Serialize;

use medishop_catalog::{AddMedicine, CatalogCommand, MedicineDraft};
use medishop_core::{DomainError, DomainResult, LineId, MedicineId, Money, StockItemId, execute};
use medishop_inventory::{AddStockItem, StockCommand};
use medishop_sales::{Cart, PaymentMethod};

use crate::controller::ShopState;

/// A medicine name with its usual shelf price, offered as a suggestion when
/// building a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceHint {
    pub name: &'static str,
    pub price: Money,
}

pub fn price_hints() -> Vec<PriceHint> {
    [
        ("Aspirin", 599),
        ("Amoxicillin", 1250),
        ("Ibuprofen", 850),
        ("Paracetamol", 499),
        ("Metformin", 1500),
    ]
    .into_iter()
    .map(|(name, cents)| PriceHint {
        name,
        price: Money::from_cents(cents),
    })
    .collect()
}

fn date(y: i32, m: u32, d: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::invariant(format!("invalid seed date {y}-{m}-{d}")))
}

/// Catalog, stock book and one completed sale, built through the same
/// commands the controller uses.
pub fn sample_state() -> DomainResult<ShopState> {
    let mut state = ShopState::default();

    let medicines = [
        (1, "Aspirin", "Acetylsalicylic Acid", "Bayer", 599, 150, date(2025, 12, 31)?, "Pain Relief"),
        (2, "Amoxicillin", "Amoxicillin", "GSK", 1250, 80, date(2025, 11, 15)?, "Antibiotics"),
    ];
    for (id, name, generic, manufacturer, cents, quantity, expiry, category) in medicines {
        let cmd = CatalogCommand::AddMedicine(AddMedicine {
            medicine_id: MedicineId::from_u128(id),
            draft: MedicineDraft {
                name: name.to_string(),
                generic_name: generic.to_string(),
                manufacturer: manufacturer.to_string(),
                price: Money::from_cents(cents),
                quantity,
                expiry_date: Some(expiry),
                category: category.to_string(),
            },
        });
        state.catalog = execute(&state.catalog, &cmd)?.0;
    }

    let stock = [
        (1, "Aspirin", 150, 50, 300, 100, date(2025, 10, 15)?),
        (2, "Amoxicillin", 15, 50, 200, 80, date(2025, 9, 20)?),
        (3, "Ibuprofen", 350, 100, 300, 150, date(2025, 10, 10)?),
    ];
    for (id, name, current, minimum, maximum, reorder, restocked) in stock {
        let cmd = StockCommand::AddStockItem(AddStockItem {
            item_id: StockItemId::from_u128(id),
            medicine_name: name.to_string(),
            current_stock: current,
            minimum_level: minimum,
            maximum_level: maximum,
            reorder_quantity: reorder,
            on: restocked,
        });
        state.stock = execute(&state.stock, &cmd)?.0;
    }

    let first_sale = Cart::new()
        .add_item(LineId::from_u128(1), "Aspirin", 2, Money::from_cents(599))?
        .add_item(LineId::from_u128(2), "Ibuprofen", 1, Money::from_cents(850))?;
    state.sales = state
        .sales
        .complete(first_sale, PaymentMethod::Cash, date(2025, 10, 28)?)?
        .0;

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medishop_inventory::StockStatus;

    #[test]
    fn sample_state_matches_the_demo_shop() {
        let state = sample_state().unwrap();

        assert_eq!(state.catalog.len(), 2);
        let statuses: Vec<_> = state.stock.items().iter().map(|i| i.status()).collect();
        assert_eq!(
            statuses,
            vec![StockStatus::Optimal, StockStatus::Critical, StockStatus::Overstocked]
        );

        let sale = &state.sales.sales()[0];
        assert_eq!(sale.id().to_string(), "S001");
        assert_eq!(sale.total(), Money::from_cents(2253));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn price_hints_cover_five_medicines() {
        let hints = price_hints();
        assert_eq!(hints.len(), 5);
        assert_eq!(hints[1].price.to_string(), "12.50");
    }
}
