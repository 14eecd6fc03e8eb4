//! Figures computed from the session's own sales and stock.

use std::collections::HashMap;

use serde::Serialize;

use medishop_core::Money;
use medishop_inventory::StockBook;
use medishop_sales::SalesLedger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveKpis {
    pub revenue: Money,
    pub sales_count: usize,
    /// Zero when there are no sales.
    pub average_order_value: Money,
    pub units_sold: u64,
    pub units_on_hand: u64,
    /// Stock items that are critical or low.
    pub items_needing_attention: usize,
}

impl LiveKpis {
    pub fn compute(ledger: &SalesLedger, stock: &StockBook) -> Self {
        let revenue = ledger.revenue();
        let sales_count = ledger.len();
        let average_order_value = match sales_count as u64 {
            0 => Money::ZERO,
            n => Money::from_cents((revenue.cents() + n / 2) / n),
        };

        let summary = stock.summary();
        Self {
            revenue,
            sales_count,
            average_order_value,
            units_sold: ledger.sales().iter().map(|s| s.units()).sum(),
            units_on_hand: summary.total_units,
            items_needing_attention: summary.critical_items + summary.low_items,
        }
    }
}

/// Per-medicine totals across completed sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicineSales {
    pub name: String,
    pub units: u64,
    pub revenue: Money,
}

/// Best sellers by units, ties broken by name. At most `limit` entries.
pub fn top_medicines(ledger: &SalesLedger, limit: usize) -> Vec<MedicineSales> {
    let mut by_name: HashMap<&str, (u64, Money)> = HashMap::new();
    for item in ledger.sales().iter().flat_map(|s| s.items()) {
        let entry = by_name.entry(item.medicine_name()).or_insert((0, Money::ZERO));
        entry.0 += u64::from(item.quantity());
        entry.1 = entry.1 + item.total();
    }

    let mut ranked: Vec<MedicineSales> = by_name
        .into_iter()
        .map(|(name, (units, revenue))| MedicineSales {
            name: name.to_string(),
            units,
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medishop_core::{LineId, StockItemId, execute};
    use medishop_inventory::{AddStockItem, StockCommand};
    use medishop_sales::{Cart, PaymentMethod};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 28).unwrap()
    }

    fn ledger_with(sales: &[&[(&str, u32, u64)]]) -> SalesLedger {
        let mut ledger = SalesLedger::new();
        let mut line = 0u128;
        for lines in sales {
            let mut cart = Cart::new();
            for (name, qty, cents) in lines.iter() {
                line += 1;
                cart = cart
                    .add_item(LineId::from_u128(line), name, *qty, Money::from_cents(*cents))
                    .unwrap();
            }
            ledger = ledger.complete(cart, PaymentMethod::Cash, day()).unwrap().0;
        }
        ledger
    }

    fn stock_with(levels: &[(u32, u32, u32)]) -> StockBook {
        let mut book = StockBook::new();
        for (n, (current, min, max)) in levels.iter().enumerate() {
            let cmd = StockCommand::AddStockItem(AddStockItem {
                item_id: StockItemId::from_u128(n as u128),
                medicine_name: format!("Item {n}"),
                current_stock: *current,
                minimum_level: *min,
                maximum_level: *max,
                reorder_quantity: 10,
                on: day(),
            });
            book = execute(&book, &cmd).unwrap().0;
        }
        book
    }

    #[test]
    fn empty_session_has_zero_average() {
        let kpis = LiveKpis::compute(&SalesLedger::new(), &StockBook::new());
        assert_eq!(kpis.sales_count, 0);
        assert_eq!(kpis.average_order_value, Money::ZERO);
        assert_eq!(kpis.units_on_hand, 0);
    }

    #[test]
    fn kpis_reflect_sales_and_stock() {
        let ledger = ledger_with(&[
            &[("Aspirin", 2, 599), ("Ibuprofen", 1, 850)],
            &[("Aspirin", 1, 599)],
        ]);
        let stock = stock_with(&[(15, 50, 200), (70, 50, 200), (150, 50, 300)]);

        let kpis = LiveKpis::compute(&ledger, &stock);

        // 22.53 + 6.59
        assert_eq!(kpis.revenue, Money::from_cents(2912));
        assert_eq!(kpis.sales_count, 2);
        assert_eq!(kpis.average_order_value, Money::from_cents(1456));
        assert_eq!(kpis.units_sold, 4);
        assert_eq!(kpis.units_on_hand, 235);
        assert_eq!(kpis.items_needing_attention, 2);
    }

    #[test]
    fn top_medicines_rank_by_units_then_name() {
        let ledger = ledger_with(&[
            &[("Ibuprofen", 1, 850), ("Aspirin", 2, 599)],
            &[("Aspirin", 1, 599), ("Metformin", 1, 1500)],
        ]);

        let top = top_medicines(&ledger, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Aspirin");
        assert_eq!(top[0].units, 3);
        assert_eq!(top[0].revenue, Money::from_cents(1797));
        assert_eq!(top[1].name, "Ibuprofen");
    }
}
