use chrono::NaiveDate;
use serde::Serialize;

use medishop_core::{Entity, StockItemId};

/// Stock status derived from current stock vs. the configured levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Optimal,
    Overstocked,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Optimal => "optimal",
            StockStatus::Overstocked => "overstocked",
        }
    }

    /// Human-facing label shown next to the item.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Critical => "Critical - Reorder Immediately",
            StockStatus::Low => "Low Stock",
            StockStatus::Optimal => "Optimal Level",
            StockStatus::Overstocked => "Overstocked",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a stock figure against its levels.
///
/// Rules are evaluated in order: critical, low, overstocked, optimal. The low
/// threshold is `minimum × 1.5`, compared exactly as `2 × stock < 3 × minimum`.
pub fn classify(current_stock: u32, minimum_level: u32, maximum_level: u32) -> StockStatus {
    let stock = u64::from(current_stock);
    let minimum = u64::from(minimum_level);

    if stock <= minimum {
        StockStatus::Critical
    } else if 2 * stock < 3 * minimum {
        StockStatus::Low
    } else if current_stock > maximum_level {
        StockStatus::Overstocked
    } else {
        StockStatus::Optimal
    }
}

/// One medicine's stock record.
///
/// Fields are private so `status` can only come from [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    id: StockItemId,
    medicine_name: String,
    current_stock: u32,
    minimum_level: u32,
    maximum_level: u32,
    reorder_quantity: u32,
    last_restocked: NaiveDate,
    status: StockStatus,
}

impl StockItem {
    pub fn new(
        id: StockItemId,
        medicine_name: impl Into<String>,
        current_stock: u32,
        minimum_level: u32,
        maximum_level: u32,
        reorder_quantity: u32,
        last_restocked: NaiveDate,
    ) -> Self {
        Self {
            id,
            medicine_name: medicine_name.into(),
            current_stock,
            minimum_level,
            maximum_level,
            reorder_quantity,
            last_restocked,
            status: classify(current_stock, minimum_level, maximum_level),
        }
    }

    pub fn id_typed(&self) -> StockItemId {
        self.id
    }

    pub fn medicine_name(&self) -> &str {
        &self.medicine_name
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn minimum_level(&self) -> u32 {
        self.minimum_level
    }

    pub fn maximum_level(&self) -> u32 {
        self.maximum_level
    }

    pub fn reorder_quantity(&self) -> u32 {
        self.reorder_quantity
    }

    pub fn last_restocked(&self) -> NaiveDate {
        self.last_restocked
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Stock as a percentage of the maximum level, capped at 100.
    pub fn fill_percent(&self) -> u8 {
        if self.maximum_level == 0 {
            return 100;
        }
        let pct = u64::from(self.current_stock) * 100 / u64::from(self.maximum_level);
        pct.min(100) as u8
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Apply a signed adjustment to a stock record.
///
/// Never fails: the result is clamped to `0..=u32::MAX`. `last_restocked`
/// becomes `today` and the status is recomputed.
pub fn adjust(item: &StockItem, delta: i64, today: NaiveDate) -> StockItem {
    let raw = i64::from(item.current_stock).saturating_add(delta);
    let current_stock = raw.clamp(0, i64::from(u32::MAX)) as u32;

    StockItem {
        current_stock,
        last_restocked: today,
        status: classify(current_stock, item.minimum_level, item.maximum_level),
        ..item.clone()
    }
}
