//! Hardcoded sample data shown on the dashboard.

use serde::Serialize;

use medishop_core::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: &'static str,
    pub sales: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub name: &'static str,
    /// Percentage of sales; the series sums to 100.
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopMedicine {
    pub name: &'static str,
    pub sales: u32,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendPoint {
    pub day: &'static str,
    pub transactions: u32,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

/// Every sample series in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleAnalytics {
    pub kpis: Vec<KpiCard>,
    pub sales_trend: Vec<MonthlyTrendPoint>,
    pub categories: Vec<CategoryShare>,
    pub top_medicines: Vec<TopMedicine>,
    pub daily_trend: Vec<DailyTrendPoint>,
}

impl SampleAnalytics {
    pub fn load() -> Self {
        Self {
            kpis: kpis(),
            sales_trend: sales_trend(),
            categories: categories(),
            top_medicines: top_medicines(),
            daily_trend: daily_trend(),
        }
    }
}

fn kpis() -> Vec<KpiCard> {
    vec![
        KpiCard { title: "Total Revenue", value: "$24,580", note: "+12.5% from last month" },
        KpiCard { title: "Total Sales", value: "1,245", note: "+8.2% from last month" },
        KpiCard { title: "Total Inventory", value: "3,847", note: "12 items low on stock" },
        KpiCard { title: "Avg Order Value", value: "$19.73", note: "+3.1% from last month" },
    ]
}

fn sales_trend() -> Vec<MonthlyTrendPoint> {
    [
        ("Jan", 4000, 2400),
        ("Feb", 3000, 1398),
        ("Mar", 2000, 9800),
        ("Apr", 2780, 3908),
        ("May", 1890, 4800),
        ("Jun", 2390, 3800),
    ]
    .into_iter()
    .map(|(month, sales, revenue)| MonthlyTrendPoint { month, sales, revenue })
    .collect()
}

fn categories() -> Vec<CategoryShare> {
    [("Pain Relief", 35), ("Antibiotics", 25), ("Vitamins", 20), ("Others", 20)]
        .into_iter()
        .map(|(name, value)| CategoryShare { name, value })
        .collect()
}

fn top_medicines() -> Vec<TopMedicine> {
    [
        ("Aspirin", 450, 269_550),
        ("Amoxicillin", 320, 400_000),
        ("Ibuprofen", 280, 238_000),
        ("Paracetamol", 210, 104_790),
        ("Metformin", 150, 225_000),
    ]
    .into_iter()
    .map(|(name, sales, cents)| TopMedicine {
        name,
        sales,
        revenue: Money::from_cents(cents),
    })
    .collect()
}

fn daily_trend() -> Vec<DailyTrendPoint> {
    [
        ("Mon", 45, 1250),
        ("Tue", 52, 1420),
        ("Wed", 48, 1380),
        ("Thu", 61, 1680),
        ("Fri", 55, 1520),
        ("Sat", 67, 1890),
        ("Sun", 42, 1150),
    ]
    .into_iter()
    .map(|(day, transactions, amount)| DailyTrendPoint { day, transactions, amount })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_shares_sum_to_one_hundred() {
        let total: u32 = SampleAnalytics::load()
            .categories
            .iter()
            .map(|c| u32::from(c.value))
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn series_have_expected_lengths() {
        let sample = SampleAnalytics::load();
        assert_eq!(sample.kpis.len(), 4);
        assert_eq!(sample.sales_trend.len(), 6);
        assert_eq!(sample.top_medicines.len(), 5);
        assert_eq!(sample.daily_trend.len(), 7);
    }

    #[test]
    fn top_medicines_are_ranked_by_units() {
        let sample = SampleAnalytics::load();
        let units: Vec<u32> = sample.top_medicines.iter().map(|m| m.sales).collect();
        let mut sorted = units.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(units, sorted);
        assert_eq!(sample.top_medicines[3].revenue.to_string(), "1047.90");
    }
}
