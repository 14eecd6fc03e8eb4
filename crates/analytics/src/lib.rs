//! Read-only analytics for the overview and analytics tabs.
//!
//! Two sources feed the view: fixed sample series that stand in for
//! historical data, and figures computed from the current session.

pub mod live;
pub mod sample;

pub use live::{LiveKpis, MedicineSales, top_medicines};
pub use sample::{
    CategoryShare, DailyTrendPoint, KpiCard, MonthlyTrendPoint, SampleAnalytics, TopMedicine,
};
