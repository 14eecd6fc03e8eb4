//! Dashboard tab model.

use core::str::FromStr;

use serde::Serialize;

use medishop_core::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Medicines,
    Stock,
    Sales,
    Analytics,
}

impl Tab {
    /// Navigation order.
    pub const ALL: [Tab; 5] = [Tab::Overview, Tab::Medicines, Tab::Stock, Tab::Sales, Tab::Analytics];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Medicines => "Medicines",
            Tab::Stock => "Stock",
            Tab::Sales => "Sales",
            Tab::Analytics => "Analytics",
        }
    }

    /// Overview and Analytics render the same analytics view.
    pub fn shows_analytics(&self) -> bool {
        matches!(self, Tab::Overview | Tab::Analytics)
    }
}

impl FromStr for Tab {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "tab must be one of: overview, medicines, stock, sales, analytics (got {s:?})"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("stock".parse::<Tab>().unwrap(), Tab::Stock);
        assert_eq!("Analytics".parse::<Tab>().unwrap(), Tab::Analytics);
        assert!("settings".parse::<Tab>().is_err());
    }

    #[test]
    fn overview_is_default_and_shows_analytics() {
        assert_eq!(Tab::default(), Tab::Overview);
        assert!(Tab::Overview.shows_analytics());
        assert!(Tab::Analytics.shows_analytics());
        assert!(!Tab::Sales.shows_analytics());
    }
}
