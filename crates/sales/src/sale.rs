use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medishop_core::{DomainError, Money};

use crate::cart::{Cart, SaleItem, SaleTotals};

/// Sequential sale identifier, rendered `S001`, `S002`, ...
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct SaleId(u32);

impl SaleId {
    pub fn from_number(number: u32) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "S{:03}", self.0)
    }
}

impl From<SaleId> for String {
    fn from(value: SaleId) -> Self {
        value.to_string()
    }
}

impl FromStr for SaleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('S')
            .or_else(|| s.strip_prefix('s'))
            .ok_or_else(|| DomainError::invalid_id(format!("SaleId: missing 'S' prefix in {s:?}")))?;
        let number = digits
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("SaleId: {e}")))?;
        Ok(Self(number))
    }
}

/// How the customer paid.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Check,
    Online,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Check,
        PaymentMethod::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Check => "Check",
            PaymentMethod::Online => "Online",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "payment method must be one of: cash, card, check, online (got {s:?})"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Completed,
}

/// A finalized transaction. Immutable: there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    date: NaiveDate,
    items: Vec<SaleItem>,
    subtotal: Money,
    tax: Money,
    total: Money,
    payment_method: PaymentMethod,
    status: SaleStatus,
}

impl Sale {
    pub(crate) fn completed(
        id: SaleId,
        date: NaiveDate,
        cart: Cart,
        payment_method: PaymentMethod,
    ) -> Self {
        let (items, SaleTotals { subtotal, tax, total }) = cart.into_parts();
        Self {
            id,
            date,
            items,
            subtotal,
            tax,
            total,
            payment_method,
            status: SaleStatus::Completed,
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    /// Units across every line.
    pub fn units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_id_is_zero_padded() {
        assert_eq!(SaleId::from_number(1).to_string(), "S001");
        assert_eq!(SaleId::from_number(42).to_string(), "S042");
        assert_eq!(SaleId::from_number(1234).to_string(), "S1234");
    }

    #[test]
    fn sale_id_parses_its_display_form() {
        assert_eq!("S007".parse::<SaleId>().unwrap(), SaleId::from_number(7));
        assert!(matches!("007".parse::<SaleId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("Sx".parse::<SaleId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn sale_id_serializes_as_string() {
        let json = serde_json::to_value(SaleId::from_number(3)).unwrap();
        assert_eq!(json, serde_json::json!("S003"));
    }

    #[test]
    fn payment_method_parses_case_insensitively() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(" ONLINE ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Online);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }
}
