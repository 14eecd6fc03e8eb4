use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medishop_core::{DomainError, DomainResult, Entity, MedicineId, Money};

/// Quantity below which a medicine is flagged as running out.
pub const LOW_QUANTITY_THRESHOLD: u32 = 20;

/// Form payload for adding or editing a medicine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub price: Money,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
}

impl MedicineDraft {
    /// Check required fields and return a trimmed copy.
    pub fn validated(&self) -> DomainResult<MedicineDraft> {
        let required = [&self.name, &self.generic_name, &self.manufacturer];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(DomainError::validation("Please fill in all required fields"));
        }
        if self.price.checked_times(self.quantity).is_none() {
            return Err(DomainError::validation("Amount is too large"));
        }

        Ok(MedicineDraft {
            name: self.name.trim().to_string(),
            generic_name: self.generic_name.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            category: self.category.trim().to_string(),
            ..self.clone()
        })
    }
}

/// A medicine in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub price: Money,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
}

impl Medicine {
    pub fn from_draft(id: MedicineId, draft: MedicineDraft) -> Self {
        Self {
            id,
            name: draft.name,
            generic_name: draft.generic_name,
            manufacturer: draft.manufacturer,
            price: draft.price,
            quantity: draft.quantity,
            expiry_date: draft.expiry_date,
            category: draft.category,
        }
    }

    /// The editable fields, for pre-filling an edit form.
    pub fn to_draft(&self) -> MedicineDraft {
        MedicineDraft {
            name: self.name.clone(),
            generic_name: self.generic_name.clone(),
            manufacturer: self.manufacturer.clone(),
            price: self.price,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            category: self.category.clone(),
        }
    }

    /// Value of the units on hand (`price × quantity`).
    ///
    /// Validated drafts always fit; `None` means the record was built by hand.
    pub fn stock_value(&self) -> Option<Money> {
        self.price.checked_times(self.quantity)
    }

    pub fn is_low_quantity(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }

    /// Case-insensitive match on name, generic name or manufacturer.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.generic_name, &self.manufacturer]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Entity for Medicine {
    type Id = MedicineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MedicineDraft {
        MedicineDraft {
            name: " Aspirin ".to_string(),
            generic_name: "Acetylsalicylic Acid".to_string(),
            manufacturer: "Bayer".to_string(),
            price: Money::from_cents(599),
            quantity: 150,
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 31),
            category: "Pain Relief".to_string(),
        }
    }

    #[test]
    fn validated_trims_text_fields() {
        let d = draft().validated().unwrap();
        assert_eq!(d.name, "Aspirin");
        assert_eq!(d.quantity, 150);
    }

    #[test]
    fn validated_requires_name_generic_and_manufacturer() {
        for blank in [
            MedicineDraft { name: String::new(), ..draft() },
            MedicineDraft { generic_name: "  ".to_string(), ..draft() },
            MedicineDraft { manufacturer: String::new(), ..draft() },
        ] {
            assert_eq!(
                blank.validated().unwrap_err(),
                DomainError::validation("Please fill in all required fields")
            );
        }
    }

    #[test]
    fn validated_rejects_unrepresentable_stock_value() {
        let d = MedicineDraft {
            price: Money::from_cents(u64::MAX / 2 + 1),
            quantity: 2,
            ..draft()
        };
        assert_eq!(d.validated().unwrap_err(), DomainError::validation("Amount is too large"));
    }

    #[test]
    fn category_is_optional() {
        let d = MedicineDraft { category: String::new(), ..draft() };
        assert!(d.validated().is_ok());
    }

    #[test]
    fn stock_value_and_low_quantity() {
        let m = Medicine::from_draft(MedicineId::from_u128(1), draft().validated().unwrap());
        assert_eq!(m.stock_value(), Some(Money::from_cents(89_850)));
        assert!(!m.is_low_quantity(LOW_QUANTITY_THRESHOLD));

        let scarce = Medicine { quantity: 19, ..m };
        assert!(scarce.is_low_quantity(LOW_QUANTITY_THRESHOLD));
    }

    #[test]
    fn expiry_is_strictly_before_today() {
        let m = Medicine::from_draft(MedicineId::from_u128(1), draft());
        let expiry = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(!m.is_expired(expiry));
        assert!(m.is_expired(expiry.succ_opt().unwrap()));

        let undated = Medicine { expiry_date: None, ..m };
        assert!(!undated.is_expired(expiry));
    }

    #[test]
    fn draft_roundtrips_through_medicine() {
        let d = draft().validated().unwrap();
        let m = Medicine::from_draft(MedicineId::from_u128(3), d.clone());
        assert_eq!(m.to_draft(), d);
    }
}
