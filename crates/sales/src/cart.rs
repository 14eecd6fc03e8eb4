use serde::Serialize;

use medishop_core::{DomainError, DomainResult, Entity, LineId, Money, ValueObject};

/// Sales tax rate in basis points (10%).
pub const TAX_RATE_BPS: u32 = 1_000;

/// One line of a cart or sale. `total` is always `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    id: LineId,
    medicine_name: String,
    quantity: u32,
    unit_price: Money,
    total: Money,
}

impl SaleItem {
    fn new(id: LineId, medicine_name: String, quantity: u32, unit_price: Money) -> DomainResult<Self> {
        let total = unit_price.checked_times(quantity).ok_or_else(too_large)?;
        Ok(Self {
            id,
            medicine_name,
            quantity,
            unit_price,
            total,
        })
    }

    pub fn id_typed(&self) -> LineId {
        self.id
    }

    pub fn medicine_name(&self) -> &str {
        &self.medicine_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

impl Entity for SaleItem {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Invoice figures for a set of lines.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaleTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl ValueObject for SaleTotals {}

impl SaleTotals {
    /// `subtotal = Σ line totals`, `tax = subtotal × 10%` (half up), `total = subtotal + tax`.
    ///
    /// Rejects lines whose figures do not fit in `Money`.
    pub fn of(items: &[SaleItem]) -> DomainResult<Self> {
        let subtotal = Money::checked_sum(items.iter().map(SaleItem::total)).ok_or_else(too_large)?;
        let tax = subtotal.basis_points(TAX_RATE_BPS);
        let total = subtotal.checked_add(tax).ok_or_else(too_large)?;
        Ok(Self { subtotal, tax, total })
    }
}

fn too_large() -> DomainError {
    DomainError::validation("Amount is too large")
}

/// The in-progress, uncommitted list of lines.
///
/// Transitions return a new cart; a rejected transition leaves the original
/// untouched. Totals are computed whenever the lines change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<SaleItem>,
    totals: SaleTotals,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Append a line. Rejects a blank name, zero quantity, zero price, or
    /// amounts too large to represent.
    pub fn add_item(
        &self,
        line_id: LineId,
        medicine_name: &str,
        quantity: u32,
        unit_price: Money,
    ) -> DomainResult<Cart> {
        let medicine_name = medicine_name.trim();
        if medicine_name.is_empty() || quantity == 0 || unit_price.is_zero() {
            return Err(DomainError::validation("Please fill in all fields correctly"));
        }
        if self.items.iter().any(|i| i.id == line_id) {
            return Err(DomainError::conflict("line already in cart"));
        }

        let mut items = self.items.clone();
        items.push(SaleItem::new(
            line_id,
            medicine_name.to_string(),
            quantity,
            unit_price,
        )?);
        Cart::with_items(items)
    }

    /// Drop the line with `line_id`. Unknown ids leave the cart as it is.
    pub fn remove_item(&self, line_id: LineId) -> DomainResult<Cart> {
        Cart::with_items(
            self.items
                .iter()
                .filter(|i| i.id != line_id)
                .cloned()
                .collect(),
        )
    }

    /// Live invoice summary for the current lines.
    pub fn totals(&self) -> SaleTotals {
        self.totals
    }

    fn with_items(items: Vec<SaleItem>) -> DomainResult<Cart> {
        let totals = SaleTotals::of(&items)?;
        Ok(Cart { items, totals })
    }

    pub(crate) fn into_parts(self) -> (Vec<SaleItem>, SaleTotals) {
        (self.items, self.totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn sample_cart() -> Cart {
        Cart::new()
            .add_item(LineId::from_u128(1), "Aspirin", 2, price("5.99"))
            .unwrap()
            .add_item(LineId::from_u128(2), "Ibuprofen", 1, price("8.5"))
            .unwrap()
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        let cart = sample_cart();
        assert_eq!(cart.items()[0].total(), price("11.98"));
        assert_eq!(cart.items()[1].total(), price("8.50"));
    }

    #[test]
    fn invoice_example_rounds_tax_to_the_cent() {
        let totals = sample_cart().totals();
        assert_eq!(totals.subtotal, price("20.48"));
        assert_eq!(totals.tax, price("2.05"));
        assert_eq!(totals.total, price("22.53"));
    }

    #[test]
    fn zero_quantity_or_price_is_rejected_and_cart_unchanged() {
        let cart = sample_cart();

        let zero_qty = cart.add_item(LineId::from_u128(3), "Aspirin", 0, price("5.99"));
        let zero_price = cart.add_item(LineId::from_u128(3), "Aspirin", 1, Money::ZERO);
        let blank_name = cart.add_item(LineId::from_u128(3), "   ", 1, price("1"));

        for result in [zero_qty, zero_price, blank_name] {
            assert_eq!(
                result.unwrap_err(),
                DomainError::validation("Please fill in all fields correctly")
            );
        }
        assert_eq!(cart, sample_cart());
    }

    #[test]
    fn duplicate_line_id_is_a_conflict() {
        let err = sample_cart()
            .add_item(LineId::from_u128(1), "Aspirin", 1, price("1"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn remove_item_drops_only_that_line() {
        let cart = sample_cart().remove_item(LineId::from_u128(1)).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].medicine_name(), "Ibuprofen");
        assert_eq!(cart.totals().total, price("9.35"));

        let same = cart.remove_item(LineId::from_u128(42)).unwrap();
        assert_eq!(same, cart);
    }

    #[test]
    fn overflowing_amounts_are_rejected_and_cart_unchanged() {
        let half = Money::from_cents(u64::MAX / 2 + 1);
        let cart = sample_cart();

        let line = cart.add_item(LineId::from_u128(3), "Bulk", 2, half);
        assert_eq!(line.unwrap_err(), DomainError::validation("Amount is too large"));

        // Each line fits on its own; the subtotal does not.
        let big = Cart::new()
            .add_item(LineId::from_u128(1), "Bulk", 1, half)
            .unwrap();
        let sum = big.add_item(LineId::from_u128(2), "Bulk", 1, half);
        assert_eq!(sum.unwrap_err(), DomainError::validation("Amount is too large"));

        // Subtotal fits but adding tax does not.
        let near_max = Money::from_cents(u64::MAX - 10);
        let tax = Cart::new().add_item(LineId::from_u128(1), "Bulk", 1, near_max);
        assert!(tax.is_err());

        assert_eq!(cart, sample_cart());
    }

    #[test]
    fn totals_always_add_up() {
        let totals = sample_cart().totals();
        assert_eq!(totals.subtotal.checked_add(totals.tax), Some(totals.total));
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        assert_eq!(Cart::new().totals(), SaleTotals::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: total == round2(subtotal × 1.10), computed independently in cents.
        #[test]
        fn total_is_subtotal_plus_rounded_ten_percent(
            lines in prop::collection::vec((1u32..50, 1u64..100_000), 1..12)
        ) {
            let mut cart = Cart::new();
            for (n, (qty, cents)) in lines.iter().enumerate() {
                cart = cart
                    .add_item(LineId::from_u128(n as u128), "Item", *qty, Money::from_cents(*cents))
                    .unwrap();
            }

            let subtotal: u64 = lines.iter().map(|(q, c)| u64::from(*q) * c).sum();
            // round half up of subtotal × 110 / 100
            let expected_total = (subtotal * 110 + 50) / 100;

            let totals = cart.totals();
            prop_assert_eq!(totals.subtotal.cents(), subtotal);
            prop_assert_eq!(totals.total.cents(), expected_total);
        }
    }
}
