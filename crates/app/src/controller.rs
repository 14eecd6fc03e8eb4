//! The single owner of every shop snapshot.
//!
//! Each operation computes a successor snapshot from the current one and
//! swaps it in only on success; a rejected operation leaves state untouched.

use serde::Serialize;

use medishop_analytics::{LiveKpis, MedicineSales, SampleAnalytics, top_medicines};
use medishop_auth::{Operator, Session};
use medishop_catalog::{
    AddMedicine, Catalog, CatalogCommand, Medicine, MedicineDraft, RemoveMedicine, UpdateMedicine,
};
use medishop_core::{Aggregate, DomainError, DomainResult, LineId, MedicineId, Money, StockItemId, execute};
use medishop_events::Event;
use medishop_inventory::{AddStockItem, AdjustStock, StockBook, StockCommand, StockItem, StockSummary};
use medishop_sales::{Cart, PaymentMethod, Sale, SaleId, SaleItem, SaleTotals, SalesLedger};

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::dashboard::Tab;
use crate::seed::{PriceHint, price_hints, sample_state};

/// Everything the shop knows, as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShopState {
    pub catalog: Catalog,
    pub stock: StockBook,
    pub sales: SalesLedger,
    pub cart: Cart,
}

/// One catalog row with its derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineView {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub stock_value: Option<Money>,
    pub low_quantity: bool,
    pub expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    #[serde(flatten)]
    pub item: StockItem,
    pub status_label: &'static str,
    pub fill_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockView {
    pub summary: StockSummary,
    pub items: Vec<StockRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesView {
    pub cart: Vec<SaleItem>,
    pub totals: SaleTotals,
    pub payment_method: PaymentMethod,
    pub history: Vec<Sale>,
    pub price_hints: Vec<PriceHint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub sample: SampleAnalytics,
    pub live: LiveKpis,
    pub top_medicines: Vec<MedicineSales>,
}

/// Number of best sellers shown in the live analytics table.
const TOP_MEDICINES_LIMIT: usize = 5;

pub struct ShopController {
    config: AppConfig,
    clock: Box<dyn Clock>,
    session: Session,
    tab: Tab,
    payment_method: PaymentMethod,
    state: ShopState,
}

impl core::fmt::Debug for ShopController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShopController")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("tab", &self.tab)
            .field("payment_method", &self.payment_method)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ShopController {
    pub fn new(config: AppConfig) -> DomainResult<Self> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Box<dyn Clock>) -> DomainResult<Self> {
        let state = if config.seed_sample_data {
            sample_state()?
        } else {
            ShopState::default()
        };
        tracing::info!(
            medicines = state.catalog.len(),
            stock_items = state.stock.len(),
            sales = state.sales.len(),
            "shop initialized"
        );

        Ok(Self {
            payment_method: config.default_payment_method,
            config,
            clock,
            session: Session::new(),
            tab: Tab::default(),
            state,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &ShopState {
        &self.state
    }

    // ── session & navigation ────────────────────────────────────────────────

    pub fn operator(&self) -> Option<&Operator> {
        self.session.operator()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn sign_in(&mut self, name: &str, email: &str) -> DomainResult<&Operator> {
        let session = self.session.sign_in(name, email).map_err(|e| {
            tracing::debug!(error = %e, "sign-in rejected");
            DomainError::from(e)
        })?;
        self.session = session;
        tracing::info!("operator signed in");
        self.session
            .operator()
            .ok_or_else(|| DomainError::invariant("session has no operator after sign-in"))
    }

    /// Clears the operator and returns to the overview. Shop data is kept.
    pub fn sign_out(&mut self) {
        self.session = self.session.sign_out();
        self.tab = Tab::default();
        tracing::info!("operator signed out");
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        tracing::debug!(tab = tab.label(), "tab selected");
        self.tab = tab;
    }

    // ── catalog ─────────────────────────────────────────────────────────────

    pub fn add_medicine(&mut self, draft: MedicineDraft) -> DomainResult<MedicineId> {
        let medicine_id = MedicineId::new();
        let cmd = CatalogCommand::AddMedicine(AddMedicine { medicine_id, draft });
        self.state.catalog = run(&self.state.catalog, &cmd)?;
        Ok(medicine_id)
    }

    pub fn update_medicine(&mut self, medicine_id: MedicineId, draft: MedicineDraft) -> DomainResult<()> {
        let cmd = CatalogCommand::UpdateMedicine(UpdateMedicine { medicine_id, draft });
        self.state.catalog = run(&self.state.catalog, &cmd)?;
        Ok(())
    }

    pub fn remove_medicine(&mut self, medicine_id: MedicineId) -> DomainResult<()> {
        let cmd = CatalogCommand::RemoveMedicine(RemoveMedicine { medicine_id });
        self.state.catalog = run(&self.state.catalog, &cmd)?;
        Ok(())
    }

    /// Catalog rows matching `term` (blank = all).
    pub fn medicines(&self, term: &str) -> Vec<MedicineView> {
        let today = self.clock.today();
        let threshold = self.config.low_quantity_threshold;
        self.state
            .catalog
            .search(term)
            .into_iter()
            .map(|m| MedicineView {
                medicine: m.clone(),
                stock_value: m.stock_value(),
                low_quantity: m.is_low_quantity(threshold),
                expired: m.is_expired(today),
            })
            .collect()
    }

    // ── stock ───────────────────────────────────────────────────────────────

    pub fn add_stock_item(
        &mut self,
        medicine_name: &str,
        current_stock: u32,
        minimum_level: u32,
        maximum_level: u32,
        reorder_quantity: u32,
    ) -> DomainResult<StockItemId> {
        let item_id = StockItemId::new();
        let cmd = StockCommand::AddStockItem(AddStockItem {
            item_id,
            medicine_name: medicine_name.to_string(),
            current_stock,
            minimum_level,
            maximum_level,
            reorder_quantity,
            on: self.clock.today(),
        });
        self.state.stock = run(&self.state.stock, &cmd)?;
        Ok(item_id)
    }

    /// Apply a signed adjustment and return the updated record.
    pub fn adjust_stock(&mut self, item_id: StockItemId, delta: i64) -> DomainResult<&StockItem> {
        let cmd = AdjustStock {
            item_id,
            delta,
            on: self.clock.today(),
        };
        self.apply_adjustment(cmd)
    }

    /// Add the item's reorder quantity.
    pub fn restock(&mut self, item_id: StockItemId) -> DomainResult<&StockItem> {
        let cmd = self.state.stock.restock_command(item_id, self.clock.today())?;
        self.apply_adjustment(cmd)
    }

    /// Remove one dispense step.
    pub fn dispense(&mut self, item_id: StockItemId) -> DomainResult<&StockItem> {
        let cmd = self.state.stock.dispense_command(item_id, self.clock.today())?;
        self.apply_adjustment(cmd)
    }

    fn apply_adjustment(&mut self, cmd: AdjustStock) -> DomainResult<&StockItem> {
        let item_id = cmd.item_id;
        self.state.stock = run(&self.state.stock, &StockCommand::AdjustStock(cmd))?;
        self.state.stock.get(item_id).ok_or_else(DomainError::not_found)
    }

    pub fn stock(&self) -> StockView {
        StockView {
            summary: self.state.stock.summary(),
            items: self
                .state
                .stock
                .items()
                .iter()
                .map(|item| StockRow {
                    item: item.clone(),
                    status_label: item.status().label(),
                    fill_percent: item.fill_percent(),
                })
                .collect(),
        }
    }

    // ── sales ───────────────────────────────────────────────────────────────

    pub fn add_to_cart(&mut self, medicine_name: &str, quantity: u32, unit_price: Money) -> DomainResult<LineId> {
        let line_id = LineId::new();
        let cart = self
            .state
            .cart
            .add_item(line_id, medicine_name, quantity, unit_price)
            .inspect_err(|e| tracing::debug!(error = %e, "cart line rejected"))?;
        self.state.cart = cart;
        tracing::info!(%line_id, quantity, unit_price = %unit_price, "cart line added");
        Ok(line_id)
    }

    pub fn remove_from_cart(&mut self, line_id: LineId) -> DomainResult<()> {
        self.state.cart = self.state.cart.remove_item(line_id)?;
        tracing::info!(%line_id, "cart line removed");
        Ok(())
    }

    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Turn the cart into a sale. On success the cart is emptied and the
    /// payment method returns to the configured default.
    pub fn complete_sale(&mut self) -> DomainResult<Sale> {
        let cart = self.state.cart.clone();
        let (sales, sale) = self
            .state
            .sales
            .complete(cart, self.payment_method, self.clock.today())
            .inspect_err(|e| tracing::debug!(error = %e, "sale rejected"))?;

        self.state.sales = sales;
        self.state.cart = Cart::new();
        self.payment_method = self.config.default_payment_method;
        tracing::info!(
            sale_id = %sale.id(),
            total = %sale.total(),
            payment_method = %sale.payment_method(),
            "sale completed"
        );
        Ok(sale)
    }

    pub fn sale(&self, sale_id: SaleId) -> Option<&Sale> {
        self.state.sales.get(sale_id)
    }

    pub fn sales(&self) -> SalesView {
        SalesView {
            cart: self.state.cart.items().to_vec(),
            totals: self.state.cart.totals(),
            payment_method: self.payment_method,
            history: self.state.sales.sales().to_vec(),
            price_hints: price_hints(),
        }
    }

    // ── analytics ───────────────────────────────────────────────────────────

    pub fn analytics(&self) -> AnalyticsView {
        AnalyticsView {
            sample: SampleAnalytics::load(),
            live: LiveKpis::compute(&self.state.sales, &self.state.stock),
            top_medicines: top_medicines(&self.state.sales, TOP_MEDICINES_LIMIT),
        }
    }
}

/// Execute `command` against `state`, logging every emitted event.
fn run<A>(state: &A, command: &A::Command) -> DomainResult<A>
where
    A: Aggregate<Error = DomainError> + Clone,
    A::Event: Event,
{
    match execute(state, command) {
        Ok((next, events)) => {
            for event in &events {
                tracing::info!(
                    event_type = event.event_type(),
                    event_version = event.version(),
                    revision = next.version(),
                    "event applied"
                );
            }
            Ok(next)
        }
        Err(e) => {
            tracing::debug!(error = %e, "command rejected");
            Err(e)
        }
    }
}
