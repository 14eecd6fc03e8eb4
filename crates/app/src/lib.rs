//! `medishop-app`
//!
//! **Responsibility:** own every snapshot of the shop for one session and
//! expose the operations a front end needs.
//!
//! - `config`: environment configuration
//! - `controller`: the single owner of catalog, stock, sales and cart
//! - `dashboard`: tab model
//! - `seed`: sample data the shop starts with
//! - `shell`: line-oriented command driver used by the `medishop` binary

pub mod clock;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod seed;
pub mod shell;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use controller::{AnalyticsView, MedicineView, SalesView, ShopController, ShopState, StockView};
pub use dashboard::Tab;
pub use shell::{ShellCommand, ShellError};
