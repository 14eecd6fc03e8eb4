//! Line-oriented command driver.
//!
//! One command per line in, one JSON document per command out. Everything
//! except `login`, `help` and `quit` needs a signed-in operator.

use core::str::FromStr;

use chrono::NaiveDate;
use serde_json::{Value, json};
use thiserror::Error;

use medishop_catalog::MedicineDraft;
use medishop_core::{DomainError, LineId, MedicineId, Money, MoneyError, StockItemId};
use medishop_sales::{PaymentMethod, SaleId};

use crate::controller::ShopController;
use crate::dashboard::Tab;

pub const HELP: &[&str] = &[
    "login <name> <email>",
    "logout",
    "tab <overview|medicines|stock|sales|analytics>",
    "medicines [search term]",
    "medicine add <name>|<generic>|<manufacturer>|<price>|<qty>|<expiry or ->|<category>",
    "medicine update <medicine-id> <name>|<generic>|<manufacturer>|<price>|<qty>|<expiry or ->|<category>",
    "medicine remove <medicine-id>",
    "stock",
    "stock add <name>|<current>|<min>|<max>|<reorder>",
    "adjust <stock-id> <delta>",
    "restock <stock-id>",
    "dispense <stock-id>",
    "cart add <qty> <price> <name...>",
    "cart remove <line-id>",
    "cart show",
    "pay <cash|card|check|online>",
    "checkout",
    "sales",
    "sale <sale-id>",
    "analytics",
    "help",
    "quit",
];

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("Please sign in first")]
    SignedOut,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ShellError {
    pub fn code(&self) -> &'static str {
        match self {
            ShellError::Usage(_) => "usage",
            ShellError::UnknownCommand(_) => "unknown_command",
            ShellError::SignedOut => "unauthorized",
            ShellError::Domain(e) => e.code(),
            ShellError::Money(_) => "invalid_money",
            ShellError::Encode(_) => "encode_error",
        }
    }

    /// Text shown to the operator. Domain rejections carry their own wording.
    pub fn message(&self) -> String {
        match self {
            ShellError::Domain(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }

    /// `{"error": <code>, "message": <text>}`
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code(),
            "message": self.message(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItemFields {
    pub medicine_name: String,
    pub current_stock: u32,
    pub minimum_level: u32,
    pub maximum_level: u32,
    pub reorder_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { name: String, email: String },
    Logout,
    Tab(Tab),
    Medicines { term: String },
    AddMedicine(MedicineDraft),
    UpdateMedicine { medicine_id: MedicineId, draft: MedicineDraft },
    RemoveMedicine(MedicineId),
    Stock,
    AddStockItem(StockItemFields),
    Adjust { item_id: StockItemId, delta: i64 },
    Restock(StockItemId),
    Dispense(StockItemId),
    CartAdd { quantity: u32, unit_price: Money, medicine_name: String },
    CartRemove(LineId),
    CartShow,
    Pay(PaymentMethod),
    Checkout,
    Sales,
    Sale(SaleId),
    Analytics,
    Help,
    Quit,
}

impl ShellCommand {
    fn needs_operator(&self) -> bool {
        !matches!(self, ShellCommand::Login { .. } | ShellCommand::Help | ShellCommand::Quit)
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}

fn number<T: FromStr>(s: &str, usage: &'static str) -> Result<T, ShellError> {
    s.trim().parse::<T>().map_err(|_| ShellError::Usage(usage))
}

const MEDICINE_FIELDS: &str = "<name>|<generic>|<manufacturer>|<price>|<qty>|<expiry or ->|<category>";

fn medicine_draft(fields: &str) -> Result<MedicineDraft, ShellError> {
    let parts: Vec<&str> = fields.split('|').map(str::trim).collect();
    let [name, generic, manufacturer, price, quantity, expiry, category] = parts[..] else {
        return Err(ShellError::Usage(MEDICINE_FIELDS));
    };

    let expiry_date = match expiry {
        "" | "-" => None,
        s => Some(s.parse::<NaiveDate>().map_err(|_| ShellError::Usage("expiry must be YYYY-MM-DD"))?),
    };

    Ok(MedicineDraft {
        name: name.to_string(),
        generic_name: generic.to_string(),
        manufacturer: manufacturer.to_string(),
        price: price.parse::<Money>()?,
        quantity: number(quantity, MEDICINE_FIELDS)?,
        expiry_date,
        category: category.to_string(),
    })
}

fn stock_fields(fields: &str) -> Result<StockItemFields, ShellError> {
    const USAGE: &str = "stock add <name>|<current>|<min>|<max>|<reorder>";
    let parts: Vec<&str> = fields.split('|').map(str::trim).collect();
    let [name, current, minimum, maximum, reorder] = parts[..] else {
        return Err(ShellError::Usage(USAGE));
    };
    Ok(StockItemFields {
        medicine_name: name.to_string(),
        current_stock: number(current, USAGE)?,
        minimum_level: number(minimum, USAGE)?,
        maximum_level: number(maximum, USAGE)?,
        reorder_quantity: number(reorder, USAGE)?,
    })
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line);

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "login" => {
                let (name, email) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or(ShellError::Usage("login <name> <email>"))?;
                ShellCommand::Login {
                    name: name.trim().to_string(),
                    email: email.to_string(),
                }
            }
            "logout" => ShellCommand::Logout,
            "tab" => ShellCommand::Tab(rest.parse()?),
            "medicines" => ShellCommand::Medicines { term: rest.to_string() },
            "medicine" => {
                let (sub, args) = split_word(rest);
                match sub {
                    "add" => ShellCommand::AddMedicine(medicine_draft(args)?),
                    "update" => {
                        let (id, fields) = split_word(args);
                        ShellCommand::UpdateMedicine {
                            medicine_id: id.parse()?,
                            draft: medicine_draft(fields)?,
                        }
                    }
                    "remove" => ShellCommand::RemoveMedicine(args.parse()?),
                    _ => return Err(ShellError::Usage("medicine <add|update|remove> ...")),
                }
            }
            "stock" => match split_word(rest) {
                ("", _) => ShellCommand::Stock,
                ("add", fields) => ShellCommand::AddStockItem(stock_fields(fields)?),
                _ => return Err(ShellError::Usage("stock [add <fields>]")),
            },
            "adjust" => {
                let (id, delta) = split_word(rest);
                ShellCommand::Adjust {
                    item_id: id.parse()?,
                    delta: number(delta, "adjust <stock-id> <delta>")?,
                }
            }
            "restock" => ShellCommand::Restock(rest.parse()?),
            "dispense" => ShellCommand::Dispense(rest.parse()?),
            "cart" => {
                let (sub, args) = split_word(rest);
                match sub {
                    "add" => {
                        const USAGE: &str = "cart add <qty> <price> <name...>";
                        let (quantity, args) = split_word(args);
                        let (price, name) = split_word(args);
                        if name.is_empty() {
                            return Err(ShellError::Usage(USAGE));
                        }
                        ShellCommand::CartAdd {
                            quantity: number(quantity, USAGE)?,
                            unit_price: price.parse()?,
                            medicine_name: name.to_string(),
                        }
                    }
                    "remove" => ShellCommand::CartRemove(args.parse()?),
                    "show" | "" => ShellCommand::CartShow,
                    _ => return Err(ShellError::Usage("cart <add|remove|show>")),
                }
            }
            "pay" => ShellCommand::Pay(rest.parse()?),
            "checkout" => ShellCommand::Checkout,
            "sales" => ShellCommand::Sales,
            "sale" => ShellCommand::Sale(rest.parse()?),
            "analytics" => ShellCommand::Analytics,
            "help" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(cmd)
    }
}

/// Run `cmd` against the controller and render the result.
pub fn execute(shop: &mut ShopController, cmd: ShellCommand) -> Result<Value, ShellError> {
    if cmd.needs_operator() && !shop.is_signed_in() {
        return Err(ShellError::SignedOut);
    }

    let out = match cmd {
        ShellCommand::Login { name, email } => json!({ "operator": shop.sign_in(&name, &email)? }),
        ShellCommand::Logout => {
            shop.sign_out();
            json!({ "signedIn": false, "tab": shop.tab() })
        }
        ShellCommand::Tab(tab) => {
            shop.select_tab(tab);
            json!({ "tab": tab, "view": tab_view(shop, tab)? })
        }
        ShellCommand::Medicines { term } => serde_json::to_value(shop.medicines(&term))?,
        ShellCommand::AddMedicine(draft) => json!({ "medicineId": shop.add_medicine(draft)? }),
        ShellCommand::UpdateMedicine { medicine_id, draft } => {
            shop.update_medicine(medicine_id, draft)?;
            json!({ "medicineId": medicine_id })
        }
        ShellCommand::RemoveMedicine(medicine_id) => {
            shop.remove_medicine(medicine_id)?;
            json!({ "removed": medicine_id })
        }
        ShellCommand::Stock => serde_json::to_value(shop.stock())?,
        ShellCommand::AddStockItem(f) => {
            let item_id = shop.add_stock_item(
                &f.medicine_name,
                f.current_stock,
                f.minimum_level,
                f.maximum_level,
                f.reorder_quantity,
            )?;
            json!({ "stockItemId": item_id })
        }
        ShellCommand::Adjust { item_id, delta } => serde_json::to_value(shop.adjust_stock(item_id, delta)?)?,
        ShellCommand::Restock(item_id) => serde_json::to_value(shop.restock(item_id)?)?,
        ShellCommand::Dispense(item_id) => serde_json::to_value(shop.dispense(item_id)?)?,
        ShellCommand::CartAdd {
            quantity,
            unit_price,
            medicine_name,
        } => {
            let line_id = shop.add_to_cart(&medicine_name, quantity, unit_price)?;
            json!({ "lineId": line_id, "totals": shop.cart().totals() })
        }
        ShellCommand::CartRemove(line_id) => {
            shop.remove_from_cart(line_id)?;
            cart_json(shop)
        }
        ShellCommand::CartShow => cart_json(shop),
        ShellCommand::Pay(method) => {
            shop.set_payment_method(method);
            json!({ "paymentMethod": method })
        }
        ShellCommand::Checkout => serde_json::to_value(shop.complete_sale()?)?,
        ShellCommand::Sales => serde_json::to_value(shop.sales())?,
        ShellCommand::Sale(sale_id) => serde_json::to_value(shop.sale(sale_id).ok_or_else(DomainError::not_found)?)?,
        ShellCommand::Analytics => serde_json::to_value(shop.analytics())?,
        ShellCommand::Help => json!({ "commands": HELP }),
        ShellCommand::Quit => json!({ "bye": true }),
    };
    Ok(out)
}

fn cart_json(shop: &ShopController) -> Value {
    json!({
        "items": shop.cart().items(),
        "totals": shop.cart().totals(),
        "paymentMethod": shop.payment_method(),
    })
}

fn tab_view(shop: &ShopController, tab: Tab) -> Result<Value, serde_json::Error> {
    match tab {
        t if t.shows_analytics() => serde_json::to_value(shop.analytics()),
        Tab::Medicines => serde_json::to_value(shop.medicines("")),
        Tab::Stock => serde_json::to_value(shop.stock()),
        _ => serde_json::to_value(shop.sales()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::AppConfig;

    fn shop() -> ShopController {
        let today = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let mut shop = ShopController::with_clock(AppConfig::default(), Box::new(FixedClock(today))).unwrap();
        shop.sign_in("Dana Reyes", "dana@example.com").unwrap();
        shop
    }

    fn run(shop: &mut ShopController, line: &str) -> Result<Value, ShellError> {
        execute(shop, line.parse()?)
    }

    #[test]
    fn parses_login_with_multi_word_name() {
        let cmd: ShellCommand = "login Dana Reyes dana@example.com".parse().unwrap();
        assert_eq!(
            cmd,
            ShellCommand::Login {
                name: "Dana Reyes".to_string(),
                email: "dana@example.com".to_string()
            }
        );
    }

    #[test]
    fn parses_cart_add() {
        let cmd: ShellCommand = "cart add 2 5.99 Vitamin D".parse().unwrap();
        assert_eq!(
            cmd,
            ShellCommand::CartAdd {
                quantity: 2,
                unit_price: Money::from_cents(599),
                medicine_name: "Vitamin D".to_string()
            }
        );
    }

    #[test]
    fn parses_medicine_add() {
        let cmd: ShellCommand = "medicine add Zinc | Zinc Gluconate | Nature | 3.25 | 40 | - | Vitamins"
            .parse()
            .unwrap();
        let ShellCommand::AddMedicine(draft) = cmd else {
            panic!("expected AddMedicine");
        };
        assert_eq!(draft.generic_name, "Zinc Gluconate");
        assert_eq!(draft.price, Money::from_cents(325));
        assert_eq!(draft.expiry_date, None);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!("fly".parse::<ShellCommand>(), Err(ShellError::UnknownCommand(_))));
        assert!(matches!("cart add two 1.00 Aspirin".parse::<ShellCommand>(), Err(ShellError::Usage(_))));
        assert!(matches!("cart add 1 abc Aspirin".parse::<ShellCommand>(), Err(ShellError::Money(_))));
        assert!(matches!("restock 42".parse::<ShellCommand>(), Err(ShellError::Domain(_))));
        assert!(matches!("medicine add a|b|c".parse::<ShellCommand>(), Err(ShellError::Usage(_))));
    }

    #[test]
    fn commands_need_an_operator() {
        let mut shop = shop();
        shop.sign_out();
        let err = run(&mut shop, "stock").unwrap_err();
        assert_eq!(err.code(), "unauthorized");
        assert!(run(&mut shop, "help").is_ok());
    }

    #[test]
    fn error_json_has_code_and_message() {
        let mut shop = shop();
        let err = run(&mut shop, "checkout").unwrap_err();
        assert_eq!(
            err.to_json(),
            json!({ "error": "validation_error", "message": "Please add items to the sale" })
        );
    }

    #[test]
    fn cart_and_checkout() {
        let mut shop = shop();
        let out = run(&mut shop, "cart add 2 5.99 Aspirin").unwrap();
        assert_eq!(out["totals"]["total"], json!(1318));

        run(&mut shop, "pay card").unwrap();
        let sale = run(&mut shop, "checkout").unwrap();
        assert_eq!(sale["id"], json!("S002"));
        assert_eq!(sale["paymentMethod"], json!("Card"));

        let cart = run(&mut shop, "cart show").unwrap();
        assert_eq!(cart["items"], json!([]));
        assert_eq!(cart["paymentMethod"], json!("Cash"));
    }

    #[test]
    fn sale_looks_up_history_by_id() {
        let mut shop = shop();
        let sale = run(&mut shop, "sale S001").unwrap();
        assert_eq!(sale["total"], json!(2253));
        assert_eq!(sale["items"].as_array().unwrap().len(), 2);

        assert_eq!(run(&mut shop, "sale S009").unwrap_err().code(), "not_found");
        assert_eq!(run(&mut shop, "sale 12").unwrap_err().code(), "invalid_id");
    }

    #[test]
    fn oversized_line_is_rejected_with_bare_message() {
        let mut shop = shop();
        let err = run(&mut shop, "cart add 2 92233720368547758.08 X").unwrap_err();
        assert_eq!(err.to_json()["error"], json!("validation_error"));
        assert_eq!(err.message(), "Amount is too large");
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn dispense_reports_the_new_record() {
        let mut shop = shop();
        let id = StockItemId::from_u128(1);
        let out = run(&mut shop, &format!("dispense {id}")).unwrap();
        assert_eq!(out["currentStock"], json!(140));
        assert_eq!(out["status"], json!("optimal"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: arbitrary input lines never panic and a failed
            /// command leaves the shop exactly as it was.
            #[test]
            fn failed_lines_do_not_touch_state(line in "[a-z]{0,9}( [-a-z0-9.|]{0,12}){0,4}") {
                let mut shop = shop();
                let before = shop.state().clone();
                if run(&mut shop, &line).is_err() {
                    prop_assert_eq!(shop.state(), &before);
                }
            }
        }
    }

    #[test]
    fn tab_renders_its_view() {
        let mut shop = shop();
        let out = run(&mut shop, "tab stock").unwrap();
        assert_eq!(out["tab"], json!("stock"));
        assert_eq!(out["view"]["summary"]["criticalItems"], json!(1));
        assert_eq!(shop.tab(), Tab::Stock);
    }
}
