//! Medicine catalog domain module.
//!
//! Medicine records, their add/update/remove transitions and search,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod medicine;

pub use catalog::{
    AddMedicine, Catalog, CatalogCommand, CatalogEvent, MedicineAdded, MedicineRemoved,
    MedicineUpdated, RemoveMedicine, UpdateMedicine,
};
pub use medicine::{LOW_QUANTITY_THRESHOLD, Medicine, MedicineDraft};
