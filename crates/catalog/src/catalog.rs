use serde::Serialize;

use medishop_core::{Aggregate, DomainError, MedicineId, entity::position_of};
use medishop_events::Event;

use crate::medicine::{Medicine, MedicineDraft};

/// Command: AddMedicine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMedicine {
    pub medicine_id: MedicineId,
    pub draft: MedicineDraft,
}

/// Command: UpdateMedicine (replaces every editable field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMedicine {
    pub medicine_id: MedicineId,
    pub draft: MedicineDraft,
}

/// Command: RemoveMedicine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveMedicine {
    pub medicine_id: MedicineId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    AddMedicine(AddMedicine),
    UpdateMedicine(UpdateMedicine),
    RemoveMedicine(RemoveMedicine),
}

/// Event: MedicineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineAdded {
    pub medicine: Medicine,
}

/// Event: MedicineUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineUpdated {
    pub medicine: Medicine,
}

/// Event: MedicineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRemoved {
    pub medicine_id: MedicineId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CatalogEvent {
    MedicineAdded(MedicineAdded),
    MedicineUpdated(MedicineUpdated),
    MedicineRemoved(MedicineRemoved),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::MedicineAdded(_) => "catalog.medicine.added",
            CatalogEvent::MedicineUpdated(_) => "catalog.medicine.updated",
            CatalogEvent::MedicineRemoved(_) => "catalog.medicine.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Aggregate: the medicine catalog, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    medicines: Vec<Medicine>,
    #[serde(skip)]
    version: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn get(&self, medicine_id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == medicine_id)
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Medicines whose name, generic name or manufacturer contains `term`,
    /// ignoring case. A blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Medicine> {
        let needle = term.trim().to_lowercase();
        self.medicines
            .iter()
            .filter(|m| needle.is_empty() || m.matches_lowercase(&needle))
            .collect()
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::MedicineAdded(e) => {
                self.medicines.push(e.medicine.clone());
            }
            CatalogEvent::MedicineUpdated(e) => {
                if let Some(pos) = position_of(&self.medicines, &e.medicine.id) {
                    self.medicines[pos] = e.medicine.clone();
                }
            }
            CatalogEvent::MedicineRemoved(e) => {
                self.medicines.retain(|m| m.id != e.medicine_id);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddMedicine(cmd) => self.handle_add(cmd),
            CatalogCommand::UpdateMedicine(cmd) => self.handle_update(cmd),
            CatalogCommand::RemoveMedicine(cmd) => self.handle_remove(cmd),
        }
    }
}

impl Catalog {
    fn handle_add(&self, cmd: &AddMedicine) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.get(cmd.medicine_id).is_some() {
            return Err(DomainError::conflict("medicine already exists"));
        }
        let draft = cmd.draft.validated()?;

        Ok(vec![CatalogEvent::MedicineAdded(MedicineAdded {
            medicine: Medicine::from_draft(cmd.medicine_id, draft),
        })])
    }

    fn handle_update(&self, cmd: &UpdateMedicine) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.get(cmd.medicine_id).is_none() {
            return Err(DomainError::not_found());
        }
        let draft = cmd.draft.validated()?;

        Ok(vec![CatalogEvent::MedicineUpdated(MedicineUpdated {
            medicine: Medicine::from_draft(cmd.medicine_id, draft),
        })])
    }

    fn handle_remove(&self, cmd: &RemoveMedicine) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.get(cmd.medicine_id).is_none() {
            return Err(DomainError::not_found());
        }

        Ok(vec![CatalogEvent::MedicineRemoved(MedicineRemoved {
            medicine_id: cmd.medicine_id,
        })])
    }
}
