use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Live status of a slot as observed by a catalog query. Never stored:
/// always derived from the holds and bookings tables at read time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Held,
    Booked,
}

/// Key under which holds and bookings are tracked. Slot ids are unique
/// across resources, so the resource id is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub slot_id: String,
    pub date: NaiveDate,
}

impl SlotKey {
    pub fn new(slot_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            slot_id: slot_id.into(),
            date,
        }
    }
}

/// A bookable time interval as defined by a resource's operating schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub slot_id: String,
    pub resource_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift_label: String,
    pub price: i64,
}

/// A slot annotated with its live status, ready for the query surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub slot_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    pub price: i64,
}

impl Slot {
    pub fn from_definition(def: &SlotDefinition, status: SlotStatus) -> Self {
        Self {
            slot_id: def.slot_id.clone(),
            start_time: def.start_time,
            end_time: def.end_time,
            status,
            price: def.price,
        }
    }
}

/// Slots grouped under a shift heading, in start-time order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftSlots {
    pub shift_name: String,
    pub slots: Vec<Slot>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown resource: {0}")]
    UnknownResource(Uuid),

    #[error("unknown slot: {0}")]
    UnknownSlot(String),
}

/// Read-only catalog of slot definitions, indexed by resource and by
/// slot id. Populated once at startup; queries never mutate it.
#[derive(Debug, Default)]
pub struct SlotCatalog {
    by_resource: HashMap<Uuid, Vec<SlotDefinition>>,
    by_slot_id: HashMap<String, SlotDefinition>,
}

impl SlotCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_definition(&mut self, def: SlotDefinition) {
        self.by_slot_id.insert(def.slot_id.clone(), def.clone());
        self.by_resource.entry(def.resource_id).or_default().push(def);
    }

    /// All definitions for a resource, sorted by start time.
    pub fn resource_slots(&self, resource_id: Uuid) -> Result<Vec<&SlotDefinition>, CatalogError> {
        let defs = self
            .by_resource
            .get(&resource_id)
            .ok_or(CatalogError::UnknownResource(resource_id))?;
        let mut sorted: Vec<&SlotDefinition> = defs.iter().collect();
        sorted.sort_by_key(|d| d.start_time);
        Ok(sorted)
    }

    pub fn definition(&self, slot_id: &str) -> Result<&SlotDefinition, CatalogError> {
        self.by_slot_id
            .get(slot_id)
            .ok_or_else(|| CatalogError::UnknownSlot(slot_id.to_string()))
    }

    pub fn contains_resource(&self, resource_id: Uuid) -> bool {
        self.by_resource.contains_key(&resource_id)
    }

    /// Group annotated slots by shift label, shifts ordered by the start
    /// time of their earliest slot.
    pub fn group_by_shift(slots: Vec<Slot>, defs: &[&SlotDefinition]) -> Vec<ShiftSlots> {
        let mut shift_order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<Slot>> = HashMap::new();

        for (slot, def) in slots.into_iter().zip(defs.iter()) {
            if !grouped.contains_key(&def.shift_label) {
                shift_order.push(def.shift_label.clone());
            }
            grouped.entry(def.shift_label.clone()).or_default().push(slot);
        }

        shift_order
            .into_iter()
            .map(|shift_name| {
                let slots = grouped.remove(&shift_name).unwrap_or_default();
                ShiftSlots { shift_name, slots }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn def(slot_id: &str, resource_id: Uuid, hour: u32, shift: &str) -> SlotDefinition {
        SlotDefinition {
            slot_id: slot_id.to_string(),
            resource_id,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            shift_label: shift.to_string(),
            price: 1200,
        }
    }

    #[test]
    fn resource_slots_sorted_by_start_time() {
        let resource = Uuid::new_v4();
        let mut catalog = SlotCatalog::new();
        catalog.add_definition(def("S-18", resource, 18, "Evening"));
        catalog.add_definition(def("S-09", resource, 9, "Morning"));
        catalog.add_definition(def("S-14", resource, 14, "Afternoon"));

        let slots = catalog.resource_slots(resource).unwrap();
        let ids: Vec<&str> = slots.iter().map(|d| d.slot_id.as_str()).collect();
        assert_eq!(ids, vec!["S-09", "S-14", "S-18"]);
    }

    #[test]
    fn unknown_resource_is_an_error() {
        let catalog = SlotCatalog::new();
        assert!(matches!(
            catalog.resource_slots(Uuid::new_v4()),
            Err(CatalogError::UnknownResource(_))
        ));
    }

    #[test]
    fn grouping_preserves_shift_order() {
        let resource = Uuid::new_v4();
        let defs_owned = vec![
            def("S-09", resource, 9, "Morning"),
            def("S-10", resource, 10, "Morning"),
            def("S-14", resource, 14, "Afternoon"),
        ];
        let defs: Vec<&SlotDefinition> = defs_owned.iter().collect();
        let slots: Vec<Slot> = defs
            .iter()
            .map(|d| Slot::from_definition(d, SlotStatus::Available))
            .collect();

        let shifts = SlotCatalog::group_by_shift(slots, &defs);
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].shift_name, "Morning");
        assert_eq!(shifts[0].slots.len(), 2);
        assert_eq!(shifts[1].shift_name, "Afternoon");
    }
}
