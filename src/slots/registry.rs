// ABOUTME: Slot records and the side-effect-free scans the resolver consumes.
// ABOUTME: Staging is the last inactive slot in registry order, never an error.

/// One runtime environment of an app, as reported by the management service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub active: bool,
}

impl Slot {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }
}

/// Name of the slot that is not serving production traffic.
///
/// When several slots are inactive the last one in registry order wins. A registry
/// with more than one inactive slot is outside the supported two-slot topology, but
/// the scan still answers instead of failing.
pub fn staging_slot_name(slots: &[Slot]) -> Option<&str> {
    slots
        .iter()
        .rev()
        .find(|slot| !slot.active)
        .map(|slot| slot.name.as_str())
}

/// Every slot name, in registry order.
pub fn slot_names(slots: &[Slot]) -> Vec<String> {
    slots.iter().map(|slot| slot.name.clone()).collect()
}

pub fn inactive_slot_count(slots: &[Slot]) -> usize {
    slots.iter().filter(|slot| !slot.active).count()
}

/// Point-in-time view of the registry handed to the action resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotView {
    pub staging: Option<String>,
    pub names: Vec<String>,
}

impl SlotView {
    pub fn from_slots(slots: &[Slot]) -> Self {
        Self {
            staging: staging_slot_name(slots).map(str::to_string),
            names: slot_names(slots),
        }
    }

    pub fn staging(&self) -> Option<&str> {
        self.staging.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
