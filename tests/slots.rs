// ABOUTME: Property tests for the slot registry scans.
// ABOUTME: Staging selection and name listing over arbitrary registries and via SlotReader.

mod support;

use asc_deploy::locator::ResourceLocator;
use asc_deploy::slots::{
    Slot, SlotReader, SlotView, inactive_slot_count, slot_names, staging_slot_name,
};
use asc_deploy::types::ResourceGroupName;
use proptest::prelude::*;
use support::{Call, FakeRegistry, RESOURCE_GROUP};

fn slot() -> impl Strategy<Value = Slot> {
    ("[a-z][a-z0-9-]{0,10}[a-z0-9]", any::<bool>()).prop_map(|(name, active)| Slot::new(name, active))
}

fn registry() -> impl Strategy<Value = Vec<Slot>> {
    prop::collection::vec(slot(), 0..6)
}

proptest! {
    #[test]
    fn names_preserve_order_and_count(slots in registry()) {
        let names = slot_names(&slots);
        prop_assert_eq!(names.len(), slots.len());
        for (name, slot) in names.iter().zip(&slots) {
            prop_assert_eq!(name, &slot.name);
        }
    }

    #[test]
    fn no_inactive_means_no_staging(names in prop::collection::vec("[a-z]{1,8}", 0..5)) {
        let slots: Vec<Slot> = names.into_iter().map(|n| Slot::new(n, true)).collect();
        prop_assert_eq!(staging_slot_name(&slots), None);
    }

    #[test]
    fn staging_is_last_inactive(slots in registry()) {
        let expected = slots.iter().filter(|s| !s.active).last().map(|s| s.name.as_str());
        prop_assert_eq!(staging_slot_name(&slots), expected);
    }

    #[test]
    fn single_inactive_slot_is_staging(
        active in prop::collection::vec("[a-z]{1,8}", 0..4),
        inactive in "[a-z]{1,8}",
        position in 0usize..5,
    ) {
        let mut slots: Vec<Slot> = active.into_iter().map(|n| Slot::new(n, true)).collect();
        let position = position.min(slots.len());
        slots.insert(position, Slot::new(inactive.clone(), false));

        prop_assert_eq!(inactive_slot_count(&slots), 1);
        prop_assert_eq!(staging_slot_name(&slots), Some(inactive.as_str()));
    }

    #[test]
    fn view_agrees_with_scans(slots in registry()) {
        let view = SlotView::from_slots(&slots);
        prop_assert_eq!(view.staging(), staging_slot_name(&slots));
        prop_assert_eq!(&view.names, &slot_names(&slots));
        for slot in &slots {
            prop_assert!(view.contains(&slot.name));
        }
    }
}

#[test]
fn empty_registry_has_no_names_and_no_staging() {
    assert!(slot_names(&[]).is_empty());
    assert_eq!(staging_slot_name(&[]), None);
}

#[test]
fn blue_green_registry() {
    let slots = vec![Slot::new("staging", false), Slot::new("production", true)];
    assert_eq!(staging_slot_name(&slots), Some("staging"));
    assert_eq!(slot_names(&slots), vec!["staging", "production"]);
}

fn locator() -> ResourceLocator {
    ResourceLocator::new(
        support::target(),
        ResourceGroupName::new(RESOURCE_GROUP).unwrap(),
    )
}

#[tokio::test]
async fn reader_lists_all_names_with_one_call() {
    let registry = FakeRegistry::new(vec![
        Slot::new("production", true),
        Slot::new("blue", false),
    ]);

    let names = registry.all_slot_names(&locator()).await.unwrap();

    assert_eq!(names, vec!["production", "blue"]);
    assert_eq!(registry.calls(), vec![Call::ListSlots]);
}

#[tokio::test]
async fn reader_reports_staging_name() {
    let registry = FakeRegistry::blue_green();
    assert_eq!(
        registry.staging_slot_name(&locator()).await.unwrap().as_deref(),
        Some("staging")
    );

    let single = FakeRegistry::new(vec![Slot::new("production", true)]);
    assert_eq!(single.staging_slot_name(&locator()).await.unwrap(), None);
}
