use super::record;
use crate::core::{
    ActionDefinition, ActionFilter, ActionList, ActionRecord, BoundFilter, DeviceClass,
    KeywordDictionary, SearchIndex, SubstringSearch,
};

fn sample_list() -> ActionList {
    let mouse_only = ActionDefinition {
        name: "v_attack1".to_string(),
        map_name: "spaceship_weapons".to_string(),
        mouse: Some("mouse1".to_string()),
        ..Default::default()
    };

    [
        record("v_strafe_up", "space", "a"),
        record("v_jump", "space", " "),
        record("v_boost", "lshift", " "),
        record("v_lights", " ", " "),
        ActionRecord::from_definition(&mouse_only, &KeywordDictionary::new()),
    ]
    .into_iter()
    .collect()
}

fn names(records: Vec<&ActionRecord>) -> Vec<&str> {
    records.into_iter().map(|r| r.action_name()).collect()
}

#[test]
fn test_bound_filter_cycle() {
    assert_eq!(BoundFilter::All.cycle(), BoundFilter::Bound);
    assert_eq!(BoundFilter::Bound.cycle(), BoundFilter::Unbound);
    assert_eq!(BoundFilter::Unbound.cycle(), BoundFilter::All);
    assert_eq!(BoundFilter::Unbound.to_string(), "Unbound only");
}

#[test]
fn test_default_filter_lists_visible_records() {
    let list = sample_list();
    let filter = ActionFilter::default();

    let keyboard = names(filter.apply(&list, DeviceClass::Keyboard, &SubstringSearch));
    assert_eq!(keyboard.len(), 5, "keyboard view includes mouse-only actions");

    let controller = names(filter.apply(&list, DeviceClass::Controller, &SubstringSearch));
    assert_eq!(controller, vec!["v_strafe_up", "v_jump", "v_boost", "v_lights"]);
}

#[test]
fn test_bound_and_unbound_filters() {
    let list = sample_list();

    let bound = ActionFilter {
        bound: BoundFilter::Bound,
        ..Default::default()
    };
    assert_eq!(
        names(bound.apply(&list, DeviceClass::Controller, &SubstringSearch)),
        vec!["v_strafe_up"]
    );

    let unbound = ActionFilter {
        bound: BoundFilter::Unbound,
        ..Default::default()
    };
    assert_eq!(
        names(unbound.apply(&list, DeviceClass::Controller, &SubstringSearch)),
        vec!["v_jump", "v_boost", "v_lights"]
    );
}

#[test]
fn test_tag_filter_is_case_insensitive() {
    let list = sample_list();
    let filter = ActionFilter {
        tags: vec!["SPACESHIP_WEAPONS".to_string()],
        ..Default::default()
    };

    assert_eq!(
        names(filter.apply(&list, DeviceClass::Keyboard, &SubstringSearch)),
        vec!["v_attack1"]
    );
}

#[test]
fn test_substring_search_matches_label() {
    let list = sample_list();
    let filter = ActionFilter {
        query: "  Strafe ".to_string(),
        ..Default::default()
    };

    assert_eq!(
        names(filter.apply(&list, DeviceClass::Keyboard, &SubstringSearch)),
        vec!["v_strafe_up"]
    );
}

#[test]
fn test_custom_search_index_is_used() {
    struct NameExact;
    impl SearchIndex for NameExact {
        fn matches(&self, record: &ActionRecord, query: &str) -> bool {
            record.action_name() == query
        }
    }

    let list = sample_list();
    let filter = ActionFilter {
        query: "v_jump".to_string(),
        ..Default::default()
    };

    assert_eq!(
        names(filter.apply(&list, DeviceClass::Keyboard, &NameExact)),
        vec!["v_jump"]
    );
}

#[test]
fn test_conflicts_only_groups_shared_binds() {
    let list = sample_list();
    let filter = ActionFilter {
        conflicts_only: true,
        ..Default::default()
    };

    assert_eq!(
        names(filter.apply(&list, DeviceClass::Keyboard, &SubstringSearch)),
        vec!["v_strafe_up", "v_jump"]
    );
    assert!(filter
        .apply(&list, DeviceClass::Controller, &SubstringSearch)
        .is_empty());
}
