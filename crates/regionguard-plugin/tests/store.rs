#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;
use std::fs;

use regionguard_plugin::store::{RegionPolicyStore, RegionRule};

fn pairs(rules: &[RegionRule]) -> BTreeSet<(String, String)> {
    rules.iter().map(|r| (r.region_name.clone(), r.required_group.clone())).collect()
}

#[test]
fn add_then_reload_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");

    let store = RegionPolicyStore::new(&path);
    store.load().unwrap();
    store.add("Arena", "vip").unwrap();
    store.add("Vault", "admins").unwrap();
    assert_eq!(store.list().unwrap()[0], RegionRule::new("Arena", "vip"));

    let fresh = RegionPolicyStore::new(&path);
    fresh.load().unwrap();
    assert_eq!(pairs(&fresh.list().unwrap()), pairs(&store.list().unwrap()));
}

#[test]
fn add_is_idempotent_and_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = RegionPolicyStore::new(dir.path().join("regions.json"));
    store.load().unwrap();

    store.add("Arena", "vip").unwrap();
    store.add("Arena", "vip").unwrap();
    assert_eq!(store.list().unwrap(), vec![RegionRule::new("Arena", "vip")]);

    store.add("Arena", "admins").unwrap();
    assert_eq!(store.list().unwrap(), vec![RegionRule::new("Arena", "admins")]);

    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({ "Arena": "admins" }));
}

#[test]
fn loads_hand_written_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");
    fs::write(&path, r#"{"Vault":"admins","Arena":"vip"}"#).unwrap();

    let store = RegionPolicyStore::new(&path);
    store.load().unwrap();
    assert_eq!(
        store.list().unwrap(),
        vec![RegionRule::new("Arena", "vip"), RegionRule::new("Vault", "admins")]
    );
}

#[test]
fn malformed_document_is_surfaced_not_masked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");
    fs::write(&path, "{ \"Arena\": ").unwrap();

    let store = RegionPolicyStore::new(&path);
    let err = store.load().unwrap_err();
    assert_eq!(err.code().as_str(), "CONFIG_PARSE");
    assert!(!store.is_loaded());
    // the broken file is left for the operator to fix
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"Arena\": ");
}

#[test]
fn nested_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");
    fs::write(&path, r#"{"Arena": {"group": "vip"}}"#).unwrap();

    let store = RegionPolicyStore::new(&path);
    assert_eq!(store.load().unwrap_err().code().as_str(), "CONFIG_PARSE");
}

#[test]
fn failed_reload_keeps_last_good_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");
    let store = RegionPolicyStore::new(&path);
    store.load().unwrap();
    store.add("Arena", "vip").unwrap();

    fs::write(&path, "not json").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.list().unwrap(), vec![RegionRule::new("Arena", "vip")]);

    fs::write(&path, r#"{"Vault":"admins"}"#).unwrap();
    store.reload().unwrap();
    assert_eq!(store.list().unwrap(), vec![RegionRule::new("Vault", "admins")]);
}

#[test]
fn reload_picks_up_external_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");
    let store = RegionPolicyStore::new(&path);
    store.load().unwrap();
    store.add("Arena", "vip").unwrap();

    fs::write(&path, "{}").unwrap();
    store.reload().unwrap();
    assert!(store.list().unwrap().is_empty());
}
