#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use common::{Harness, ADMIN};
use regionguard_core::protocol::{PlayerId, TilePos};
use regionguard_plugin::commands::{NO_REGIONS, REGION_ADD_USAGE, REGION_NOT_FOUND};
use regionguard_plugin::dispatch::commands::NO_ACCESS;
use regionguard_plugin::host::MessageTier;
use regionguard_plugin::store::RegionRule;

fn admin_replies(h: &Harness) -> Vec<(MessageTier, String)> {
    h.host.messages_for(ADMIN)
}

#[test]
fn regionadd_stores_and_confirms() {
    let h = Harness::new();
    h.admin("/regionadd Arena vip");

    assert_eq!(
        admin_replies(&h),
        vec![(MessageTier::Success, "Region Arena added with required group vip.".to_string())]
    );
    assert_eq!(h.guard.store().list().unwrap(), vec![RegionRule::new("Arena", "vip")]);
}

#[test]
fn regionadd_wrong_arity_is_a_usage_error() {
    let h = Harness::new();
    for line in ["/regionadd", "/regionadd Arena", "/regionadd Arena vip extra"] {
        h.admin(line);
    }

    let replies = admin_replies(&h);
    assert_eq!(replies.len(), 3);
    for (tier, text) in replies {
        assert_eq!(tier, MessageTier::Error);
        assert_eq!(text, REGION_ADD_USAGE);
    }
    assert!(h.guard.store().list().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(h.region_file()).unwrap(), "{}\n");
}

#[test]
fn regionadd_unknown_region_is_rejected() {
    let h = Harness::new();
    h.admin("/regionadd UnknownRegion admins");

    assert_eq!(admin_replies(&h), vec![(MessageTier::Error, REGION_NOT_FOUND.to_string())]);
    assert!(h.guard.store().list().unwrap().is_empty());
}

#[test]
fn regionadd_accepts_quoted_names() {
    let h = Harness::new();
    h.host.add_region(regionguard_plugin::host::memory::RectRegion::new("Dungeon Gate", 0, 0, 1, 1));
    h.admin("/regionadd \"Dungeon Gate\" vip");

    assert_eq!(h.guard.store().required_group("Dungeon Gate").unwrap().as_deref(), Some("vip"));
}

#[test]
fn regionadd_twice_keeps_last_value() {
    let h = Harness::new();
    h.admin("/regionadd Arena vip");
    h.admin("/regionadd Arena admins");

    assert_eq!(h.guard.store().list().unwrap(), vec![RegionRule::new("Arena", "admins")]);
}

#[test]
fn regionlist_empty_store() {
    let h = Harness::new();
    h.admin("/regionlist");
    assert_eq!(admin_replies(&h), vec![(MessageTier::Info, NO_REGIONS.to_string())]);
}

#[test]
fn regionlist_reports_each_rule() {
    let h = Harness::new();
    h.guard.store().add("Vault", "admins").unwrap();
    h.guard.store().add("Arena", "vip").unwrap();

    h.admin("/regionlist");
    assert_eq!(
        admin_replies(&h),
        vec![
            (MessageTier::Info, "Region: Arena, Required Group: vip".to_string()),
            (MessageTier::Info, "Region: Vault, Required Group: admins".to_string()),
        ]
    );
}

#[test]
fn commands_require_manage_permission() {
    let h = Harness::new();
    let guest = PlayerId(12);
    h.host.connect(guest, "eve", "guest", TilePos::new(900, 900));

    assert!(h.router.dispatch(guest, "/regionadd Arena guest").is_err());
    assert!(h.router.dispatch(guest, "/regionlist").is_err());

    assert_eq!(
        h.host.messages_for(guest),
        vec![
            (MessageTier::Error, NO_ACCESS.to_string()),
            (MessageTier::Error, NO_ACCESS.to_string()),
        ]
    );
    assert!(h.guard.store().list().unwrap().is_empty());
}

#[test]
fn commands_are_registered_on_game_initialize() {
    let h = Harness::unstarted_world();
    assert!(h.router.registered().is_empty());

    h.bus.publish(&regionguard_core::protocol::HostEvent::GameInitialize);
    assert_eq!(h.router.registered(), vec!["regionadd", "regionlist"]);
    assert!(h.router.help("regionadd").unwrap().contains("Usage"));
}

#[test]
fn command_names_ignore_case() {
    let h = Harness::new();
    h.admin("/RegionList");
    assert_eq!(admin_replies(&h), vec![(MessageTier::Info, NO_REGIONS.to_string())]);
}

#[test]
fn unknown_command_is_reported_to_invoker() {
    let h = Harness::new();
    let err = h.router.dispatch(ADMIN, "/nope").unwrap_err();
    assert_eq!(err.code().as_str(), "VALIDATION");
    assert_eq!(
        admin_replies(&h),
        vec![(
            MessageTier::Error,
            "Invalid command entered. Type /help for a list of valid commands.".to_string()
        )]
    );
}
