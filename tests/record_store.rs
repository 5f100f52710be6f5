//! Record store behaviour: keyed upserts, removal, the treasury ledger,
//! the announcement cap and quest completion.

use guildbook::guild::{
    GuildError, GuildStore, ItemOutcome, MemberStatus, QuestStatus, RecordKind, MAX_ANNOUNCEMENTS,
};
use tempfile::TempDir;

fn setup_store() -> (GuildStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = GuildStore::open(temp_dir.path().join("guild_data.json"));
    (store, temp_dir)
}

#[test]
fn add_then_remove_member_by_any_spelling_of_the_key() {
    let (mut store, _temp) = setup_store();

    for (added, removed) in [
        ("Bob Smith", "bob smith"),
        ("Gwen", "GWEN"),
        ("Old Tom Reed", "old_tom_reed"),
    ] {
        store.add_member(added, "Fighter", 1, "").unwrap();
        assert!(store.member(added).is_some());

        let name = store.remove_member(removed).unwrap();
        assert_eq!(name, added, "removal reports the stored display name");
        assert!(store.member(added).is_none());
    }
    assert_eq!(store.members().len(), 0);
}

#[test]
fn colliding_names_leave_one_record_with_latest_data() {
    let (mut store, _temp) = setup_store();

    store.add_member("Bob Smith", "Fighter", 3, "first").unwrap();
    store.add_member("bob smith", "Cleric", 4, "second").unwrap();
    store.add_member("bob_smith", "Ranger", 7, "third").unwrap();

    assert_eq!(store.members().len(), 1);
    let bob = store.member("Bob Smith").unwrap();
    assert_eq!(bob.name, "bob_smith");
    assert_eq!(bob.class, "Ranger");
    assert_eq!(bob.level, 7);
    assert_eq!(bob.description, "third");
    assert_eq!(bob.status, MemberStatus::Active);
    assert!(store.document().members.contains_key("bob_smith"));
}

#[test]
fn re_adding_a_quest_replaces_it_in_place() {
    let (mut store, _temp) = setup_store();

    store.add_quest("Find the Map", "It is lost", "", "Easy").unwrap();
    store
        .add_quest("Slay the Dragon", "Kill it", "100 gold", "Hard")
        .unwrap();
    store.add_quest("Guard the Gate", "Night shift", "", "").unwrap();
    store
        .add_quest("slay the dragon", "Just scare it off", "20 gold", "Normal")
        .unwrap();

    let doc = store.document();
    assert_eq!(doc.quests.len(), 3);
    let keys: Vec<&str> = doc.quests.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["find_the_map", "slay_the_dragon", "guard_the_gate"]);

    let quest = &doc.quests["slay_the_dragon"];
    assert_eq!(quest.title, "slay the dragon");
    assert_eq!(quest.description, "Just scare it off");
    assert_eq!(quest.reward, "20 gold");
    assert_eq!(quest.difficulty, "Normal");
    assert_eq!(quest.status, QuestStatus::Available);
}

#[test]
fn removing_unknown_member_is_not_found_and_changes_nothing() {
    let (mut store, _temp) = setup_store();
    store.add_member("Ayla", "Bard", 2, "").unwrap();

    let err = store.remove_member("Nobody").unwrap_err();
    match err {
        GuildError::NotFound { kind, ref name } => {
            assert_eq!(kind, RecordKind::Member);
            assert_eq!(name, "Nobody");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(store.members().len(), 1);
}

#[test]
fn members_list_is_restartable_and_in_insertion_order() {
    let (mut store, _temp) = setup_store();
    assert_eq!(store.members().count(), 0);

    store.add_member("Corin", "Rogue", 1, "").unwrap();
    store.add_member("Ayla", "Bard", 1, "").unwrap();
    store.add_member("Brom", "Fighter", 1, "").unwrap();

    let listing = store.members();
    let first: Vec<&str> = listing.clone().map(|m| m.name.as_str()).collect();
    let second: Vec<&str> = listing.map(|m| m.name.as_str()).collect();
    assert_eq!(first, vec!["Corin", "Ayla", "Brom"]);
    assert_eq!(first, second);
}

#[test]
fn blank_text_is_invalid_input() {
    let (mut store, _temp) = setup_store();

    assert!(matches!(
        store.add_member("  ", "Rogue", 1, ""),
        Err(GuildError::InvalidInput(_))
    ));
    assert!(matches!(
        store.add_quest("", "desc", "", ""),
        Err(GuildError::InvalidInput(_))
    ));
    assert!(matches!(
        store.add_announcement("\t\n"),
        Err(GuildError::InvalidInput(_))
    ));
    assert_eq!(store.announcements().len(), 0);
}

#[test]
fn rope_added_then_used_up_disappears() {
    let (mut store, _temp) = setup_store();

    let report = store.update_resources(None, Some("Rope"), Some(5)).unwrap();
    assert_eq!(
        report.item,
        Some(ItemOutcome::Updated {
            name: "Rope".to_string(),
            quantity: 5
        })
    );

    let report = store.update_resources(None, Some("Rope"), Some(-5)).unwrap();
    assert_eq!(
        report.item,
        Some(ItemOutcome::Removed {
            name: "Rope".to_string()
        })
    );
    assert!(!store.resources().items.contains_key("Rope"));
}

#[test]
fn overdrawn_item_is_removed_and_never_negative() {
    let (mut store, _temp) = setup_store();

    store.update_resources(None, Some("Torch"), Some(2)).unwrap();
    store.update_resources(None, Some("Torch"), Some(-9)).unwrap();
    assert!(store.resources().items.is_empty());

    // Removing something that was never stocked does not create it
    store.update_resources(None, Some("Lantern"), Some(-1)).unwrap();
    assert!(store.resources().items.is_empty());
}

#[test]
fn gold_and_item_adjust_independently_in_one_call() {
    let (mut store, _temp) = setup_store();

    let report = store
        .update_resources(Some(40), Some("Potion"), Some(3))
        .unwrap();
    assert_eq!(report.gold_delta, Some(40));
    assert_eq!(report.gold_total, 40);
    assert_eq!(store.resources().items.get("Potion"), Some(&3));

    let report = store.update_resources(Some(-100), None, None).unwrap();
    assert_eq!(report.gold_total, -60);
    assert_eq!(store.resources().items.get("Potion"), Some(&3));
}

#[test]
fn eleven_announcements_keep_the_ten_newest() {
    let (mut store, _temp) = setup_store();

    for i in 1..=11 {
        store.add_announcement(&format!("Notice {}", i)).unwrap();
    }

    let messages: Vec<&str> = store.announcements().map(|a| a.message.as_str()).collect();
    assert_eq!(messages.len(), MAX_ANNOUNCEMENTS);
    assert_eq!(messages[0], "Notice 11");
    assert_eq!(messages[9], "Notice 2");
    assert!(!messages.contains(&"Notice 1"));
}

#[test]
fn completing_unknown_quest_leaves_quests_unchanged() {
    let (mut store, _temp) = setup_store();
    store.add_quest("Find the Map", "It is lost", "", "Easy").unwrap();

    let before: Vec<_> = store.quests().cloned().collect();
    let err = store.complete_quest("Slay the Hydra").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        GuildError::NotFound {
            kind: RecordKind::Quest,
            ..
        }
    ));
    let after: Vec<_> = store.quests().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn completing_twice_restamps_completion_date() {
    let (mut store, _temp) = setup_store();
    store.add_quest("Guard the Gate", "Night shift", "", "").unwrap();

    let first = store.complete_quest("guard the gate").unwrap();
    let first_date = first.completed_date.unwrap();
    let second = store.complete_quest("Guard the Gate").unwrap();

    assert_eq!(second.status, QuestStatus::Completed);
    assert!(second.completed_date.unwrap() >= first_date);
    assert_eq!(store.quests().len(), 1);
    assert_eq!(store.available_quests().count(), 0);
}

#[test]
fn guild_info_only_replaces_non_empty_fields() {
    let (mut store, _temp) = setup_store();
    let original_description = store.guild_description().to_string();

    let update = store.set_guild_info(Some("Lanternbearers"), Some("  ")).unwrap();
    assert!(update.name_changed);
    assert!(!update.description_changed);
    assert_eq!(store.guild_name(), "Lanternbearers");
    assert_eq!(store.guild_description(), original_description);

    let update = store.set_guild_info(None, Some("We light the way")).unwrap();
    assert!(!update.name_changed);
    assert_eq!(store.guild_name(), "Lanternbearers");
    assert_eq!(store.guild_description(), "We light the way");
}

#[test]
fn zara_slays_the_dragon() {
    let (mut store, _temp) = setup_store();

    store.add_member("Zara", "Wizard", 5, "").unwrap();
    store
        .add_quest("Slay the Dragon", "Kill it", "100 gold", "Hard")
        .unwrap();
    store.update_resources(Some(100), None, None).unwrap();
    store.complete_quest("Slay the Dragon").unwrap();

    let doc = store.document();
    assert_eq!(doc.members.len(), 1);
    let zara = &doc.members["zara"];
    assert_eq!(zara.level, 5);
    assert_eq!(zara.class, "Wizard");

    assert_eq!(doc.quests.len(), 1);
    let quest = &doc.quests["slay_the_dragon"];
    assert_eq!(quest.status, QuestStatus::Completed);
    assert!(quest.completed_date.is_some());
    assert_eq!(quest.reward, "100 gold");
    assert_eq!(quest.difficulty, "Hard");

    assert_eq!(doc.resources.gold, 100);
}
