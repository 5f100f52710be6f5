//! Scripted command front-end: argument parsing and printed feedback.

use clap::Parser;
use guildbook::console::{dispatch, GuildCommand, MemberAction, QuestAction};
use guildbook::guild::GuildStore;
use tempfile::TempDir;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: GuildCommand,
}

fn parse(args: &[&str]) -> GuildCommand {
    let mut argv = vec!["guildbook"];
    argv.extend_from_slice(args);
    TestCli::try_parse_from(argv).expect("parse").command
}

fn run(store: &mut GuildStore, args: &[&str]) -> String {
    let mut out = Vec::new();
    dispatch(store, parse(args), "guild_page.html", &mut out).expect("dispatch");
    String::from_utf8(out).unwrap()
}

fn setup_store() -> (GuildStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = GuildStore::open(temp_dir.path().join("guild_data.json"));
    (store, temp_dir)
}

#[test]
fn member_add_applies_defaults() {
    assert_eq!(
        parse(&["member", "add", "Zara", "Wizard"]),
        GuildCommand::Member {
            action: MemberAction::Add {
                name: "Zara".to_string(),
                class: "Wizard".to_string(),
                level: 1,
                description: String::new(),
            }
        }
    );
}

#[test]
fn negative_level_is_accepted() {
    let (mut store, _temp) = setup_store();

    let out = run(&mut store, &["member", "add", "Pip", "Squire", "--level", "-2"]);
    assert_eq!(out, "[+] Added Pip (Level -2 Squire) to the guild!\n");
    assert_eq!(store.member("pip").unwrap().level, -2);
}

#[test]
fn quest_add_defaults_to_normal_difficulty() {
    assert_eq!(
        parse(&["quest", "add", "Scout", "Look around"]),
        GuildCommand::Quest {
            action: QuestAction::Add {
                title: "Scout".to_string(),
                description: "Look around".to_string(),
                reward: String::new(),
                difficulty: "Normal".to_string(),
            }
        }
    );
}

#[test]
fn negative_amounts_parse() {
    assert_eq!(
        parse(&["resource", "--gold", "-50", "--item", "Rope", "--quantity", "-2"]),
        GuildCommand::Resource {
            gold: Some(-50),
            item: Some("Rope".to_string()),
            quantity: Some(-2),
        }
    );
}

#[test]
fn scripted_session_prints_outcomes() {
    let (mut store, _temp) = setup_store();

    let out = run(&mut store, &["member", "add", "Zara", "Wizard", "--level", "5"]);
    assert_eq!(out, "[+] Added Zara (Level 5 Wizard) to the guild!\n");

    let out = run(&mut store, &["quest", "add", "Slay the Dragon", "Kill it", "--reward", "100 gold", "--difficulty", "Hard"]);
    assert_eq!(out, "[+] Added quest: Slay the Dragon\n");

    let out = run(&mut store, &["resource", "--gold", "100"]);
    assert_eq!(out, "[+] Added 100 gold. Current total: 100\n");

    let out = run(&mut store, &["resource", "--gold", "-30"]);
    assert_eq!(out, "[+] Spent 30 gold. Current total: 70\n");

    let out = run(&mut store, &["quest", "complete", "slay the dragon"]);
    assert_eq!(out, "[+] Quest 'Slay the Dragon' marked as completed!\n");

    let out = run(&mut store, &["quest", "list"]);
    assert!(out.contains("[COMPLETED] Slay the Dragon (Hard)"));
    assert!(out.contains("Reward: 100 gold"));

    let out = run(&mut store, &["member", "list"]);
    assert!(out.contains("[ACTIVE] Zara - Level 5 Wizard"));
}

#[test]
fn failures_are_reported_not_raised() {
    let (mut store, _temp) = setup_store();

    let out = run(&mut store, &["member", "remove", "Ghost"]);
    assert_eq!(out, "[-] Member 'Ghost' not found.\n");

    let out = run(&mut store, &["quest", "complete", "Nothing"]);
    assert_eq!(out, "[-] Quest 'Nothing' not found.\n");

    let out = run(&mut store, &["announce", "   "]);
    assert_eq!(out, "[-] Announcement message cannot be empty\n");
}

#[test]
fn items_and_info_feedback() {
    let (mut store, _temp) = setup_store();

    let out = run(&mut store, &["resource", "--item", "Rope", "--quantity", "5"]);
    assert_eq!(out, "[+] Updated Rope: 5\n");
    let out = run(&mut store, &["resource", "--item", "Rope", "--quantity", "-5"]);
    assert_eq!(out, "[+] Removed Rope from inventory\n");

    let out = run(&mut store, &["info", "--name", "Lanternbearers", "--description", "We light the way"]);
    assert_eq!(
        out,
        "[+] Guild name set to: Lanternbearers\n[+] Guild description updated\n"
    );
}

#[test]
fn empty_listings_and_status() {
    let (mut store, _temp) = setup_store();

    assert_eq!(run(&mut store, &["member", "list"]), "No guild members found.\n");
    assert_eq!(run(&mut store, &["quest", "list"]), "No quests found.\n");

    let out = run(&mut store, &["status"]);
    assert!(out.contains("Guild: The Unnamed Guild"));
    assert!(out.contains("Members: 0"));
    assert!(out.contains("Quests: 0 available, 0 completed"));
}

#[test]
fn web_command_writes_the_page() {
    let (mut store, temp) = setup_store();
    let target = temp.path().join("site.html");
    let target = target.to_str().unwrap();

    let out = run(&mut store, &["web", "--output", target]);
    assert_eq!(out, format!("[+] Generated webpage: {}\n", target));
    assert!(std::path::Path::new(target).exists());
}
