//! The guild record store: owns the [`Document`] and applies every change.
//!
//! Each mutating call edits the in-memory document and then rewrites the
//! data file before returning. If that write fails the call returns
//! [`GuildError::Persistence`], but the in-memory change stays in place.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::guild::errors::{GuildError, PersistenceError, RecordKind};
use crate::guild::types::{Announcement, Document, Member, Quest, Resources, MAX_ANNOUNCEMENTS};
use crate::storage::{load_document, save_document, Loaded};
use crate::validation::{derive_key, non_empty, require_text};

/// Longest stretch of operator text copied into a log line.
const LOG_PREVIEW: usize = 120;

/// Operator-entered text as it appears in log lines: escaped onto one line
/// and cut off after [`LOG_PREVIEW`] characters.
struct LogText<'a>(&'a str);

impl fmt::Display for LogText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.0.chars();
        for ch in chars.by_ref().take(LOG_PREVIEW) {
            write!(f, "{}", ch.escape_debug())?;
        }
        if chars.next().is_some() {
            f.write_str("…")?;
        }
        Ok(())
    }
}

/// What happened to an inventory entry after [`GuildStore::update_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Updated { name: String, quantity: i64 },
    Removed { name: String },
}

/// Report returned by [`GuildStore::update_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReport {
    /// The gold delta that was applied, if any.
    pub gold_delta: Option<i64>,
    /// Gold balance after the call.
    pub gold_total: i64,
    pub item: Option<ItemOutcome>,
}

/// Which guild fields [`GuildStore::set_guild_info`] actually replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InfoUpdate {
    pub name_changed: bool,
    pub description_changed: bool,
}

/// Headline numbers for the guild status overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub members: usize,
    pub available_quests: usize,
    pub completed_quests: usize,
    pub gold: i64,
    pub item_types: usize,
    pub announcements: usize,
}

pub struct GuildStore {
    path: PathBuf,
    document: Document,
    load_warning: Option<PersistenceError>,
}

impl GuildStore {
    /// Load the guild at `path`, starting fresh if it is missing or unreadable.
    ///
    /// Nothing is written until the first change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let Loaded { document, warning } = load_document(&path);
        Self {
            path,
            document,
            load_warning: warning,
        }
    }

    /// The reason the data file was discarded on open, if it was. Returned once.
    pub fn take_load_warning(&mut self) -> Option<PersistenceError> {
        self.load_warning.take()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the whole document, for rendering.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn guild_name(&self) -> &str {
        &self.document.guild_name
    }

    pub fn guild_description(&self) -> &str {
        &self.document.guild_description
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.document.last_updated
    }

    /// Rewrite the data file with the current document.
    pub fn save(&mut self) -> Result<(), GuildError> {
        save_document(&self.path, &mut self.document).map_err(|e| {
            warn!("Failed to save guild data to {}: {}", self.path.display(), e);
            GuildError::Persistence(e)
        })
    }

    // ---- members ----

    /// Insert or overwrite the member whose derived key matches `name`.
    pub fn add_member(
        &mut self,
        name: &str,
        class: &str,
        level: i64,
        description: &str,
    ) -> Result<Member, GuildError> {
        let name = require_text("Member name", name)?;
        let key = derive_key(name);
        let member = Member::new(name, class.trim(), level, description.trim());
        if self.document.members.insert(key.clone(), member.clone()).is_some() {
            info!("Replaced member {}", LogText(&key));
        } else {
            info!("Added member {}", LogText(&key));
        }
        self.save()?;
        Ok(member)
    }

    /// Remove a member, returning the display name it was stored under.
    pub fn remove_member(&mut self, name: &str) -> Result<String, GuildError> {
        let key = derive_key(name.trim());
        let Some(removed) = self.document.members.shift_remove(&key) else {
            return Err(GuildError::not_found(RecordKind::Member, name.trim()));
        };
        info!("Removed member {}", LogText(&key));
        self.save()?;
        Ok(removed.name)
    }

    /// Members in the order they were first added.
    pub fn members(&self) -> impl ExactSizeIterator<Item = &Member> + Clone + '_ {
        self.document.members.values()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.document.members.get(&derive_key(name.trim()))
    }

    // ---- quests ----

    /// Insert or overwrite the quest whose derived key matches `title`.
    pub fn add_quest(
        &mut self,
        title: &str,
        description: &str,
        reward: &str,
        difficulty: &str,
    ) -> Result<Quest, GuildError> {
        let title = require_text("Quest title", title)?;
        let key = derive_key(title);
        let quest = Quest::new(title, description.trim(), reward.trim(), difficulty);
        if self.document.quests.insert(key.clone(), quest.clone()).is_some() {
            info!("Replaced quest {}", LogText(&key));
        } else {
            info!("Added quest {}", LogText(&key));
        }
        self.save()?;
        Ok(quest)
    }

    /// Mark a quest completed. Completing it again refreshes the completion date.
    pub fn complete_quest(&mut self, title: &str) -> Result<Quest, GuildError> {
        let key = derive_key(title.trim());
        let Some(quest) = self.document.quests.get_mut(&key) else {
            return Err(GuildError::not_found(RecordKind::Quest, title.trim()));
        };
        quest.complete();
        let quest = quest.clone();
        info!("Completed quest {}", LogText(&key));
        self.save()?;
        Ok(quest)
    }

    /// Quests in the order they were first added, regardless of status.
    pub fn quests(&self) -> impl ExactSizeIterator<Item = &Quest> + Clone + '_ {
        self.document.quests.values()
    }

    pub fn available_quests(&self) -> impl Iterator<Item = &Quest> + Clone + '_ {
        self.document.quests.values().filter(|q| !q.is_completed())
    }

    pub fn quest(&self, title: &str) -> Option<&Quest> {
        self.document.quests.get(&derive_key(title.trim()))
    }

    // ---- resources ----

    /// Adjust the treasury.
    ///
    /// `gold_delta` is added to the balance with no lower bound. The item
    /// adjustment only happens when both `item_name` and `item_quantity` are
    /// given; an entry whose total drops to zero or below is removed. The
    /// file is saved even when neither adjustment applies.
    pub fn update_resources(
        &mut self,
        gold_delta: Option<i64>,
        item_name: Option<&str>,
        item_quantity: Option<i64>,
    ) -> Result<ResourceReport, GuildError> {
        let resources = &mut self.document.resources;
        if let Some(delta) = gold_delta {
            resources.gold = resources.gold.saturating_add(delta);
            info!("Gold adjusted by {} to {}", delta, resources.gold);
        }

        let item = match (non_empty(item_name), item_quantity) {
            (Some(name), Some(quantity)) => {
                let entry = resources.items.entry(name.to_string()).or_insert(0);
                *entry = entry.saturating_add(quantity);
                if *entry <= 0 {
                    resources.items.shift_remove(name);
                    info!("Removed item {}", LogText(name));
                    Some(ItemOutcome::Removed {
                        name: name.to_string(),
                    })
                } else {
                    let quantity = *entry;
                    info!("Item {} now at {}", LogText(name), quantity);
                    Some(ItemOutcome::Updated {
                        name: name.to_string(),
                        quantity,
                    })
                }
            }
            _ => None,
        };

        let report = ResourceReport {
            gold_delta,
            gold_total: resources.gold,
            item,
        };
        self.save()?;
        Ok(report)
    }

    pub fn resources(&self) -> &Resources {
        &self.document.resources
    }

    // ---- announcements ----

    /// Post an announcement at the top of the board, dropping the oldest past ten.
    pub fn add_announcement(&mut self, message: &str) -> Result<Announcement, GuildError> {
        let message = require_text("Announcement message", message)?;
        let announcement = Announcement::new(message);
        let board = &mut self.document.announcements;
        board.insert(0, announcement.clone());
        board.truncate(MAX_ANNOUNCEMENTS);
        info!("Posted announcement {}", LogText(message));
        self.save()?;
        Ok(announcement)
    }

    /// Announcements, newest first.
    pub fn announcements(&self) -> impl ExactSizeIterator<Item = &Announcement> + Clone + '_ {
        self.document.announcements.iter()
    }

    // ---- guild info ----

    /// Replace the guild name and/or description. Blank values are ignored.
    pub fn set_guild_info(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<InfoUpdate, GuildError> {
        let mut update = InfoUpdate::default();
        if let Some(name) = non_empty(name) {
            self.document.guild_name = name.to_string();
            update.name_changed = true;
            info!("Guild name set to {}", LogText(name));
        }
        if let Some(description) = non_empty(description) {
            self.document.guild_description = description.to_string();
            update.description_changed = true;
            info!("Guild description updated");
        }
        self.save()?;
        Ok(update)
    }

    pub fn summary(&self) -> GuildSummary {
        let completed = self.quests().filter(|q| q.is_completed()).count();
        GuildSummary {
            members: self.document.members.len(),
            available_quests: self.document.quests.len() - completed,
            completed_quests: completed,
            gold: self.document.resources.gold,
            item_types: self.document.resources.items.len(),
            announcements: self.document.announcements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (GuildStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = GuildStore::open(dir.path().join("guild.json"));
        (store, dir)
    }

    #[test]
    fn open_does_not_create_the_file() {
        let (store, _dir) = store();
        assert!(!store.path().exists());
    }

    #[test]
    fn every_mutation_writes_the_file() {
        let (mut store, _dir) = store();
        store.add_announcement("Hello").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn blank_member_name_is_rejected_without_saving() {
        let (mut store, _dir) = store();
        let err = store.add_member("   ", "Rogue", 1, "").unwrap_err();
        assert!(matches!(err, GuildError::InvalidInput(_)));
        assert_eq!(store.members().len(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let (mut store, _dir) = store();
        store.add_member("Ayla", "Bard", 1, "").unwrap();
        store.add_member("Brom", "Fighter", 2, "").unwrap();
        store.add_member("AYLA", "Sorcerer", 4, "").unwrap();

        let names: Vec<&str> = store.members().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["AYLA", "Brom"]);
        assert_eq!(store.member("ayla").unwrap().class, "Sorcerer");
    }

    #[test]
    fn log_text_stays_on_one_line() {
        let shown = LogText("Raid tonight!\nBring potions\tand rope").to_string();
        assert_eq!(shown, "Raid tonight!\\nBring potions\\tand rope");

        let long = "a".repeat(500);
        let shown = LogText(&long).to_string();
        assert_eq!(shown.chars().count(), LOG_PREVIEW + 1);
        assert!(shown.ends_with('…'));
        let exact = "b".repeat(LOG_PREVIEW);
        assert_eq!(LogText(&exact).to_string(), exact);
    }

    #[test]
    fn gold_has_no_floor() {
        let (mut store, _dir) = store();
        let report = store.update_resources(Some(-25), None, None).unwrap();
        assert_eq!(report.gold_total, -25);
        assert!(report.item.is_none());
    }

    #[test]
    fn item_name_without_quantity_is_ignored() {
        let (mut store, _dir) = store();
        let report = store.update_resources(None, Some("Rope"), None).unwrap();
        assert!(report.item.is_none());
        assert!(store.resources().items.is_empty());
    }

    #[test]
    fn summary_counts_quests_by_status() {
        let (mut store, _dir) = store();
        store.add_quest("A", "", "", "").unwrap();
        store.add_quest("B", "", "", "").unwrap();
        store.complete_quest("b").unwrap();
        let summary = store.summary();
        assert_eq!(summary.available_quests, 1);
        assert_eq!(summary.completed_quests, 1);
        assert_eq!(summary.members, 0);
    }
}
