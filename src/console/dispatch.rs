//! One-shot scripted commands (`guildbook member add Zara Wizard --level 5`).
//!
//! The clap definitions live here rather than in `main.rs` so tests can build
//! a [`GuildCommand`] directly and run it against a throwaway store.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::console::report::{
    print_error, print_members, print_quests, print_resource_report, print_status,
};
use crate::guild::{GuildStore, DEFAULT_DIFFICULTY, DEFAULT_LEVEL};
use crate::web::write_page;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GuildCommand {
    /// Manage guild members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Manage quests
    Quest {
        #[command(subcommand)]
        action: QuestAction,
    },
    /// Adjust gold and inventory
    Resource {
        /// Gold to add (negative to spend)
        #[arg(long, allow_negative_numbers = true)]
        gold: Option<i64>,
        /// Item name
        #[arg(long)]
        item: Option<String>,
        /// Quantity to add to the item (negative to remove)
        #[arg(long, allow_negative_numbers = true)]
        quantity: Option<i64>,
    },
    /// Post an announcement
    Announce {
        /// Announcement message
        message: String,
    },
    /// Set guild name and/or description
    Info {
        /// Guild name
        #[arg(long)]
        name: Option<String>,
        /// Guild description
        #[arg(long)]
        description: Option<String>,
    },
    /// Generate the guild web page
    Web {
        /// Output HTML file (defaults to the configured web.output_file)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show a guild status overview
    Status,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MemberAction {
    /// Add a new member (or replace one with the same name)
    Add {
        /// Member name
        name: String,
        /// Character class
        class: String,
        /// Character level
        #[arg(long, default_value_t = DEFAULT_LEVEL, allow_negative_numbers = true)]
        level: i64,
        /// Member description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a member
    Remove {
        /// Member name
        name: String,
    },
    /// List all members
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QuestAction {
    /// Add a new quest (or replace one with the same title)
    Add {
        /// Quest title
        title: String,
        /// Quest description
        description: String,
        /// Quest reward
        #[arg(long, default_value = "")]
        reward: String,
        /// Quest difficulty
        #[arg(long, default_value = DEFAULT_DIFFICULTY)]
        difficulty: String,
    },
    /// Mark a quest as completed
    Complete {
        /// Quest title
        title: String,
    },
    /// List all quests
    List,
}

/// Run one command against `store`, writing operator feedback to `out`.
///
/// Store failures (unknown member, blank text, failed save) are printed and
/// swallowed; only terminal and web-page I/O errors are returned.
pub fn dispatch<W: Write>(
    store: &mut GuildStore,
    command: GuildCommand,
    default_output: &str,
    out: &mut W,
) -> Result<()> {
    match command {
        GuildCommand::Member { action } => match action {
            MemberAction::Add {
                name,
                class,
                level,
                description,
            } => match store.add_member(&name, &class, level, &description) {
                Ok(member) => writeln!(
                    out,
                    "[+] Added {} (Level {} {}) to the guild!",
                    member.name, member.level, member.class
                )?,
                Err(e) => print_error(&e, out)?,
            },
            MemberAction::Remove { name } => match store.remove_member(&name) {
                Ok(removed) => writeln!(out, "[+] Removed {} from the guild.", removed)?,
                Err(e) => print_error(&e, out)?,
            },
            MemberAction::List => print_members(store, out)?,
        },
        GuildCommand::Quest { action } => match action {
            QuestAction::Add {
                title,
                description,
                reward,
                difficulty,
            } => match store.add_quest(&title, &description, &reward, &difficulty) {
                Ok(quest) => writeln!(out, "[+] Added quest: {}", quest.title)?,
                Err(e) => print_error(&e, out)?,
            },
            QuestAction::Complete { title } => match store.complete_quest(&title) {
                Ok(quest) => writeln!(out, "[+] Quest '{}' marked as completed!", quest.title)?,
                Err(e) => print_error(&e, out)?,
            },
            QuestAction::List => print_quests(store, out)?,
        },
        GuildCommand::Resource {
            gold,
            item,
            quantity,
        } => match store.update_resources(gold, item.as_deref(), quantity) {
            Ok(changes) => print_resource_report(&changes, out)?,
            Err(e) => print_error(&e, out)?,
        },
        GuildCommand::Announce { message } => match store.add_announcement(&message) {
            Ok(announcement) => writeln!(out, "[+] Added announcement: {}", announcement.message)?,
            Err(e) => print_error(&e, out)?,
        },
        GuildCommand::Info { name, description } => {
            match store.set_guild_info(name.as_deref(), description.as_deref()) {
                Ok(update) => {
                    if update.name_changed {
                        writeln!(out, "[+] Guild name set to: {}", store.guild_name())?;
                    }
                    if update.description_changed {
                        writeln!(out, "[+] Guild description updated")?;
                    }
                }
                Err(e) => print_error(&e, out)?,
            }
        }
        GuildCommand::Web { output } => {
            let output = output.unwrap_or_else(|| default_output.to_string());
            write_page(store.document(), Path::new(&output))?;
            writeln!(out, "[+] Generated webpage: {}", output)?;
        }
        GuildCommand::Status => print_status(store, out)?,
    }
    Ok(())
}
