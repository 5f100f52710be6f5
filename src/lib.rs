//! # Guildbook - Roster, Quest Board and Treasury for a Hobby Guild
//!
//! Guildbook keeps everything about a guild in one JSON file: who the members
//! are, which quests are open or done, how much gold and gear the group holds,
//! and the last ten announcements. It can be edited with one-shot commands or
//! a numbered menu, and published as a static HTML page for the party.
//!
//! ## Features
//!
//! - **Record Store**: members and quests keyed by a slug of their name, with
//!   insert-or-replace semantics; gold and inventory ledger; capped
//!   announcement board.
//! - **Whole-Document Persistence**: every change rewrites the file through a
//!   locked temp-file-and-rename, so the file on disk always parses.
//! - **Forgiving Load**: a missing or corrupt file starts a fresh guild
//!   instead of failing.
//! - **Static Web Page**: self-contained HTML with inline CSS.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guildbook::guild::GuildStore;
//!
//! fn main() -> Result<(), guildbook::guild::GuildError> {
//!     let mut store = GuildStore::open("guild_data.json");
//!     store.add_member("Zara", "Wizard", 5, "")?;
//!     store.add_quest("Slay the Dragon", "Kill it", "100 gold", "Hard")?;
//!     store.update_resources(Some(100), None, None)?;
//!     store.complete_quest("Slay the Dragon")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`guild`] - data model, errors and the [`guild::GuildStore`]
//! - [`storage`] - loading and saving the JSON document
//! - [`web`] - HTML page rendering
//! - [`console`] - scripted command dispatcher and interactive menu
//! - [`config`] - TOML configuration
//! - [`validation`] - key derivation and input checks
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────┐
//! │ console (cmd / menu) │   │     web      │
//! └──────────────────────┘   └──────────────┘
//!            │                      │ (read-only)
//! ┌─────────────────────────────────────────┐
//! │           guild::GuildStore             │
//! └─────────────────────────────────────────┘
//!            │
//! ┌─────────────────────────────────────────┐
//! │     storage (guild_data.json)           │
//! └─────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod guild;
pub mod storage;
pub mod validation;
pub mod web;
