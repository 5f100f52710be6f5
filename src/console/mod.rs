//! # Console Front-Ends
//!
//! Two ways to edit the guild from a terminal, both working only through
//! [`GuildStore`](crate::guild::GuildStore):
//!
//! - [`dispatch`] - one scripted command per invocation
//!   (`guildbook quest complete "Slay the Dragon"`)
//! - [`menu`] - a numbered, looping menu for people who would rather not
//!   remember flags (`guildbook menu`)
//!
//! [`report`] holds the text listings both of them print.

pub mod dispatch;
pub mod menu;
pub mod report;

pub use dispatch::{dispatch, GuildCommand, MemberAction, QuestAction};
pub use menu::GuildMenu;
