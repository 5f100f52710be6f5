//! Plain-text listings shared by the scripted commands and the menu.

use std::io::{self, Write};

use crate::guild::{GuildError, GuildStore, ItemOutcome, ResourceReport};

pub fn print_members<W: Write>(store: &GuildStore, out: &mut W) -> io::Result<()> {
    if store.members().len() == 0 {
        return writeln!(out, "No guild members found.");
    }
    writeln!(out, "\n=== Guild Members ===")?;
    for member in store.members() {
        let status = if member.is_active() { "[ACTIVE]" } else { "[INACTIVE]" };
        writeln!(
            out,
            "{} {} - Level {} {}",
            status, member.name, member.level, member.class
        )?;
        if !member.description.is_empty() {
            writeln!(out, "   {}", member.description)?;
        }
    }
    Ok(())
}

pub fn print_quests<W: Write>(store: &GuildStore, out: &mut W) -> io::Result<()> {
    if store.quests().len() == 0 {
        return writeln!(out, "No quests found.");
    }
    writeln!(out, "\n=== Guild Quests ===")?;
    for quest in store.quests() {
        let status = if quest.is_completed() { "[COMPLETED]" } else { "[AVAILABLE]" };
        writeln!(out, "{} {} ({})", status, quest.title, quest.difficulty)?;
        writeln!(out, "   {}", quest.description)?;
        if !quest.reward.is_empty() {
            writeln!(out, "   Reward: {}", quest.reward)?;
        }
    }
    Ok(())
}

pub fn print_resources<W: Write>(store: &GuildStore, out: &mut W) -> io::Result<()> {
    let resources = store.resources();
    writeln!(out, "Gold: {}", resources.gold)?;
    if resources.items.is_empty() {
        return writeln!(out, "\nInventory: Empty");
    }
    writeln!(out, "\nInventory:")?;
    for (name, quantity) in &resources.items {
        writeln!(out, "   {}: {}", name, quantity)?;
    }
    Ok(())
}

pub fn print_announcements<W: Write>(store: &GuildStore, out: &mut W) -> io::Result<()> {
    if store.announcements().len() == 0 {
        return writeln!(out, "No announcements yet.");
    }
    for (i, announcement) in store.announcements().enumerate() {
        writeln!(out, "{}. {}", i + 1, announcement.message)?;
        writeln!(out, "   Date: {}\n", announcement.date.to_rfc3339())?;
    }
    Ok(())
}

/// Guild status overview.
pub fn print_status<W: Write>(store: &GuildStore, out: &mut W) -> io::Result<()> {
    let summary = store.summary();
    writeln!(out, "Guild: {}", store.guild_name())?;
    writeln!(out, "Description: {}\n", store.guild_description())?;
    writeln!(out, "Members: {}", summary.members)?;
    for member in store.members() {
        writeln!(
            out,
            "   - {} (Level {} {})",
            member.name, member.level, member.class
        )?;
    }
    writeln!(
        out,
        "\nQuests: {} available, {} completed\n",
        summary.available_quests, summary.completed_quests
    )?;
    writeln!(out, "Gold: {}", summary.gold)?;
    writeln!(out, "Items: {} different types\n", summary.item_types)?;
    writeln!(out, "Recent Announcements: {}", summary.announcements)
}

pub fn print_resource_report<W: Write>(report: &ResourceReport, out: &mut W) -> io::Result<()> {
    if let Some(delta) = report.gold_delta {
        let action = if delta > 0 { "Added" } else { "Spent" };
        writeln!(
            out,
            "[+] {} {} gold. Current total: {}",
            action,
            delta.unsigned_abs(),
            report.gold_total
        )?;
    }
    match &report.item {
        Some(ItemOutcome::Updated { name, quantity }) => {
            writeln!(out, "[+] Updated {}: {}", name, quantity)
        }
        Some(ItemOutcome::Removed { name }) => writeln!(out, "[+] Removed {} from inventory", name),
        None => Ok(()),
    }
}

/// One-line, operator-facing rendering of a store error.
pub fn print_error<W: Write>(err: &GuildError, out: &mut W) -> io::Result<()> {
    match err {
        GuildError::InvalidInput(reason) => writeln!(out, "[-] {}", capitalize(reason)),
        GuildError::NotFound { kind, name } => writeln!(out, "[-] {} '{}' not found.", kind, name),
        GuildError::Persistence(e) => writeln!(out, "Error saving data: {}", e),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
