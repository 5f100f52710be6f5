//! Static guild page.
//!
//! [`render_page`] turns a [`Document`] into one self-contained HTML file
//! (inline CSS, no scripts) that can be uploaded anywhere or opened locally.
//! It makes no decisions beyond which sections are empty and putting open
//! quests before finished ones.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::guild::types::{Announcement, Document, Member, Quest, Resources};

const STYLESHEET: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(160deg, #22313f 0%, #34495e 100%);
            color: #2c3e50;
            min-height: 100vh;
            padding: 24px;
        }
        .page { max-width: 1100px; margin: 0 auto; background: #fdfcf8; border-radius: 12px; overflow: hidden; }
        header { background: #5b3f8c; color: #fff; padding: 36px; text-align: center; }
        header h1 { font-size: 2.6em; margin-bottom: 8px; }
        header p { font-size: 1.15em; opacity: 0.9; }
        main { padding: 32px; }
        section { margin-bottom: 32px; background: #fff; border-radius: 8px; padding: 24px; border-left: 5px solid #5b3f8c; box-shadow: 0 3px 10px rgba(0,0,0,0.06); }
        section h2 { color: #5b3f8c; font-size: 1.7em; margin-bottom: 16px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
        .member { background: #f1eef8; border-radius: 8px; padding: 16px; }
        .member-name { font-size: 1.2em; font-weight: bold; }
        .member-class { color: #5b3f8c; font-weight: 600; margin: 4px 0 8px; }
        .member-description { color: #666; font-style: italic; }
        .status-active { color: #2e8b57; }
        .status-inactive { color: #c0392b; }
        .quest { background: #f7f7f7; border-radius: 8px; padding: 16px; margin-bottom: 12px; border-left: 4px solid #2e8b57; }
        .quest.completed { border-left-color: #7f8c8d; opacity: 0.7; }
        .quest-title { font-size: 1.15em; font-weight: bold; margin-bottom: 6px; }
        .difficulty { display: inline-block; padding: 3px 10px; border-radius: 12px; font-size: 0.8em; font-weight: bold; margin-bottom: 8px; background: #ecf0f1; }
        .difficulty-easy { background: #d4edda; color: #155724; }
        .difficulty-normal { background: #fff3cd; color: #856404; }
        .difficulty-hard { background: #f8d7da; color: #721c24; }
        .difficulty-legendary { background: #d1ecf1; color: #0c5460; }
        .quest-description { color: #555; margin-bottom: 6px; }
        .quest-reward { color: #2e8b57; font-weight: 600; }
        .resource { background: #fbeee0; border-radius: 8px; padding: 16px; text-align: center; }
        .resource-value { font-size: 1.8em; font-weight: bold; }
        .resource-label { color: #666; margin-top: 4px; }
        .announcement { background: #eaf2fb; border-left: 4px solid #2980b9; border-radius: 4px; padding: 12px; margin-bottom: 12px; }
        .announcement-date { color: #666; font-size: 0.9em; margin-bottom: 4px; }
        .empty-state { text-align: center; color: #777; font-style: italic; padding: 28px; }
        footer { background: #f4f4f4; padding: 16px; text-align: center; color: #777; border-top: 1px solid #e5e5e5; }
        @media (max-width: 720px) { header h1 { font-size: 1.8em; } main { padding: 16px; } section { padding: 16px; } }
"#;

/// Render the whole guild page.
pub fn render_page(document: &Document) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let name = escape_html(&document.guild_name);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{name} - Guild Portal</title>\n    <style>{STYLESHEET}    </style>\n</head>\n<body>\n\
         <div class=\"page\">\n<header>\n    <h1>\u{2694}\u{fe0f} {name}</h1>\n    <p>{description}</p>\n</header>\n<main>\n",
        description = escape_html(&document.guild_description),
    );
    html.push_str(&announcements_section(&document.announcements));
    html.push_str(&members_section(document.members.values()));
    html.push_str(&quests_section(document.quests.values()));
    html.push_str(&resources_section(&document.resources));
    let _ = write!(
        html,
        "</main>\n<footer>\n    <p>Last updated: {}</p>\n    <p>Generated by Guildbook</p>\n</footer>\n</div>\n</body>\n</html>\n",
        format_datetime(&document.last_updated)
    );
    html
}

/// Render the page and write it to `path`, creating parent directories.
pub fn write_page(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let html = render_page(document);
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote guild page to {}", path.display());
    Ok(())
}

/// `May 04, 2024 at 07:30 PM`
pub fn format_datetime(when: &DateTime<Utc>) -> String {
    when.format("%B %d, %Y at %I:%M %p").to_string()
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn section(title: &str, body: &str) -> String {
    format!("<section>\n    <h2>{}</h2>\n{}</section>\n", title, body)
}

fn empty_state(message: &str) -> String {
    format!("    <div class=\"empty-state\">{}</div>\n", message)
}

fn announcements_section(announcements: &[Announcement]) -> String {
    const TITLE: &str = "\u{1f4e2} Guild Announcements";
    if announcements.is_empty() {
        return section(TITLE, &empty_state("No announcements at this time."));
    }
    let mut body = String::new();
    for announcement in announcements {
        let _ = write!(
            body,
            "    <div class=\"announcement\">\n        <div class=\"announcement-date\">{}</div>\n        \
             <div class=\"announcement-message\">{}</div>\n    </div>\n",
            format_datetime(&announcement.date),
            escape_html(&announcement.message)
        );
    }
    section(TITLE, &body)
}

fn members_section<'a>(members: impl ExactSizeIterator<Item = &'a Member>) -> String {
    const TITLE: &str = "\u{1f465} Guild Members";
    if members.len() == 0 {
        return section(
            TITLE,
            &empty_state("No guild members yet. The adventure awaits!"),
        );
    }
    let mut body = String::from("    <div class=\"grid\">\n");
    for member in members {
        let (status_class, icon) = if member.is_active() {
            ("status-active", "\u{1f7e2}")
        } else {
            ("status-inactive", "\u{1f534}")
        };
        let class = if member.class.is_empty() {
            "Adventurer"
        } else {
            member.class.as_str()
        };
        let _ = write!(
            body,
            "        <div class=\"member\">\n            <div class=\"member-name\"><span class=\"{}\">{}</span> {}</div>\n            \
             <div class=\"member-class\">Level {} {}</div>\n",
            status_class,
            icon,
            escape_html(&member.name),
            member.level,
            escape_html(class)
        );
        if !member.description.is_empty() {
            let _ = writeln!(
                body,
                "            <div class=\"member-description\">{}</div>",
                escape_html(&member.description)
            );
        }
        body.push_str("        </div>\n");
    }
    body.push_str("    </div>\n");
    section(TITLE, &body)
}

fn quests_section<'a>(quests: impl Iterator<Item = &'a Quest> + Clone) -> String {
    const TITLE: &str = "\u{1f4cb} Guild Quests";
    let mut body = String::new();
    for quest in quests.clone().filter(|q| !q.is_completed()) {
        body.push_str(&quest_entry(quest));
    }
    for quest in quests.filter(|q| q.is_completed()) {
        body.push_str(&quest_entry(quest));
    }
    if body.is_empty() {
        return section(
            TITLE,
            &empty_state("No quests available. Check back later for new adventures!"),
        );
    }
    section(TITLE, &body)
}

fn quest_entry(quest: &Quest) -> String {
    let (item_class, title) = if quest.is_completed() {
        (
            "quest completed",
            format!("\u{2705} {} (Completed)", escape_html(&quest.title)),
        )
    } else {
        ("quest", format!("\u{1f4cb} {}", escape_html(&quest.title)))
    };
    let mut entry = format!(
        "    <div class=\"{}\">\n        <div class=\"quest-title\">{}</div>\n        \
         <span class=\"difficulty {}\">{}</span>\n        <div class=\"quest-description\">{}</div>\n",
        item_class,
        title,
        difficulty_class(&quest.difficulty),
        escape_html(&quest.difficulty),
        escape_html(&quest.description)
    );
    if !quest.reward.is_empty() {
        let _ = writeln!(
            entry,
            "        <div class=\"quest-reward\">\u{1f4b0} Reward: {}</div>",
            escape_html(&quest.reward)
        );
    }
    entry.push_str("    </div>\n");
    entry
}

/// CSS class for a free-text difficulty: lowercase, anything but
/// alphanumerics turned into `-`.
fn difficulty_class(difficulty: &str) -> String {
    let slug: String = difficulty
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("difficulty-{}", slug)
}

fn resources_section(resources: &Resources) -> String {
    let mut body = String::from("    <div class=\"grid\">\n");
    let _ = write!(
        body,
        "        <div class=\"resource\">\n            <div class=\"resource-value\">\u{1f4b0} {}</div>\n            \
         <div class=\"resource-label\">Gold</div>\n        </div>\n",
        resources.gold
    );
    for (name, quantity) in &resources.items {
        let _ = write!(
            body,
            "        <div class=\"resource\">\n            <div class=\"resource-value\">\u{1f4e6} {}</div>\n            \
             <div class=\"resource-label\">{}</div>\n        </div>\n",
            quantity,
            escape_html(name)
        );
    }
    body.push_str("    </div>\n");
    section("\u{1f48e} Guild Resources", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_dates_for_humans() {
        let when = Utc.with_ymd_and_hms(2024, 5, 4, 19, 30, 0).unwrap();
        assert_eq!(format_datetime(&when), "May 04, 2024 at 07:30 PM");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn difficulty_class_is_css_safe() {
        assert_eq!(difficulty_class("Hard"), "difficulty-hard");
        assert_eq!(difficulty_class("Very Hard!"), "difficulty-very-hard-");
    }
}
