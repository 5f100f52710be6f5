//! Interactive, numbered-menu front-end (`guildbook menu`).
//!
//! The menu reads lines from any `BufRead` and writes to any `Write`, so a
//! whole session can be scripted in tests. Running out of input ends the
//! session the same way choosing "Exit" does.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use crate::console::report::{
    print_announcements, print_error, print_members, print_quests, print_resource_report,
    print_resources, print_status,
};
use crate::guild::{GuildStore, DEFAULT_LEVEL, DIFFICULTY_PRESETS};
use crate::validation::ensure_html_extension;
use crate::web::write_page;

const RULE: &str = "==================================================";

#[derive(Debug, Error)]
#[error("end of input")]
struct EndOfInput;

pub struct GuildMenu<'a, R, W> {
    store: &'a mut GuildStore,
    input: R,
    output: W,
    default_output: String,
    pauses: bool,
}

impl<'a, R: BufRead, W: Write> GuildMenu<'a, R, W> {
    pub fn new(store: &'a mut GuildStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            default_output: "guild_page.html".to_string(),
            pauses: false,
        }
    }

    /// Page file offered when the operator just presses Enter.
    pub fn with_default_output(mut self, file_name: &str) -> Self {
        self.default_output = file_name.to_string();
        self
    }

    /// Clear the screen between menus and wait for Enter after each action.
    /// Meant for a real terminal; scripted sessions leave it off.
    pub fn with_pauses(mut self, pauses: bool) -> Self {
        self.pauses = pauses;
        self
    }

    /// Run until the operator exits or input runs out.
    pub fn run(mut self) -> Result<()> {
        match self.main_loop() {
            Err(e) if e.is::<EndOfInput>() => {
                writeln!(self.output, "\n\nGoodbye!")?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            self.clear_screen()?;
            writeln!(self.output, "{}", RULE)?;
            writeln!(self.output, "    GUILDBOOK    ")?;
            writeln!(self.output, "{}", RULE)?;
            writeln!(self.output, "Guild: {}", self.store.guild_name())?;
            writeln!(self.output, "Description: {}", self.store.guild_description())?;
            writeln!(self.output, "{}\n", RULE)?;
            writeln!(self.output, "1. Manage Guild Members")?;
            writeln!(self.output, "2. Manage Quests")?;
            writeln!(self.output, "3. Manage Resources")?;
            writeln!(self.output, "4. Guild Announcements")?;
            writeln!(self.output, "5. Guild Settings")?;
            writeln!(self.output, "6. Generate Web Page")?;
            writeln!(self.output, "7. View Guild Status")?;
            writeln!(self.output, "8. Exit\n")?;

            match self.choice(8)? {
                1 => self.members_menu()?,
                2 => self.quests_menu()?,
                3 => self.resources_menu()?,
                4 => self.announcements_menu()?,
                5 => self.settings_menu()?,
                6 => self.generate_webpage()?,
                7 => self.view_status()?,
                _ => {
                    writeln!(self.output, "\nThanks for using Guildbook!")?;
                    return Ok(());
                }
            }
        }
    }

    // ---- input helpers ----

    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.read_line()
    }

    /// Ask until a number in `1..=max` is entered.
    fn choice(&mut self, max: usize) -> Result<usize> {
        loop {
            let raw = self.prompt(&format!("Choose an option (1-{}): ", max))?;
            match raw.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(n),
                Ok(_) => writeln!(self.output, "Please enter a number between 1 and {}", max)?,
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    /// One-shot numbered pick from a list; `None` after telling the operator why.
    fn pick(&mut self, label: &str, len: usize) -> Result<Option<usize>> {
        let raw = self.prompt(label)?;
        match raw.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(Some(n - 1)),
            Ok(_) => {
                writeln!(self.output, "Invalid selection!")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.output, "Please enter a valid number!")?;
                Ok(None)
            }
        }
    }

    fn pause(&mut self) -> Result<()> {
        if self.pauses {
            self.prompt("\nPress Enter to continue...")?;
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.pauses {
            write!(self.output, "\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    fn submenu_header(&mut self, title: &str, options: &[&str]) -> Result<()> {
        self.clear_screen()?;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}\n", "=".repeat(title.len()))?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    // ---- members ----

    fn members_menu(&mut self) -> Result<()> {
        loop {
            self.submenu_header(
                "GUILD MEMBERS MANAGEMENT",
                &["Add New Member", "Remove Member", "List All Members", "Back to Main Menu"],
            )?;
            match self.choice(4)? {
                1 => self.add_member()?,
                2 => self.remove_member()?,
                3 => {
                    writeln!(self.output, "\n--- Guild Members ---")?;
                    print_members(self.store, &mut self.output)?;
                    self.pause()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn add_member(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Add New Member ---")?;
        let name = self.prompt("Member name: ")?;
        if name.is_empty() {
            writeln!(self.output, "Name cannot be empty!")?;
            return self.pause();
        }
        let mut class = self.prompt("Character class (e.g., Wizard, Fighter, Rogue): ")?;
        if class.is_empty() {
            class = "Adventurer".to_string();
        }
        let level = self
            .prompt(&format!("Level (default {}): ", DEFAULT_LEVEL))?
            .parse::<i64>()
            .unwrap_or(DEFAULT_LEVEL);
        let description = self.prompt("Description (optional): ")?;

        match self.store.add_member(&name, &class, level, &description) {
            Ok(member) => writeln!(
                self.output,
                "[+] Added {} (Level {} {}) to the guild!",
                member.name, member.level, member.class
            )?,
            Err(e) => print_error(&e, &mut self.output)?,
        }
        self.pause()
    }

    fn remove_member(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Remove Member ---")?;
        let names: Vec<String> = self.store.members().map(|m| m.name.clone()).collect();
        if names.is_empty() {
            writeln!(self.output, "No members to remove!")?;
            return self.pause();
        }
        writeln!(self.output, "\nCurrent members:")?;
        for (i, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }
        if let Some(index) = self.pick("\nSelect member to remove (number): ", names.len())? {
            let name = &names[index];
            let confirm = self.prompt(&format!("Remove {}? (y/N): ", name))?;
            if confirm.eq_ignore_ascii_case("y") {
                match self.store.remove_member(name) {
                    Ok(removed) => writeln!(self.output, "[+] Removed {} from the guild.", removed)?,
                    Err(e) => print_error(&e, &mut self.output)?,
                }
            } else {
                writeln!(self.output, "Cancelled.")?;
            }
        }
        self.pause()
    }

    // ---- quests ----

    fn quests_menu(&mut self) -> Result<()> {
        loop {
            self.submenu_header(
                "QUEST MANAGEMENT",
                &["Add New Quest", "Complete Quest", "List All Quests", "Back to Main Menu"],
            )?;
            match self.choice(4)? {
                1 => self.add_quest()?,
                2 => self.complete_quest()?,
                3 => {
                    writeln!(self.output, "\n--- Guild Quests ---")?;
                    print_quests(self.store, &mut self.output)?;
                    self.pause()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn add_quest(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Add New Quest ---")?;
        let title = self.prompt("Quest title: ")?;
        if title.is_empty() {
            writeln!(self.output, "Title cannot be empty!")?;
            return self.pause();
        }
        let mut description = self.prompt("Quest description: ")?;
        if description.is_empty() {
            description = "No description provided".to_string();
        }
        let reward = self.prompt("Reward (optional): ")?;

        writeln!(self.output, "\nDifficulty levels:")?;
        for (i, preset) in DIFFICULTY_PRESETS.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, preset)?;
        }
        let difficulty = DIFFICULTY_PRESETS[self.choice(DIFFICULTY_PRESETS.len())? - 1];

        match self.store.add_quest(&title, &description, &reward, difficulty) {
            Ok(quest) => writeln!(self.output, "[+] Added quest: {}", quest.title)?,
            Err(e) => print_error(&e, &mut self.output)?,
        }
        self.pause()
    }

    fn complete_quest(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Complete Quest ---")?;
        let titles: Vec<String> = self
            .store
            .available_quests()
            .map(|q| q.title.clone())
            .collect();
        if titles.is_empty() {
            writeln!(self.output, "No available quests to complete!")?;
            return self.pause();
        }
        writeln!(self.output, "\nAvailable quests:")?;
        for (i, title) in titles.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, title)?;
        }
        if let Some(index) = self.pick("\nSelect quest to complete (number): ", titles.len())? {
            match self.store.complete_quest(&titles[index]) {
                Ok(quest) => writeln!(
                    self.output,
                    "[+] Quest '{}' marked as completed!",
                    quest.title
                )?,
                Err(e) => print_error(&e, &mut self.output)?,
            }
        }
        self.pause()
    }

    // ---- resources ----

    fn resources_menu(&mut self) -> Result<()> {
        loop {
            self.clear_screen()?;
            writeln!(self.output, "RESOURCE MANAGEMENT")?;
            writeln!(self.output, "===================")?;
            writeln!(self.output, "Current Gold: {}\n", self.store.resources().gold)?;
            for (i, option) in [
                "Add/Remove Gold",
                "Add Item to Inventory",
                "Remove Item from Inventory",
                "View All Resources",
                "Back to Main Menu",
            ]
            .iter()
            .enumerate()
            {
                writeln!(self.output, "{}. {}", i + 1, option)?;
            }
            writeln!(self.output)?;
            match self.choice(5)? {
                1 => self.manage_gold()?,
                2 => self.add_item()?,
                3 => self.remove_item()?,
                4 => {
                    writeln!(self.output, "\n--- Guild Resources ---")?;
                    print_resources(self.store, &mut self.output)?;
                    self.pause()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn manage_gold(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Manage Gold ---")?;
        writeln!(self.output, "Current gold: {}", self.store.resources().gold)?;
        let raw = self.prompt("Enter amount (positive to add, negative to remove): ")?;
        match raw.parse::<i64>() {
            Ok(amount) => self.apply_resources(Some(amount), None, None)?,
            Err(_) => writeln!(self.output, "Please enter a valid number!")?,
        }
        self.pause()
    }

    fn add_item(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Add Item ---")?;
        let name = self.prompt("Item name: ")?;
        if name.is_empty() {
            writeln!(self.output, "Item name cannot be empty!")?;
            return self.pause();
        }
        let raw = self.prompt("Quantity: ")?;
        let quantity = if raw.is_empty() { Ok(1) } else { raw.parse::<i64>() };
        match quantity {
            Ok(quantity) => self.apply_resources(None, Some(name.as_str()), Some(quantity))?,
            Err(_) => writeln!(self.output, "Please enter a valid number!")?,
        }
        self.pause()
    }

    fn remove_item(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Remove Item ---")?;
        let items: Vec<(String, i64)> = self
            .store
            .resources()
            .items
            .iter()
            .map(|(name, qty)| (name.clone(), *qty))
            .collect();
        if items.is_empty() {
            writeln!(self.output, "No items in inventory!")?;
            return self.pause();
        }
        writeln!(self.output, "\nCurrent inventory:")?;
        for (i, (name, qty)) in items.iter().enumerate() {
            writeln!(self.output, "{}. {} (x{})", i + 1, name, qty)?;
        }
        if let Some(index) = self.pick("\nSelect item to remove (number): ", items.len())? {
            let (name, current) = &items[index];
            let raw = self.prompt(&format!("Remove how many {}? (max {}): ", name, current))?;
            match raw.parse::<i64>() {
                Ok(n) if n > 0 => self.apply_resources(None, Some(name.as_str()), Some(-n))?,
                Ok(_) => {}
                Err(_) => writeln!(self.output, "Please enter a valid number!")?,
            }
        }
        self.pause()
    }

    fn apply_resources(
        &mut self,
        gold: Option<i64>,
        item: Option<&str>,
        quantity: Option<i64>,
    ) -> Result<()> {
        match self.store.update_resources(gold, item, quantity) {
            Ok(report) => print_resource_report(&report, &mut self.output)?,
            Err(e) => print_error(&e, &mut self.output)?,
        }
        Ok(())
    }

    // ---- announcements ----

    fn announcements_menu(&mut self) -> Result<()> {
        loop {
            self.submenu_header(
                "GUILD ANNOUNCEMENTS",
                &["Add New Announcement", "View All Announcements", "Back to Main Menu"],
            )?;
            match self.choice(3)? {
                1 => {
                    writeln!(self.output, "\n--- Add Announcement ---")?;
                    let message = self.prompt("Announcement message: ")?;
                    if message.is_empty() {
                        writeln!(self.output, "Message cannot be empty!")?;
                    } else {
                        match self.store.add_announcement(&message) {
                            Ok(a) => writeln!(self.output, "[+] Added announcement: {}", a.message)?,
                            Err(e) => print_error(&e, &mut self.output)?,
                        }
                    }
                    self.pause()?;
                }
                2 => {
                    writeln!(self.output, "\n--- Guild Announcements ---")?;
                    print_announcements(self.store, &mut self.output)?;
                    self.pause()?;
                }
                _ => return Ok(()),
            }
        }
    }

    // ---- settings ----

    fn settings_menu(&mut self) -> Result<()> {
        loop {
            self.submenu_header(
                "GUILD SETTINGS",
                &["Change Guild Name", "Change Guild Description", "Back to Main Menu"],
            )?;
            match self.choice(3)? {
                1 => {
                    writeln!(self.output, "\n--- Change Guild Name ---")?;
                    writeln!(self.output, "Current name: {}", self.store.guild_name())?;
                    let name = self.prompt("New guild name: ")?;
                    if name.is_empty() {
                        writeln!(self.output, "Name cannot be empty!")?;
                    } else {
                        match self.store.set_guild_info(Some(name.as_str()), None) {
                            Ok(_) => writeln!(self.output, "[+] Guild name set to: {}", name)?,
                            Err(e) => print_error(&e, &mut self.output)?,
                        }
                    }
                    self.pause()?;
                }
                2 => {
                    writeln!(self.output, "\n--- Change Guild Description ---")?;
                    writeln!(
                        self.output,
                        "Current description: {}",
                        self.store.guild_description()
                    )?;
                    let description = self.prompt("New guild description: ")?;
                    if description.is_empty() {
                        writeln!(self.output, "Description cannot be empty!")?;
                    } else {
                        match self.store.set_guild_info(None, Some(description.as_str())) {
                            Ok(_) => writeln!(self.output, "[+] Guild description updated")?,
                            Err(e) => print_error(&e, &mut self.output)?,
                        }
                    }
                    self.pause()?;
                }
                _ => return Ok(()),
            }
        }
    }

    // ---- web page / status ----

    fn generate_webpage(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Generate Web Page ---")?;
        let raw = self.prompt(&format!(
            "Web page filename (default: {}): ",
            self.default_output
        ))?;
        let file_name = if raw.is_empty() {
            self.default_output.clone()
        } else {
            ensure_html_extension(&raw)
        };
        match write_page(self.store.document(), Path::new(&file_name)) {
            Ok(()) => {
                writeln!(self.output, "[+] Generated webpage: {}", file_name)?;
                writeln!(self.output, "\nTo share this page:")?;
                writeln!(self.output, "1. Upload the HTML file to any static web host")?;
                writeln!(self.output, "2. Or serve the directory with any local web server")?;
                writeln!(self.output, "3. Or send the file directly to your party members")?;
            }
            Err(e) => writeln!(self.output, "[-] Could not write web page: {:#}", e)?,
        }
        self.pause()
    }

    fn view_status(&mut self) -> Result<()> {
        self.clear_screen()?;
        writeln!(self.output, "GUILD STATUS OVERVIEW")?;
        writeln!(self.output, "=====================")?;
        print_status(self.store, &mut self.output)?;
        self.pause()
    }
}
