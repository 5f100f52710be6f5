use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder name used until the guild is given one.
pub const DEFAULT_GUILD_NAME: &str = "The Unnamed Guild";
/// Placeholder description used until the guild is given one.
pub const DEFAULT_GUILD_DESCRIPTION: &str = "A brave band of adventurers";
/// Starting level for new members.
pub const DEFAULT_LEVEL: i64 = 1;
/// Difficulty assigned to quests added without one.
pub const DEFAULT_DIFFICULTY: &str = "Normal";
/// Difficulty choices offered by the interactive menu. The store accepts any text.
pub const DIFFICULTY_PRESETS: [&str; 4] = ["Easy", "Normal", "Hard", "Legendary"];
/// Announcements kept on the board; older ones fall off the end.
pub const MAX_ANNOUNCEMENTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    /// Readable from disk, but nothing in the store produces it.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    #[default]
    Available,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    /// Any integer; older files may hold zero or negative levels.
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default = "Utc::now", deserialize_with = "timestamp::deserialize")]
    pub joined_date: DateTime<Utc>,
}

fn default_level() -> i64 {
    DEFAULT_LEVEL
}

impl Member {
    pub fn new(name: &str, class: &str, level: i64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            class: class.to_string(),
            level,
            description: description.to_string(),
            status: MemberStatus::Active,
            joined_date: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default = "Utc::now", deserialize_with = "timestamp::deserialize")]
    pub created_date: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub completed_date: Option<DateTime<Utc>>,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl Quest {
    pub fn new(title: &str, description: &str, reward: &str, difficulty: &str) -> Self {
        let difficulty = if difficulty.trim().is_empty() {
            DEFAULT_DIFFICULTY
        } else {
            difficulty.trim()
        };
        Self {
            title: title.to_string(),
            description: description.to_string(),
            reward: reward.to_string(),
            difficulty: difficulty.to_string(),
            status: QuestStatus::Available,
            created_date: Utc::now(),
            completed_date: None,
        }
    }

    /// Mark the quest completed. Repeating this only moves the completion stamp.
    pub fn complete(&mut self) {
        self.status = QuestStatus::Completed;
        self.completed_date = Some(Utc::now());
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }
}

/// Shared treasury. Gold has no floor; item quantities are always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Resources {
    #[serde(default)]
    pub gold: i64,
    #[serde(default)]
    pub items: IndexMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub message: String,
    #[serde(default = "Utc::now", deserialize_with = "timestamp::deserialize")]
    pub date: DateTime<Utc>,
}

impl Announcement {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            date: Utc::now(),
        }
    }
}

/// The whole guild record, one per data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub guild_name: String,
    pub guild_description: String,
    pub members: IndexMap<String, Member>,
    pub quests: IndexMap<String, Quest>,
    pub resources: Resources,
    /// Newest first.
    pub announcements: Vec<Announcement>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Utc>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            guild_name: DEFAULT_GUILD_NAME.to_string(),
            guild_description: DEFAULT_GUILD_DESCRIPTION.to_string(),
            members: IndexMap::new(),
            quests: IndexMap::new(),
            resources: Resources::default(),
            announcements: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

/// Timestamp parsing that accepts RFC 3339 as well as offset-less ISO-8601
/// (`2024-05-01T18:30:00.123456`), which is read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        raw.parse::<NaiveDateTime>()
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw))),
        }
    }
}
