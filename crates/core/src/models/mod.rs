//! Shared domain models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Application name shown in window titles.
pub const APP_NAME: &str = "Game Finder";

/// Metadata returned by the game API for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    /// Numeric identifier assigned by the API.
    #[serde(default)]
    pub id: u64,
    /// Human-readable game title.
    pub title: String,
    /// Cover image reference.
    pub thumbnail: String,
    /// Live/maintenance status reported by the API.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    /// One-line summary.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_description: String,
    /// Long description. May contain HTML markup.
    pub description: String,
    /// Link to the game's own site.
    pub game_url: String,
    /// Genre label (e.g. `MMORPG`).
    pub genre: String,
    /// Platform label (e.g. `Windows`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platform: String,
    /// Publisher credit.
    pub publisher: String,
    /// Developer credit.
    pub developer: String,
    /// Release date in `YYYY-MM-DD` form.
    pub release_date: NaiveDate,
    /// Link to the game's profile on the API's site.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub profile_url: String,
    /// Minimum hardware, when the API knows it.
    #[serde(default)]
    pub minimum_system_requirements: Option<SystemRequirements>,
    /// Gallery images in display order.
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
}

impl GameDetails {
    /// Four-digit release year.
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    /// Window title for a page displaying this game.
    pub fn page_title(&self) -> String {
        format!("{} | {}", self.title, APP_NAME)
    }
}

/// Minimum system requirements. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRequirements {
    /// Operating system.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub os: String,
    /// CPU.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub processor: String,
    /// RAM.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub memory: String,
    /// GPU.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub graphics: String,
    /// Disk space.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub storage: String,
}

/// The API sends `null` for text fields it has no data for.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Identifier assigned by the API.
    pub id: u64,
    /// Image reference.
    pub image: String,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_api_payload() -> anyhow::Result<()> {
        let payload = json!({
            "id": 452,
            "title": "Call of Duty: Warzone",
            "thumbnail": "https://www.mmobomb.com/g/452/thumbnail.jpg",
            "status": "Live",
            "short_description": "A standalone free-to-play battle royale.",
            "description": "<p>Welcome to Warzone</p>",
            "game_url": "https://www.mmobomb.com/open/call-of-duty-warzone",
            "genre": "Shooter",
            "platform": "Windows",
            "publisher": "Activision",
            "developer": "Infinity Ward",
            "release_date": "2020-03-10",
            "profile_url": "https://www.mmobomb.com/call-of-duty-warzone",
            "minimum_system_requirements": {
                "os": "Windows 7 64-Bit (SP1) or Windows 10 64-Bit",
                "processor": "Intel Core i3-4340 or AMD FX-6300",
                "memory": "8GB RAM",
                "graphics": "NVIDIA GeForce GTX 670 / GeForce GTX 1650",
                "storage": "175GB HD space"
            },
            "screenshots": [
                { "id": 1124, "image": "https://www.mmobomb.com/g/452/1.jpg" },
                { "id": 1125, "image": "https://www.mmobomb.com/g/452/2.jpg" }
            ]
        });

        let details: GameDetails = serde_json::from_value(payload)?;
        assert_eq!(details.title, "Call of Duty: Warzone");
        assert_eq!(details.release_year(), 2020);
        assert_eq!(details.screenshots.len(), 2);
        assert_eq!(details.screenshots[1].id, 1125);
        let requirements = details
            .minimum_system_requirements
            .expect("requirements present");
        assert_eq!(requirements.memory, "8GB RAM");
        Ok(())
    }

    #[test]
    fn optional_sections_default_to_empty() -> anyhow::Result<()> {
        let payload = json!({
            "title": "Bare",
            "thumbnail": "t.jpg",
            "description": "",
            "game_url": "https://example.com",
            "genre": "MMO",
            "publisher": "P",
            "developer": "D",
            "release_date": "1999-12-31"
        });

        let details: GameDetails = serde_json::from_value(payload)?;
        assert!(details.minimum_system_requirements.is_none());
        assert!(details.screenshots.is_empty());
        assert_eq!(details.release_year(), 1999);
        Ok(())
    }

    #[test]
    fn null_requirement_fields_become_empty() -> anyhow::Result<()> {
        let requirements: SystemRequirements = serde_json::from_value(json!({
            "os": "Windows 10",
            "processor": null,
            "memory": "4 GB"
        }))?;
        assert_eq!(requirements.os, "Windows 10");
        assert_eq!(requirements.processor, "");
        assert_eq!(requirements.storage, "");
        Ok(())
    }

    #[test]
    fn null_informational_fields_become_empty() -> anyhow::Result<()> {
        let payload = json!({
            "id": 7,
            "title": "Sparse",
            "thumbnail": "t.jpg",
            "status": null,
            "short_description": null,
            "description": "<p>Still playable.</p>",
            "game_url": "https://example.com/open/sparse",
            "genre": "MMO",
            "platform": null,
            "publisher": "P",
            "developer": "D",
            "release_date": "2012-06-01",
            "profile_url": null
        });

        let details: GameDetails = serde_json::from_value(payload)?;
        assert_eq!(details.title, "Sparse");
        assert_eq!(details.status, "");
        assert_eq!(details.short_description, "");
        assert_eq!(details.platform, "");
        assert_eq!(details.profile_url, "");
        Ok(())
    }

    #[test]
    fn rejects_unparseable_release_date() {
        let payload = json!({
            "title": "Broken",
            "thumbnail": "t.jpg",
            "description": "",
            "game_url": "https://example.com",
            "genre": "MMO",
            "publisher": "P",
            "developer": "D",
            "release_date": "someday"
        });

        assert!(serde_json::from_value::<GameDetails>(payload).is_err());
    }

    #[test]
    fn page_title_includes_app_name() {
        let details = fixtures::sample_details();
        assert_eq!(details.page_title(), "Sample Online | Game Finder");
    }
}
