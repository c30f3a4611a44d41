//! Fixtures shared by the binary's tests.

use chrono::NaiveDate;
use gamefinder_core::{FetchError, GameDetails, GameSource, Screenshot};

/// Source that knows only game `452`.
#[derive(Clone)]
pub struct StaticSource;

impl GameSource for StaticSource {
    async fn fetch_game(&self, id: &str) -> Result<GameDetails, FetchError> {
        if id != "452" {
            return Err(FetchError::NotFound {
                id: id.to_string(),
                message: "No game found with this id.".to_string(),
            });
        }
        Ok(GameDetails {
            id: 452,
            title: "Sample Online".to_string(),
            thumbnail: "https://example.com/thumb.jpg".to_string(),
            status: String::new(),
            short_description: String::new(),
            description: "<p>Explore the <b>world</b>.</p>".to_string(),
            game_url: "https://example.com/open".to_string(),
            genre: "MMORPG".to_string(),
            platform: String::new(),
            publisher: "Sample Publishing".to_string(),
            developer: "Sample Studio".to_string(),
            release_date: NaiveDate::from_ymd_opt(2014, 9, 23).expect("valid date"),
            profile_url: String::new(),
            minimum_system_requirements: None,
            screenshots: vec![Screenshot {
                id: 1,
                image: "https://example.com/1.jpg".to_string(),
            }],
        })
    }
}
