#![warn(clippy::all, missing_docs)]

//! Core logic for Game Finder.
//!
//! This crate hosts the data models, configuration handling, the game
//! metadata API client and the detail page state machine used by the
//! terminal UI and any future frontends.

pub mod api;
pub mod config;
pub mod models;
pub mod page;
pub mod route;
pub mod sanitize;

pub use api::{FetchError, GameApi, GameSource};
pub use config::AppConfig;
pub use models::{GameDetails, Screenshot, SystemRequirements};
pub use page::{GameDetailPage, MountId, PageEvent, PageState, PageView};
pub use route::Route;
