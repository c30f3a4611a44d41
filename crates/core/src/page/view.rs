use crate::{
    models::{GameDetails, SystemRequirements, APP_NAME},
    route::Route,
    sanitize::{description_paragraphs, inline_text},
};

use super::PageState;

/// Shown while the request is outstanding.
pub const LOADING_TEXT: &str = "Loading…";
/// Headline of the failure view.
pub const FAILED_TEXT: &str = "Failed to load game data.";
/// Label of the failure view's link home.
pub const HOME_LINK_TEXT: &str = "Return to home page";
/// Label of the loaded view's link home.
pub const BACK_LINK_TEXT: &str = "Back to list";
/// Label of the external game link.
pub const PLAY_LINK_TEXT: &str = "Play now!";
/// Heading of the requirements block.
pub const REQUIREMENTS_HEADING: &str = "System requirements";
/// Fallback when the API has no requirements.
pub const NO_REQUIREMENTS_TEXT: &str = "No info about system requirements.";
/// Heading of the gallery.
pub const SCREENSHOTS_HEADING: &str = "Screenshots";
/// Fallback when the gallery is empty.
pub const NO_SCREENSHOTS_TEXT: &str = "No screenshots for this game.";

/// What the page shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Loading indicator.
    Loading,
    /// Full game details.
    Loaded(DetailView),
    /// Generic failure with a way back.
    Failed(FailedView),
}

/// Where a link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Another page of the app.
    Route(Route),
    /// An external URL, opened outside the app.
    External(String),
}

/// A labelled navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Visible label.
    pub label: String,
    /// Destination.
    pub target: LinkTarget,
}

impl Link {
    fn home(label: &str) -> Self {
        Self {
            label: label.to_string(),
            target: LinkTarget::Route(Route::Home),
        }
    }

    /// Internal route, if this link stays inside the app.
    pub fn route(&self) -> Option<&Route> {
        match &self.target {
            LinkTarget::Route(route) => Some(route),
            LinkTarget::External(_) => None,
        }
    }

    /// External URL, if this link leaves the app.
    pub fn url(&self) -> Option<&str> {
        match &self.target {
            LinkTarget::External(url) => Some(url),
            LinkTarget::Route(_) => None,
        }
    }
}

/// Failure view content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedView {
    /// Headline.
    pub message: String,
    /// Link back to the listing page.
    pub home: Link,
}

/// Header block of a loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Cover image reference.
    pub thumbnail: String,
    /// Game title.
    pub title: String,
    /// Four-digit release year.
    pub year: String,
    /// Genre label.
    pub genre: String,
    /// `Publisher: …` line.
    pub publisher: String,
    /// `Developer: …` line.
    pub developer: String,
}

/// Requirements block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementsView {
    /// Label/value pairs in display order.
    Listed(Vec<(&'static str, String)>),
    /// The API has no requirements for this game.
    Missing,
}

/// One gallery image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotView {
    /// Identifier assigned by the API.
    pub id: u64,
    /// Image reference.
    pub image: String,
    /// Alternative text, `"{title} gameplay"`.
    pub alt: String,
}

/// Everything a loaded page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Window title, `"{title} | Game Finder"`.
    pub page_title: String,
    /// Header block.
    pub header: HeaderView,
    /// Sanitised description paragraphs.
    pub description: Vec<String>,
    /// Requirements block.
    pub requirements: RequirementsView,
    /// Gallery images in input order. Empty means show the fallback.
    pub screenshots: Vec<ScreenshotView>,
    /// Link back to the listing page.
    pub back: Link,
    /// External link to the game itself.
    pub play: Link,
}

impl DetailView {
    /// Build the loaded view for `details`.
    pub fn new(details: &GameDetails) -> Self {
        let header = HeaderView {
            thumbnail: inline_text(&details.thumbnail),
            title: inline_text(&details.title),
            year: format!("{:04}", details.release_year()),
            genre: inline_text(&details.genre),
            publisher: format!("Publisher: {}", inline_text(&details.publisher)),
            developer: format!("Developer: {}", inline_text(&details.developer)),
        };
        let requirements = match &details.minimum_system_requirements {
            Some(requirements) => RequirementsView::Listed(requirement_rows(requirements)),
            None => RequirementsView::Missing,
        };
        let alt = format!("{} gameplay", inline_text(&details.title));
        let screenshots = details
            .screenshots
            .iter()
            .map(|shot| ScreenshotView {
                id: shot.id,
                image: inline_text(&shot.image),
                alt: alt.clone(),
            })
            .collect();

        Self {
            page_title: inline_text(&details.page_title()),
            header,
            description: description_paragraphs(&details.description),
            requirements,
            screenshots,
            back: Link::home(BACK_LINK_TEXT),
            play: Link {
                label: PLAY_LINK_TEXT.to_string(),
                target: LinkTarget::External(inline_text(&details.game_url)),
            },
        }
    }
}

fn requirement_rows(requirements: &SystemRequirements) -> Vec<(&'static str, String)> {
    vec![
        ("OS", inline_text(&requirements.os)),
        ("Memory", inline_text(&requirements.memory)),
        ("Graphics", inline_text(&requirements.graphics)),
        ("Processor", inline_text(&requirements.processor)),
        ("Storage", inline_text(&requirements.storage)),
    ]
}

impl PageView {
    /// Project a page state into its view.
    pub fn from_state(state: &PageState) -> Self {
        match state {
            PageState::Loading => PageView::Loading,
            PageState::Loaded(details) => PageView::Loaded(DetailView::new(details)),
            PageState::Failed => PageView::Failed(FailedView {
                message: FAILED_TEXT.to_string(),
                home: Link::home(HOME_LINK_TEXT),
            }),
        }
    }

    /// Window title for this view.
    pub fn page_title(&self) -> String {
        match self {
            PageView::Loaded(detail) => detail.page_title.clone(),
            _ => APP_NAME.to_string(),
        }
    }

    /// Flat text rendering, one entry per output line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            PageView::Loading => vec![LOADING_TEXT.to_string()],
            PageView::Failed(failed) => vec![
                failed.message.clone(),
                format!("[{}] {}", failed.home.label, Route::Home),
            ],
            PageView::Loaded(detail) => detail_lines(detail),
        }
    }
}

fn detail_lines(detail: &DetailView) -> Vec<String> {
    let header = &detail.header;
    let mut lines = vec![
        header.title.clone(),
        header.year.clone(),
        header.genre.clone(),
        header.publisher.clone(),
        header.developer.clone(),
        format!("Thumbnail: {}", header.thumbnail),
        String::new(),
    ];

    for paragraph in &detail.description {
        lines.extend(paragraph.lines().map(str::to_string));
        lines.push(String::new());
    }

    lines.push(format!("[{}] {}", detail.back.label, Route::Home));
    if let Some(url) = detail.play.url() {
        lines.push(format!("[{}] {}", detail.play.label, url));
    }
    lines.push(String::new());

    lines.push(REQUIREMENTS_HEADING.to_string());
    match &detail.requirements {
        RequirementsView::Listed(rows) => {
            lines.extend(rows.iter().map(|(label, value)| format!("{label}: {value}")));
        }
        RequirementsView::Missing => lines.push(NO_REQUIREMENTS_TEXT.to_string()),
    }
    lines.push(String::new());

    lines.push(SCREENSHOTS_HEADING.to_string());
    if detail.screenshots.is_empty() {
        lines.push(NO_SCREENSHOTS_TEXT.to_string());
    } else {
        lines.extend(
            detail
                .screenshots
                .iter()
                .enumerate()
                .map(|(idx, shot)| format!("[{}] {} ({})", idx + 1, shot.image, shot.alt)),
        );
    }
    lines
}
