//! The game detail page: one fetch per mount, three explicit states.

/// Render-ready projection of the page state.
pub mod view;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    api::{FetchError, GameSource},
    models::GameDetails,
};

pub use view::PageView;

/// Generation counter distinguishing successive mounts of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(u64);

/// Outcome of a fetch, tagged with the mount that issued it.
#[derive(Debug)]
pub struct PageEvent {
    /// Mount that spawned the request.
    pub mount: MountId,
    /// Result of the request.
    pub outcome: Result<GameDetails, FetchError>,
}

/// Lifecycle of the page for one mount.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// Request outstanding. Initial state of every mount.
    Loading,
    /// Request succeeded while the page was mounted.
    Loaded(GameDetails),
    /// Request failed for any reason.
    Failed,
}

impl PageState {
    /// `Loaded` and `Failed` never change for the same mount.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PageState::Loading)
    }
}

#[derive(Debug)]
struct Mount {
    id: MountId,
    game_id: String,
    token: CancellationToken,
}

/// Detail page bound to a [`GameSource`].
///
/// [`mount`](Self::mount) spawns the single request for an identifier; its
/// outcome comes back over the page's channel as a [`PageEvent`] and is only
/// committed by [`apply`](Self::apply) while that mount is still live.
pub struct GameDetailPage<S> {
    source: S,
    sender: mpsc::Sender<PageEvent>,
    state: PageState,
    mount: Option<Mount>,
    generation: u64,
}

impl<S: GameSource> GameDetailPage<S> {
    /// Create an unmounted page that reports fetch outcomes to `sender`.
    pub fn new(source: S, sender: mpsc::Sender<PageEvent>) -> Self {
        Self {
            source,
            sender,
            state: PageState::Loading,
            mount: None,
            generation: 0,
        }
    }

    /// Mount the page for `game_id`, replacing any previous mount.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self, game_id: impl Into<String>) -> MountId {
        self.unmount();

        let game_id = game_id.into();
        self.generation += 1;
        let mount_id = MountId(self.generation);
        let token = CancellationToken::new();
        self.state = PageState::Loading;
        info!(game_id = %game_id, mount = mount_id.0, "Mounting game page");

        let source = self.source.clone();
        let sender = self.sender.clone();
        let guard = token.clone();
        let request_id = game_id.clone();
        tokio::spawn(async move {
            let outcome = source.fetch_game(&request_id).await;
            if guard.is_cancelled() {
                debug!(game_id = %request_id, mount = mount_id.0, "Page unmounted before fetch resolved; discarding");
                return;
            }
            if sender
                .send(PageEvent {
                    mount: mount_id,
                    outcome,
                })
                .await
                .is_err()
            {
                debug!(game_id = %request_id, "Page event channel closed");
            }
        });

        self.mount = Some(Mount {
            id: mount_id,
            game_id,
            token,
        });
        mount_id
    }

    /// Detach the page. Any outstanding request keeps running but its
    /// outcome is discarded.
    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.token.cancel();
            debug!(game_id = %mount.game_id, mount = mount.id.0, "Unmounted game page");
        }
        self.state = PageState::Loading;
    }

    /// Commit a fetch outcome. Returns `true` when the state changed.
    pub fn apply(&mut self, event: PageEvent) -> bool {
        let Some(mount) = self.mount.as_ref() else {
            debug!(mount = event.mount.0, "No page mounted; dropping fetch outcome");
            return false;
        };
        if mount.id != event.mount || mount.token.is_cancelled() {
            debug!(
                mount = event.mount.0,
                live = mount.id.0,
                "Dropping fetch outcome from stale mount"
            );
            return false;
        }
        if self.state.is_terminal() {
            return false;
        }

        let game_id = mount.game_id.clone();
        match event.outcome {
            Ok(details) => {
                info!(game_id = %game_id, title = %details.title, "Game details loaded");
                self.state = PageState::Loaded(details);
            }
            Err(err) => {
                error!(game_id = %game_id, error = %err, "Failed to load game details");
                self.state = PageState::Failed;
            }
        }
        true
    }

    /// Current state.
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Identifier of the live mount.
    pub fn game_id(&self) -> Option<&str> {
        self.mount.as_ref().map(|mount| mount.game_id.as_str())
    }

    /// Generation of the live mount.
    pub fn mount_id(&self) -> Option<MountId> {
        self.mount.as_ref().map(|mount| mount.id)
    }

    /// Whether the page is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Render-ready view of the current state.
    pub fn view(&self) -> PageView {
        PageView::from_state(&self.state)
    }
}

impl<S> Drop for GameDetailPage<S> {
    fn drop(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.token.cancel();
        }
    }
}
