/// Where the player is in its per-activation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    /// Started automatically with sound off, waiting for the viewer to click.
    AutoplayMuted,
    PlayingUnmuted,
    Paused,
    /// Reached the end. Only a new activation leaves this phase.
    Ended,
}

/// Outcome of the most recent request to start playback.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayAttempt {
    #[default]
    NotRequested,
    Started,
    Rejected(String),
}

impl PlayAttempt {
    /// Why the backend refused or failed, if it did.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            PlayAttempt::Rejected(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// The UI-observable state of the smart player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    pub is_muted: bool,
    /// Percent of the media watched, always within 0..=100.
    pub progress: f64,
    pub show_delayed_button: bool,
    pub last_attempt: PlayAttempt,
}

impl PlaybackState {
    pub fn new(muted: bool) -> Self {
        PlaybackState {
            phase: PlaybackPhase::Idle,
            is_muted: muted,
            progress: 0.0,
            show_delayed_button: false,
            last_attempt: PlayAttempt::NotRequested,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            PlaybackPhase::AutoplayMuted | PlaybackPhase::PlayingUnmuted
        )
    }

    /// Whether the "click to listen" overlay is up.
    pub fn shows_sound_prompt(&self) -> bool {
        self.is_playing() && self.is_muted
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(false)
    }
}
