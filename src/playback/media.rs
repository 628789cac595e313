use crate::error::MediaError;

/// Something the media element reports back while it plays.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate {
        current_time: f64,
        /// `None` while the duration is still unknown.
        duration: Option<f64>,
    },
    Ended,
    /// The backend failed after playback was already requested.
    Error(MediaError),
}

/// The playback surface the controller drives.
///
/// Implementations own decoding and output; the controller only issues
/// commands and consumes events.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn duration(&self) -> Option<f64>;
    fn is_paused(&self) -> bool;
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    /// Starts or resumes playback. May be refused by the backend.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn seek_to_start(&mut self);
    /// Drains events produced since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
