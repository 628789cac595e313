use crate::error::MediaError;
use crate::playback::media::{MediaElement, MediaEvent};
use crate::types::playback_state::{PlayAttempt, PlaybackPhase, PlaybackState};
use crate::types::video_record::{PlaybackSettings, VideoRecord};

/// Drives one media element for one record.
///
/// Build a new controller (and media element) when the record changes;
/// call [`PlaybackController::activate`] when only the settings changed.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    record_id: String,
    settings: PlaybackSettings,
    state: PlaybackState,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(media: M, record: &VideoRecord) -> Self {
        let mut controller = PlaybackController {
            media,
            record_id: record.id.clone(),
            settings: record.settings.clone(),
            state: PlaybackState::new(record.settings.smart_autoplay),
        };
        controller.activate(record);
        controller
    }

    /// Resets all transient state for `record` and autoplays muted if enabled.
    pub fn activate(&mut self, record: &VideoRecord) -> PlayAttempt {
        self.record_id = record.id.clone();
        self.settings = record.settings.clone();
        self.state = PlaybackState::new(self.settings.smart_autoplay);

        self.media.pause();
        self.media.seek_to_start();
        self.media.set_muted(self.state.is_muted);

        let attempt = if self.settings.smart_autoplay {
            match self.media.play() {
                Ok(()) => {
                    self.state.phase = PlaybackPhase::AutoplayMuted;
                    PlayAttempt::Started
                }
                Err(e) => {
                    tracing::debug!(id = %self.record_id, error = %e, "Muted autoplay refused");
                    PlayAttempt::Rejected(e.to_string())
                }
            }
        } else {
            PlayAttempt::NotRequested
        };
        tracing::debug!(id = %self.record_id, ?attempt, "Activated player");
        self.state.last_attempt = attempt.clone();
        attempt
    }

    /// Recomputes progress and reveals the call-to-action once its threshold is
    /// reached. Returns `true` on the update that revealed it.
    pub fn on_time_update(&mut self, current_time: f64, duration: Option<f64>) -> bool {
        self.state.progress = progress_percent(current_time, duration);

        let current = sanitize_time(current_time);
        match self.settings.cta_threshold() {
            Some(threshold) if current >= threshold && !self.state.show_delayed_button => {
                self.state.show_delayed_button = true;
                tracing::info!(id = %self.record_id, at = current, "Revealed delayed call-to-action");
                true
            }
            _ => false,
        }
    }

    pub fn on_ended(&mut self) {
        self.state.phase = PlaybackPhase::Ended;
    }

    /// A backend failure after play was accepted. Leaves playback paused with
    /// the failure recorded as a rejected attempt.
    pub fn on_error(&mut self, error: MediaError) {
        tracing::warn!(id = %self.record_id, error = %error, "Playback failed");
        self.media.pause();
        if self.state.phase != PlaybackPhase::Ended {
            self.state.phase = PlaybackPhase::Paused;
        }
        self.state.last_attempt = PlayAttempt::Rejected(error.to_string());
    }

    /// The play/pause control. Starting from paused always unmutes first.
    pub fn toggle_play(&mut self) -> PlayAttempt {
        match self.state.phase {
            PlaybackPhase::Ended => PlayAttempt::NotRequested,
            PlaybackPhase::AutoplayMuted | PlaybackPhase::PlayingUnmuted => {
                self.media.pause();
                self.state.phase = PlaybackPhase::Paused;
                PlayAttempt::NotRequested
            }
            PlaybackPhase::Idle | PlaybackPhase::Paused => {
                if self.state.is_muted {
                    self.media.set_muted(false);
                    self.state.is_muted = false;
                }
                let attempt = match self.media.play() {
                    Ok(()) => {
                        self.state.phase = PlaybackPhase::PlayingUnmuted;
                        PlayAttempt::Started
                    }
                    Err(e) => {
                        tracing::warn!(id = %self.record_id, error = %e, "Playback refused");
                        PlayAttempt::Rejected(e.to_string())
                    }
                };
                self.state.last_attempt = attempt.clone();
                attempt
            }
        }
    }

    /// The viewer clicked the "click to listen" overlay.
    pub fn acknowledge_sound_prompt(&mut self) -> PlayAttempt {
        if self.state.phase != PlaybackPhase::AutoplayMuted {
            return PlayAttempt::NotRequested;
        }
        self.media.set_muted(false);
        self.state.is_muted = false;
        self.state.phase = PlaybackPhase::PlayingUnmuted;
        if self.media.is_paused() {
            // The backend stopped underneath us; resume so the click is not lost.
            return self.toggle_play_from_paused();
        }
        PlayAttempt::Started
    }

    /// Feeds every pending media event through the handlers. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = self.media.poll_events();
        let count = events.len();
        for event in events {
            match event {
                MediaEvent::TimeUpdate {
                    current_time,
                    duration,
                } => {
                    self.on_time_update(current_time, duration);
                }
                MediaEvent::Ended => self.on_ended(),
                MediaEvent::Error(error) => self.on_error(error),
            }
        }
        count
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    fn toggle_play_from_paused(&mut self) -> PlayAttempt {
        self.state.phase = PlaybackPhase::Paused;
        self.toggle_play()
    }
}

/// `100 * current / total`, clamped to 0..=100. Unknown or zero duration counts
/// as 1s; an infinite (live) duration gives 0.
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f64 {
    let total = match duration {
        Some(d) if d > 0.0 => d,
        _ => 1.0,
    };
    (sanitize_time(current_time) / total * 100.0).clamp(0.0, 100.0)
}

fn sanitize_time(t: f64) -> f64 {
    if t.is_finite() && t > 0.0 { t } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::video_record::SettingsPatch;
    use assert_matches::assert_matches;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    struct FakeMedia {
        time: f64,
        duration: Option<f64>,
        paused: bool,
        muted: bool,
        refuse_play: bool,
        play_calls: usize,
        events: VecDeque<MediaEvent>,
    }

    impl FakeMedia {
        fn refusing() -> Self {
            FakeMedia {
                refuse_play: true,
                ..Self::default()
            }
        }
    }

    impl MediaElement for FakeMedia {
        fn current_time(&self) -> f64 {
            self.time
        }
        fn duration(&self) -> Option<f64> {
            self.duration
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn play(&mut self) -> Result<(), MediaError> {
            self.play_calls += 1;
            if self.refuse_play {
                return Err(MediaError::PlayRejected("autoplay blocked".into()));
            }
            self.paused = false;
            Ok(())
        }
        fn pause(&mut self) {
            self.paused = true;
        }
        fn seek_to_start(&mut self) {
            self.time = 0.0;
        }
        fn poll_events(&mut self) -> Vec<MediaEvent> {
            self.events.drain(..).collect()
        }
    }

    fn record_with(patch: SettingsPatch) -> VideoRecord {
        let mut record = VideoRecord::new("vsl-test".into(), "Test", "");
        record.settings.merge(patch);
        record
    }

    #[test]
    fn test_smart_autoplay_starts_muted() {
        let record = record_with(SettingsPatch::smart_autoplay(true));
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);

        let state = controller.state().clone();
        assert_eq!(state.phase, PlaybackPhase::AutoplayMuted);
        assert!(state.is_muted);
        assert!(state.shows_sound_prompt());
        assert_eq!(state.last_attempt, PlayAttempt::Started);
        assert!(controller.media().muted);
        assert!(!controller.media().paused);

        controller.on_time_update(0.0, Some(30.0));
        assert_eq!(controller.state().progress, 0.0);
        controller.on_time_update(30.0, Some(30.0));
        assert_eq!(controller.state().progress, 100.0);
    }

    #[test]
    fn test_without_smart_autoplay_stays_idle_and_unmuted() {
        let record = record_with(SettingsPatch::smart_autoplay(false));
        let controller = PlaybackController::new(FakeMedia::default(), &record);

        assert_eq!(controller.state().phase, PlaybackPhase::Idle);
        assert!(!controller.state().is_muted);
        assert_eq!(controller.state().last_attempt, PlayAttempt::NotRequested);
        assert_eq!(controller.media().play_calls, 0);
    }

    #[test]
    fn test_refused_autoplay_is_observable_and_stays_idle() {
        let record = record_with(SettingsPatch::smart_autoplay(true));
        let controller = PlaybackController::new(FakeMedia::refusing(), &record);

        assert_eq!(controller.state().phase, PlaybackPhase::Idle);
        assert!(!controller.state().is_playing());
        assert!(controller.state().is_muted);
        assert_matches!(controller.state().last_attempt, PlayAttempt::Rejected(_));
    }

    #[test]
    fn test_progress_is_exact_and_clamped() {
        assert_eq!(progress_percent(7.5, Some(30.0)), 25.0);
        assert_eq!(progress_percent(45.0, Some(30.0)), 100.0);
        assert_eq!(progress_percent(-3.0, Some(30.0)), 0.0);
        assert_eq!(progress_percent(f64::NAN, Some(30.0)), 0.0);
        assert_eq!(progress_percent(0.5, None), 50.0);
        assert_eq!(progress_percent(0.5, Some(0.0)), 50.0);
        assert_eq!(progress_percent(3.0, Some(f64::INFINITY)), 0.0);
        assert_eq!(progress_percent(3.0, Some(f64::NAN)), 100.0);
    }

    #[test]
    fn test_delayed_button_reveals_once_and_never_hides() {
        let record = record_with(SettingsPatch {
            delay_button: Some(true),
            delay_time: Some(5),
            ..SettingsPatch::default()
        });
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);

        assert!(!controller.on_time_update(4.0, Some(30.0)));
        assert!(!controller.state().show_delayed_button);

        assert!(controller.on_time_update(5.0, Some(30.0)));
        assert!(controller.state().show_delayed_button);

        assert!(!controller.on_time_update(6.0, Some(30.0)));
        assert!(!controller.on_time_update(3.0, Some(30.0)));
        assert!(controller.state().show_delayed_button);
    }

    #[test]
    fn test_delay_time_ignored_when_button_disabled() {
        let record = record_with(SettingsPatch {
            delay_button: Some(false),
            delay_time: Some(0),
            ..SettingsPatch::default()
        });
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);
        controller.on_time_update(25.0, Some(30.0));
        assert!(!controller.state().show_delayed_button);
    }

    #[test]
    fn test_reactivation_resets_transient_state() {
        let mut record = record_with(SettingsPatch {
            delay_button: Some(true),
            delay_time: Some(1),
            ..SettingsPatch::default()
        });
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);
        controller.acknowledge_sound_prompt();
        controller.on_time_update(10.0, Some(20.0));
        assert!(controller.state().show_delayed_button);

        record.settings.merge(SettingsPatch::color(
            crate::types::video_record::AccentColor::Green,
        ));
        controller.activate(&record);

        let state = controller.state();
        assert_eq!(state.progress, 0.0);
        assert!(!state.show_delayed_button);
        assert!(state.is_muted);
        assert_eq!(state.phase, PlaybackPhase::AutoplayMuted);
        assert_eq!(controller.media().time, 0.0);
        assert_eq!(
            controller.settings().color,
            crate::types::video_record::AccentColor::Green
        );
    }

    #[test]
    fn test_toggle_from_muted_pause_unmutes_and_plays() {
        let record = record_with(SettingsPatch::smart_autoplay(true));
        let mut controller = PlaybackController::new(FakeMedia::refusing(), &record);
        controller.media_mut().refuse_play = false;

        assert_eq!(controller.toggle_play(), PlayAttempt::Started);
        assert_eq!(controller.state().phase, PlaybackPhase::PlayingUnmuted);
        assert!(!controller.state().is_muted);
        assert!(!controller.media().muted);
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let record = record_with(SettingsPatch::smart_autoplay(false));
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);

        assert_eq!(controller.toggle_play(), PlayAttempt::Started);
        assert_eq!(controller.state().phase, PlaybackPhase::PlayingUnmuted);

        controller.toggle_play();
        assert_eq!(controller.state().phase, PlaybackPhase::Paused);
        assert!(controller.media().paused);

        controller.toggle_play();
        assert_eq!(controller.state().phase, PlaybackPhase::PlayingUnmuted);
        assert_eq!(controller.media().play_calls, 2);
    }

    #[test]
    fn test_toggle_refused_stays_paused() {
        let record = record_with(SettingsPatch::smart_autoplay(false));
        let mut controller = PlaybackController::new(FakeMedia::refusing(), &record);

        assert_matches!(controller.toggle_play(), PlayAttempt::Rejected(_));
        assert!(!controller.state().is_playing());
        assert!(controller.state().last_attempt.rejection().is_some());
    }

    #[test]
    fn test_sound_prompt_unmutes_without_pausing() {
        let record = record_with(SettingsPatch::smart_autoplay(true));
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);

        assert_eq!(controller.acknowledge_sound_prompt(), PlayAttempt::Started);
        assert_eq!(controller.state().phase, PlaybackPhase::PlayingUnmuted);
        assert!(!controller.state().shows_sound_prompt());
        assert!(!controller.media().paused);
        assert_eq!(controller.media().play_calls, 1);

        assert_eq!(
            controller.acknowledge_sound_prompt(),
            PlayAttempt::NotRequested
        );
    }

    #[test]
    fn test_stream_failure_after_autoplay_pauses() {
        let record = record_with(SettingsPatch::smart_autoplay(true));
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);
        assert!(controller.state().shows_sound_prompt());

        controller
            .media_mut()
            .events
            .push_back(MediaEvent::Error(MediaError::Stream("404 Not Found".into())));
        assert_eq!(controller.pump(), 1);

        let state = controller.state();
        assert_eq!(state.phase, PlaybackPhase::Paused);
        assert!(!state.is_playing());
        assert!(!state.shows_sound_prompt());
        assert_matches!(&state.last_attempt, PlayAttempt::Rejected(reason) if reason.contains("404"));
        assert!(controller.media().paused);

        assert_eq!(controller.toggle_play(), PlayAttempt::Started);
        assert!(!controller.state().is_muted);
    }

    #[test]
    fn test_ended_is_terminal_until_activation() {
        let record = record_with(SettingsPatch::smart_autoplay(false));
        let mut controller = PlaybackController::new(FakeMedia::default(), &record);
        controller.toggle_play();
        controller.media_mut().events.extend([
            MediaEvent::TimeUpdate {
                current_time: 29.0,
                duration: Some(30.0),
            },
            MediaEvent::Ended,
        ]);

        assert_eq!(controller.pump(), 2);
        let progress = controller.state().progress;
        assert_eq!(controller.state().phase, PlaybackPhase::Ended);
        assert!(!controller.state().is_playing());
        assert!(progress > 96.0);

        assert_eq!(controller.toggle_play(), PlayAttempt::NotRequested);
        assert_eq!(controller.state().phase, PlaybackPhase::Ended);
        assert_eq!(controller.state().progress, progress);

        controller.activate(&record);
        assert_eq!(controller.state().phase, PlaybackPhase::Idle);
    }
}
