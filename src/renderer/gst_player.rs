use std::time::{Duration, Instant};

// GStreamer imports for playback
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::error::MediaError;
use crate::playback::media::{MediaElement, MediaEvent};

/// Roughly the cadence of a browser `timeupdate` event.
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

/// A `playbin` pipeline that renders RGBA frames into an appsink.
pub struct GstPlayer {
    pipeline: gst::Element,
    appsink: gst_app::AppSink,
    uri: String,
    paused: bool,
    muted: bool,
    ended: bool,
    last_time_update: Option<Instant>,
}

impl GstPlayer {
    /// Builds the pipeline for `source` and prerolls it in the paused state.
    pub fn open(source: &str) -> Result<Self, MediaError> {
        gst::init().map_err(|e| MediaError::Init(e.to_string()))?;
        let uri = source_to_uri(source);

        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(2)
            .drop(true)
            .build();

        let videoconvert = gst::ElementFactory::make("videoconvert")
            .build()
            .map_err(|e| MediaError::Pipeline(format!("videoconvert: {e}")))?;

        let video_sink = gst::Bin::new();
        video_sink
            .add_many([&videoconvert, appsink.upcast_ref()])
            .map_err(|e| MediaError::Pipeline(format!("add video elements: {e}")))?;
        gst::Element::link_many([&videoconvert, appsink.upcast_ref()])
            .map_err(|e| MediaError::Pipeline(format!("link video elements: {e}")))?;

        let sink_pad = videoconvert
            .static_pad("sink")
            .ok_or_else(|| MediaError::Pipeline("videoconvert has no sink pad".to_string()))?;
        let ghost_pad = gst::GhostPad::with_target(&sink_pad)
            .map_err(|e| MediaError::Pipeline(format!("ghost pad: {e}")))?;
        video_sink
            .add_pad(&ghost_pad)
            .map_err(|e| MediaError::Pipeline(format!("add ghost pad: {e}")))?;

        let pipeline = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()
            .map_err(|e| MediaError::Pipeline(format!("playbin: {e}")))?;
        pipeline.set_property("video-sink", &video_sink);

        pipeline
            .set_state(gst::State::Paused)
            .map_err(|e| MediaError::Pipeline(format!("preroll {uri}: {e}")))?;

        tracing::info!(%uri, "Opened media pipeline");

        Ok(Self {
            pipeline,
            appsink,
            uri,
            paused: true,
            muted: false,
            ended: false,
            last_time_update: None,
        })
    }

    /// Latest decoded frame, if a new one arrived since the last call.
    pub fn take_frame(&self) -> Option<VideoFrame> {
        let sample = self.appsink.try_pull_sample(gst::ClockTime::ZERO)?;
        let caps = sample.caps()?;
        let info = gst_video::VideoInfo::from_caps(caps).ok()?;
        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;

        let width = info.width();
        let height = info.height();
        let row_bytes = width as usize * 4;
        let stride = info.stride()[0] as usize;
        let src = map.as_slice();

        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            let end = start + row_bytes;
            if end > src.len() {
                tracing::warn!(uri = %self.uri, "Truncated frame buffer");
                return None;
            }
            data.extend_from_slice(&src[start..end]);
        }
        Some(VideoFrame {
            data,
            width,
            height,
        })
    }

    fn drain_bus(&mut self, events: &mut Vec<MediaEvent>) {
        let Some(bus) = self.pipeline.bus() else {
            return;
        };
        while let Some(msg) = bus.pop() {
            match msg.view() {
                gst::MessageView::Eos(..) => {
                    if !self.ended {
                        self.ended = true;
                        self.paused = true;
                        events.push(self.time_update());
                        events.push(MediaEvent::Ended);
                    }
                }
                gst::MessageView::Error(err) => {
                    tracing::warn!(
                        uri = %self.uri,
                        error = %err.error(),
                        debug = ?err.debug(),
                        "Media pipeline error"
                    );
                    self.paused = true;
                    events.push(MediaEvent::Error(MediaError::Stream(
                        err.error().to_string(),
                    )));
                }
                _ => {}
            }
        }
    }

    fn time_update(&self) -> MediaEvent {
        MediaEvent::TimeUpdate {
            current_time: self.current_time(),
            duration: self.duration(),
        }
    }
}

impl MediaElement for GstPlayer {
    fn current_time(&self) -> f64 {
        self.pipeline
            .query_position::<gst::ClockTime>()
            .map(clock_to_secs)
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.pipeline
            .query_duration::<gst::ClockTime>()
            .map(clock_to_secs)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.pipeline.set_property("mute", muted);
        self.muted = muted;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.pipeline
            .set_state(gst::State::Playing)
            .map_err(|e| MediaError::PlayRejected(format!("{}: {e}", self.uri)))?;
        self.paused = false;
        self.ended = false;
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Paused) {
            tracing::warn!(uri = %self.uri, error = %e, "Failed to pause");
        }
        self.paused = true;
    }

    fn seek_to_start(&mut self) {
        if let Err(e) = self.pipeline.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
            gst::ClockTime::ZERO,
        ) {
            // Not seekable yet before preroll completes; it starts at zero anyway.
            tracing::debug!(uri = %self.uri, error = %e, "Seek to start skipped");
        }
        self.ended = false;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        self.drain_bus(&mut events);

        if !self.paused {
            let now = Instant::now();
            let due = self
                .last_time_update
                .is_none_or(|last| now.duration_since(last) >= TIME_UPDATE_INTERVAL);
            if due {
                self.last_time_update = Some(now);
                events.push(self.time_update());
            }
        }
        events
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
        tracing::debug!(uri = %self.uri, "Closed media pipeline");
    }
}

fn clock_to_secs(t: gst::ClockTime) -> f64 {
    t.nseconds() as f64 / 1_000_000_000.0
}

/// Turns a URL or local path into something `playbin` accepts.
pub fn source_to_uri(source: &str) -> String {
    let source = source.trim();
    if source.contains("://") {
        return source.to_string();
    }
    let path = std::fs::canonicalize(source)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| source.to_string());
    path_to_file_uri(&path)
}

#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    // Strip the verbatim `\\?\` prefix canonicalize adds.
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_pass_through() {
        assert_eq!(
            source_to_uri(" https://cdn.example/v.mp4 "),
            "https://cdn.example/v.mp4"
        );
        assert_eq!(source_to_uri("file:///tmp/v.mp4"), "file:///tmp/v.mp4");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_local_paths_become_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, b"").unwrap();
        let canonical = std::fs::canonicalize(&file).unwrap();

        let uri = source_to_uri(file.to_str().unwrap());
        assert_eq!(uri, format!("file://{}", canonical.display()));
        assert_eq!(
            source_to_uri("/no/such/clip.mp4"),
            "file:///no/such/clip.mp4"
        );
    }
}
