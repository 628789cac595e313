use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_VIDEO_SRC: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4";
pub const DEFAULT_THUMBNAIL: &str = "https://images.unsplash.com/photo-1626544827763-d516dce335ca?auto=format&fit=crop&w=800&q=80";
pub const MAX_DELAY_SECS: u32 = 60;

/// Accent color applied to the player's progress bar.
///
/// Stored as its CSS class token. Unknown tokens read back as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccentColor {
    #[default]
    Blue,
    Red,
    Green,
    Purple,
    Black,
}

impl Serialize for AccentColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for AccentColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token
            .as_deref()
            .and_then(AccentColor::from_token)
            .unwrap_or_default())
    }
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        AccentColor::Blue,
        AccentColor::Red,
        AccentColor::Green,
        AccentColor::Purple,
        AccentColor::Black,
    ];

    pub fn token(self) -> &'static str {
        match self {
            AccentColor::Blue => "bg-blue-600",
            AccentColor::Red => "bg-red-600",
            AccentColor::Green => "bg-green-600",
            AccentColor::Purple => "bg-purple-600",
            AccentColor::Black => "bg-black",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        AccentColor::ALL.into_iter().find(|c| c.token() == token)
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            AccentColor::Blue => [37, 99, 235],
            AccentColor::Red => [220, 38, 38],
            AccentColor::Green => [22, 163, 74],
            AccentColor::Purple => [147, 51, 234],
            AccentColor::Black => [0, 0, 0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccentColor::Blue => "Blue",
            AccentColor::Red => "Red",
            AccentColor::Green => "Green",
            AccentColor::Purple => "Purple",
            AccentColor::Black => "Black",
        }
    }
}

/// Missing fields read back as their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackSettings {
    pub smart_autoplay: bool,
    pub color: AccentColor,
    pub delay_button: bool,
    pub delay_time: u32,
    /// Overlay text shown during muted autoplay. Empty means none.
    pub headline: String,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            smart_autoplay: true,
            color: AccentColor::Blue,
            delay_button: false,
            delay_time: MAX_DELAY_SECS,
            headline: String::new(),
        }
    }
}

/// A partial settings update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub smart_autoplay: Option<bool>,
    pub color: Option<AccentColor>,
    pub delay_button: Option<bool>,
    pub delay_time: Option<u32>,
    pub headline: Option<String>,
}

impl SettingsPatch {
    pub fn smart_autoplay(value: bool) -> Self {
        Self {
            smart_autoplay: Some(value),
            ..Self::default()
        }
    }

    pub fn color(value: AccentColor) -> Self {
        Self {
            color: Some(value),
            ..Self::default()
        }
    }

    pub fn delay_button(value: bool) -> Self {
        Self {
            delay_button: Some(value),
            ..Self::default()
        }
    }

    pub fn delay_time(secs: u32) -> Self {
        Self {
            delay_time: Some(secs),
            ..Self::default()
        }
    }

    pub fn headline(text: impl Into<String>) -> Self {
        Self {
            headline: Some(text.into()),
            ..Self::default()
        }
    }
}

impl PlaybackSettings {
    /// Shallow-merges `patch` over these settings. `delay_time` is clamped to 0..=60.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.smart_autoplay {
            self.smart_autoplay = v;
        }
        if let Some(v) = patch.color {
            self.color = v;
        }
        if let Some(v) = patch.delay_button {
            self.delay_button = v;
        }
        if let Some(v) = patch.delay_time {
            self.delay_time = v.min(MAX_DELAY_SECS);
        }
        if let Some(v) = patch.headline {
            self.headline = v;
        }
    }

    /// The watch-time threshold for the call-to-action, if the feature is on.
    pub fn cta_threshold(&self) -> Option<f64> {
        self.delay_button.then_some(f64::from(self.delay_time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub video_src: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub play_rate: f64,
    #[serde(default)]
    pub conversion: f64,
    /// Nominal length in seconds. Not read from the media itself.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub settings: PlaybackSettings,
    /// Analytics points kept as-is; nothing reads them yet.
    #[serde(default)]
    pub retention_data: Vec<serde_json::Value>,
}

impl VideoRecord {
    /// A freshly uploaded record with default settings and zeroed counters.
    pub fn new(id: String, title: &str, source_url: &str) -> Self {
        let source_url = source_url.trim();
        VideoRecord {
            id,
            title: title.trim().to_string(),
            thumbnail: DEFAULT_THUMBNAIL.to_string(),
            video_src: if source_url.is_empty() {
                DEFAULT_VIDEO_SRC.to_string()
            } else {
                source_url.to_string()
            },
            views: 0,
            play_rate: 0.0,
            conversion: 0.0,
            duration: 30.0,
            settings: PlaybackSettings::default(),
            retention_data: Vec::new(),
        }
    }

    /// The record shown when nothing has been saved yet.
    pub fn demo() -> Self {
        VideoRecord {
            id: "demo-001".to_string(),
            title: "Demo video (local)".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1593697821252-0c9137d9fc45?auto=format&fit=crop&w=800&q=80".to_string(),
            video_src: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4".to_string(),
            views: 0,
            play_rate: 0.0,
            conversion: 0.0,
            duration: 15.0,
            settings: PlaybackSettings {
                smart_autoplay: true,
                color: AccentColor::Blue,
                delay_button: true,
                delay_time: 5,
                headline: "Example headline".to_string(),
            },
            retention_data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut settings = VideoRecord::demo().settings;
        settings.merge(SettingsPatch::color(AccentColor::Purple));
        settings.merge(SettingsPatch::delay_button(false));

        assert_eq!(settings.color, AccentColor::Purple);
        assert!(!settings.delay_button);
        assert!(settings.smart_autoplay);
        assert_eq!(settings.delay_time, 5);
        assert_eq!(settings.headline, "Example headline");
    }

    #[test]
    fn test_merge_clamps_delay_time() {
        let mut settings = PlaybackSettings::default();
        settings.merge(SettingsPatch::delay_time(600));
        assert_eq!(settings.delay_time, 60);
        settings.merge(SettingsPatch::delay_time(0));
        assert_eq!(settings.delay_time, 0);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let mut settings = VideoRecord::demo().settings;
        let before = settings.clone();
        settings.merge(SettingsPatch::default());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_cta_threshold_ignores_delay_time_when_disabled() {
        let mut settings = PlaybackSettings::default();
        assert_eq!(settings.cta_threshold(), None);
        settings.merge(SettingsPatch {
            delay_button: Some(true),
            delay_time: Some(12),
            ..SettingsPatch::default()
        });
        assert_eq!(settings.cta_threshold(), Some(12.0));
    }

    #[test]
    fn test_new_record_falls_back_to_default_source() {
        let record = VideoRecord::new("vsl-1".into(), "Title", "");
        assert_eq!(record.video_src, DEFAULT_VIDEO_SRC);
        let record = VideoRecord::new("vsl-2".into(), "  Title ", "   ");
        assert_eq!(record.video_src, DEFAULT_VIDEO_SRC);
        assert_eq!(record.title, "Title");
        assert_eq!(record.settings, PlaybackSettings::default());
        assert_eq!(record.views, 0);
    }

    #[test]
    fn test_reads_browser_storage_format() {
        let json = r#"[{
            "id": "vsl-1717171717",
            "title": "Launch",
            "thumbnail": "https://example.com/t.jpg",
            "videoSrc": "https://example.com/v.mp4",
            "views": 12,
            "playRate": 40,
            "conversion": 2.5,
            "duration": 30,
            "settings": {
                "smartAutoplay": false,
                "color": "bg-purple-600",
                "delayButton": true,
                "delayTime": 20,
                "headline": ""
            },
            "retentionData": []
        }]"#;
        let records: Vec<VideoRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.video_src, "https://example.com/v.mp4");
        assert_eq!(record.play_rate, 40.0);
        assert_eq!(record.settings.color, AccentColor::Purple);
        assert_eq!(record.settings.delay_time, 20);

        let written = serde_json::to_value(record).unwrap();
        assert_eq!(written["videoSrc"], "https://example.com/v.mp4");
        assert_eq!(written["settings"]["color"], "bg-purple-600");
    }

    #[test]
    fn test_unknown_color_and_missing_settings_fields_use_defaults() {
        let json = r#"[
            {"id": "vsl-1", "title": "One", "thumbnail": "", "videoSrc": "",
             "settings": {"color": "bg-pink-500", "delayButton": true}},
            {"id": "vsl-2", "title": "Two", "thumbnail": "", "videoSrc": ""}
        ]"#;
        let records: Vec<VideoRecord> = serde_json::from_str(json).unwrap();

        let first = &records[0].settings;
        assert_eq!(first.color, AccentColor::Blue);
        assert!(first.delay_button);
        assert_eq!(first.delay_time, MAX_DELAY_SECS);
        assert!(first.smart_autoplay);
        assert_eq!(records[1].settings, PlaybackSettings::default());
    }

    #[test]
    fn test_patch_deserializes_from_partial_json() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"delayTime": 15}"#).unwrap();
        assert_eq!(patch, SettingsPatch::delay_time(15));
    }
}
