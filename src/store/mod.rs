//! The video collection and its persistence.
//!
//! [`VideoStore`] is the only thing that mutates records. Every mutation is
//! written out immediately, either to local key-value storage or, once a cloud
//! configuration has been saved, to the [`CloudSync`] collaborator.

pub mod storage;
pub mod sync;

use uuid::Uuid;

use crate::error::StoreError;
use crate::types::video_record::{SettingsPatch, VideoRecord};
use storage::{CLOUD_CONFIG_KEY, KeyValueStore, VIDEOS_BACKUP_KEY, VIDEOS_KEY};
use sync::CloudSync;

pub struct VideoStore {
    videos: Vec<VideoRecord>,
    selected_id: Option<String>,
    cloud_config: String,
    storage: Box<dyn KeyValueStore>,
    sync: Box<dyn CloudSync>,
}

impl VideoStore {
    /// Loads the saved collection, or the demo record if there is none or it is unreadable.
    ///
    /// An unreadable collection is copied to [`VIDEOS_BACKUP_KEY`] first, so the
    /// next save cannot destroy it.
    pub fn load(mut storage: Box<dyn KeyValueStore>, sync: Box<dyn CloudSync>) -> Self {
        let videos = match storage.get(VIDEOS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<VideoRecord>>(&json) {
                Ok(videos) => {
                    tracing::info!(count = videos.len(), "Loaded saved videos");
                    videos
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Saved videos are malformed, using the demo collection");
                    match storage.set(VIDEOS_BACKUP_KEY, &json) {
                        Ok(()) => tracing::warn!(key = VIDEOS_BACKUP_KEY, "Kept unreadable videos"),
                        Err(e) => tracing::error!(error = %e, "Could not back up unreadable videos"),
                    }
                    vec![VideoRecord::demo()]
                }
            },
            Ok(None) => vec![VideoRecord::demo()],
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved videos, using the demo collection");
                vec![VideoRecord::demo()]
            }
        };

        let cloud_config = storage
            .get(CLOUD_CONFIG_KEY)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not read cloud config");
                None
            })
            .unwrap_or_default();

        VideoStore {
            videos,
            selected_id: None,
            cloud_config,
            storage,
            sync,
        }
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// The selected record, falling back to the first one. `None` only when empty.
    pub fn selected(&self) -> Option<&VideoRecord> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.videos.first())
    }

    pub fn select_video(&mut self, id: &str) -> Option<&VideoRecord> {
        if self.get(id).is_some() {
            self.selected_id = Some(id.to_string());
        } else {
            tracing::debug!(id, "Selected video does not exist, falling back to the first");
            self.selected_id = self.videos.first().map(|v| v.id.clone());
        }
        self.selected()
    }

    /// Creates a record, puts it first, selects it and saves the collection.
    pub fn create_video(&mut self, title: &str, source_url: &str) -> VideoRecord {
        let mut id = new_video_id();
        while self.get(&id).is_some() {
            id = new_video_id();
        }

        let record = VideoRecord::new(id, title, source_url);
        tracing::info!(id = %record.id, title = %record.title, src = %record.video_src, "Created video");
        self.videos.insert(0, record.clone());
        self.selected_id = Some(record.id.clone());
        self.persist_logged();
        record
    }

    pub fn update_settings(&mut self, id: &str, patch: SettingsPatch) -> Result<(), StoreError> {
        let record = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        tracing::debug!(id, ?patch, "Updating settings");
        record.settings.merge(patch);
        self.persist_logged();
        Ok(())
    }

    pub fn update_selected_settings(&mut self, patch: SettingsPatch) -> Result<(), StoreError> {
        let id = self
            .selected()
            .map(|v| v.id.clone())
            .ok_or_else(|| StoreError::NotFound { id: String::new() })?;
        self.update_settings(&id, patch)
    }

    pub fn delete_video(&mut self, id: &str) -> Result<VideoRecord, StoreError> {
        let idx = self
            .videos
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        let removed = self.videos.remove(idx);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = self.videos.first().map(|v| v.id.clone());
        }
        tracing::info!(id, remaining = self.videos.len(), "Deleted video");
        self.persist_logged();
        Ok(removed)
    }

    pub fn is_connected(&self) -> bool {
        !self.cloud_config.trim().is_empty()
    }

    pub fn cloud_config(&self) -> &str {
        &self.cloud_config
    }

    /// Stores the cloud configuration blob verbatim. Non-blank text turns cloud mode on.
    pub fn save_cloud_config(&mut self, config: &str) -> Result<(), StoreError> {
        self.storage.set(CLOUD_CONFIG_KEY, config)?;
        self.cloud_config = config.to_string();
        tracing::info!(connected = self.is_connected(), "Saved cloud config");
        if self.is_connected() {
            self.persist()?;
        }
        Ok(())
    }

    /// Final write of the collection, for shutdown.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        if self.is_connected() {
            self.sync.push(&self.videos)
        } else {
            let json = serde_json::to_string(&self.videos)?;
            self.storage.set(VIDEOS_KEY, &json)
        }
    }

    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            tracing::error!(error = %e, "Failed to save videos");
        }
    }
}

fn new_video_id() -> String {
    format!("vsl-{}", Uuid::new_v4())
}
