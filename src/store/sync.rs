use crate::error::StoreError;
use crate::types::video_record::VideoRecord;

/// Receives the collection instead of local storage while cloud mode is on.
pub trait CloudSync {
    fn push(&mut self, records: &[VideoRecord]) -> Result<(), StoreError>;
}

/// Stand-in collaborator: records the intent to sync and nothing more.
#[derive(Debug, Default)]
pub struct LoggingCloudSync {
    pushes: usize,
}

impl LoggingCloudSync {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CloudSync for LoggingCloudSync {
    fn push(&mut self, records: &[VideoRecord]) -> Result<(), StoreError> {
        self.pushes += 1;
        tracing::info!(
            records = records.len(),
            push = self.pushes,
            "Saving to cloud (simulated)"
        );
        Ok(())
    }
}
