pub mod playback_state;
pub mod video_record;
