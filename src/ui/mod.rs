pub mod app;
pub mod config_panel;
pub mod dashboard;
pub mod dialogs;
pub mod settings_panel;
pub mod smart_player;
