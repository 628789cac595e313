use eframe::egui;

use crate::config::AppConfig;
use crate::ops::embed::generate_embed;
use crate::store::VideoStore;
use crate::ui::config_panel::config_panel;
use crate::ui::dashboard::{DashboardEvent, dashboard_panel};
use crate::ui::dialogs::{UploadForm, UploadOutcome, embed_window, upload_window};
use crate::ui::settings_panel::settings_panel;
use crate::ui::smart_player::SmartPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Editor,
    Config,
}

pub struct AppState {
    pub store: VideoStore,
    pub config: AppConfig,
    pub active_tab: Tab,
    /// Only alive while the editor is on screen.
    pub player: Option<SmartPlayer>,
    /// `Some` while the upload window is open.
    pub upload: Option<UploadForm>,
    pub show_embed: bool,
    pub config_draft: String,
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(store: VideoStore, config: AppConfig) -> Self {
        let config_draft = store.cloud_config().to_string();
        Self {
            store,
            config,
            active_tab: Tab::Dashboard,
            player: None,
            upload: None,
            show_embed: false,
            config_draft,
            notice: None,
        }
    }

    fn open_editor(&mut self, id: &str) {
        self.store.select_video(id);
        self.active_tab = Tab::Editor;
    }
}

pub struct VslApp {
    pub state: AppState,
}

impl VslApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self { state }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let logo = ui.add(
                    egui::Label::new(
                        egui::RichText::new("🎬 VSL Free")
                            .size(20.0)
                            .strong(),
                    )
                    .sense(egui::Sense::click()),
                );
                if logo.clicked() {
                    self.state.active_tab = Tab::Dashboard;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⬆ New video").clicked() {
                        self.state.upload = Some(UploadForm::default());
                    }
                    let (badge, color) = if self.state.store.is_connected() {
                        ("☁ Connected", egui::Color32::from_rgb(21, 128, 61))
                    } else {
                        ("☁ Offline", egui::Color32::from_rgb(185, 28, 28))
                    };
                    if ui
                        .button(egui::RichText::new(badge).color(color))
                        .clicked()
                    {
                        self.state.active_tab = Tab::Config;
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn dashboard(&mut self, ui: &mut egui::Ui) {
        let events = dashboard_panel(
            ui,
            self.state.store.videos(),
            self.state.store.is_connected(),
        );
        for event in events {
            match event {
                DashboardEvent::Open(id) => self.state.open_editor(&id),
                DashboardEvent::Delete(id) => {
                    if let Err(e) = self.state.store.delete_video(&id) {
                        tracing::warn!(error = %e, "Delete ignored");
                    }
                }
                DashboardEvent::ConnectCloud => self.state.active_tab = Tab::Config,
            }
        }
    }

    fn editor(&mut self, ui: &mut egui::Ui) {
        let Some(record) = self.state.store.selected().cloned() else {
            self.state.active_tab = Tab::Dashboard;
            return;
        };

        ui.columns(2, |columns| {
            columns[0].horizontal(|ui| {
                if ui.button("⬅ Back").clicked() {
                    self.state.active_tab = Tab::Dashboard;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("</> Embed code").clicked() {
                        self.state.show_embed = true;
                    }
                });
            });
            columns[0].add_space(8.0);
            columns[0].heading(&record.title);

            let player = self
                .state
                .player
                .get_or_insert_with(|| SmartPlayer::new(&record));
            player.show(&mut columns[0], &record);

            if let Some(patch) = settings_panel(&mut columns[1], &record.settings) {
                if let Err(e) = self.state.store.update_selected_settings(patch) {
                    tracing::warn!(error = %e, "Settings update ignored");
                }
            }
        });

        if self.state.show_embed {
            let snippet = generate_embed(&self.state.config.player_origin, &record.id);
            embed_window(ui.ctx(), &snippet, &mut self.state.show_embed);
        }
    }

    fn cloud_config(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if let Some(text) = config_panel(ui, &mut self.state.config_draft) {
                match self.state.store.save_cloud_config(&text) {
                    Ok(()) => {
                        self.state.notice = Some(
                            "Configuration saved! Your videos will now sync (simulated in this build)."
                                .to_string(),
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to save cloud config");
                        self.state.notice = Some(format!("Could not save: {e}"));
                    }
                }
            }
        });
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.notice.clone() else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.state.notice = None;
                }
            });
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let Some(form) = self.state.upload.as_mut() else {
            return;
        };
        match upload_window(ctx, form) {
            UploadOutcome::Pending => {}
            UploadOutcome::Cancelled => self.state.upload = None,
            UploadOutcome::Submitted { title, url } => {
                let record = self.state.store.create_video(&title, &url);
                self.state.upload = None;
                self.state.open_editor(&record.id);
            }
        }
    }
}

impl eframe::App for VslApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Dashboard => self.dashboard(ui),
            Tab::Editor => self.editor(ui),
            Tab::Config => self.cloud_config(ui),
        });

        // The pipeline only lives while the editor is visible.
        if self.state.active_tab != Tab::Editor && self.state.player.take().is_some() {
            tracing::debug!("Closed editor player");
        }

        self.upload(ctx);
        self.notice_window(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.player = None;
        if let Err(e) = self.state.store.flush() {
            tracing::error!(error = %e, "Failed to flush videos on exit");
        }
    }
}
