use std::time::Duration;

use eframe::egui;

use crate::playback::controller::PlaybackController;
use crate::renderer::gst_player::GstPlayer;
use crate::types::playback_state::PlaybackPhase;
use crate::types::video_record::{PlaybackSettings, VideoRecord};

/// The editor's preview player for one record.
///
/// A record switch drops the whole player, pipeline included, and builds a
/// new one; a settings change re-activates the existing controller.
pub struct SmartPlayer {
    record_id: String,
    settings: PlaybackSettings,
    controller: Option<PlaybackController<GstPlayer>>,
    open_error: Option<String>,
    texture: Option<egui::TextureHandle>,
}

impl SmartPlayer {
    pub fn new(record: &VideoRecord) -> Self {
        let (controller, open_error) = match GstPlayer::open(&record.video_src) {
            Ok(media) => (Some(PlaybackController::new(media, record)), None),
            Err(e) => {
                tracing::error!(id = %record.id, src = %record.video_src, error = %e, "Cannot open video");
                (None, Some(e.to_string()))
            }
        };
        Self {
            record_id: record.id.clone(),
            settings: record.settings.clone(),
            controller,
            open_error,
            texture: None,
        }
    }

    /// Brings the player in line with `record`.
    pub fn sync(&mut self, record: &VideoRecord) {
        if record.id != self.record_id {
            *self = Self::new(record);
        } else if record.settings != self.settings {
            self.settings = record.settings.clone();
            if let Some(controller) = self.controller.as_mut() {
                controller.activate(record);
            }
        }
    }

    /// Replaces the displayed frame with the newest decoded one.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let Some(frame) = self
            .controller
            .as_ref()
            .and_then(|c| c.media().take_frame())
        else {
            return;
        };
        let color_img = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match self.texture.as_mut() {
            Some(texture) => texture.set(color_img, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    format!("smart_player_{}", self.record_id),
                    color_img,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, record: &VideoRecord) {
        self.sync(record);
        let ctx = ui.ctx().clone();
        if let Some(controller) = self.controller.as_mut() {
            controller.pump();
        }
        self.update_texture(&ctx);

        let width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, egui::Color32::BLACK);

        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }

        let Some(controller) = self.controller.as_mut() else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!(
                    "Cannot play this video\n{}",
                    self.open_error.as_deref().unwrap_or_default()
                ),
                egui::FontId::proportional(14.0),
                egui::Color32::LIGHT_GRAY,
            );
            return;
        };
        let state = controller.state().clone();
        let accent = {
            let [r, g, b] = controller.settings().color.rgb();
            egui::Color32::from_rgb(r, g, b)
        };

        // "Click to listen" overlay: the whole frame is the target.
        if state.shows_sound_prompt() {
            painter.rect_filled(rect, 8.0, egui::Color32::from_black_alpha(30));
            let pill = egui::Rect::from_center_size(rect.center(), egui::vec2(340.0, 48.0));
            painter.rect_filled(pill, 24.0, egui::Color32::WHITE);
            painter.text(
                pill.center(),
                egui::Align2::CENTER_CENTER,
                "⚡ The video has started! Click to listen",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(20),
            );

            let headline = &controller.settings().headline;
            if !headline.is_empty() {
                let banner = egui::Rect::from_center_size(
                    egui::pos2(rect.center().x, rect.top() + 44.0),
                    egui::vec2(rect.width() - 32.0, 36.0),
                );
                painter.rect_filled(banner, 4.0, egui::Color32::from_black_alpha(150));
                painter.text(
                    banner.center(),
                    egui::Align2::CENTER_CENTER,
                    headline,
                    egui::FontId::proportional(20.0),
                    egui::Color32::WHITE,
                );
            }
        }

        if response.clicked() {
            if state.shows_sound_prompt() {
                controller.acknowledge_sound_prompt();
            } else {
                controller.toggle_play();
            }
        }

        if state.show_delayed_button {
            let cta = egui::Rect::from_center_size(
                egui::pos2(rect.center().x, rect.bottom() - 96.0),
                egui::vec2((rect.width() - 32.0).min(440.0), 56.0),
            );
            let cta_button = egui::Button::new(
                egui::RichText::new("✔ I WANT ACCESS NOW")
                    .size(20.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(egui::Color32::from_rgb(34, 197, 94))
            .corner_radius(8.0);
            let clicked = ui.put(cta, cta_button).clicked();
            if clicked {
                tracing::info!(id = %controller.record_id(), "Call-to-action clicked");
            }
        }

        // Control bar
        ui.horizontal(|ui| {
            let label = match state.phase {
                PlaybackPhase::Ended => "⟲ Replay",
                _ if state.is_playing() => "⏸ Pause",
                _ => "▶ Play",
            };
            if ui.button(label).clicked() {
                if state.phase == PlaybackPhase::Ended {
                    controller.activate(record);
                } else {
                    controller.toggle_play();
                }
            }

            let (bar, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 8.0),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(bar, 4.0, egui::Color32::from_gray(60));
            let mut filled = bar;
            filled.set_width(bar.width() * (state.progress / 100.0) as f32);
            ui.painter().rect_filled(filled, 4.0, accent);
        });

        if let Some(reason) = state.last_attempt.rejection().filter(|_| !state.is_playing()) {
            ui.label(
                egui::RichText::new(format!("Playback did not start ({reason}). Press play to retry."))
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );
        }

        if state.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(33));
        }
    }
}
