use eframe::egui;

use crate::types::video_record::{AccentColor, MAX_DELAY_SECS, PlaybackSettings, SettingsPatch};

/// Draws the editor's settings card. Returns the change the user made this frame, if any.
pub fn settings_panel(ui: &mut egui::Ui, settings: &PlaybackSettings) -> Option<SettingsPatch> {
    let mut patch = None;

    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.heading("⚙ Settings");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Smart Autoplay");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut on = settings.smart_autoplay;
                    if ui.checkbox(&mut on, "").changed() {
                        patch = Some(SettingsPatch::smart_autoplay(on));
                    }
                });
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Delayed button");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut on = settings.delay_button;
                    if ui.checkbox(&mut on, "").changed() {
                        patch = Some(SettingsPatch::delay_button(on));
                    }
                });
            });
            if settings.delay_button {
                ui.horizontal(|ui| {
                    ui.label("🕑");
                    let mut secs = settings.delay_time;
                    let slider = egui::Slider::new(&mut secs, 0..=MAX_DELAY_SECS).suffix("s");
                    if ui.add(slider).changed() {
                        patch = Some(SettingsPatch::delay_time(secs));
                    }
                });
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Headline");
                let mut headline = settings.headline.clone();
                let edit = egui::TextEdit::singleline(&mut headline).hint_text("Shown while muted");
                if ui.add(edit).changed() {
                    patch = Some(SettingsPatch::headline(headline));
                }
            });
            ui.separator();

            ui.label(
                egui::RichText::new("PLAYER COLOR")
                    .size(11.0)
                    .strong()
                    .color(egui::Color32::GRAY),
            );
            ui.horizontal(|ui| {
                for color in AccentColor::ALL {
                    if color_swatch(ui, color, settings.color == color).clicked() {
                        patch = Some(SettingsPatch::color(color));
                    }
                }
            });
        });

    patch
}

fn color_swatch(ui: &mut egui::Ui, color: AccentColor, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
    let [r, g, b] = color.rgb();
    let painter = ui.painter();
    if selected {
        painter.circle_stroke(
            rect.center(),
            13.0,
            egui::Stroke::new(2.0, egui::Color32::from_gray(160)),
        );
    }
    painter.circle_filled(rect.center(), 10.0, egui::Color32::from_rgb(r, g, b));
    response.on_hover_text(color.label())
}
