use eframe::egui;

use crate::types::video_record::VideoRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Open(String),
    Delete(String),
    ConnectCloud,
}

const CARD_WIDTH: f32 = 260.0;
const THUMB_SIZE: egui::Vec2 = egui::vec2(240.0, 135.0);

pub fn dashboard_panel(
    ui: &mut egui::Ui,
    videos: &[VideoRecord],
    connected: bool,
) -> Vec<DashboardEvent> {
    let mut events = Vec::new();

    ui.vertical(|ui| {
        if !connected {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(254, 252, 232))
                .inner_margin(12.0)
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Warning:")
                                .strong()
                                .color(egui::Color32::from_rgb(133, 77, 14)),
                        );
                        ui.label(
                            egui::RichText::new(
                                "You are offline. Your videos are only saved on this computer.",
                            )
                            .color(egui::Color32::from_rgb(133, 77, 14)),
                        );
                        if ui.link("Connect cloud").clicked() {
                            events.push(DashboardEvent::ConnectCloud);
                        }
                    });
                });
            ui.add_space(8.0);
        }

        if videos.is_empty() {
            ui.label("No videos yet. Use \"New video\" to add one.");
            return;
        }

        let items_per_row = (ui.available_width() / CARD_WIDTH).floor() as usize;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in videos.chunks(items_per_row.max(1)) {
                ui.horizontal(|ui| {
                    for video in row {
                        video_card(ui, video, &mut events);
                    }
                });
                ui.add_space(12.0);
            }
        });
    });

    events
}

fn video_card(ui: &mut egui::Ui, video: &VideoRecord, events: &mut Vec<DashboardEvent>) {
    egui::Frame::group(ui.style())
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(THUMB_SIZE.x);
            ui.vertical(|ui| {
                let thumb = ui.add(
                    egui::Image::new(video.thumbnail.as_str())
                        .fit_to_exact_size(THUMB_SIZE)
                        .corner_radius(6.0)
                        .sense(egui::Sense::click()),
                );
                ui.painter().text(
                    thumb.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "▶",
                    egui::FontId::proportional(36.0),
                    egui::Color32::WHITE,
                );

                let title = ui.add(
                    egui::Label::new(egui::RichText::new(&video.title).strong())
                        .truncate()
                        .sense(egui::Sense::click()),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "{} views • {}% play rate",
                        video.views, video.play_rate
                    ))
                    .size(11.0)
                    .color(egui::Color32::GRAY),
                );

                if thumb.clicked() || title.clicked() {
                    events.push(DashboardEvent::Open(video.id.clone()));
                }
                if ui.small_button("🗑 Delete").clicked() {
                    events.push(DashboardEvent::Delete(video.id.clone()));
                }
            });
        });
}
