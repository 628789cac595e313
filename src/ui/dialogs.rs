use eframe::egui;

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Pending,
    Cancelled,
    Submitted { title: String, url: String },
}

pub fn upload_window(ctx: &egui::Context, form: &mut UploadForm) -> UploadOutcome {
    let mut outcome = UploadOutcome::Pending;
    let mut open = true;

    egui::Window::new("New video")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.add(egui::TextEdit::singleline(&mut form.title).hint_text("Title"));
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut form.url)
                        .hint_text("MP4 link (R2, S3, etc)"),
                );
                if ui.button("Browse…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Video", &["mp4", "mov", "mkv", "webm"])
                        .pick_file()
                    {
                        form.url = path.to_string_lossy().to_string();
                    }
                }
            });
            ui.label(
                egui::RichText::new("Tip: Cloudflare R2 gives you free links.")
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(6.0);

            let can_submit = !form.title.trim().is_empty();
            if ui
                .add_enabled(can_submit, egui::Button::new("Create"))
                .clicked()
            {
                outcome = UploadOutcome::Submitted {
                    title: form.title.clone(),
                    url: form.url.clone(),
                };
            }
        });

    if !open {
        outcome = UploadOutcome::Cancelled;
    }
    outcome
}

/// Shows the snippet with a copy button. `open` is cleared when the window is closed.
pub fn embed_window(ctx: &egui::Context, snippet: &str, open: &mut bool) {
    egui::Window::new("Embed code")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(open)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Copy and paste it into Elementor or any HTML block.")
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );
            ui.set_max_width(560.0);
            let mut text = snippet.to_string();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            if ui.button("📋 Copy").clicked() {
                ctx.copy_text(snippet.to_string());
                tracing::debug!("Copied embed code");
            }
        });
}
