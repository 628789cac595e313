use eframe::egui;

/// The cloud configuration screen. Returns the text to save when the user submits.
pub fn config_panel(ui: &mut egui::Ui, draft: &mut String) -> Option<String> {
    let mut submitted = None;

    egui::Frame::group(ui.style())
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_max_width(640.0);
            ui.heading("Free cloud setup (Firebase)");
            ui.label(
                egui::RichText::new(
                    "So your videos work on your site and you don't lose data, connect a free Firebase project.",
                )
                .color(egui::Color32::GRAY),
            );
            ui.add_space(8.0);
            ui.label("1. Go to console.firebase.google.com and create a project.");
            ui.label("2. Open Firestore Database and click \"Create database\".");
            ui.label("3. Open Project settings and copy the SDK config (JSON).");
            ui.label("4. Paste it below:");
            ui.add_space(8.0);

            ui.add(
                egui::TextEdit::multiline(draft)
                    .code_editor()
                    .desired_rows(10)
                    .desired_width(f32::INFINITY)
                    .hint_text(r#"{ "apiKey": "...", "authDomain": "..." }"#),
            );
            ui.add_space(8.0);
            if ui
                .add_sized([ui.available_width(), 32.0], egui::Button::new("Save connection"))
                .clicked()
            {
                submitted = Some(draft.clone());
            }
        });

    submitted
}
