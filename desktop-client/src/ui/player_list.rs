use eframe::egui;
use stablephone_common::engine::PlayerRow;

use super::colors;

pub fn render_player_list(ui: &mut egui::Ui, rows: &[PlayerRow]) {
    ui.heading("Players");
    ui.separator();

    if rows.is_empty() {
        ui.label("Nobody has joined yet.");
        return;
    }

    for row in rows {
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(dot.center(), 6.0, colors::player_color(row.name.as_str()));

            let mut name = egui::RichText::new(row.name.as_str()).strong();
            if row.flashing {
                name = name.background_color(colors::FLASH).color(egui::Color32::BLACK);
            }
            ui.label(name);

            if row.is_local {
                ui.label(egui::RichText::new("(You)").italics());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if row.ready {
                    ui.colored_label(colors::READY, "✅ Ready");
                } else {
                    ui.colored_label(colors::WAITING, "⏳ Not Ready");
                }
            });
        });
    }
}
