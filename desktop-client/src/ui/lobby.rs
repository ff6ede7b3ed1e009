use eframe::egui;
use stablephone_common::engine::{SyncEngine, UserAction};

use super::player_list::render_player_list;

pub fn render_lobby(ui: &mut egui::Ui, engine: &mut SyncEngine, name_hint: &str) -> Option<UserAction> {
    let mut action = None;
    let joined = engine.ui_state().joined;
    let can_join = engine.can_join();
    let ready = engine.local_player_ready();

    ui.vertical_centered(|ui| {
        ui.heading("📞 Welcome to StablePhone!");
    });
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Name:");
        let drafts = engine.drafts_mut();
        let response = ui.add_enabled(
            !joined,
            egui::TextEdit::singleline(&mut drafts.name).hint_text(name_hint),
        );
        if !joined && drafts.name.is_empty() && !name_hint.is_empty() && ui.small_button("Use").clicked() {
            drafts.name = name_hint.to_string();
        }

        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let label = if joined { "Joined" } else { "Join" };
        if ui.add_enabled(can_join, egui::Button::new(label)).clicked() || (submitted && can_join) {
            action = Some(UserAction::Join);
        }
    });

    if joined {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.add_enabled(!ready, egui::Button::new("Ready")).clicked() {
                action = Some(UserAction::Ready);
            }
            if ready {
                ui.label("Waiting for the other players...");
            }
        });
    } else {
        ui.label("Pick a name and join. Rejoin with the same name after a disconnect.");
    }

    ui.add_space(12.0);
    render_player_list(ui, &engine.player_rows());

    action
}
