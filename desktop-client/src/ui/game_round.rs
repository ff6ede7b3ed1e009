use eframe::egui;
use stablephone_common::defaults::FIRST_ROUND;
use stablephone_common::engine::{SyncEngine, UserAction};

use super::images::{placeholder, show_payload, ImageCache};
use super::player_list::render_player_list;

const IMAGE_SIZE: egui::Vec2 = egui::vec2(384.0, 384.0);
const FADING_OPACITY: f32 = 0.35;

pub fn render_game_round(
    ui: &mut egui::Ui,
    engine: &mut SyncEngine,
    images: &mut ImageCache,
) -> Option<UserAction> {
    let round = engine.snapshot().round_number;
    let rows = engine.player_rows();

    egui::SidePanel::right("game_players")
        .resizable(false)
        .default_width(200.0)
        .show_inside(ui, |ui| render_player_list(ui, &rows));

    if round == FIRST_ROUND {
        ui.heading("Round 1: Start your chain!");
        render_prompt_entry(ui, engine)
    } else {
        ui.heading(format!("Round {}", round));
        render_description_entry(ui, engine, images)
    }
}

fn render_prompt_entry(ui: &mut egui::Ui, engine: &mut SyncEngine) -> Option<UserAction> {
    let ready = engine.local_player_ready();
    let can_submit = engine.can_submit_prompt();
    let mut action = None;

    ui.label("Come up with an exciting first image!");
    ui.horizontal(|ui| {
        ui.add_enabled(
            !ready,
            egui::TextEdit::singleline(&mut engine.drafts_mut().prompt)
                .hint_text("Write your prompt")
                .desired_width(320.0),
        );
        if ui.add_enabled(can_submit, egui::Button::new("Submit")).clicked() {
            action = Some(UserAction::SubmitPrompt);
        }
    });

    if ready {
        ui.label("Submitted. Waiting for the other players...");
    }
    action
}

fn render_description_entry(
    ui: &mut egui::Ui,
    engine: &mut SyncEngine,
    images: &mut ImageCache,
) -> Option<UserAction> {
    let Some(owner) = engine.ui_state().assigned_chain.clone() else {
        ui.label("Waiting for your assignment...");
        return None;
    };

    ui.label(format!("Describe the picture you see! ({}'s chain)", owner));
    ui.add_space(8.0);

    match engine.displayed_image() {
        Some(payload) => {
            let opacity = if engine.is_image_transitioning() { FADING_OPACITY } else { 1.0 };
            show_payload(ui, images, payload, IMAGE_SIZE, opacity);
        }
        None => {
            placeholder(ui, IMAGE_SIZE, "Waiting for image...");
        }
    }
    if engine.is_image_transitioning() {
        ui.ctx().request_repaint();
    }

    let ready = engine.local_player_ready();
    let can_submit = engine.can_submit_description();
    let mut action = None;

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.add_enabled(
            !ready,
            egui::TextEdit::singleline(&mut engine.drafts_mut().description)
                .hint_text("Your description")
                .desired_width(320.0),
        );
        if ui.add_enabled(can_submit, egui::Button::new("Submit")).clicked() {
            action = Some(UserAction::SubmitDescription);
        }
    });

    if ready {
        ui.label("Submitted. Waiting for the other players...");
    }
    action
}
