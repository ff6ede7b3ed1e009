use eframe::egui;
use stablephone_common::defaults::MAX_SCORE;
use stablephone_common::engine::{SyncEngine, UserAction};

use super::colors;
use super::images::{placeholder, show_payload, ImageCache};

const THUMBNAIL_SIZE: egui::Vec2 = egui::vec2(128.0, 128.0);
const EXPANDED_SIZE: egui::Vec2 = egui::vec2(512.0, 512.0);

pub fn render_gallery(ui: &mut egui::Ui, engine: &SyncEngine, images: &mut ImageCache) -> Option<UserAction> {
    let mut action = None;
    let snapshot = engine.snapshot();

    ui.heading("Game Over! Gallery");
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("gallery_scroll")
        .show(ui, |ui| {
            for (owner, steps) in snapshot.chains.iter().flatten() {
                ui.group(|ui| {
                    ui.colored_label(
                        colors::player_color(owner.as_str()),
                        egui::RichText::new(format!("{}'s Gallery", owner)).strong(),
                    );
                    egui::ScrollArea::horizontal()
                        .id_salt(("chain_scroll", owner.as_str()))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                for (index, step) in steps.iter().enumerate() {
                                    ui.vertical(|ui| {
                                        ui.set_max_width(THUMBNAIL_SIZE.x + 16.0);
                                        let response = match &step.image {
                                            Some(payload) => show_payload(ui, images, payload, THUMBNAIL_SIZE, 1.0),
                                            None => placeholder(ui, THUMBNAIL_SIZE, "No image"),
                                        };
                                        if step.image.is_some() && response.clicked() {
                                            action = Some(UserAction::ExpandStep {
                                                owner: owner.clone(),
                                                index,
                                            });
                                        }
                                        ui.label(egui::RichText::new(step.player.as_str()).strong());
                                        ui.label(format!("“{}”", step.prompt));
                                    });
                                }
                            });
                        });
                });
                ui.add_space(12.0);
            }

            render_scoreboard(ui, engine);
            ui.add_space(16.0);
            if let Some(restart) = render_restart(ui, engine.ui_state().restart_confirmation_pending) {
                action = Some(restart);
            }
        });

    if let Some(close) = render_expanded(ui.ctx(), engine, images) {
        action = Some(close);
    }
    action
}

fn render_scoreboard(ui: &mut egui::Ui, engine: &SyncEngine) {
    let ranked = engine.snapshot().ranked_scores();
    if ranked.is_empty() {
        return;
    }

    ui.heading("Scoreboard");
    egui::Grid::new("scoreboard")
        .striped(true)
        .num_columns(2)
        .show(ui, |ui| {
            ui.strong("Player");
            ui.strong(format!("Score (0–{})", MAX_SCORE));
            ui.end_row();

            for (player, score) in ranked {
                ui.colored_label(colors::player_color(player.as_str()), player.as_str());
                ui.label(score.to_string());
                ui.end_row();
            }
        });
}

fn render_restart(ui: &mut egui::Ui, pending: bool) -> Option<UserAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        if !pending {
            if ui.button("Restart Game").clicked() {
                action = Some(UserAction::RequestRestart);
            }
            return;
        }

        ui.colored_label(
            colors::DANGER,
            "Are you sure you want to restart? This will reset the lobby and all players will need to join again.",
        );
        ui.horizontal(|ui| {
            if ui.button("Confirm Restart").clicked() {
                action = Some(UserAction::ConfirmRestart);
            }
            if ui.button("Cancel").clicked() {
                action = Some(UserAction::CancelRestart);
            }
        });
    });
    action
}

fn render_expanded(ctx: &egui::Context, engine: &SyncEngine, images: &mut ImageCache) -> Option<UserAction> {
    let state = engine.ui_state();
    let payload = state.expanded_image.as_deref()?;
    let mut action = None;

    egui::Window::new("Image")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            show_payload(ui, images, payload, EXPANDED_SIZE, 1.0);
            if let Some(caption) = &state.expanded_image_prompt {
                ui.label(caption);
            }
            if ui.button("Close").clicked() {
                action = Some(UserAction::CloseExpanded);
            }
        });
    action
}
