mod colors;
mod gallery;
mod game_round;
mod images;
mod lobby;
mod player_list;

use eframe::egui;
use stablephone_common::engine::{CommandDispatcher, Effect, EngineEvent, SyncEngine, UserAction, ViewMode};
use stablephone_common::id_generator::suggest_player_name;
use stablephone_common::{log, warn, ClientIntent};
use tokio::sync::mpsc;

use crate::command_sender::CommandSender;
use crate::config::ClientConfigManager;
use crate::state::{ConnectionStatus, SharedState};
use crate::timers::TimerRuntime;

use gallery::render_gallery;
use game_round::render_game_round;
use images::ImageCache;
use lobby::render_lobby;

pub struct StablephoneApp {
    engine: SyncEngine,
    dispatcher: CommandDispatcher<CommandSender>,
    timers: TimerRuntime,
    events_rx: mpsc::UnboundedReceiver<EngineEvent>,
    shared_state: SharedState,
    images: ImageCache,
    config_manager: ClientConfigManager,
    name_hint: String,
}

impl StablephoneApp {
    pub fn new(
        engine: SyncEngine,
        command_sender: CommandSender,
        timers: TimerRuntime,
        events_rx: mpsc::UnboundedReceiver<EngineEvent>,
        shared_state: SharedState,
        config_manager: ClientConfigManager,
    ) -> Self {
        let name_hint = config_manager
            .get_config()
            .ok()
            .and_then(|config| config.last_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(suggest_player_name);

        Self {
            engine,
            dispatcher: CommandDispatcher::new(command_sender),
            timers,
            events_rx,
            shared_state,
            images: ImageCache::default(),
            config_manager,
            name_hint,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let was_game = self.engine.view_mode() == ViewMode::Game;
            let effects = self.engine.handle(event);
            self.apply(effects);

            if was_game && self.engine.view_mode() != ViewMode::Game {
                self.images.clear();
            }
        }
    }

    fn perform(&mut self, action: UserAction) {
        let effects = self.engine.handle(EngineEvent::User(action));
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send(intent) => {
                    self.dispatcher.dispatch(&intent);
                    if let ClientIntent::Join { name } = &intent {
                        self.remember_name(name.as_str());
                    }
                }
                Effect::ScheduleTimer { key, token, delay } => self.timers.schedule(key, token, delay),
                Effect::CancelTimer { key } => self.timers.cancel(&key),
            }
        }
    }

    fn remember_name(&mut self, name: &str) {
        self.name_hint = name.to_string();
        if let Err(e) = self
            .config_manager
            .update_config(|config| config.last_name = Some(name.to_string()))
        {
            warn!("Failed to save player name to config: {}", e);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (text, color) = match self.shared_state.connection() {
                ConnectionStatus::Connecting => ("Connecting...", colors::WAITING),
                ConnectionStatus::Open => ("Connected", colors::READY),
                ConnectionStatus::Closed => ("Disconnected", colors::DANGER),
            };
            ui.colored_label(color, format!("● {}", text));
            if let Some(name) = self.engine.ui_state().local_name().filter(|_| self.engine.ui_state().joined) {
                ui.separator();
                ui.label(format!("Playing as {}", name));
            }
        });
        if let Some(error) = self.shared_state.get_error() {
            ui.colored_label(colors::DANGER, error);
        }
    }
}

impl eframe::App for StablephoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("connection_status").show(ctx, |ui| {
            self.render_status(ui);
        });

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| match self.engine.view_mode() {
                ViewMode::Lobby => render_lobby(ui, &mut self.engine, &self.name_hint),
                ViewMode::Game => render_game_round(ui, &mut self.engine, &mut self.images),
                ViewMode::Gallery => render_gallery(ui, &self.engine, &mut self.images),
                ViewMode::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.spinner();
                        ui.label("Loading...");
                    });
                    None
                }
            })
            .inner;

        if let Some(action) = action {
            log!("User action: {:?}", action);
            self.perform(action);
        }
    }
}

impl Drop for StablephoneApp {
    fn drop(&mut self) {
        let effects = self.engine.shutdown();
        self.apply(effects);
    }
}
