mod command_sender;
mod config;
mod state;
mod timers;
mod ui;
mod ws_client;

use clap::Parser;
use eframe::egui;
use stablephone_common::engine::{EngineTimings, SyncEngine};
use stablephone_common::{log, logger, warn};
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::get_config_manager;
use state::SharedState;
use timers::TimerRuntime;
use ui::StablephoneApp;
use ws_client::{parse_server_url, ws_client_task};

#[derive(Parser)]
#[command(name = "stablephone_client")]
struct Args {
    /// Websocket endpoint, overrides the configured one.
    #[arg(long)]
    server_url: Option<String>,
    /// Path of the YAML config file.
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Only print warnings.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.quiet);

    let config_manager = get_config_manager(args.config.as_deref());
    let config = config_manager.get_config()?;
    let server_url = parse_server_url(args.server_url.as_deref().unwrap_or(&config.server.url))?;
    let timings = EngineTimings::from(&config.timings);

    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let shared_state = SharedState::new();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_title("StablePhone"),
        ..Default::default()
    };

    log!("Starting client against {}", server_url);

    eframe::run_native(
        "StablePhone",
        options,
        Box::new(move |cc| {
            let repaint = cc.egui_ctx.clone();
            let task_state = shared_state.clone();
            let task_events = events_tx.clone();
            handle.spawn(async move {
                if let Err(e) = ws_client_task(server_url, task_state, task_events, outbound_rx, repaint).await {
                    warn!("{}", e);
                }
            });

            let wake_ctx = cc.egui_ctx.clone();
            let timers = TimerRuntime::new(handle, events_tx, move || wake_ctx.request_repaint());

            Ok(Box::new(StablephoneApp::new(
                SyncEngine::new(timings),
                CommandSender::new(outbound_tx, shared_state.clone()),
                timers,
                events_rx,
                shared_state,
                config_manager,
            )))
        }),
    )?;

    runtime.shutdown_background();
    Ok(())
}
