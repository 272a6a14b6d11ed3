use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::{config::parse_base_url, load_settings, FormSession, HttpTweetApi, TweetApi};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "tweet-studio-gui", about = "Tweet generator and like predictor")]
struct Args {
    /// Overrides the backend base address from settings/env.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(raw) = args.api_base_url.as_deref() {
        settings.api_base_url = parse_base_url(raw)?;
    }
    tracing::info!(
        base_url = %settings.api_base_url,
        stale_responses = ?settings.stale_responses,
        "starting desktop gui"
    );

    let api: Arc<dyn TweetApi> =
        Arc::new(HttpTweetApi::from_settings(&settings).context("failed to build http client")?);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, api);

    let session = FormSession::new(settings.stale_responses);
    let api_base_url = settings.api_base_url.to_string();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tweet Studio")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tweet Studio",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx,
                ui_rx,
                session,
                api_base_url,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
