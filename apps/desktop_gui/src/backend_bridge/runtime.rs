//! Backend worker: owns the tokio runtime and runs each command as its own task.

use std::{sync::Arc, thread};

use client_core::TweetApi;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn TweetApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        // Requests are never awaited here, so a slow flow cannot hold up the other one.
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            let cmd_name = cmd.name();
            runtime.spawn(async move {
                let event = run_command(api.as_ref(), cmd).await;
                deliver(&ui_tx, event, cmd_name);
            });
        }
        tracing::info!("backend command queue closed; worker exiting");
    })
}

/// Never blocks a runtime thread; a full UI queue drops the settlement.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent, cmd_name: &'static str) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui event queue full; settlement dropped");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!(command = cmd_name, "ui closed before settlement");
            false
        }
    }
}

async fn run_command(api: &dyn TweetApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Generate { ticket, request } => UiEvent::GenerateSettled {
            ticket,
            result: api.generate(&request).await,
        },
        BackendCommand::Predict { ticket, request } => UiEvent::PredictSettled {
            ticket,
            result: api.predict(&request).await,
        },
    }
}
