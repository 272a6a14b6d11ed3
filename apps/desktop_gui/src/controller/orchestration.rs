//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{Flow, FormSession, RequestError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::from_message(
                UiErrorContext::CommandQueue,
                "UI command queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(UiError::from_message(
                UiErrorContext::CommandQueue,
                "Backend command processor disconnected; restart the app",
            ))
        }
    }
}

/// Starts a submit for `flow` and hands the request to the backend worker.
///
/// If the command cannot be queued the flow is settled as failed right away,
/// so its loading flag never sticks.
pub fn submit_flow(
    session: &mut FormSession,
    cmd_tx: &Sender<BackendCommand>,
    flow: Flow,
    status: &mut String,
) {
    let cmd = match flow {
        Flow::Generate => {
            let (ticket, request) = session.begin_generate();
            BackendCommand::Generate { ticket, request }
        }
        Flow::Predict => {
            let (ticket, request) = session.begin_predict();
            BackendCommand::Predict { ticket, request }
        }
    };
    let ticket = cmd.ticket();

    if let Err(err) = dispatch_backend_command(cmd_tx, cmd) {
        *status = err.banner_text();
        let failure = RequestError::Dispatch(err.message().to_string());
        match flow {
            Flow::Generate => session.settle_generate(ticket, Err(failure)),
            Flow::Predict => session.settle_predict(ticket, Err(failure)),
        };
    }
}
