//! Backend commands queued from UI to backend worker.

use client_core::SubmitTicket;
use shared::protocol::{GenerateRequest, PredictRequest};

pub enum BackendCommand {
    Generate {
        ticket: SubmitTicket,
        request: GenerateRequest,
    },
    Predict {
        ticket: SubmitTicket,
        request: PredictRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate { .. } => "generate",
            BackendCommand::Predict { .. } => "predict",
        }
    }

    pub fn ticket(&self) -> SubmitTicket {
        match self {
            BackendCommand::Generate { ticket, .. } | BackendCommand::Predict { ticket, .. } => {
                *ticket
            }
        }
    }
}
