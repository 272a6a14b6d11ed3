//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{RequestError, SubmitTicket};
use shared::protocol::{GenerationResult, PredictionResult};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    GenerateSettled {
        ticket: SubmitTicket,
        result: Result<GenerationResult, RequestError>,
    },
    PredictSettled {
        ticket: SubmitTicket,
        result: Result<PredictionResult, RequestError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

/// Worker-level problem shown in the status bar; request failures never land here.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn banner_text(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => {
                format!("Backend worker startup failure: {}", self.message)
            }
            UiErrorContext::CommandQueue => self.message.clone(),
        }
    }
}
