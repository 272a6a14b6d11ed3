//! Applies backend events to the form session on the UI thread.

use client_core::FormSession;

use crate::controller::events::UiEvent;

pub fn apply_ui_event(session: &mut FormSession, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::Error(err) => {
            tracing::warn!(context = ?err.context(), detail = err.message(), "backend worker error");
            *status = err.banner_text();
        }
        UiEvent::GenerateSettled { ticket, result } => {
            session.settle_generate(ticket, result);
        }
        UiEvent::PredictSettled { ticket, result } => {
            session.settle_predict(ticket, result);
        }
    }
}
