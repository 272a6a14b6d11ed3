//! Form-session controller: two forms, two request lifecycles.
//!
//! Each flow cycles Idle -> Loading -> (Succeeded | Failed). A submit hands
//! out a [`SubmitTicket`]; the caller performs the request and passes the
//! ticket back to `settle_*` together with the result.

use serde::Deserialize;
use serde_json::{Map, Value};
use shared::{
    domain::{
        FieldError, FieldValue, GenerationField, GenerationForm, PredictionField, PredictionForm,
    },
    protocol::{GenerateRequest, GenerationResult, PredictRequest, PredictionResult},
};
use tracing::{debug, info, warn};

use crate::{RequestError, TweetApi};

pub const GENERATE_FAILURE_MESSAGE: &str = "❌ Failed to generate tweet.";
pub const PREDICT_FAILURE_MESSAGE: &str = "❌ Failed to predict likes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Generate,
    Predict,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Generate => "generate",
            Flow::Predict => "predict",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Flow::Generate => GENERATE_FAILURE_MESSAGE,
            Flow::Predict => PREDICT_FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmitTicket {
    pub flow: Flow,
    pub seq: u64,
}

/// What happens when an older request settles after a newer submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Every settlement is applied; the last one to arrive wins.
    #[default]
    LastSettledWins,
    /// Settlements from anything but the latest submit are dropped.
    DiscardStale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome<R> {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<R>,
}

impl<R> Default for RequestOutcome<R> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            result: None,
        }
    }
}

impl<R> RequestOutcome<R> {
    pub fn phase(&self) -> FlowPhase {
        if self.loading {
            FlowPhase::Loading
        } else if self.error.is_some() {
            FlowPhase::Failed
        } else if self.result.is_some() {
            FlowPhase::Succeeded
        } else {
            FlowPhase::Idle
        }
    }

    fn begin(&mut self) {
        self.error = None;
        self.result = None;
        self.loading = true;
    }

    fn settle(&mut self, result: Option<R>, error: Option<String>) {
        self.result = result;
        self.error = error;
        self.loading = false;
    }
}

#[derive(Debug)]
struct FlowSlot<R> {
    outcome: RequestOutcome<R>,
    latest_seq: u64,
}

impl<R> Default for FlowSlot<R> {
    fn default() -> Self {
        Self {
            outcome: RequestOutcome::default(),
            latest_seq: 0,
        }
    }
}

impl<R> FlowSlot<R> {
    fn begin(&mut self, flow: Flow) -> SubmitTicket {
        self.latest_seq += 1;
        self.outcome.begin();
        debug!(flow = flow.as_str(), seq = self.latest_seq, "submit started");
        SubmitTicket {
            flow,
            seq: self.latest_seq,
        }
    }

    fn settle(
        &mut self,
        flow: Flow,
        ticket: SubmitTicket,
        policy: StaleResponsePolicy,
        result: Result<R, RequestError>,
    ) -> bool {
        if ticket.flow != flow {
            warn!(
                expected = flow.as_str(),
                got = ticket.flow.as_str(),
                "ignoring settlement for another flow"
            );
            return false;
        }
        let stale = ticket.seq != self.latest_seq;
        if stale && policy == StaleResponsePolicy::DiscardStale {
            debug!(
                flow = flow.as_str(),
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale settlement"
            );
            return false;
        }

        match result {
            Ok(result) => {
                info!(flow = flow.as_str(), seq = ticket.seq, stale, "request succeeded");
                self.outcome.settle(Some(result), None);
            }
            Err(err) => {
                warn!(flow = flow.as_str(), seq = ticket.seq, stale, error = %err, "request failed");
                self.outcome
                    .settle(None, Some(flow.failure_message().to_string()));
            }
        }
        true
    }
}

#[derive(Debug, Default)]
pub struct FormSession {
    generation: GenerationForm,
    prediction: PredictionForm,
    generate: FlowSlot<GenerationResult>,
    predict: FlowSlot<PredictionResult>,
    stale_responses: StaleResponsePolicy,
}

impl FormSession {
    pub fn new(stale_responses: StaleResponsePolicy) -> Self {
        Self {
            stale_responses,
            ..Self::default()
        }
    }

    pub fn generation_form(&self) -> &GenerationForm {
        &self.generation
    }

    pub fn prediction_form(&self) -> &PredictionForm {
        &self.prediction
    }

    pub fn generate_outcome(&self) -> &RequestOutcome<GenerationResult> {
        &self.generate.outcome
    }

    pub fn predict_outcome(&self) -> &RequestOutcome<PredictionResult> {
        &self.predict.outcome
    }

    pub fn stale_responses(&self) -> StaleResponsePolicy {
        self.stale_responses
    }

    pub fn is_loading(&self, flow: Flow) -> bool {
        match flow {
            Flow::Generate => self.generate.outcome.loading,
            Flow::Predict => self.predict.outcome.loading,
        }
    }

    pub fn update_generation(&mut self, delta: GenerationField) {
        self.generation = self.generation.apply(delta);
    }

    pub fn update_prediction(&mut self, delta: PredictionField) {
        self.prediction = self.prediction.apply(delta);
    }

    /// Applies a raw `name`/`value` input event to the flow's form.
    pub fn apply_input(
        &mut self,
        flow: Flow,
        name: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        match flow {
            Flow::Generate => self.update_generation(GenerationField::from_input(name, value)?),
            Flow::Predict => self.update_prediction(PredictionField::from_input(name, value)?),
        }
        Ok(())
    }

    pub fn begin_generate(&mut self) -> (SubmitTicket, GenerateRequest) {
        let ticket = self.generate.begin(Flow::Generate);
        (ticket, GenerateRequest::from_form(&self.generation))
    }

    pub fn begin_predict(&mut self) -> (SubmitTicket, PredictRequest) {
        let ticket = self.predict.begin(Flow::Predict);
        (ticket, PredictRequest::from_form(&self.prediction))
    }

    /// Returns false when the settlement was dropped.
    pub fn settle_generate(
        &mut self,
        ticket: SubmitTicket,
        result: Result<GenerationResult, RequestError>,
    ) -> bool {
        self.generate
            .settle(Flow::Generate, ticket, self.stale_responses, result)
    }

    pub fn settle_predict(
        &mut self,
        ticket: SubmitTicket,
        result: Result<PredictionResult, RequestError>,
    ) -> bool {
        self.predict
            .settle(Flow::Predict, ticket, self.stale_responses, result)
    }

    pub async fn submit_generate(
        &mut self,
        api: &dyn TweetApi,
    ) -> &RequestOutcome<GenerationResult> {
        let (ticket, request) = self.begin_generate();
        let result = api.generate(&request).await;
        self.settle_generate(ticket, result);
        &self.generate.outcome
    }

    pub async fn submit_predict(&mut self, api: &dyn TweetApi) -> &RequestOutcome<PredictionResult> {
        let (ticket, request) = self.begin_predict();
        let result = api.predict(&request).await;
        self.settle_predict(ticket, result);
        &self.predict.outcome
    }
}

/// Key/value rows for an info or details mapping. Strings render unquoted.
pub fn display_entries(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
