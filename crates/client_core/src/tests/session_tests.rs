use super::*;
use async_trait::async_trait;
use serde_json::json;
use shared::domain::{BrandVoice, Weekday};
use std::sync::Mutex;

struct ScriptedApi {
    generate: Mutex<Option<Result<GenerationResult, RequestError>>>,
    predict: Mutex<Option<Result<PredictionResult, RequestError>>>,
    generate_requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedApi {
    fn new() -> Self {
        Self {
            generate: Mutex::new(None),
            predict: Mutex::new(None),
            generate_requests: Mutex::new(Vec::new()),
        }
    }

    fn with_generate(self, result: Result<GenerationResult, RequestError>) -> Self {
        *self.generate.lock().expect("lock") = Some(result);
        self
    }

    fn with_predict(self, result: Result<PredictionResult, RequestError>) -> Self {
        *self.predict.lock().expect("lock") = Some(result);
        self
    }
}

#[async_trait]
impl TweetApi for ScriptedApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, RequestError> {
        self.generate_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        self.generate
            .lock()
            .expect("lock")
            .take()
            .unwrap_or_else(|| Err(RequestError::Rejected("no scripted response".into())))
    }

    async fn predict(&self, _request: &PredictRequest) -> Result<PredictionResult, RequestError> {
        self.predict
            .lock()
            .expect("lock")
            .take()
            .unwrap_or_else(|| Err(RequestError::Rejected("no scripted response".into())))
    }
}

fn tweet(text: &str) -> GenerationResult {
    GenerationResult {
        generated_tweet: text.to_string(),
        info: Map::new(),
    }
}

fn likes(count: i64) -> PredictionResult {
    PredictionResult {
        predicted_likes: count.into(),
        popularity_estimate: String::new(),
        details: Map::new(),
    }
}

fn network_error() -> RequestError {
    RequestError::Status {
        status: 503,
        message: "unavailable".into(),
    }
}

#[test]
fn new_session_is_idle_with_default_forms() {
    let session = FormSession::default();
    assert_eq!(session.generate_outcome().phase(), FlowPhase::Idle);
    assert_eq!(session.predict_outcome().phase(), FlowPhase::Idle);
    assert_eq!(session.generation_form(), &GenerationForm::default());
    assert_eq!(session.prediction_form(), &PredictionForm::default());
    assert_eq!(session.stale_responses(), StaleResponsePolicy::LastSettledWins);
}

#[test]
fn begin_clears_previous_outcome_and_sets_loading() {
    let mut session = FormSession::default();
    let (ticket, _) = session.begin_generate();
    session.settle_generate(ticket, Err(network_error()));
    assert_eq!(session.generate_outcome().phase(), FlowPhase::Failed);

    let (_ticket, _) = session.begin_generate();
    let outcome = session.generate_outcome();
    assert!(outcome.loading);
    assert!(outcome.error.is_none());
    assert!(outcome.result.is_none());
    assert_eq!(outcome.phase(), FlowPhase::Loading);
    assert!(session.is_loading(Flow::Generate));
    assert!(!session.is_loading(Flow::Predict));
}

#[test]
fn begin_scales_sentiment_without_touching_form() {
    let mut session = FormSession::default();
    session.update_generation(GenerationField::SentimentTarget(7));
    let (ticket, request) = session.begin_generate();
    assert_eq!(ticket.flow, Flow::Generate);
    assert_eq!(request.sentiment_target, 0.7);
    assert_eq!(session.generation_form().sentiment_target, 7);
}

#[test]
fn successful_generate_stores_result_and_clears_error() {
    let mut session = FormSession::default();
    let (ticket, _) = session.begin_generate();
    let info = json!({ "a": "1" }).as_object().cloned().expect("map");
    let applied = session.settle_generate(
        ticket,
        Ok(GenerationResult {
            generated_tweet: "Hi".into(),
            info: info.clone(),
        }),
    );

    assert!(applied);
    let outcome = session.generate_outcome();
    assert_eq!(
        outcome.result,
        Some(GenerationResult {
            generated_tweet: "Hi".into(),
            info,
        })
    );
    assert!(outcome.error.is_none());
    assert!(!outcome.loading);
    assert_eq!(outcome.phase(), FlowPhase::Succeeded);
}

#[test]
fn failed_predict_sets_fixed_message() {
    let mut session = FormSession::default();
    let (ticket, _) = session.begin_predict();
    session.settle_predict(ticket, Err(network_error()));

    let outcome = session.predict_outcome();
    assert!(outcome.result.is_none());
    assert_eq!(outcome.error.as_deref(), Some(PREDICT_FAILURE_MESSAGE));
    assert!(!outcome.loading);
    assert_eq!(outcome.phase(), FlowPhase::Failed);
}

#[test]
fn loading_drops_exactly_once_per_submit() {
    let mut session = FormSession::default();
    let mut transitions = Vec::new();
    let mut observe = |session: &FormSession| transitions.push(session.predict_outcome().loading);

    observe(&session);
    let (ticket, _) = session.begin_predict();
    observe(&session);
    session.settle_predict(ticket, Ok(likes(3)));
    observe(&session);

    assert_eq!(transitions, vec![false, true, false]);
}

#[test]
fn loading_drops_exactly_once_when_the_request_fails() {
    let mut session = FormSession::default();
    let mut transitions = Vec::new();
    let mut observe = |session: &FormSession| transitions.push(session.generate_outcome().loading);

    observe(&session);
    let (ticket, _) = session.begin_generate();
    observe(&session);
    assert!(session.settle_generate(ticket, Err(network_error())));
    observe(&session);

    assert_eq!(transitions, vec![false, true, false]);
    assert_eq!(
        session.generate_outcome().error.as_deref(),
        Some(GENERATE_FAILURE_MESSAGE)
    );
}

#[test]
fn flows_are_independent() {
    let mut session = FormSession::default();
    let (generate_ticket, _) = session.begin_generate();
    let (predict_ticket, _) = session.begin_predict();

    session.settle_predict(predict_ticket, Err(network_error()));
    assert!(session.generate_outcome().loading);
    assert_eq!(session.predict_outcome().phase(), FlowPhase::Failed);

    session.settle_generate(generate_ticket, Ok(tweet("hello")));
    assert_eq!(session.generate_outcome().phase(), FlowPhase::Succeeded);
    assert_eq!(session.predict_outcome().phase(), FlowPhase::Failed);
}

#[test]
fn tickets_for_the_other_flow_are_ignored() {
    let mut session = FormSession::default();
    let (predict_ticket, _) = session.begin_predict();
    let (_generate_ticket, _) = session.begin_generate();

    assert!(!session.settle_generate(predict_ticket, Ok(tweet("wrong flow"))));
    assert!(session.generate_outcome().loading);
}

#[test]
fn last_settled_wins_lets_a_stale_response_overwrite() {
    let mut session = FormSession::new(StaleResponsePolicy::LastSettledWins);
    let (first, _) = session.begin_generate();
    let (second, _) = session.begin_generate();

    assert!(session.settle_generate(second, Ok(tweet("fresh"))));
    assert!(session.settle_generate(first, Ok(tweet("stale"))));

    let outcome = session.generate_outcome();
    assert_eq!(
        outcome.result.as_ref().map(|r| r.generated_tweet.as_str()),
        Some("stale")
    );
    assert!(!outcome.loading);
}

#[test]
fn last_settled_wins_clears_loading_on_first_settlement() {
    let mut session = FormSession::new(StaleResponsePolicy::LastSettledWins);
    let (first, _) = session.begin_predict();
    let (_second, _) = session.begin_predict();

    session.settle_predict(first, Err(network_error()));
    assert!(!session.predict_outcome().loading);
    assert_eq!(session.predict_outcome().phase(), FlowPhase::Failed);
}

#[test]
fn discard_stale_keeps_the_latest_submit() {
    let mut session = FormSession::new(StaleResponsePolicy::DiscardStale);
    let (first, _) = session.begin_generate();
    let (second, _) = session.begin_generate();

    assert!(!session.settle_generate(first, Ok(tweet("stale"))));
    assert!(session.generate_outcome().loading);

    assert!(session.settle_generate(second, Ok(tweet("fresh"))));
    assert!(!session.settle_generate(first, Err(network_error())));

    let outcome = session.generate_outcome();
    assert_eq!(
        outcome.result.as_ref().map(|r| r.generated_tweet.as_str()),
        Some("fresh")
    );
    assert!(outcome.error.is_none());
}

#[test]
fn success_after_failure_clears_the_error() {
    let mut session = FormSession::default();
    let (first, _) = session.begin_generate();
    let (second, _) = session.begin_generate();
    session.settle_generate(first, Err(network_error()));
    session.settle_generate(second, Ok(tweet("recovered")));

    let outcome = session.generate_outcome();
    assert!(outcome.error.is_none());
    assert!(outcome.result.is_some());
}

#[test]
fn apply_input_routes_to_the_flow_form() {
    let mut session = FormSession::default();
    session
        .apply_input(Flow::Generate, "brand_voice", FieldValue::Text("Playful".into()))
        .expect("brand voice");
    session
        .apply_input(Flow::Predict, "day", FieldValue::Text("Sunday".into()))
        .expect("day");
    session
        .apply_input(Flow::Predict, "has_media", FieldValue::Flag(true))
        .expect("has media");

    assert_eq!(session.generation_form().brand_voice, BrandVoice::Playful);
    assert_eq!(session.prediction_form().day, Weekday::Sunday);
    assert!(session.prediction_form().has_media);
    assert!(!session.generation_form().has_media);

    let err = session
        .apply_input(Flow::Generate, "day", FieldValue::Text("Sunday".into()))
        .expect_err("day is not a generation field");
    assert!(matches!(err, FieldError::UnknownField { .. }));
}

#[tokio::test]
async fn submit_generate_runs_the_full_cycle() {
    let api = ScriptedApi::new().with_generate(Ok(tweet("Hi")));
    let mut session = FormSession::default();
    session.update_generation(GenerationField::SentimentTarget(10));

    let outcome = session.submit_generate(&api).await;
    assert!(!outcome.loading);
    assert_eq!(
        outcome.result.as_ref().map(|r| r.generated_tweet.as_str()),
        Some("Hi")
    );

    let sent = api.generate_requests.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].sentiment_target, 1.0);
}

#[tokio::test]
async fn submit_predict_failure_keeps_form_editable() {
    let api = ScriptedApi::new().with_predict(Err(network_error()));
    let mut session = FormSession::default();

    let outcome = session.submit_predict(&api).await;
    assert_eq!(outcome.error.as_deref(), Some(PREDICT_FAILURE_MESSAGE));
    assert!(outcome.result.is_none());

    session.update_prediction(PredictionField::Content("retry".into()));
    assert_eq!(session.prediction_form().content, "retry");

    let api = ScriptedApi::new().with_predict(Ok(likes(12)));
    let outcome = session.submit_predict(&api).await;
    assert!(outcome.error.is_none());
    assert_eq!(
        outcome.result.as_ref().and_then(|r| r.predicted_likes.as_i64()),
        Some(12)
    );
}

#[test]
fn display_entries_render_strings_unquoted() {
    let map = json!({ "sentiment": "0.45", "word_count": 12, "has_media": true })
        .as_object()
        .cloned()
        .expect("map");
    let entries = display_entries(&map);
    assert!(entries.contains(&("sentiment".to_string(), "0.45".to_string())));
    assert!(entries.contains(&("word_count".to_string(), "12".to_string())));
    assert!(entries.contains(&("has_media".to_string(), "true".to_string())));
}
