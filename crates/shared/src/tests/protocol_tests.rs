use super::*;
use crate::domain::GenerationField;
use serde_json::json;

#[test]
fn sentiment_is_scaled_to_a_fraction() {
    for (stored, sent) in [(7, 0.7), (0, 0.0), (10, 1.0), (5, 0.5)] {
        let form = GenerationForm::default().apply(GenerationField::SentimentTarget(stored));
        let request = GenerateRequest::from_form(&form);
        assert_eq!(request.sentiment_target, sent);
        assert_eq!(form.sentiment_target, stored);
    }
}

#[test]
fn generate_payload_passes_other_fields_through() {
    let form = GenerationForm {
        company: "Acme".into(),
        has_media: true,
        sentiment_target: 7,
        brand_voice: BrandVoice::Playful,
        industry: Industry::Tech,
        message: "we shipped".into(),
    };
    let body = serde_json::to_value(GenerateRequest::from_form(&form)).expect("serialize");
    assert_eq!(
        body,
        json!({
            "company": "Acme",
            "has_media": true,
            "sentiment_target": 0.7,
            "brand_voice": "Playful",
            "industry": "Tech",
            "message": "we shipped",
        })
    );
}

#[test]
fn predict_payload_mirrors_form() {
    let form = PredictionForm {
        day: Weekday::Thursday,
        hour: 9,
        username: "nasa".into(),
        company: "NASA".into(),
        has_media: false,
        content: "liftoff".into(),
    };
    let body = serde_json::to_value(PredictRequest::from_form(&form)).expect("serialize");
    assert_eq!(
        body,
        json!({
            "day": "Thursday",
            "hour": 9,
            "username": "nasa",
            "company": "NASA",
            "has_media": false,
            "content": "liftoff",
        })
    );
}

#[test]
fn missing_or_null_optionals_become_empty() {
    let generated: GenerateResponse =
        serde_json::from_value(json!({ "generated_tweet": "Hi" })).expect("decode");
    assert!(generated.info.is_empty());

    let generated: GenerateResponse =
        serde_json::from_value(json!({ "generated_tweet": "Hi", "info": null })).expect("decode");
    assert!(generated.info.is_empty());

    let predicted: PredictResponse =
        serde_json::from_value(json!({ "predicted_likes": 42 })).expect("decode");
    let result = PredictionResult::from(predicted);
    assert_eq!(result.popularity_estimate, "");
    assert!(result.details.is_empty());
    assert_eq!(result.predicted_likes.as_i64(), Some(42));
}

#[test]
fn full_backend_bodies_decode() {
    let generated: GenerateResponse = serde_json::from_value(json!({
        "success": true,
        "generated_tweet": "Acme update: we shipped #Update",
        "description": "Here's your tweet",
        "info": { "brand_voice": "Casual", "word_goal": 25 }
    }))
    .expect("decode");
    let result = GenerationResult::from(generated);
    assert_eq!(result.info.get("word_goal"), Some(&json!(25)));

    let predicted: PredictResponse = serde_json::from_value(json!({
        "success": true,
        "predicted_likes": 1200,
        "popularity_estimate": "Viral Alert!",
        "details": { "word_count": 3, "has_media": true }
    }))
    .expect("decode");
    assert_eq!(predicted.popularity_estimate, "Viral Alert!");
    assert_eq!(predicted.details.len(), 2);
}

#[test]
fn missing_required_fields_fail_to_decode() {
    assert!(serde_json::from_value::<GenerateResponse>(json!({ "info": {} })).is_err());
    assert!(serde_json::from_value::<PredictResponse>(json!({ "details": {} })).is_err());
}

#[test]
fn null_predicted_likes_is_a_decode_failure() {
    let body = json!({ "success": true, "predicted_likes": null, "details": {} });
    assert!(serde_json::from_value::<PredictResponse>(body).is_err());
}

#[test]
fn endpoints_map_to_relative_paths() {
    assert_eq!(Endpoint::Generate.path(), "generate");
    assert_eq!(Endpoint::Predict.path(), "predict");
}

#[test]
fn backend_error_message_is_extracted_when_present() {
    use crate::error::ApiErrorBody;

    assert_eq!(
        ApiErrorBody::message_from(r#"{"success": false, "error": "Content cannot be empty"}"#),
        "Content cannot be empty"
    );
    assert_eq!(
        ApiErrorBody::message_from("<html>Bad Gateway</html>\n"),
        "<html>Bad Gateway</html>"
    );
}
