use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::parse_base_url, display_entries, load_settings, Flow, FormSession, HttpTweetApi,
    RequestOutcome,
};
use shared::{
    domain::{BrandVoice, FieldValue, GenerationField, Industry, PredictionField, Weekday},
    protocol::{GenerationResult, PredictionResult},
};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset; logs go to stderr so stdout stays the result.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "tweet-studio", about = "Generate tweets and predict their likes")]
struct Cli {
    /// Overrides the backend base address from settings/env.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    /// Print the result as JSON instead of the text panel.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a tweet from a message.
    Generate(GenerateArgs),
    /// Predict how many likes a tweet will get.
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    has_media: bool,
    /// 0-10.
    #[arg(long, allow_negative_numbers = true)]
    sentiment: Option<i64>,
    #[arg(long)]
    brand_voice: Option<BrandVoice>,
    #[arg(long)]
    industry: Option<Industry>,
    #[arg(long)]
    message: Option<String>,
    /// Raw `name=value` input, applied after the flags.
    #[arg(long = "field", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    day: Option<Weekday>,
    /// 0-24.
    #[arg(long, allow_negative_numbers = true)]
    hour: Option<i64>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    has_media: bool,
    #[arg(long)]
    content: Option<String>,
    #[arg(long = "field", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

/// Checkbox fields carry flags; everything else arrives as text.
fn input_value(name: &str, raw: &str) -> Result<FieldValue> {
    if name == "has_media" {
        let flag = raw
            .trim()
            .parse::<bool>()
            .with_context(|| format!("has_media expects true or false, got '{raw}'"))?;
        return Ok(FieldValue::Flag(flag));
    }
    Ok(FieldValue::Text(raw.to_string()))
}

fn generation_deltas(args: GenerateArgs) -> (Vec<GenerationField>, Vec<(String, String)>) {
    let mut deltas = Vec::new();
    if let Some(v) = args.company {
        deltas.push(GenerationField::Company(v));
    }
    if args.has_media {
        deltas.push(GenerationField::HasMedia(true));
    }
    if let Some(v) = args.sentiment {
        deltas.push(GenerationField::SentimentTarget(v));
    }
    if let Some(v) = args.brand_voice {
        deltas.push(GenerationField::BrandVoice(v));
    }
    if let Some(v) = args.industry {
        deltas.push(GenerationField::Industry(v));
    }
    if let Some(v) = args.message {
        deltas.push(GenerationField::Message(v));
    }
    (deltas, args.fields)
}

fn prediction_deltas(args: PredictArgs) -> (Vec<PredictionField>, Vec<(String, String)>) {
    let mut deltas = Vec::new();
    if let Some(v) = args.day {
        deltas.push(PredictionField::Day(v));
    }
    if let Some(v) = args.hour {
        deltas.push(PredictionField::Hour(v));
    }
    if let Some(v) = args.username {
        deltas.push(PredictionField::Username(v));
    }
    if let Some(v) = args.company {
        deltas.push(PredictionField::Company(v));
    }
    if args.has_media {
        deltas.push(PredictionField::HasMedia(true));
    }
    if let Some(v) = args.content {
        deltas.push(PredictionField::Content(v));
    }
    (deltas, args.fields)
}

fn render_generation(result: &GenerationResult) -> String {
    let mut out = format!("🎉 Generated Tweet:\n{}\n", result.generated_tweet);
    if !result.info.is_empty() {
        out.push_str("Info:\n");
        for (key, value) in display_entries(&result.info) {
            out.push_str(&format!("  {key}: {value}\n"));
        }
    }
    out
}

fn render_prediction(result: &PredictionResult) -> String {
    let mut out = format!("📊 Predicted Likes: {}\n", result.predicted_likes);
    if !result.popularity_estimate.is_empty() {
        out.push_str(&format!("{}\n", result.popularity_estimate));
    }
    if !result.details.is_empty() {
        out.push_str("Details:\n");
        for (key, value) in display_entries(&result.details) {
            out.push_str(&format!("  {key}: {value}\n"));
        }
    }
    out
}

fn report<R: serde::Serialize>(
    outcome: &RequestOutcome<R>,
    json: bool,
    render: impl Fn(&R) -> String,
) -> Result<ExitCode> {
    match (&outcome.result, &outcome.error) {
        (Some(result), _) if json => {
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(ExitCode::SUCCESS)
        }
        (Some(result), _) => {
            print!("{}", render(result));
            Ok(ExitCode::SUCCESS)
        }
        (None, Some(error)) => {
            eprintln!("{error}");
            Ok(ExitCode::FAILURE)
        }
        (None, None) => Ok(ExitCode::SUCCESS),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(raw) = cli.api_base_url.as_deref() {
        settings.api_base_url = parse_base_url(raw)?;
    }
    tracing::debug!(base_url = %settings.api_base_url, "using backend");

    let api = HttpTweetApi::from_settings(&settings).context("failed to build http client")?;
    let mut session = FormSession::new(settings.stale_responses);

    match cli.command {
        Command::Generate(args) => {
            let (deltas, fields) = generation_deltas(args);
            for delta in deltas {
                session.update_generation(delta);
            }
            for (name, raw) in fields {
                session.apply_input(Flow::Generate, &name, input_value(&name, &raw)?)?;
            }
            let outcome = session.submit_generate(&api).await;
            report(outcome, cli.json, render_generation)
        }
        Command::Predict(args) => {
            let (deltas, fields) = prediction_deltas(args);
            for delta in deltas {
                session.update_prediction(delta);
            }
            for (name, raw) in fields {
                session.apply_input(Flow::Predict, &name, input_value(&name, &raw)?)?;
            }
            let outcome = session.submit_predict(&api).await;
            report(outcome, cli.json, render_prediction)
        }
    }
}
