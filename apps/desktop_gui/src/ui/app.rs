use std::time::Duration;

use client_core::{Flow, FormSession};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{BrandVoice, GenerationField, Industry, PredictionField, Weekday};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::submit_flow, reducer::apply_ui_event};
use crate::ui::widgets::{self, ERROR_COLOR, GENERATE_PALETTE, PREDICT_PALETTE};

pub struct DesktopGuiApp {
    session: FormSession,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    api_base_url: String,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        session: FormSession,
        api_base_url: String,
    ) -> Self {
        Self {
            session,
            cmd_tx,
            ui_rx,
            status: String::new(),
            api_base_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.session, &mut self.status, event);
        }
    }

    fn submit_button(&mut self, ui: &mut egui::Ui, flow: Flow) {
        let loading = self.session.is_loading(flow);
        let label = match (flow, loading) {
            (Flow::Generate, true) => "Generating...",
            (Flow::Generate, false) => "Generate Tweet",
            (Flow::Predict, true) => "Predicting...",
            (Flow::Predict, false) => "Predict Likes",
        };
        let button = egui::Button::new(egui::RichText::new(label).strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(!loading, button).clicked() {
            submit_flow(&mut self.session, &self.cmd_tx, flow, &mut self.status);
        }
    }

    fn show_generate_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Generate Tweet");
        ui.add_space(8.0);

        let form = self.session.generation_form().clone();
        let mut deltas = Vec::new();
        if let Some(v) = widgets::text_input(ui, "Company", &form.company) {
            deltas.push(GenerationField::Company(v));
        }
        if let Some(v) = widgets::checkbox(ui, "Has Media", form.has_media) {
            deltas.push(GenerationField::HasMedia(v));
        }
        if let Some(v) = widgets::number_input(ui, "Sentiment (0-10)", form.sentiment_target) {
            deltas.push(GenerationField::SentimentTarget(v));
        }
        if let Some(v) = widgets::select(
            ui,
            "generate_brand_voice",
            "Brand Voice",
            form.brand_voice,
            BrandVoice::ALL,
        ) {
            deltas.push(GenerationField::BrandVoice(v));
        }
        if let Some(v) =
            widgets::select(ui, "generate_industry", "Industry", form.industry, Industry::ALL)
        {
            deltas.push(GenerationField::Industry(v));
        }
        if let Some(v) = widgets::text_area(ui, "Message", &form.message) {
            deltas.push(GenerationField::Message(v));
        }
        for delta in deltas {
            self.session.update_generation(delta);
        }

        ui.add_space(8.0);
        self.submit_button(ui, Flow::Generate);

        let outcome = self.session.generate_outcome();
        if let Some(error) = &outcome.error {
            ui.label(egui::RichText::new(error).strong().color(ERROR_COLOR));
        }
        if let Some(result) = outcome
            .result
            .as_ref()
            .filter(|r| !r.generated_tweet.is_empty())
        {
            ui.add_space(8.0);
            widgets::result_frame(ui, GENERATE_PALETTE, |ui| {
                ui.label(
                    egui::RichText::new("🎉 Generated Tweet:")
                        .strong()
                        .size(18.0)
                        .color(GENERATE_PALETTE.text),
                );
                ui.label(egui::RichText::new(&result.generated_tweet).color(GENERATE_PALETTE.text));
                widgets::key_value_block(ui, "Info:", &result.info, GENERATE_PALETTE.text);
            });
        }
    }

    fn show_predict_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Predict Likes");
        ui.add_space(8.0);

        let form = self.session.prediction_form().clone();
        let mut deltas = Vec::new();
        if let Some(v) = widgets::select(ui, "predict_day", "Day", form.day, Weekday::ALL) {
            deltas.push(PredictionField::Day(v));
        }
        if let Some(v) = widgets::number_input(ui, "Hour (0–24)", form.hour) {
            deltas.push(PredictionField::Hour(v));
        }
        if let Some(v) = widgets::text_input(ui, "Username", &form.username) {
            deltas.push(PredictionField::Username(v));
        }
        if let Some(v) = widgets::text_input(ui, "Company", &form.company) {
            deltas.push(PredictionField::Company(v));
        }
        if let Some(v) = widgets::checkbox(ui, "Has Media", form.has_media) {
            deltas.push(PredictionField::HasMedia(v));
        }
        if let Some(v) = widgets::text_area(ui, "Content", &form.content) {
            deltas.push(PredictionField::Content(v));
        }
        for delta in deltas {
            self.session.update_prediction(delta);
        }

        ui.add_space(8.0);
        self.submit_button(ui, Flow::Predict);

        let outcome = self.session.predict_outcome();
        if let Some(error) = &outcome.error {
            ui.label(egui::RichText::new(error).strong().color(ERROR_COLOR));
        }
        if let Some(result) = &outcome.result {
            ui.add_space(8.0);
            widgets::result_frame(ui, PREDICT_PALETTE, |ui| {
                ui.label(
                    egui::RichText::new(format!("📊 Predicted Likes: {}", result.predicted_likes))
                        .strong()
                        .size(18.0)
                        .color(PREDICT_PALETTE.text),
                );
                if !result.popularity_estimate.is_empty() {
                    ui.label(
                        egui::RichText::new(&result.popularity_estimate)
                            .strong()
                            .size(20.0)
                            .color(PREDICT_PALETTE.text),
                    );
                }
                widgets::key_value_block(ui, "Details:", &result.details, PREDICT_PALETTE.text);
            });
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.api_base_url).small().weak());
                ui.separator();
                ui.label(egui::RichText::new(&self.status).small());
            });
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(
                        egui::RichText::new("🚀 Tweet Generator & Like Predictor 📊")
                            .size(26.0)
                            .strong(),
                    );
                });
                ui.add_space(16.0);
                ui.columns(2, |columns| {
                    egui::Frame::group(columns[0].style())
                        .inner_margin(egui::Margin::same(16))
                        .show(&mut columns[0], |ui| self.show_generate_panel(ui));
                    egui::Frame::group(columns[1].style())
                        .inner_margin(egui::Margin::same(16))
                        .show(&mut columns[1], |ui| self.show_predict_panel(ui));
                });
            });
        });

        if self.session.is_loading(Flow::Generate) || self.session.is_loading(Flow::Predict) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
