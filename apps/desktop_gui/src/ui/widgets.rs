//! Labeled form controls. Each returns the new value only when the user changed it.

use std::fmt::Display;

use client_core::display_entries;
use eframe::egui;
use serde_json::{Map, Value};

fn field_label(ui: &mut egui::Ui, label: &str) {
    ui.label(egui::RichText::new(label).color(egui::Color32::from_gray(110)));
}

pub fn text_input(ui: &mut egui::Ui, label: &str, value: &str) -> Option<String> {
    field_label(ui, label);
    let mut buffer = value.to_owned();
    let response = ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(f32::INFINITY));
    response.changed().then_some(buffer)
}

pub fn text_area(ui: &mut egui::Ui, label: &str, value: &str) -> Option<String> {
    field_label(ui, label);
    let mut buffer = value.to_owned();
    let response = ui.add(
        egui::TextEdit::multiline(&mut buffer)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    response.changed().then_some(buffer)
}

pub fn checkbox(ui: &mut egui::Ui, label: &str, value: bool) -> Option<bool> {
    let mut checked = value;
    ui.checkbox(&mut checked, label).changed().then_some(checked)
}

/// Unclamped: the range in the label is a hint only.
pub fn number_input(ui: &mut egui::Ui, label: &str, value: i64) -> Option<i64> {
    field_label(ui, label);
    let mut number = value;
    let response = ui.add(egui::DragValue::new(&mut number).speed(0.1));
    (response.changed() && number != value).then_some(number)
}

pub fn select<T>(ui: &mut egui::Ui, id_salt: &str, label: &str, current: T, options: &[T]) -> Option<T>
where
    T: Copy + PartialEq + Display,
{
    field_label(ui, label);
    let mut selected = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut selected, *option, option.to_string());
            }
        });
    (selected != current).then_some(selected)
}

#[derive(Debug, Clone, Copy)]
pub struct ResultPalette {
    pub fill: egui::Color32,
    pub stroke: egui::Color32,
    pub text: egui::Color32,
}

pub const GENERATE_PALETTE: ResultPalette = ResultPalette {
    fill: egui::Color32::from_rgb(240, 253, 244),
    stroke: egui::Color32::from_rgb(187, 247, 208),
    text: egui::Color32::from_rgb(20, 83, 45),
};

pub const PREDICT_PALETTE: ResultPalette = ResultPalette {
    fill: egui::Color32::from_rgb(254, 252, 232),
    stroke: egui::Color32::from_rgb(254, 240, 138),
    text: egui::Color32::from_rgb(113, 63, 18),
};

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

pub fn result_frame(ui: &mut egui::Ui, palette: ResultPalette, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .fill(palette.fill)
        .stroke(egui::Stroke::new(1.0, palette.stroke))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(12))
        .show(ui, add_contents);
}

/// Renders an info/details mapping; nothing at all when it is empty.
pub fn key_value_block(ui: &mut egui::Ui, heading: &str, map: &Map<String, Value>, color: egui::Color32) {
    if map.is_empty() {
        return;
    }
    ui.label(egui::RichText::new(heading).strong().color(color));
    ui.indent(heading, |ui| {
        for (key, value) in display_entries(map) {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(format!("{key}:")).monospace().strong().color(color));
                ui.label(egui::RichText::new(value).monospace().color(color));
            });
        }
    });
}
