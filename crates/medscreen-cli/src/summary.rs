//! Table rendering for command output.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use medscreen_model::{HIV_SYMPTOMS, Prediction, TB_FEATURE_NAMES};
use medscreen_registry::{ModelBundle, ModelKey};

/// Print the availability table for a loaded bundle.
pub fn print_models(bundle: &ModelBundle) {
    let report = bundle.availability();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Model"),
        header_cell("Status"),
        header_cell("Details"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(entry.key.as_str()),
            status_cell(entry.loaded),
            detail_cell(bundle, entry.key),
            match &entry.reason {
                Some(reason) => Cell::new(reason),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("Models: {}/{} loaded", report.loaded_count(), report.entries.len());
    println!("{table}");
}

/// Print the availability report as JSON.
///
/// # Errors
///
/// Fails when the report cannot be serialized.
pub fn print_models_json(bundle: &ModelBundle) -> Result<()> {
    let report = bundle.availability();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print one prediction as a result table.
pub fn print_prediction(prediction: &Prediction) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Analysis"),
        header_cell("Outcome"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(prediction.disease.display_name()),
        outcome_cell(prediction),
        match prediction.confidence_percent() {
            Some(percent) => Cell::new(percent),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

/// Print one prediction as JSON.
///
/// # Errors
///
/// Fails when the prediction cannot be serialized.
pub fn print_prediction_json(prediction: &Prediction) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(prediction)?);
    Ok(())
}

/// Print the symptom vocabularies for the symptom-driven analyses.
pub fn print_symptoms() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("HIV symptom")]);
    apply_table_style(&mut table);
    for symptom in HIV_SYMPTOMS {
        table.add_row(vec![Cell::new(symptom.as_str())]);
    }
    println!("HIV analysis accepts any non-empty selection of:");
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec![header_cell("TB symptom flag")]);
    apply_table_style(&mut table);
    for flag in TB_FEATURE_NAMES {
        table.add_row(vec![Cell::new(flag)]);
    }
    println!();
    println!("Tuberculosis analysis takes these present/absent flags:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}

fn status_cell(loaded: bool) -> Cell {
    if loaded {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn outcome_cell(prediction: &Prediction) -> Cell {
    let cell = Cell::new(prediction.label.as_str()).add_attribute(Attribute::Bold);
    if prediction.label.is_concerning() {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

fn detail_cell(bundle: &ModelBundle, key: ModelKey) -> Cell {
    if key == ModelKey::HivVectorizer {
        match bundle.vectorizer() {
            Some(vectorizer) => Cell::new(format!("{} terms", vectorizer.vocabulary_len())),
            None => dim_cell("-"),
        }
    } else {
        match bundle.classifier(key) {
            Some(classifier) => Cell::new(format!("{} features", classifier.feature_count())),
            None => dim_cell("-"),
        }
    }
}
