//! Subcommand implementations.
//!
//! Each command writes to the given output so it can be exercised in tests
//! without a terminal. Calculation errors from forge_core are reported, not
//! propagated: `InsufficientInput` is a "not ready yet" notice, everything
//! else fails the command.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use forge_core::calculations::ring::{self, RingInput, RingResult};
use forge_core::quote::{calculate_quote, load_quote, QuoteResult};
use forge_core::review::{review_document, DocumentAnalyzer, DocumentBlob};
use forge_core::units::{CubicCentimeters, CubicMillimeters};
use forge_core::{CalcError, DensitySource, Metal};
use serde_json::json;

use crate::args::{QuoteArgs, ReviewArgs, WeightArgs};
use crate::config::Settings;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Completed with a result
    Done,
    /// Inputs not complete yet; nothing computed
    NotReady,
    /// Inputs or data are wrong
    Failed,
}

const RULE: &str = "═══════════════════════════════════════";

/// Ask for a number on stdin, returning `default` on empty or bad input
pub fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// Fill in missing OD/height interactively when attached to a terminal.
///
/// Without a terminal a missing value stays 0, which the calculator
/// reports as insufficient input.
pub fn complete_weight_args(mut args: WeightArgs) -> WeightArgs {
    let interactive = io::stdin().is_terminal();
    if args.od.is_none() && interactive {
        args.od = Some(prompt_f64("Outer diameter OD (mm): ", 0.0));
    }
    if args.height.is_none() && interactive {
        args.height = Some(prompt_f64("Height H (mm): ", 0.0));
    }
    args
}

/// Build the calculator input from flags and settings defaults
pub fn ring_input(args: &WeightArgs, settings: &Settings) -> RingInput {
    let density = match (args.density, args.material) {
        (Some(d), _) => DensitySource::custom(d),
        (None, Some(metal)) => DensitySource::metal(metal),
        (None, None) => settings.defaults.density,
    };

    RingInput {
        label: args.label.clone(),
        outer_diameter_mm: args.od.unwrap_or(0.0),
        inner_diameter_mm: args.inner,
        height_mm: args.height.unwrap_or(0.0),
        density,
        quantity: args.qty,
        unit_price_per_kg: args.price.unwrap_or(settings.defaults.unit_price_per_kg),
    }
}

/// `forge weight`
pub fn weight(args: &WeightArgs, settings: &Settings, as_json: bool, out: &mut dyn Write) -> Result<Outcome> {
    let input = ring_input(args, settings);

    match ring::calculate(&input) {
        Ok(result) => {
            if as_json {
                writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "input": input, "result": result }))?)?;
            } else {
                write!(out, "{}", format_ring(&input, &result, &settings.defaults.currency))?;
            }
            Ok(Outcome::Done)
        }
        Err(err) => report_error(&err, as_json, out),
    }
}

/// `forge quote`
pub fn quote(args: &QuoteArgs, as_json: bool, out: &mut dyn Write) -> Result<Outcome> {
    let quote = match load_quote(&args.file) {
        Ok(q) => q,
        Err(err) => return report_error(&err, as_json, out),
    };

    match calculate_quote(&quote) {
        Ok(result) => {
            if as_json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                write!(out, "{}", format_quote(&result))?;
            }
            Ok(Outcome::Done)
        }
        Err(err) => report_error(&err, as_json, out),
    }
}

/// `forge materials`
pub fn materials(as_json: bool, out: &mut dyn Write) -> Result<Outcome> {
    if as_json {
        let rows: Vec<_> = Metal::ALL
            .iter()
            .map(|m| json!({ "code": m.code(), "name": m.display_name(), "density_g_cm3": m.density_g_cm3() }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        writeln!(out, "{:<8} {:<18} {:>8}", "CODE", "MATERIAL", "g/cm³")?;
        for metal in Metal::ALL {
            writeln!(
                out,
                "{:<8} {:<18} {:>8.2}",
                metal.code(),
                metal.display_name(),
                metal.density_g_cm3()
            )?;
        }
    }
    Ok(Outcome::Done)
}

/// `forge profiles`
pub fn profiles(settings: &Settings, as_json: bool, out: &mut dyn Write) -> Result<Outcome> {
    let review = &settings.review;
    if as_json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&json!({
                "active_profile": review.active_profile,
                "profiles": review.profiles,
            }))?
        )?;
    } else {
        for profile in &review.profiles {
            let marker = if profile.name == review.active_profile { "*" } else { " " };
            writeln!(out, "{} {:<20} {}", marker, profile.name, profile.model)?;
        }
    }
    Ok(Outcome::Done)
}

/// `forge review`
pub fn review(
    args: &ReviewArgs,
    settings: &Settings,
    analyzer: &dyn DocumentAnalyzer,
    as_json: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let instructions = settings.instructions(args.instructions.as_deref())?;

    let document = match DocumentBlob::from_path(&args.file) {
        Ok(doc) => doc,
        Err(err) => return report_error(&err, as_json, out),
    };

    let report = match review_document(
        analyzer,
        &settings.review,
        args.profile.as_deref(),
        &instructions,
        &document,
    ) {
        Ok(report) => report,
        Err(err) => return report_error(&err, as_json, out),
    };

    if let Some(path) = &args.out {
        fs::write(path, &report.text).with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", report.text.trim_end())?;
        writeln!(out)?;
        writeln!(
            out,
            "[{} via {} · {}]",
            report.file_name,
            report.model,
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;
    }
    Ok(Outcome::Done)
}

/// Print a core error and classify it
fn report_error(err: &CalcError, as_json: bool, out: &mut dyn Write) -> Result<Outcome> {
    let outcome = if err.is_recoverable() {
        Outcome::NotReady
    } else {
        Outcome::Failed
    };

    if as_json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&json!({ "error_code": err.error_code(), "error": err }))?
        )?;
    } else if outcome == Outcome::NotReady {
        writeln!(out, "Not ready: {}", err)?;
    } else {
        writeln!(out, "Error: {}", err)?;
    }
    Ok(outcome)
}

/// Human-readable ring estimate. Weights to 0.1 kg, cost to whole units.
pub fn format_ring(input: &RingInput, result: &RingResult, currency: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n", RULE));
    if input.label.is_empty() {
        s.push_str("  RING ESTIMATE\n");
    } else {
        s.push_str(&format!("  RING ESTIMATE - {}\n", input.label));
    }
    s.push_str(&format!("{}\n\n", RULE));
    s.push_str("Input:\n");
    s.push_str(&format!("  OD:       {:.1} mm\n", input.outer_diameter_mm));
    s.push_str(&format!("  ID:       {:.1} mm\n", input.inner_diameter_mm));
    s.push_str(&format!("  Height:   {:.1} mm\n", input.height_mm));
    s.push_str(&format!("  Density:  {}\n", input.density));
    s.push_str(&format!("  Quantity: {}\n", result.quantity));
    s.push_str(&format!("  Price:    {} {}/kg\n\n", input.unit_price_per_kg, currency));
    s.push_str("Result:\n");
    let volume_cm3 = CubicCentimeters::from(CubicMillimeters(result.volume_mm3));
    s.push_str(&format!(
        "  Volume:       {:.0} mm³ ({:.0} cm³)\n",
        result.volume_mm3, volume_cm3.0
    ));
    s.push_str(&format!("  Weight/unit:  {:.1} kg\n", result.weight_per_unit_kg));
    s.push_str(&format!(
        "  Total weight: {:.1} kg ({:.2} t)\n",
        result.total_weight_kg,
        result.total_weight_t()
    ));
    s.push_str(&format!("  Total cost:   {:.0} {}\n", result.total_cost, currency));
    s.push_str(&format!("{}\n", RULE));
    s
}

/// Human-readable quote table
pub fn format_quote(result: &QuoteResult) -> String {
    let mut s = String::new();
    s.push_str(&format!("Quote {} - {}\n\n", result.label, result.customer));
    s.push_str(&format!(
        "{:<24} {:>5} {:>12} {:>12} {:>16}\n",
        "ITEM", "QTY", "KG/UNIT", "KG TOTAL", "COST"
    ));
    for line in &result.lines {
        s.push_str(&format!(
            "{:<24} {:>5} {:>12.1} {:>12.1} {:>16.0}\n",
            line.label, line.result.quantity, line.result.weight_per_unit_kg, line.result.total_weight_kg, line.result.total_cost
        ));
    }
    s.push_str(&format!(
        "{:<24} {:>5} {:>12} {:>12.1} {:>16.0} {}\n",
        "TOTAL", "", "", result.total_weight_kg, result.total_cost, result.currency
    ));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::review::ModelProfile;
    use forge_core::CalcResult;
    use tempfile::NamedTempFile;

    fn weight_args(od: Option<f64>, inner: f64, height: Option<f64>) -> WeightArgs {
        WeightArgs {
            od,
            inner,
            height,
            density: None,
            material: None,
            qty: 3,
            price: Some(2500.0),
            label: String::new(),
        }
    }

    fn run_weight(args: &WeightArgs, as_json: bool) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = weight(args, &Settings::default(), as_json, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_weight_text_output() {
        let (outcome, text) = run_weight(&weight_args(Some(1000.0), 600.0, Some(500.0)), false);
        assert_eq!(outcome, Outcome::Done);
        assert!(text.contains("Weight/unit:  1972.9 kg"));
        assert!(text.contains("Total weight: 5918.8 kg"));
        assert!(text.contains("Total cost:   14796901 KRW"));
        assert!(text.contains("Carbon Steel (7.85 g/cm³)"));
    }

    #[test]
    fn test_weight_json_output_full_precision() {
        let (outcome, text) = run_weight(&weight_args(Some(1000.0), 600.0, Some(500.0)), true);
        assert_eq!(outcome, Outcome::Done);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let result: RingResult = serde_json::from_value(value["result"].clone()).unwrap();
        assert_eq!(result.total_weight_kg, result.weight_per_unit_kg * 3.0);
    }

    #[test]
    fn test_weight_missing_height_not_ready() {
        let (outcome, text) = run_weight(&weight_args(Some(1000.0), 0.0, None), false);
        assert_eq!(outcome, Outcome::NotReady);
        assert!(text.starts_with("Not ready:"));
    }

    #[test]
    fn test_weight_invalid_geometry_fails() {
        let (outcome, text) = run_weight(&weight_args(Some(500.0), 500.0, Some(100.0)), true);
        assert_eq!(outcome, Outcome::Failed);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error_code"], "INVALID_GEOMETRY");
    }

    #[test]
    fn test_ring_input_density_precedence() {
        let settings = Settings::default();
        let mut args = weight_args(Some(100.0), 0.0, Some(100.0));
        assert_eq!(ring_input(&args, &settings).density_g_cm3(), 7.85);

        args.material = Some(Metal::Aluminum6061);
        assert_eq!(ring_input(&args, &settings).density_g_cm3(), 2.70);

        args.material = None;
        args.density = Some(8.0);
        assert_eq!(ring_input(&args, &settings).density_g_cm3(), 8.0);
    }

    #[test]
    fn test_ring_input_price_default_from_settings() {
        let mut settings = Settings::default();
        settings.defaults.unit_price_per_kg = 3100.0;
        let mut args = weight_args(Some(100.0), 0.0, Some(100.0));
        args.price = None;
        assert_eq!(ring_input(&args, &settings).unit_price_per_kg, 3100.0);
    }

    #[test]
    fn test_quote_command() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "label": "Q-1", "customer": "ACME", "items": [
                {{ "label": "Ring", "outer_diameter_mm": 1000.0, "inner_diameter_mm": 600.0, "height_mm": 500.0, "quantity": 3, "unit_price_per_kg": 2500.0 }}
            ] }}"#
        )
        .unwrap();

        let mut out = Vec::new();
        let outcome = quote(&QuoteArgs { file: file.path().to_path_buf() }, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert!(text.contains("Quote Q-1 - ACME"));
        assert!(text.contains("5918.8"));
    }

    #[test]
    fn test_quote_missing_file_fails() {
        let mut out = Vec::new();
        let args = QuoteArgs {
            file: "/nonexistent/forgequote/q.json".into(),
        };
        assert_eq!(quote(&args, false, &mut out).unwrap(), Outcome::Failed);
    }

    #[test]
    fn test_materials_lists_all() {
        let mut out = Vec::new();
        materials(false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), Metal::ALL.len() + 1);
        assert!(text.contains("CS       Carbon Steel"));
    }

    #[test]
    fn test_profiles_marks_active() {
        let mut out = Vec::new();
        profiles(&Settings::default(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().starts_with("* flash"));
    }

    struct Canned;

    impl DocumentAnalyzer for Canned {
        fn analyze(&self, profile: &ModelProfile, _: &str, _: &forge_core::DocumentBlob) -> CalcResult<String> {
            Ok(format!("| Model | {} |\n", profile.model))
        }
    }

    fn pdf_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.7\n").unwrap();
        file
    }

    fn review_args(file: &NamedTempFile) -> ReviewArgs {
        ReviewArgs {
            file: file.path().to_path_buf(),
            profile: None,
            instructions: None,
            out: None,
            api_key: None,
        }
    }

    #[test]
    fn test_review_writes_report() {
        let doc = pdf_file();
        let saved = NamedTempFile::new().unwrap();
        let mut args = review_args(&doc);
        args.profile = Some("pro".to_string());
        args.out = Some(saved.path().to_path_buf());

        let mut out = Vec::new();
        let outcome = review(&args, &Settings::default(), &Canned, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(outcome, Outcome::Done);
        assert!(text.starts_with("| Model | gemini-pro |"));
        assert_eq!(fs::read_to_string(saved.path()).unwrap(), "| Model | gemini-pro |\n");
    }

    #[test]
    fn test_review_unsupported_file() {
        let mut doc = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        doc.write_all(b"not a pdf").unwrap();

        let mut out = Vec::new();
        let outcome = review(&review_args(&doc), &Settings::default(), &Canned, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(value["error_code"], "UNSUPPORTED_MEDIA_TYPE");
    }
}
