// src/cli/persona.rs
// Offline persona derivation, for trying out questionnaire answers without a server.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;

use crate::persona::{derive_persona, format_message};
use crate::profile::{extract_profile, PersonalityProfile, ProfileSubmission, TestAnswer};
use crate::responder::seeded_rng;

fn parse_profile(input: &str) -> Result<PersonalityProfile> {
    let value: Value = serde_json::from_str(input).context("Answers file is not valid JSON")?;

    let profile = if value.is_array() {
        let answers: Vec<TestAnswer> =
            serde_json::from_value(value).context("Expected an array of {questionId, answer}")?;
        extract_profile(&answers)?
    } else {
        let submission: ProfileSubmission =
            serde_json::from_value(value).context("Expected a profile object")?;
        submission.validate()?
    };
    Ok(profile)
}

/// Profile, persona, greeting and optionally one formatted message, as JSON.
pub fn persona_report(input: &str, seed: Option<u64>, message: Option<&str>) -> Result<Value> {
    let profile = parse_profile(input)?;
    let persona = derive_persona(&profile);
    let mut rng = seeded_rng(seed);

    let greeting = persona.greeting(&mut rng);
    let formatted = message.map(|m| format_message(m, &persona, &mut rng));

    let mut report = json!({
        "profile": profile,
        "persona": persona,
        "greeting": greeting,
    });
    if let Some(formatted) = formatted {
        report["formatted"] = json!(formatted);
    }
    Ok(report)
}

pub fn run_persona(answers: &Path, seed: Option<u64>, message: Option<&str>) -> Result<()> {
    let input = std::fs::read_to_string(answers)
        .with_context(|| format!("Failed to read {}", answers.display()))?;
    let report = persona_report(&input, seed, message)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
