//! Headless diabetes-risk assessment.
//!
//! Runs one assessment through the same workflow as the TUI and prints the
//! text report, or JSON with `--json`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin assess -- --glucose 150 --blood-pressure 85 --bmi 30 --insulin 20 --hba1c 7
//! ```
//!
//! Exit codes: 2 for usage errors, 3 when intake or the workflow rejects the input.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glucoscreen::adapters::sanitize::SanitizingMakeWriter;
use glucoscreen::adapters::RuleBasedEngine;
use glucoscreen::application::intake::{self, ProfileInput};
use glucoscreen::application::{report, AssessmentWorkflow};
use glucoscreen::config::AppConfig;
use glucoscreen::domain::{LifestyleFlags, MeasurementRecord, PatientProfile, RiskAssessment};
use glucoscreen::GlucoscreenError;

/// Extra time allowed beyond the processing delay before giving up.
const WAIT_SLACK: Duration = Duration::from_secs(10);

#[derive(Debug, Default)]
struct Args {
    glucose: Option<String>,
    blood_pressure: Option<String>,
    bmi: Option<String>,
    insulin: Option<String>,
    hba1c: Option<String>,
    diastolic: Option<String>,
    cholesterol: Option<String>,
    skin_thickness: Option<String>,
    heart_rate: Option<String>,
    pedigree: Option<String>,
    activity: Option<String>,
    name: Option<String>,
    age: Option<String>,
    gender: Option<String>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    profile: &'a PatientProfile,
    measurements: &'a MeasurementRecord,
    assessment: &'a RiskAssessment,
}

fn usage() -> String {
    "Usage: assess --glucose <v> --blood-pressure <v> --bmi <v> --insulin <v> --hba1c <v> \
     [--diastolic <v>] [--cholesterol <v>] [--skin-thickness <v>] [--heart-rate <v>] \
     [--pedigree <v>] [--activity <v>] [--name <s>] [--age <n>] [--gender <g>] \
     [--seed <u64>] [--delay-ms <n>] [--json]"
        .to_string()
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        if arg == "--json" {
            parsed.json = true;
            continue;
        }
        if arg == "-h" || arg == "--help" {
            return Err(usage());
        }

        let value = args
            .next()
            .ok_or_else(|| format!("{arg} needs a value\n{}", usage()))?;
        match arg.as_str() {
            "--glucose" => parsed.glucose = Some(value),
            "--blood-pressure" => parsed.blood_pressure = Some(value),
            "--bmi" => parsed.bmi = Some(value),
            "--insulin" => parsed.insulin = Some(value),
            "--hba1c" => parsed.hba1c = Some(value),
            "--diastolic" => parsed.diastolic = Some(value),
            "--cholesterol" => parsed.cholesterol = Some(value),
            "--skin-thickness" => parsed.skin_thickness = Some(value),
            "--heart-rate" => parsed.heart_rate = Some(value),
            "--pedigree" => parsed.pedigree = Some(value),
            "--activity" => parsed.activity = Some(value),
            "--name" => parsed.name = Some(value),
            "--age" => parsed.age = Some(value),
            "--gender" => parsed.gender = Some(value),
            "--seed" => {
                let seed = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| "--seed must be a u64".to_string())?;
                parsed.seed = Some(seed);
            }
            "--delay-ms" => {
                let ms = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| "--delay-ms must be a non-negative integer".to_string())?;
                parsed.delay_ms = Some(ms);
            }
            _ => return Err(format!("Unknown argument: {arg}\n{}", usage())),
        }
    }

    let required = [
        ("--glucose", &parsed.glucose),
        ("--blood-pressure", &parsed.blood_pressure),
        ("--bmi", &parsed.bmi),
        ("--insulin", &parsed.insulin),
        ("--hba1c", &parsed.hba1c),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(flag, _)| *flag)
        .collect();
    if !missing.is_empty() {
        return Err(format!("Missing required: {}\n{}", missing.join(", "), usage()));
    }

    Ok(parsed)
}

fn read_inputs(args: &Args) -> Result<(PatientProfile, MeasurementRecord), GlucoscreenError> {
    let profile = intake::parse_profile(&ProfileInput {
        name: args.name.as_deref().unwrap_or("Anonymous"),
        age: args.age.as_deref().unwrap_or("40"),
        gender: args.gender.as_deref().unwrap_or("other"),
        email: "not provided",
        contact: "not provided",
        lifestyle: LifestyleFlags::default(),
    })?;

    let or_zero = |v: &Option<String>| v.clone().unwrap_or_else(|| "0".to_string());
    let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();

    // MEASUREMENT_FIELDS order
    let raw = [
        or_empty(&args.glucose),
        or_empty(&args.insulin),
        or_empty(&args.hba1c),
        or_zero(&args.cholesterol),
        or_empty(&args.bmi),
        or_zero(&args.skin_thickness),
        or_empty(&args.blood_pressure),
        or_zero(&args.diastolic),
        or_zero(&args.heart_rate),
        or_zero(&args.pedigree),
        or_zero(&args.activity),
    ];
    let refs: [&str; 11] = raw.each_ref().map(String::as_str);
    let measurements = intake::parse_measurements(&refs)?;

    Ok((profile, measurements))
}

fn init_logging() -> WorkerGuard {
    // stderr only; stdout carries the report
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();
    guard
}

fn main() -> Result<()> {
    let _guard = init_logging();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let (profile, measurements) = match read_inputs(&args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Rejected: {e}");
            std::process::exit(3);
        }
    };

    let config = AppConfig::from_env_or_default();
    let seed = args.seed.or(config.confidence_seed);
    let delay = args
        .delay_ms
        .map_or(config.processing_delay, Duration::from_millis);

    let engine = Arc::new(RuleBasedEngine::from_optional_seed(seed));
    let mut workflow = AssessmentWorkflow::new(engine, delay);

    let submitted = workflow
        .submit_profile(profile)
        .and_then(|()| workflow.submit_measurements(measurements));
    if let Err(e) = submitted {
        eprintln!("Rejected: {e}");
        std::process::exit(3);
    }

    if workflow.wait_for_assessment(delay + WAIT_SLACK).is_none() {
        return Err(GlucoscreenError::Timeout.into());
    }

    let (Some(profile), Some(measurements), Some(assessment)) = (
        workflow.profile(),
        workflow.measurements(),
        workflow.assessment(),
    ) else {
        return Err(anyhow!("Session incomplete after assessment"));
    };

    if args.json {
        let out = JsonOutput {
            profile,
            measurements,
            assessment,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let today = chrono::Local::now().date_naive();
        print!(
            "{}",
            report::render_text_report(profile, measurements, assessment, today)
        );
    }

    Ok(())
}
