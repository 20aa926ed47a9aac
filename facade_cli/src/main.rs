//! # Facade Calc CLI
//!
//! `facade_cli <project.json> [results.json]` evaluates a project file,
//! prints a summary and the JSON results, and optionally saves the results.
//! Without arguments it runs a short interactive demo.
//!
//! Verbosity is controlled with `RUST_LOG` (default `info`).

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use facade_core::calculations::{AnchorageInput, ConnectionInput, FrameInput, MullionType};
use facade_core::loads::FrameType;
use facade_core::project::{Category, CategoryResults, Project, ProjectResults};
use facade_core::wind::{ExposureCategory, FloorHeights, TopographyInput, WindEnvironment};
use facade_core::{load_project, save_json, CalcError};

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.first() {
        Some(path) => run_file(Path::new(path), args.get(1).map(Path::new)),
        None => run_demo(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &Path, output: Option<&Path>) -> Result<(), CalcError> {
    let project = load_project(path)?;
    tracing::info!(path = %path.display(), items = project.item_count(), "project loaded");

    let results = project.evaluate()?;
    print_summary(&project, &results);

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&results)?);

    if let Some(out) = output {
        save_json(&results, out)?;
        tracing::info!(path = %out.display(), "results saved");
    }
    Ok(())
}

fn run_demo() -> Result<(), CalcError> {
    println!("Facade Calc CLI - Curtain Wall Calculator");
    println!("=========================================");
    println!();
    println!("No project file given. Running interactive demo...");
    println!();

    let wind_speed = prompt_f64("Basic wind speed (m/s) [50.0]: ", 50.0);
    let floor_heights = prompt_line("Floor heights (m) [3.5 3.2 3.2 3.2]: ")
        .unwrap_or_else(|| "3.5 3.2 3.2 3.2".to_string());
    let width = prompt_f64("Mullion spacing (mm) [1200]: ", 1200.0);
    let length = prompt_f64("Mullion span (mm) [3600]: ", 3600.0);
    let mullion = prompt_line("Mullion section (W x F x T) [150x65x3]: ")
        .unwrap_or_else(|| "150x65x3".to_string());

    let mut project = Project::new("Demo", "DEMO-001", "Demo Client");
    project.meta.project_name = "Interactive demo".to_string();

    let env = WindEnvironment {
        exposure_cat: ExposureCategory::B,
        b_length: Some(30.0),
        b_width: Some(20.0),
        wind_speed: Some(wind_speed),
        location: None,
        k_d: Some(0.85),
        gc_pi: Some(0.18),
        occupancy_cat: project.settings.risk_category,
        topography: TopographyInput::default(),
        floor_heights: FloorHeights::Text(floor_heights),
        b_freq: None,
        damping: None,
    };
    let wind = facade_core::compute_wind_pressures(&env)?;
    let suction = wind
        .cladding
        .wall
        .first()
        .map(|row| row.p_z5_neg.abs())
        .unwrap_or_default();
    project.wind = Some(env);

    let mut category = Category::new("Demo elevation");
    category.frames.push(FrameInput {
        label: "F-1".to_string(),
        mullion: Some(format!("Mullion {}", mullion)),
        width: Some(width),
        length: Some(length),
        wind_neg: Some(suction),
        frame_type: FrameType::FloorToFloor,
        mullion_type: MullionType::AluminumOnly,
        glass_thk: Some(12.0),
        ..Default::default()
    });
    category.connections.push(ConnectionInput {
        label: "C-1".to_string(),
        screw_nos: Some(4.0),
        screw_dia: Some(5.5),
        head_dia: Some(10.0),
        t1: Some(3.0),
        t2: Some(3.0),
        tc: Some(3.0),
        ..Default::default()
    });
    category.anchorages.push(AnchorageInput {
        label: "A-1".to_string(),
        ..Default::default()
    });
    project.add_category(category);

    let results = project.evaluate()?;
    println!();
    print_summary(&project, &results);

    println!();
    println!("JSON Output (for API use):");
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn print_summary(project: &Project, results: &ProjectResults) {
    println!("═══════════════════════════════════════");
    println!("  {} / {}", project.meta.job_id, project.meta.client);
    println!("═══════════════════════════════════════");

    if let Some(wind) = &results.wind {
        let s = &wind.mwfrs.summary;
        println!();
        println!("Wind ({}):", project.settings.wind_code);
        println!("  V = {:.1} m/s, h = {:.2} m, q_h = {:.2} kPa, G = {:.2}", s.wind_speed, s.b_height, s.q_h, s.gust_factor);
        for level in &wind.mwfrs.levels {
            println!("  Level {:>2}: z = {:>6.2} m  p_zw = {:.2} kPa", level.level, level.cumu_height, level.p_zw);
        }
    }

    for category in &results.categories {
        print_category(category);
    }
}

fn print_category(category: &CategoryResults) {
    println!();
    println!("Category: {}", category.name);

    for unit in &category.glass_units {
        match unit.result.as_ref() {
            Some(r) if r.is_deferred() => println!("  Glass {:<10} deferred to FE analysis", unit.label),
            Some(r) => print_ratio("Glass", &unit.label, r.governing_ratio().unwrap_or_default()),
            None => print_missing("Glass", &unit.label),
        }
    }
    for frame in &category.frames {
        match frame.result.as_ref() {
            Some(r) => print_ratio("Frame", &frame.label, r.governing_ratio()),
            None => print_missing("Frame", &frame.label),
        }
    }
    for conn in &category.connections {
        match conn.result.as_ref() {
            Some(r) => print_ratio("Joint", &conn.label, r.governing_ratio()),
            None => print_missing("Joint", &conn.label),
        }
    }
    for anchor in &category.anchorages {
        match anchor.result.as_ref() {
            Some(r) => print_ratio("Anchor", &anchor.label, r.governing_interaction()),
            None => print_missing("Anchor", &anchor.label),
        }
    }
}

fn print_ratio(kind: &str, label: &str, ratio: f64) {
    println!("  {:<6} {:<10} {:.2} {}", kind, label, ratio, status_icon(ratio <= 1.0));
}

fn print_missing(kind: &str, label: &str) {
    println!("  {:<6} {:<10} no result (missing input)", kind, label);
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
