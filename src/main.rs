mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use eframe::egui;

use app::ScoutApp;
use data::filter::{run_pipeline, FilterCriteria};
use data::position::PositionCategory;
use export::OutputFormat;
use state::AppState;

/// Search football players across scouting exports.
#[derive(Debug, Parser)]
#[command(name = "scout-filter", version, about)]
struct Cli {
    /// Player tables to load (.parquet, .csv or .json), one per competition.
    files: Vec<PathBuf>,

    /// Run the search once and print the result instead of opening a window.
    #[arg(long, env = "SCOUT_HEADLESS")]
    headless: bool,

    /// Competition to include (file name without extension). Repeatable.
    #[arg(long = "group", value_name = "NAME")]
    groups: Vec<String>,

    /// Position category, e.g. "Delantero" or "Lateral Izquierdo".
    #[arg(long, value_parser = parse_position)]
    position: Option<PositionCategory>,

    /// Inclusive age range, MIN-MAX.
    #[arg(long, value_parser = parse_range)]
    age: Option<(i64, i64)>,

    /// Inclusive height range in cm, MIN-MAX.
    #[arg(long, value_parser = parse_range)]
    height: Option<(i64, i64)>,

    /// Case-insensitive passport country substring.
    #[arg(long, default_value = "")]
    passport: String,

    /// Output encoding for headless runs.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

impl Cli {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            groups: self.groups.iter().cloned().collect(),
            position: self.position,
            age_range: self.age,
            height_range: self.height,
            passport: self.passport.clone(),
        }
    }
}

fn parse_position(s: &str) -> Result<PositionCategory, String> {
    PositionCategory::from_label(s).ok_or_else(|| {
        let known: Vec<_> = PositionCategory::ALL.iter().map(|c| c.label()).collect();
        format!("unknown position '{s}', expected one of: {}", known.join(", "))
    })
}

fn parse_range(s: &str) -> Result<(i64, i64), String> {
    let (lo, hi) = s
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got '{s}'"))?;
    let lo: i64 = lo.trim().parse().map_err(|e| format!("bad minimum '{lo}': {e}"))?;
    let hi: i64 = hi.trim().parse().map_err(|e| format!("bad maximum '{hi}': {e}"))?;
    if lo > hi {
        return Err(format!("minimum {lo} is above maximum {hi}"));
    }
    Ok((lo, hi))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = if cli.headless {
        run_headless(&cli, std::io::stdout().lock(), std::io::stderr().lock())
    } else {
        run_gui(&cli).map(|()| ExitCode::SUCCESS)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// One pipeline run over the given files. The table goes to `out`; warnings
/// and halt messages go to `err`.
fn run_headless<O: Write, E: Write>(cli: &Cli, out: O, mut err: E) -> Result<ExitCode> {
    if cli.files.is_empty() {
        bail!("--headless needs at least one input file");
    }
    let dataset = data::loader::load_files(&cli.files)?;
    let report = run_pipeline(Some(&dataset), &cli.criteria());

    for warning in &report.warnings {
        log::warn!("{warning}");
        writeln!(err, "Aviso: {warning}")?;
    }

    match &report.outcome {
        Ok(table) => {
            export::write_dataset(table, cli.format, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(halt) => {
            writeln!(err, "{halt}")?;
            if !report.group_options.is_empty() {
                let options: Vec<_> = report.group_options.iter().cloned().collect();
                writeln!(err, "Competiciones disponibles: {}", options.join(", "))?;
            }
            Ok(ExitCode::from(2))
        }
    }
}

/// Seed the window's search with the selections given on the command line.
fn apply_cli(state: &mut AppState, cli: &Cli) {
    if let Some(position) = cli.position {
        state.set_position(position);
    }
    for group in &cli.groups {
        state.toggle_group(group);
    }
    // Ranges go last: group and position changes reset them.
    if let Some(age) = cli.age {
        state.set_age_range(age);
    }
    if let Some(height) = cli.height {
        state.set_height_range(height);
    }
    if !cli.passport.is_empty() {
        state.set_passport(cli.passport.clone());
    }
}

fn run_gui(cli: &Cli) -> Result<()> {
    let mut state = AppState::default();
    if !cli.files.is_empty() {
        ui::panels::load_into(&mut state, &cli.files);
        apply_cli(&mut state, cli);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scout Filter – Búsqueda de Jugadores",
        options,
        Box::new(|_cc| Ok(Box::new(ScoutApp::with_state(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DISPLAY_COLUMNS;

    /// Write a competition CSV with the display columns plus `Height`,
    /// leaving out any column named in `skip`.
    fn write_competition(dir: &std::path::Path, name: &str, skip: &str) -> PathBuf {
        let mut columns: Vec<&str> = DISPLAY_COLUMNS.to_vec();
        columns.push("Height");
        columns.retain(|c| *c != skip);

        let players = [
            ("Bea", "Club A", "22", "CF, LWF", "Spain", "180"),
            ("Dani", "Club B", "30", "GK", "Italy", "190"),
        ];

        let path = dir.join(name);
        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer.write_record(&columns).unwrap();
        for (full_name, team, age, position, passport, height) in players {
            let row: Vec<&str> = columns
                .iter()
                .map(|c| match *c {
                    "Full name" => full_name,
                    "Team within selected timeframe" => team,
                    "Age" => age,
                    "Position" => position,
                    "Passport country" => passport,
                    "Height" => height,
                    _ => "4.5",
                })
                .collect();
            writer.write_record(&row).unwrap();
        }
        writer.flush().unwrap();
        path
    }

    fn headless(args: &[&str]) -> (ExitCode, String, String) {
        let mut argv = vec!["scout-filter", "--headless"];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_headless(&cli, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn ranges_parse_inclusive_bounds() {
        assert_eq!(parse_range("20-25"), Ok((20, 25)));
        assert_eq!(parse_range(" 170 - 190 "), Ok((170, 190)));
        assert!(parse_range("25-20").is_err());
        assert!(parse_range("twenty").is_err());
    }

    #[test]
    fn positions_parse_by_label() {
        assert_eq!(parse_position("delantero"), Ok(PositionCategory::Forward));
        assert!(parse_position("Libero").unwrap_err().contains("Extremos"));
    }

    #[test]
    fn cli_builds_criteria() {
        let cli = Cli::parse_from([
            "scout-filter",
            "--headless",
            "--group",
            "LaLiga",
            "--group",
            "Serie A",
            "--position",
            "Extremos",
            "--age",
            "20-25",
            "--passport",
            "spain",
            "--format",
            "json",
            "a.parquet",
        ]);
        let c = cli.criteria();
        assert_eq!(c.groups.len(), 2);
        assert_eq!(c.position, Some(PositionCategory::Winger));
        assert_eq!(c.age_range, Some((20, 25)));
        assert_eq!(c.height_range, None);
        assert_eq!(c.passport, "spain");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.files, vec![PathBuf::from("a.parquet")]);
    }

    #[test]
    fn headless_without_group_halts_and_lists_competitions() {
        let dir = tempfile::tempdir().unwrap();
        let liga = write_competition(dir.path(), "LaLiga.csv", "");
        let serie = write_competition(dir.path(), "SerieA.csv", "");
        let (code, out, err) = headless(&[liga.to_str().unwrap(), serie.to_str().unwrap()]);

        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(2)));
        assert!(out.is_empty());
        assert!(err.contains("Selecciona al menos una competencia"));
        assert!(err.contains("Competiciones disponibles: LaLiga, SerieA"));
    }

    #[test]
    fn headless_writes_projected_csv_in_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let liga = write_competition(dir.path(), "LaLiga.csv", "");
        let (code, out, err) = headless(&[
            "--group",
            "LaLiga",
            "--position",
            "Delantero",
            liga.to_str().unwrap(),
        ]);

        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        assert!(err.is_empty());
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, DISPLAY_COLUMNS);
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Bea");
    }

    #[test]
    fn headless_missing_display_column_warns_and_keeps_full_table() {
        let dir = tempfile::tempdir().unwrap();
        let liga = write_competition(dir.path(), "LaLiga.csv", "Offensive duels won, %");
        let (code, out, err) = headless(&[
            "--group",
            "LaLiga",
            "--position",
            "Arquero",
            liga.to_str().unwrap(),
        ]);

        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        assert!(err.contains("Aviso: Algunas de las columnas necesarias"));
        assert!(err.contains("Offensive duels won, %"));
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert!(header.contains(&"Height".to_string()));
        assert!(header.contains(&"source_file".to_string()));
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn headless_json_output_is_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let liga = write_competition(dir.path(), "LaLiga.csv", "");
        let (code, out, _) = headless(&[
            "--group",
            "LaLiga",
            "--passport",
            "ITALY",
            "--format",
            "json",
            liga.to_str().unwrap(),
        ]);

        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Full name"], "Dani");
    }

    #[test]
    fn gui_state_takes_every_cli_selection() {
        let dir = tempfile::tempdir().unwrap();
        let liga = write_competition(dir.path(), "LaLiga.csv", "");
        let cli = Cli::parse_from([
            "scout-filter",
            "--group",
            "LaLiga",
            "--position",
            "Delantero",
            "--age",
            "20-25",
            "--height",
            "170-185",
            "--passport",
            "spain",
            liga.to_str().unwrap(),
        ]);

        let mut state = AppState::default();
        ui::panels::load_into(&mut state, &cli.files);
        apply_cli(&mut state, &cli);

        assert_eq!(state.criteria.age_range, Some((20, 25)));
        assert_eq!(state.criteria.height_range, Some((170, 185)));
        assert_eq!(state.criteria.passport, "spain");
        assert_eq!(state.report.table().map(|t| t.len()), Some(1));
    }
}
