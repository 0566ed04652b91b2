//! Race split planner.
//!
//! ```text
//! splits plan --distance 13.1 --pace 7:30
//! splits plan --preset boston-marathon --goal 3:10:00 --strategy even-effort
//! splits plan --gpx course.gpx --pace 4:45 --pace-unit km --json
//! splits presets
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use courses::config::CliConfig;
use courses::gpx_files::GpxProfileLoader;
use courses::input::{parse_duration, parse_pace};
use courses::presets::{self, RacePreset};
use courses::terrain::ProfileGenerator;
use pacing::elevation::ProfileSummary;
use pacing::prelude::*;
use pacing::units::to_miles;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Sample spacing for generated terrain, in miles.
const TERRAIN_SPACING_MI: f64 = 0.1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Race pacing splits with elevation-aware targets",
    long_about = None
)]
struct Cli {
    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the splits for a race
    Plan(PlanArgs),
    /// List the built-in race courses
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Race distance (taken from the course when omitted)
    #[arg(short, long)]
    distance: Option<f64>,

    /// Unit of --distance
    #[arg(short, long, value_enum)]
    unit: Option<UnitOpt>,

    /// Flat pace per pace unit, e.g. 7:30
    #[arg(short, long, conflicts_with = "goal")]
    pace: Option<String>,

    /// Goal finish time, e.g. 3:15:00
    #[arg(short, long)]
    goal: Option<String>,

    /// Unit the pace is expressed per
    #[arg(long, value_enum)]
    pace_unit: Option<UnitOpt>,

    /// How target paces follow the terrain
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyOpt>,

    /// Built-in course id (see `splits presets`)
    #[arg(long, conflicts_with_all = ["gpx", "terrain"])]
    preset: Option<String>,

    /// GPX track to read the elevation profile from
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "terrain")]
    gpx: Option<PathBuf>,

    /// Generate a synthetic course of this kind
    #[arg(long, value_enum)]
    terrain: Option<TerrainOpt>,

    /// Seed for --terrain
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Only whole miles/kilometres and the finish
    #[arg(long, action = ArgAction::SetTrue)]
    primary: bool,

    /// Emit JSON instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// TOML config with pacing parameters and defaults
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Emit JSON instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum UnitOpt {
    Mi,
    Km,
}

impl From<UnitOpt> for DistanceUnit {
    fn from(opt: UnitOpt) -> Self {
        match opt {
            UnitOpt::Mi => DistanceUnit::Mi,
            UnitOpt::Km => DistanceUnit::Km,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyOpt {
    EvenPace,
    EvenEffort,
}

impl From<StrategyOpt> for PacingStrategy {
    fn from(opt: StrategyOpt) -> Self {
        match opt {
            StrategyOpt::EvenPace => PacingStrategy::EvenPace,
            StrategyOpt::EvenEffort => PacingStrategy::EvenEffort,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TerrainOpt {
    Flat,
    Rolling,
    Hilly,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Plan(args) => handle_plan(args),
        Command::Presets(args) => handle_presets(args),
    }
}

/// Where the race distance and profile came from.
struct Course {
    name: Option<String>,
    distance: f64,
    unit: DistanceUnit,
    profile: Option<ElevationProfile>,
}

fn resolve_course(args: &PlanArgs, default_unit: DistanceUnit) -> Result<Course> {
    let unit = args.unit.map(DistanceUnit::from);

    if let Some(id) = &args.preset {
        let preset: &RacePreset = presets::find(id)?;
        let profile = preset.profile().context("built-in course profile")?;
        return Ok(Course {
            name: Some(preset.name.to_string()),
            distance: args.distance.unwrap_or(preset.distance),
            unit: if args.distance.is_some() {
                unit.unwrap_or(default_unit)
            } else {
                preset.unit
            },
            profile: Some(profile),
        });
    }

    if let Some(path) = &args.gpx {
        let course = GpxProfileLoader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let (distance, unit) = match args.distance {
            Some(d) => (d, unit.unwrap_or(default_unit)),
            None => (course.distance_miles(), DistanceUnit::Mi),
        };
        return Ok(Course {
            name: course.name,
            distance,
            unit,
            profile: Some(course.profile),
        });
    }

    let Some(distance) = args.distance else {
        bail!("give --distance, --preset or --gpx");
    };
    let unit = unit.unwrap_or(default_unit);

    let profile = match args.terrain {
        Some(kind) => {
            let generator = match kind {
                TerrainOpt::Flat => ProfileGenerator::flat(args.seed),
                TerrainOpt::Rolling => ProfileGenerator::rolling(args.seed),
                TerrainOpt::Hilly => ProfileGenerator::hilly(args.seed),
            };
            Some(generator.profile(to_miles(distance, unit), TERRAIN_SPACING_MI)?)
        }
        None => None,
    };

    Ok(Course {
        name: None,
        distance,
        unit,
        profile,
    })
}

fn handle_plan(args: PlanArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let defaults = config.defaults;

    let course = resolve_course(&args, defaults.distance_unit)?;
    let pace_unit = args.pace_unit.map(DistanceUnit::from).unwrap_or(defaults.pace_unit);
    let strategy = args.strategy.map(PacingStrategy::from).unwrap_or(defaults.strategy);

    let mut request = match (&args.pace, &args.goal) {
        (Some(pace), _) => SplitRequest::from_pace(
            course.distance,
            course.unit,
            parse_pace(pace)?,
            pace_unit,
        ),
        (None, Some(goal)) => SplitRequest::from_goal_time(
            course.distance,
            course.unit,
            parse_duration(goal)?,
            pace_unit,
        )?,
        (None, None) => bail!("give --pace or --goal"),
    }
    .with_strategy(strategy);
    request.profile = course.profile;

    debug!(
        strategy = %request.strategy,
        goal_time_mode = request.goal_time_mode,
        "planning splits"
    );
    let splits = build_splits_with_config(&request, &config.pacing)?;
    info!(count = splits.len(), "built splits");

    let rows: Vec<&EnhancedSplit> = if args.primary {
        primary_splits(&splits)
    } else {
        splits.iter().collect()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if let Some(name) = &course.name {
        println!("{name}");
    }
    print_table(&rows, pace_unit);
    Ok(())
}

fn print_table(rows: &[&EnhancedSplit], pace_unit: DistanceUnit) {
    println!(
        "{:<10} {:>10} {:>9} {:>9} {:>11} {:>7}",
        "Split", "Distance", "Elapsed", "Segment", "Target", "Grade"
    );
    for split in rows {
        let grade = split
            .grade
            .map(|g| format!("{g:+.1}%"))
            .unwrap_or_default();
        println!(
            "{:<10} {:>10} {:>9} {:>9} {:>11} {:>7}",
            split.label(),
            split.row.distance_label,
            format_hms(split.cumulative_seconds()),
            format_hms(split.segment_seconds()),
            format_pace(split.target_pace, pace_unit),
            grade,
        );
    }
}

#[derive(Serialize)]
struct PresetRow {
    #[serde(flatten)]
    preset: RacePreset,
    summary: ProfileSummary,
}

fn handle_presets(args: PresetsArgs) -> Result<()> {
    let rows = presets::all()
        .par_iter()
        .map(|preset| {
            let summary = preset
                .profile()
                .with_context(|| format!("profile for {}", preset.id))?
                .summary();
            Ok(PresetRow {
                preset: *preset,
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<20} {:<28} {:>8} {:>8} {:>8}",
        "Id", "Name", "Distance", "Gain ft", "Loss ft"
    );
    for row in &rows {
        println!(
            "{:<20} {:<28} {:>8} {:>8.0} {:>8.0}",
            row.preset.id,
            row.preset.name,
            format!("{} {}", row.preset.distance, row.preset.unit.abbreviation()),
            row.summary.gain,
            row.summary.loss,
        );
    }
    Ok(())
}
