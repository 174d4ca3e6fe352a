use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result};
use rubik_core::{FaceTwist, PieceState, ScrambleParams, format_twists, parse_twists};
use rubik_prefs::Preferences;
use rubik_view::CubeController;
use serde::Serialize;

/// Time between frames when running animations from the command line.
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Rubik's Cube command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load instead of the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Scramble a solved cube and print its state as JSON.
    Scramble {
        /// Number of twists, defaulting to the preferences.
        #[arg(short, long)]
        length: Option<u32>,
        /// Random seed. If omitted, one is generated.
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Apply twists (such as `U R U' R'`) to a solved cube and print its
    /// state as JSON.
    Apply {
        /// Twists to apply.
        #[arg(required = true)]
        moves: Vec<String>,
        /// Solve the cube after applying the twists.
        #[arg(long)]
        solve: bool,
    },
    /// Start an animated cube (scrambling it if the preferences say to), solve
    /// it, and print a summary as JSON.
    Demo {
        /// Random seed. If omitted, one is generated.
        #[arg(short, long)]
        seed: Option<String>,
    },
}

/// Final state of a cube.
#[derive(Serialize, Debug)]
struct CubeReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scramble: Option<ScrambleReport>,
    history: String,
    solved: bool,
    pieces: &'a [PieceState],
}

#[derive(Serialize, Debug)]
struct ScrambleReport {
    seed: String,
    twists: String,
}

impl ScrambleReport {
    fn new(params: &ScrambleParams, twists: &[FaceTwist]) -> Self {
        Self {
            seed: params.seed.clone(),
            twists: format_twists(twists.iter().copied()),
        }
    }
}

#[derive(Serialize, Debug)]
struct DemoReport {
    scramble: ScrambleReport,
    scramble_frames: usize,
    solve_frames: usize,
    solved: bool,
}

pub(crate) fn exec(subcommand: Subcommand, prefs: &Preferences) -> Result<()> {
    match subcommand {
        Subcommand::Scramble { length, seed } => {
            let length = length.unwrap_or(prefs.scramble.length);
            let params = scramble_params(length, seed);

            let mut cube = CubeController::new(&instant(prefs));
            let twists = cube.scramble(params.clone())?;
            write_cube_report(&cube, Some(ScrambleReport::new(&params, &twists)))
        }

        Subcommand::Apply { moves, solve } => {
            let twists = parse_twists(&moves.join(" ")).wrap_err("error parsing twists")?;

            let mut cube = CubeController::new(&instant(prefs));
            cube.apply_twists(&twists)?;
            if solve {
                cube.solve()?;
            }
            write_cube_report(&cube, None)
        }

        Subcommand::Demo { seed } => write_json_output(&run_demo(prefs, seed)?),
    }
}

/// Starts an animated cube, which scrambles it if `scramble.on_start` is
/// set, and then solves it.
fn run_demo(prefs: &Preferences, seed: Option<String>) -> Result<DemoReport> {
    let params = scramble_params(prefs.scramble.length, seed);

    let mut cube = CubeController::new(prefs);
    let twists = cube.start_with(params.clone())?;
    let scramble_frames = run_until_idle(&mut cube)?;
    log::info!("Scrambled in {scramble_frames} frames");

    cube.solve()?;
    let solve_frames = run_until_idle(&mut cube)?;
    log::info!("Solved in {solve_frames} frames");

    Ok(DemoReport {
        scramble: ScrambleReport::new(&params, &twists),
        scramble_frames,
        solve_frames,
        solved: cube.is_solved(),
    })
}

fn scramble_params(length: u32, seed: Option<String>) -> ScrambleParams {
    match seed {
        Some(seed) => ScrambleParams::with_seed(length, seed),
        None => ScrambleParams::new(length),
    }
}

/// Returns a copy of the preferences with animations disabled.
fn instant(prefs: &Preferences) -> Preferences {
    let mut prefs = prefs.clone();
    prefs.animation.enabled = false;
    prefs
}

/// Steps the cube one frame at a time until all animations complete. Returns
/// the number of frames.
fn run_until_idle(cube: &mut CubeController) -> Result<usize> {
    let mut frames = 0;
    while cube.is_busy() {
        cube.step(FRAME_TIME)?;
        frames += 1;
    }
    Ok(frames)
}

fn write_cube_report(cube: &CubeController, scramble: Option<ScrambleReport>) -> Result<()> {
    write_json_output(&CubeReport {
        scramble,
        history: cube.history().to_string(),
        solved: cube.is_solved(),
        pieces: cube.grid().pieces(),
    })
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let args = Args::try_parse_from(["rubik", "apply", "U", "R'", "--solve"]).unwrap();
        match args.subcommand {
            Subcommand::Apply { moves, solve } => {
                assert_eq!(vec!["U", "R'"], moves);
                assert!(solve);
            }
            other => panic!("unexpected subcommand {other:?}"),
        }

        for argv in [
            ["rubik", "apply", "--solve", "F2", "B'"],
            ["rubik", "apply", "F2", "--solve", "B'"],
        ] {
            let args = Args::try_parse_from(argv).unwrap();
            match args.subcommand {
                Subcommand::Apply { moves, solve } => {
                    assert_eq!(vec!["F2", "B'"], moves);
                    assert!(solve);
                }
                other => panic!("unexpected subcommand {other:?}"),
            }
        }

        let args = Args::try_parse_from(["rubik", "apply", "L"]).unwrap();
        assert!(matches!(
            args.subcommand,
            Subcommand::Apply { solve: false, .. },
        ));
        assert!(Args::try_parse_from(["rubik", "apply", "--solve"]).is_err());
    }

    #[test]
    fn test_run_until_idle() {
        let mut cube = CubeController::new(&Preferences::default());
        cube.scramble(ScrambleParams::with_seed(3, "frames")).unwrap();
        let frames = run_until_idle(&mut cube).unwrap();
        // 30 frames per quarter turn at the default speed.
        assert!((90..=93).contains(&frames), "{frames}");
        assert_eq!(3, cube.history().len());
    }

    #[test]
    fn test_demo_follows_scramble_on_start() {
        let mut prefs = Preferences::default();
        prefs.scramble.length = 2;

        let report = run_demo(&prefs, Some("demo".to_owned())).unwrap();
        assert_eq!(
            format_twists(ScrambleParams::with_seed(2, "demo").generate()),
            report.scramble.twists,
        );
        assert!(report.scramble_frames > 0);
        assert!(report.solve_frames > 0);
        assert!(report.solved);

        prefs.scramble.on_start = false;
        let report = run_demo(&prefs, Some("demo".to_owned())).unwrap();
        assert_eq!("", report.scramble.twists);
        assert_eq!(0, report.scramble_frames);
        assert_eq!(0, report.solve_frames);
        assert!(report.solved);
    }
}
