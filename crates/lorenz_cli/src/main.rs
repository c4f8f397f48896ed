mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use lorenz_core::{Lorenz63, Model, Parameters, RunContext, MODEL_NAME};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Time step applied after any loaded parameter file.
const FIXED_DT: f64 = 0.01;
/// Step count applied after any loaded parameter file.
const FIXED_STEP: usize = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "lorenz63",
    version,
    about = "Integrate the Lorenz-63 system with forward Euler and save the trajectory"
)]
struct Cli {
    /// Specify the plugin parameter file
    #[arg(long = "plugin_param", value_name = "FILE", value_hint = ValueHint::FilePath)]
    plugin_param: Option<PathBuf>,

    /// Specify the output directory
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    output: Option<PathBuf>,

    /// Specify the value of initial x
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    x: f64,

    /// Specify the value of initial y
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    y: f64,

    /// Specify the value of initial z
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    z: f64,
}

/// Runs one integration and returns the model so the caller can report it.
fn run(cli: &Cli) -> Result<Lorenz63> {
    let mut model = Lorenz63::new(Parameters::default());

    if let Some(path) = &cli.plugin_param {
        model
            .set_option(path)
            .with_context(|| format!("Failed to load plugin parameters from {:?}", path))?;
    }
    model.params.dt = FIXED_DT;
    model.params.step = FIXED_STEP;

    let output = match &cli.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory {:?}", output))?;
    model.set_history_file(output.join(format!("{}_trajectory.dat", MODEL_NAME)));

    let mut state = vec![cli.x, cli.y, cli.z];
    model.predict(&mut state, &[0.0; 3], &RunContext::default())?;
    Ok(model)
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(model) => {
            println!("{}", model.params);
            println!("x0 {}", cli.x);
            println!("y0 {}", cli.y);
            println!("z0 {}", cli.z);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, FIXED_DT, FIXED_STEP};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lorenz63").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults_match_reference_initial_state() {
        let cli = parse(&[]);
        assert_eq!((cli.x, cli.y, cli.z), (1.0, 3.0, 5.0));
        assert!(cli.plugin_param.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn accepts_underscore_flag_and_negative_values() {
        let cli = parse(&["--plugin_param", "p.json", "--x", "-2.5", "--z", "0"]);
        assert_eq!(cli.plugin_param.as_deref(), Some(std::path::Path::new("p.json")));
        assert_eq!(cli.x, -2.5);
        assert_eq!(cli.z, 0.0);
    }

    #[test]
    fn rejects_unknown_options_and_bad_numbers() {
        assert!(Cli::try_parse_from(["lorenz63", "--w", "1"]).is_err());
        assert!(Cli::try_parse_from(["lorenz63", "--x", "abc"]).is_err());
    }

    #[test]
    fn run_writes_trajectory_into_output_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested");
        let cli = parse(&["--output", out.to_str().unwrap()]);

        let model = run(&cli).expect("run");

        let text = fs::read_to_string(out.join("lorenz63_trajectory.dat")).unwrap();
        assert_eq!(text.lines().count(), FIXED_STEP + 1);
        assert_eq!(text.lines().next(), Some("1 3 5"));
        assert_eq!(model.params.sigma, 10.0);
        assert_eq!(model.params.beta, 8.0 / 3.0);
    }

    #[test]
    fn loaded_dt_and_step_are_overridden() {
        let dir = tempdir().unwrap();
        let param = dir.path().join("lorenz63.json");
        fs::write(
            &param,
            r#"{"sigma": 9.0, "rho": 20.0, "beta": 1.5, "dt": 0.5, "step": 3}"#,
        )
        .unwrap();
        let cli = parse(&[
            "--plugin_param",
            param.to_str().unwrap(),
            "--output",
            dir.path().to_str().unwrap(),
        ]);

        let model = run(&cli).expect("run");
        assert_eq!(model.params.sigma, 9.0);
        assert_eq!(model.params.rho, 20.0);
        assert_eq!(model.params.beta, 1.5);
        assert_eq!(model.params.dt, FIXED_DT);
        assert_eq!(model.params.step, FIXED_STEP);
    }

    #[test]
    fn bad_parameter_file_fails_the_run() {
        let dir = tempdir().unwrap();
        let cli = parse(&[
            "--plugin_param",
            dir.path().join("absent.json").to_str().unwrap(),
            "--output",
            dir.path().to_str().unwrap(),
        ]);
        let err = run(&cli).expect_err("missing parameter file");
        assert!(format!("{err:#}").contains("Failed to load plugin parameters"));
        assert!(!dir.path().join("lorenz63_trajectory.dat").exists());
    }
}
