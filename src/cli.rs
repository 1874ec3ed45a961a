//! Command-line front end
//!
//! Runs one simulation from flags (`growth monod ...`, `growth gompertz ...`)
//! or an interactive session that prompts for the model and its parameters
//! and repeats until the user declines to continue.

use crate::model::{DEFAULT_ABS_TOL, DEFAULT_REL_TOL};
use crate::pipeline::{DEFAULT_NPOINT, SimulationRequest, SimulationSettings, run_simulation};
use crate::report::format_metrics;
use crate::{GrowthError, GrowthRateFormula, GrowthResult, ModelType, OdeMethod};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Microbial growth simulator
#[derive(Debug, Parser)]
#[command(name = "growth", version, about = "Microbial growth simulation with the Monod and Gompertz models")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate substrate-limited growth (biomass and substrate)
    Monod(MonodArgs),

    /// Simulate growth following the Gompertz curve
    Gompertz(GompertzArgs),

    /// Prompt for the model and its parameters, repeatedly
    Interactive(SettingsArgs),
}

/// Monod parameters
#[derive(Debug, Args)]
pub struct MonodArgs {
    /// Maximum specific growth rate (1/h)
    #[arg(long)]
    pub umax: f64,

    /// Yield coefficient (biomass per unit substrate)
    #[arg(long)]
    pub yxs: f64,

    /// Initial substrate concentration
    #[arg(long)]
    pub s0: f64,

    /// Half-saturation constant
    #[arg(long)]
    pub ks: f64,

    /// Initial biomass
    #[arg(long)]
    pub x0: f64,

    /// Duration of the simulation (hours)
    #[arg(long)]
    pub duration: f64,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Gompertz parameters
#[derive(Debug, Args)]
pub struct GompertzArgs {
    /// Microbial count as time grows indefinitely (CFU/mL)
    #[arg(short = 'c', long)]
    pub c: f64,

    /// Time to reach the maximum specific growth rate (hours)
    #[arg(short = 'm', long)]
    pub m: f64,

    /// Relative growth rate
    #[arg(short = 'b', long)]
    pub b: f64,

    /// Initial biomass
    #[arg(long)]
    pub x0: f64,

    /// Duration of the simulation (hours)
    #[arg(long)]
    pub duration: f64,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Numerical and output options
#[derive(Debug, Args, Clone)]
pub struct SettingsArgs {
    /// Number of points of the time grid
    #[arg(long, default_value_t = DEFAULT_NPOINT)]
    pub points: usize,

    /// ODE method
    #[arg(long, value_enum, default_value_t = OdeMethod::DoPri5)]
    pub method: OdeMethod,

    /// Absolute tolerance of the ODE solver
    #[arg(long, default_value_t = DEFAULT_ABS_TOL)]
    pub abs_tol: f64,

    /// Relative tolerance of the ODE solver
    #[arg(long, default_value_t = DEFAULT_REL_TOL)]
    pub rel_tol: f64,

    /// Formula of the Monod growth rate metric
    #[arg(long, value_enum, default_value_t = GrowthRateFormula::Literal)]
    pub growth_rate_formula: GrowthRateFormula,

    /// Save a figure of the trajectory (e.g. growth.svg)
    #[arg(long, value_name = "PATH")]
    pub plot: Option<PathBuf>,
}

impl From<SettingsArgs> for SimulationSettings {
    fn from(args: SettingsArgs) -> Self {
        SimulationSettings {
            npoint: args.points,
            method: args.method,
            abs_tol: args.abs_tol,
            rel_tol: args.rel_tol,
            growth_rate_formula: args.growth_rate_formula,
            plot_path: args.plot,
        }
    }
}

/// Run using the current process arguments
pub fn run() -> GrowthResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator
pub fn run_with_args<I, T>(args: I) -> GrowthResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(io::stderr))
        .try_init();

    let stdout = io::stdout();
    match cli.command {
        Command::Monod(args) => {
            let request = SimulationRequest::monod(args.umax, args.yxs, args.s0, args.ks, args.x0, args.duration);
            run_once(&request, &args.settings.into(), &mut stdout.lock())
        }
        Command::Gompertz(args) => {
            let request = SimulationRequest::gompertz(args.c, args.m, args.b, args.x0, args.duration);
            run_once(&request, &args.settings.into(), &mut stdout.lock())
        }
        Command::Interactive(settings) => {
            let stdin = io::stdin();
            run_session(&mut stdin.lock(), &mut stdout.lock(), &settings.into())
        }
    }
}

/// Runs one simulation and writes the metrics report
pub fn run_once<W: Write>(
    request: &SimulationRequest,
    settings: &SimulationSettings,
    output: &mut W,
) -> GrowthResult<()> {
    let outcome = run_simulation(request, settings)?;
    write!(output, "{}", format_metrics(outcome.model_type, &outcome.metrics))?;
    Ok(())
}

/// Parses the answer to the model menu (1 or 2)
pub fn select_model(answer: &str) -> GrowthResult<ModelType> {
    answer
        .trim()
        .parse::<i64>()
        .map_err(|_| "Invalid choice. Please enter 1 or 2.")
        .and_then(ModelType::from_selector)
        .map_err(GrowthError::InvalidSelection)
}

/// Runs the interactive session until the user declines to continue or the input ends
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    settings: &SimulationSettings,
) -> GrowthResult<()> {
    let mut prompter = Prompter { input, output };
    loop {
        writeln!(prompter.output, "Select a model:")?;
        writeln!(prompter.output, "1. Monod Model")?;
        writeln!(prompter.output, "2. Gompertz Model")?;
        let Some(answer) = prompter.ask("Enter 1 or 2: ")? else {
            break;
        };
        match select_model(&answer) {
            Ok(model_type) => {
                let Some(request) = prompter.ask_request(model_type)? else {
                    break;
                };
                match run_once(&request, settings, &mut *prompter.output) {
                    Ok(()) => (),
                    Err(GrowthError::Io(e)) => return Err(GrowthError::Io(e)),
                    Err(e) => {
                        tracing::warn!(error = %e, "simulation run failed");
                        writeln!(prompter.output, "{}", e)?;
                    }
                }
            }
            Err(e) => {
                tracing::debug!(answer = %answer, "invalid model selection");
                writeln!(prompter.output, "{}", e)?;
            }
        }

        match prompter.ask("Do you want to continue? (y/n): ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }
    writeln!(prompter.output, "Thank you for using the software.")?;
    Ok(())
}

/// Reads answers from the input after writing the prompts to the output
struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    /// Returns the trimmed answer or None at the end of the input
    fn ask(&mut self, prompt: &str) -> GrowthResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until the answer is a number; returns None at the end of the input
    fn ask_number(&mut self, prompt: &str) -> GrowthResult<Option<f64>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "'{}' is not a number, please try again.", answer)?,
            }
        }
    }

    /// Asks for the parameters of the selected model
    fn ask_request(&mut self, model_type: ModelType) -> GrowthResult<Option<SimulationRequest>> {
        let prompts: &[(&'static str, &str)] = match model_type {
            ModelType::Monod => &[
                ("umax", "Enter umax: "),
                ("yxs", "Enter Yxs: "),
                ("s0", "Enter S0: "),
                ("ks", "Enter Ks: "),
            ],
            ModelType::Gompertz => &[
                ("c", "Enter C (microbial counts when time grows indefinitely, CFU/mL): "),
                ("m", "Enter M (time to reach maximum specific growth rate, hours): "),
                ("b", "Enter B (relative growth rate, CFU/mL * hours): "),
            ],
        };
        let mut values = Vec::with_capacity(prompts.len() + 2);
        for (_, prompt) in prompts {
            match self.ask_number(prompt)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        let Some(x0) = self.ask_number("Enter initial biomass (X0): ")? else {
            return Ok(None);
        };
        let Some(duration) = self.ask_number("Enter duration of simulation (hours): ")? else {
            return Ok(None);
        };
        Ok(Some(SimulationRequest {
            model_type,
            params: prompts.iter().map(|(name, _)| *name).zip(values).collect(),
            x0,
            duration,
        }))
    }
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
