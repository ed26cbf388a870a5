use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts at map locations"
)]
pub struct Cli {
    /// Path to the slot database holding the workouts.
    ///
    /// Default: <data dir>/mapty/mapty.sqlite
    #[arg(long, env = "MAPTY_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Reject negative elevation gain for cycling workouts.
    #[arg(long, env = "MAPTY_STRICT_ELEVATION", global = true)]
    pub strict_elevation: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log a new workout
    Add {
        #[command(subcommand)]
        workout: NewWorkout,
    },

    /// List workouts in the order they were logged
    List {
        /// Print the stored JSON instead of one line per workout
        #[arg(long)]
        json: bool,
    },

    /// Show one workout and a map link centered on it
    Show { id: String },

    /// Delete every workout
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum NewWorkout {
    Running {
        #[command(flatten)]
        base: BaseArgs,

        /// Steps per minute
        #[arg(long, allow_hyphen_values = true)]
        cadence: f64,
    },
    Cycling {
        #[command(flatten)]
        base: BaseArgs,

        /// Elevation gain in meters
        #[arg(long, allow_hyphen_values = true)]
        elevation: f64,
    },
}

#[derive(Args, Debug)]
pub struct BaseArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Distance in km
    #[arg(long, allow_hyphen_values = true)]
    pub distance: f64,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: f64,
}
