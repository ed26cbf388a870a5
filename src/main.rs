#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use mapty::cli::{self, BaseArgs, Cmd, NewWorkout};
use mapty::storage::SqliteStore;
use mapty::{Coords, Ledger, LedgerError, Restored, ValidationRules, WorkoutKind, utils};

#[macro_use]
extern crate mapty;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let store_path = match cli.store {
        Some(p) => p,
        None => utils::default_store_path()?,
    };
    dlog!(
        "store={} strict_elevation={}",
        store_path.display(),
        cli.strict_elevation
    );

    let mut store = SqliteStore::open(&store_path)
        .with_context(|| format!("opening workout store: {}", store_path.display()))?;
    let rules = ValidationRules {
        strict_elevation: cli.strict_elevation,
    };
    let (mut ledger, restored) = Ledger::load(&store, rules).context("loading workouts")?;

    match cli.cmd {
        Cmd::Add { workout } => {
            if restored == Restored::Discarded {
                bail!(
                    "stored workouts in {} could not be read; refusing to overwrite them \
                     (run `mapty clear` to discard them)",
                    store_path.display()
                );
            }

            let (kind, base, value) = match workout {
                NewWorkout::Running { base, cadence } => (WorkoutKind::Running, base, cadence),
                NewWorkout::Cycling { base, elevation } => (WorkoutKind::Cycling, base, elevation),
            };
            let BaseArgs {
                lat,
                lng,
                distance,
                duration,
            } = base;

            let w = ledger
                .add_workout(kind, Coords::new(lat, lng), distance, duration, value)
                .context("Invalid workout")?;
            println!("{}", utils::format_workout_line(w));

            ledger.save(&mut store).context("saving workouts")?;
        }
        Cmd::List { json } => {
            if json {
                println!("{}", ledger.serialize()?);
            } else {
                for w in ledger.workouts() {
                    println!("{}", utils::format_workout_line(w));
                }
            }
        }
        Cmd::Show { id } => match ledger.find_by_id(&id) {
            Ok(w) => {
                println!("{}", utils::format_workout_line(w));
                println!("{}", utils::map_link(w.coords));
            }
            Err(LedgerError::NotFound(id)) => {
                tracing::info!(id = %id, "no workout with this id; nothing to show");
            }
            Err(e) => return Err(e.into()),
        },
        Cmd::Clear => {
            ledger.clear(&mut store).context("clearing workouts")?;
        }
    }

    Ok(())
}
