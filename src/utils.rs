use crate::types::{Coords, Workout, WorkoutKind, metric_unit};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging on stderr.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let level = log_level(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mapty={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

fn log_level(verbose: u8, quiet: u8) -> &'static str {
    let net = i16::from(verbose) - i16::from(quiet);
    match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    }
}

pub fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "mapty")
        .context("could not determine a data directory; pass --store")?;
    Ok(dirs.data_dir().join("mapty.sqlite"))
}

/// OpenStreetMap view centered on `c` at the default zoom.
pub fn map_link(c: Coords) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=16/{lat}/{lng}",
        lat = c.lat,
        lng = c.lng
    )
}

/// One sidebar line: icon, description, distance, duration, metric, extra.
pub fn format_workout_line(w: &Workout) -> String {
    let kind = w.kind();
    let extra = match kind {
        WorkoutKind::Running => format!("🦶🏼 {:.0} spm", w.kind_value()),
        WorkoutKind::Cycling => format!("⛰ {:.0} m", w.kind_value()),
    };
    format!(
        "{}\t{} {}\t{} km\t⏱ {} min\t⚡️ {:.1} {}\t{}",
        w.id,
        kind.icon(),
        w.description,
        w.distance_km,
        w.duration_min,
        w.metric(),
        metric_unit(kind),
        extra
    )
}
