use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map position, persisted as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Kind-specific part of a workout, including its stored derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    pub description: String,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Stored pace (min/km) or speed (km/h).
    pub const fn metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }

    /// Cadence for running, elevation gain for cycling.
    pub const fn kind_value(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running { cadence_spm, .. } => cadence_spm,
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }

    /// Computes the metric from the base fields, whether this record was
    /// built in-process or loaded from storage.
    pub fn recompute_metric(&self) -> f64 {
        derived_metric(self.kind(), self.distance_km, self.duration_min)
    }
}

pub fn derived_metric(kind: WorkoutKind, distance_km: f64, duration_min: f64) -> f64 {
    match kind {
        WorkoutKind::Running => duration_min / distance_km,
        WorkoutKind::Cycling => distance_km / (duration_min / 60.0),
    }
}

pub fn metric_unit(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "min/km",
        WorkoutKind::Cycling => "km/h",
    }
}

/// `"Running on April 14"`, dated in the local timezone.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    describe_in(kind, created_at, &Local)
}

pub fn describe_in<Tz>(kind: WorkoutKind, created_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = created_at.with_timezone(tz);
    format!("{} on {}", kind.label(), local.format("%B %-d"))
}
