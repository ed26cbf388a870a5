use crate::dlog;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::SlotStore;
use crate::types::{Coords, Workout, WorkoutDetails, WorkoutKind, derived_metric, describe};
use chrono::{DateTime, Utc};

/// Storage slot holding the serialized ledger.
pub const WORKOUTS_SLOT: &str = "workouts";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject negative cycling elevation gain. Off by default: any finite
    /// value is accepted.
    pub strict_elevation: bool,
}

/// Outcome of [`Ledger::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    /// Nothing was stored.
    Empty,
    /// Stored records were loaded; holds their count.
    Loaded(usize),
    /// Stored data did not parse and was ignored; the slot still holds it.
    Discarded,
}

/// Ordered workout records; insertion order is display order.
#[derive(Debug, Default)]
pub struct Ledger {
    workouts: Vec<Workout>,
    rules: ValidationRules,
    next_seq: u64,
}

impl Ledger {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            workouts: Vec::new(),
            rules,
            next_seq: 0,
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub const fn rules(&self) -> ValidationRules {
        self.rules
    }

    pub fn add_workout(
        &mut self,
        kind: WorkoutKind,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        kind_value: f64,
    ) -> LedgerResult<&Workout> {
        self.add_workout_at(Utc::now(), kind, coords, distance_km, duration_min, kind_value)
    }

    /// Like [`Ledger::add_workout`] with an explicit creation time.
    pub fn add_workout_at(
        &mut self,
        created_at: DateTime<Utc>,
        kind: WorkoutKind,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        kind_value: f64,
    ) -> LedgerResult<&Workout> {
        check_coords(coords)?;
        check_positive("distance", distance_km)?;
        check_positive("duration", duration_min)?;

        // Extreme but positive inputs can still overflow the ratio.
        let metric = derived_metric(kind, distance_km, duration_min);
        check_finite(metric_field(kind), metric)?;
        let details = match kind {
            WorkoutKind::Running => {
                check_positive("cadence", kind_value)?;
                WorkoutDetails::Running {
                    cadence_spm: kind_value,
                    pace_min_per_km: metric,
                }
            }
            WorkoutKind::Cycling => {
                if self.rules.strict_elevation {
                    check_non_negative("elevation gain", kind_value)?;
                } else {
                    check_finite("elevation gain", kind_value)?;
                }
                WorkoutDetails::Cycling {
                    elevation_gain_m: kind_value,
                    speed_km_per_h: metric,
                }
            }
        };

        let workout = Workout {
            id: self.next_id(created_at),
            created_at,
            coords,
            distance_km,
            duration_min,
            description: describe(kind, created_at),
            details,
        };

        tracing::info!(
            id = %workout.id,
            kind = kind.as_str(),
            coords = %workout.coords,
            metric = metric,
            "workout added"
        );

        self.workouts.push(workout);
        Ok(&self.workouts[self.workouts.len() - 1])
    }

    pub fn find_by_id(&self, id: &str) -> LedgerResult<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// JSON array of every record, computed fields included.
    pub fn serialize(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string(&self.workouts)?)
    }

    /// Replaces the records with previously serialized ones, verbatim.
    ///
    /// `None` leaves the ledger empty. Data that does not parse as a list of
    /// workouts also leaves it empty and is reported as [`Restored::Discarded`].
    pub fn restore(&mut self, data: Option<&str>) -> Restored {
        self.workouts.clear();

        let Some(data) = data else {
            dlog!("restore: no stored data");
            return Restored::Empty;
        };

        match serde_json::from_str::<Vec<Workout>>(data) {
            Ok(workouts) => {
                tracing::debug!(count = workouts.len(), "restored workouts");
                self.workouts = workouts;
                Restored::Loaded(self.workouts.len())
            }
            Err(e) => {
                tracing::warn!(err = %e, "stored workouts are malformed; starting empty");
                Restored::Discarded
            }
        }
    }

    /// Empties the ledger without touching storage.
    pub fn reset(&mut self) {
        self.workouts.clear();
    }

    /// Reads the workouts slot. Callers should not [`Ledger::save`] over a
    /// [`Restored::Discarded`] slot unless they mean to drop its contents.
    pub fn load(
        store: &impl SlotStore,
        rules: ValidationRules,
    ) -> LedgerResult<(Self, Restored)> {
        let mut ledger = Self::new(rules);
        let data = store.read(WORKOUTS_SLOT)?;
        let restored = ledger.restore(data.as_deref());
        Ok((ledger, restored))
    }

    pub fn save(&self, store: &mut impl SlotStore) -> LedgerResult<()> {
        store.write(WORKOUTS_SLOT, &self.serialize()?)
    }

    /// Empties the ledger and removes its storage slot.
    pub fn clear(&mut self, store: &mut impl SlotStore) -> LedgerResult<()> {
        store.remove(WORKOUTS_SLOT)?;
        let n = self.workouts.len();
        self.reset();
        tracing::info!(removed = n, "ledger cleared");
        Ok(())
    }

    // Millisecond timestamps alone collide for records created back to back;
    // the sequence number and the membership check keep ids unique.
    fn next_id(&mut self, created_at: DateTime<Utc>) -> String {
        let ms = created_at.timestamp_millis();
        loop {
            let id = format!("{ms}-{}", self.next_seq);
            self.next_seq += 1;
            if !self.workouts.iter().any(|w| w.id == id) {
                return id;
            }
        }
    }
}

const fn metric_field(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "pace",
        WorkoutKind::Cycling => "speed",
    }
}

fn check_finite(field: &'static str, value: f64) -> LedgerResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput {
            field,
            value,
            reason: "must be a finite number",
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> LedgerResult<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput {
            field,
            value,
            reason: "must be positive",
        })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> LedgerResult<()> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput {
            field,
            value,
            reason: "must not be negative",
        })
    }
}

fn check_coords(c: Coords) -> LedgerResult<()> {
    check_finite("latitude", c.lat)?;
    check_finite("longitude", c.lng)?;
    if !(-90.0..=90.0).contains(&c.lat) {
        return Err(LedgerError::InvalidInput {
            field: "latitude",
            value: c.lat,
            reason: "must be within [-90, 90]",
        });
    }
    if !(-180.0..=180.0).contains(&c.lng) {
        return Err(LedgerError::InvalidInput {
            field: "longitude",
            value: c.lng,
            reason: "must be within [-180, 180]",
        });
    }
    Ok(())
}
