pub mod cli;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod types;
pub mod utils;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, Restored, ValidationRules, WORKOUTS_SLOT};
pub use types::{Coords, Workout, WorkoutDetails, WorkoutKind};
