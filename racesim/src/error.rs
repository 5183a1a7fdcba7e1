use thiserror::Error;

/// RaceSimError covers every way an engine operation can refuse to run. All of them are fatal
/// for the operation that raised them and leave the previous state untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RaceSimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid configuration of car {car_no}: {reason}")]
    InvalidVehicleConfig { car_no: u32, reason: String },

    #[error("invalid tire compound: {0}")]
    InvalidTireCompound(String),

    #[error("invalid race setup: {0}")]
    InvalidRaceSetup(String),

    #[error("qualifying requires at least one participant")]
    InsufficientParticipants,

    #[error("driver {driver} cannot be assigned to car {car_no}: {reason}")]
    IncompatibleAssignment {
        driver: String,
        car_no: u32,
        reason: String,
    },

    #[error("{operation} is not allowed while the race is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: String,
    },
}

pub type RaceSimResult<T> = Result<T, RaceSimError>;
