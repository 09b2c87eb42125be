// src/data_input/log_data.rs

use serde::{Deserialize, Serialize};

use crate::constants::CAR_STATE_EVENT;

/// Cruise control status nested inside `carState`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CruiseState {
    pub enabled: bool,
}

/// Vehicle state payload. Fields missing from the log decode to zero/false.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarState {
    pub v_ego: f64,              // Vehicle speed (m/s).
    pub steering_torque: f64,    // Driver steering torque (Nm).
    pub steering_angle_deg: f64, // Steering wheel angle (deg).
    pub cruise_state: CruiseState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    CarState(CarState),
    /// Any other message type, identified by its tag only.
    Other(String),
}

/// A single decoded log message.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub log_mono_time: u64, // Monotonic timestamp (ns).
    pub payload: EventPayload,
}

impl Event {
    pub fn car_state(log_mono_time: u64, car_state: CarState) -> Self {
        Self {
            log_mono_time,
            payload: EventPayload::CarState(car_state),
        }
    }

    pub fn other(log_mono_time: u64, which: &str) -> Self {
        Self {
            log_mono_time,
            payload: EventPayload::Other(which.to_string()),
        }
    }

    /// Type tag of the payload.
    pub fn which(&self) -> &str {
        match &self.payload {
            EventPayload::CarState(_) => CAR_STATE_EVENT,
            EventPayload::Other(which) => which,
        }
    }
}

/// Flat vehicle-state record derived from one `carState` event.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed_time: f64,       // Seconds since the first vehicle-state event.
    pub speed_kph: f64,          // Vehicle speed (km/h).
    pub steering_torque: f64,    // Driver steering torque (Nm).
    pub steering_angle_deg: f64, // Steering wheel angle (deg).
    pub cruise_enabled: bool,
}

// src/data_input/log_data.rs
