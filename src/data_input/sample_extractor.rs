// src/data_input/sample_extractor.rs

use std::path::Path;

use crate::constants::{MS_TO_KPH, NANOS_PER_SECOND};
use crate::data_input::log_data::{CarState, Event, EventPayload, Sample};
use crate::data_input::log_reader::{LoadError, LogReader};

/// Converts the vehicle-state events of a drive into time-ordered samples.
///
/// Elapsed time is measured from the earliest vehicle-state event. Events are
/// stably sorted by timestamp first, so out-of-order logs still yield
/// non-decreasing elapsed times. Returns an empty vector when the drive has no
/// vehicle-state events.
pub fn extract_samples<I>(events: I) -> Vec<Sample>
where
    I: IntoIterator<Item = Event>,
{
    let mut car_states: Vec<(u64, CarState)> = events
        .into_iter()
        .filter_map(|event| match event.payload {
            EventPayload::CarState(car_state) => Some((event.log_mono_time, car_state)),
            EventPayload::Other(_) => None,
        })
        .collect();
    car_states.sort_by_key(|&(log_mono_time, _)| log_mono_time);

    let Some(&(start_time, _)) = car_states.first() else {
        return Vec::new();
    };

    car_states
        .iter()
        .map(|&(log_mono_time, car_state)| Sample {
            elapsed_time: (log_mono_time - start_time) as f64 / NANOS_PER_SECOND,
            speed_kph: car_state.v_ego * MS_TO_KPH,
            steering_torque: car_state.steering_torque,
            steering_angle_deg: car_state.steering_angle_deg,
            cruise_enabled: car_state.cruise_state.enabled,
        })
        .collect()
}

/// Opens a drive's log and extracts its samples in one pass.
pub fn load_samples(log_path: &Path) -> Result<Vec<Sample>, LoadError> {
    let reader = LogReader::open(log_path)?;

    let mut failure = None;
    let samples = extract_samples(reader.map_while(|result| match result {
        Ok(event) => Some(event),
        Err(e) => {
            failure = Some(e);
            None
        }
    }));

    match failure {
        Some(e) => Err(e),
        None => Ok(samples),
    }
}


// src/data_input/sample_extractor.rs
