// src/data_input/log_reader.rs

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Split, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::CAR_STATE_EVENT;
use crate::data_input::log_data::{CarState, Event, EventPayload};

const LOG_MONO_TIME_KEY: &str = "logMonoTime";
const VALID_FLAG_KEY: &str = "valid";

type LogDecoder = zstd::stream::read::Decoder<'static, BufReader<File>>;

/// Failure to open or decode a drive's log. The batch skips the drive.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open log '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode log '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One line of the decompressed log: the timestamp plus a single payload keyed by its type tag.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "logMonoTime")]
    log_mono_time: u64,
    #[serde(flatten)]
    body: Map<String, Value>,
}

fn parse_event_bytes(line: &[u8]) -> Result<Event, String> {
    let text = std::str::from_utf8(line).map_err(|e| format!("line is not UTF-8: {e}"))?;
    parse_event_line(text.trim())
}

fn parse_event_line(line: &str) -> Result<Event, String> {
    let mut raw: RawEvent = serde_json::from_str(line).map_err(|e| e.to_string())?;

    let payload = if let Some(value) = raw.body.remove(CAR_STATE_EVENT) {
        let car_state: CarState = serde_json::from_value(value)
            .map_err(|e| format!("invalid {CAR_STATE_EVENT} payload: {e}"))?;
        EventPayload::CarState(car_state)
    } else {
        let which = raw
            .body
            .keys()
            .find(|key| key.as_str() != VALID_FLAG_KEY)
            .ok_or_else(|| "event has no payload".to_string())?;
        EventPayload::Other(which.clone())
    };

    Ok(Event {
        log_mono_time: raw.log_mono_time,
        payload,
    })
}

/// Lazy, single-pass reader over a zstd-compressed JSON-lines log.
///
/// Malformed lines, including ones that are not UTF-8, are skipped; a
/// failure of the compressed stream itself is yielded once as
/// `LoadError::Read` and ends the iteration.
pub struct LogReader {
    path: PathBuf,
    lines: Split<BufReader<LogDecoder>>,
    line_number: usize,
    skipped_lines: usize,
    finished: bool,
}

impl LogReader {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let open_error = |source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_error)?;
        let decoder = zstd::stream::read::Decoder::new(file).map_err(open_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(decoder).split(b'\n'),
            line_number: 0,
            skipped_lines: 0,
            finished: false,
        })
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

impl Iterator for LogReader {
    type Item = Result<Event, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                None => {
                    self.finished = true;
                    if self.skipped_lines > 0 {
                        warn!(
                            path = %self.path.display(),
                            skipped = self.skipped_lines,
                            "skipped malformed log lines"
                        );
                    }
                    return None;
                }
                Some(Err(source)) => {
                    self.finished = true;
                    return Some(Err(LoadError::Read {
                        path: self.path.clone(),
                        source,
                    }));
                }
                Some(Ok(line)) => {
                    self.line_number += 1;
                    if line.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    match parse_event_bytes(&line) {
                        Ok(event) => return Some(Ok(event)),
                        Err(reason) => {
                            self.skipped_lines += 1;
                            debug!(line = self.line_number, %reason, "skipping malformed log line");
                        }
                    }
                }
            }
        }
    }
}

fn event_to_json(event: &Event) -> serde_json::Result<Value> {
    let payload = match &event.payload {
        EventPayload::CarState(car_state) => serde_json::to_value(car_state)?,
        EventPayload::Other(_) => Value::Object(Map::new()),
    };

    let mut object = Map::new();
    object.insert(LOG_MONO_TIME_KEY.to_string(), Value::from(event.log_mono_time));
    object.insert(event.which().to_string(), payload);
    Ok(Value::Object(object))
}

/// Writes events in the format `LogReader` decodes. Non-vehicle-state
/// events are written with an empty payload.
pub fn write_log(path: &Path, events: &[Event]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut encoder = zstd::stream::write::Encoder::new(BufWriter::new(file), 0)?;
    for event in events {
        serde_json::to_writer(&mut encoder, &event_to_json(event)?)?;
        encoder.write_all(b"\n")?;
    }
    let mut writer = encoder.finish()?;
    writer.flush()
}


// src/data_input/log_reader.rs
