// tests/batch_integration_test.rs

use std::cell::RefCell;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use steering_vibration_analysis::batch::run_batch;
use steering_vibration_analysis::config::{AnalysisConfig, PlotFailurePolicy};
use steering_vibration_analysis::data_input::log_data::{CarState, CruiseState, Event, Sample};
use steering_vibration_analysis::data_input::log_reader::write_log;
use steering_vibration_analysis::plot_functions::PlotRenderer;

/// Records what would have been plotted instead of rasterizing.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(String, usize, usize, PathBuf)>>,
    fail_for: Option<String>,
}

impl PlotRenderer for RecordingRenderer {
    fn render(
        &self,
        samples: &[Sample],
        in_band: &[Sample],
        output_dir: &Path,
        drive_name: &str,
    ) -> Result<(), Box<dyn Error>> {
        if self.fail_for.as_deref() == Some(drive_name) {
            return Err(format!("disk full while plotting {drive_name}").into());
        }
        fs::create_dir_all(output_dir)?;
        self.calls.borrow_mut().push((
            drive_name.to_string(),
            samples.len(),
            in_band.len(),
            output_dir.to_path_buf(),
        ));
        Ok(())
    }
}

impl RecordingRenderer {
    fn failing_for(drive_name: &str) -> Self {
        Self {
            fail_for: Some(drive_name.to_string()),
            ..Self::default()
        }
    }

    fn drive_names(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.0.clone()).collect()
    }
}

struct Fixture {
    _dir: TempDir,
    config: AnalysisConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log_root = dir.path().join("realdata");
        fs::create_dir_all(&log_root).unwrap();
        let config = AnalysisConfig {
            log_root,
            output_root: dir.path().join("steering_analysis"),
            ..AnalysisConfig::default()
        };
        Self { _dir: dir, config }
    }

    /// Writes a drive whose carState events are 10 ms apart at the given speeds (km/h).
    fn add_drive(&self, name: &str, speeds_kph: &[f64]) {
        let mut events = vec![Event::other(0, "initData")];
        for (i, &speed_kph) in speeds_kph.iter().enumerate() {
            let log_mono_time = 1_000_000_000 + i as u64 * 10_000_000;
            events.push(Event::car_state(
                log_mono_time,
                CarState {
                    v_ego: speed_kph / 3.6,
                    steering_torque: 0.1 * i as f64,
                    steering_angle_deg: -2.0,
                    cruise_state: CruiseState { enabled: false },
                },
            ));
            events.push(Event::other(log_mono_time + 1, "controlsState"));
        }
        self.add_drive_events(name, &events);
    }

    fn add_drive_events(&self, name: &str, events: &[Event]) {
        let drive_dir = self.config.log_root.join(name);
        fs::create_dir_all(&drive_dir).unwrap();
        write_log(&drive_dir.join("rlog.zst"), events).unwrap();
    }

    fn add_empty_drive_dir(&self, name: &str) {
        fs::create_dir_all(self.config.log_root.join(name)).unwrap();
    }

    fn summary(&self) -> Value {
        let text = fs::read_to_string(self.config.summary_path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

#[test]
fn test_only_drives_with_in_band_samples_are_summarized() {
    let fixture = Fixture::new();
    fixture.add_drive("2024-01-01", &[30.0, 45.0, 50.0]);
    fixture.add_drive("2024-01-02", &[9.5, 11.0, 17.9]);

    let renderer = RecordingRenderer::default();
    let report = run_batch(&fixture.config, &renderer).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].drive, "2024-01-02");

    let summary = fixture.summary();
    let entries = summary.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["drive"], "2024-01-02");
    let avg_speed = entries[0]["analysis"]["avg_speed"].as_f64().unwrap();
    assert!((avg_speed - 12.8).abs() < 1e-9, "avg_speed was {avg_speed}");
    assert_eq!(entries[0]["analysis"]["drive_time"].as_f64().unwrap(), 0.03);

    // Only the analyzed drive is plotted, into a directory named after it.
    assert_eq!(renderer.drive_names(), vec!["2024-01-02"]);
    let calls = renderer.calls.borrow();
    assert_eq!(calls[0].1, 3);
    assert_eq!(calls[0].2, 3);
    assert_eq!(calls[0].3, fixture.config.output_root.join("2024-01-02"));
}

#[test]
fn test_drives_without_logs_or_samples_are_skipped() {
    let fixture = Fixture::new();
    fixture.add_empty_drive_dir("2024-03-01");
    fixture.add_drive_events(
        "2024-03-02",
        &[Event::other(1, "initData"), Event::other(2, "controlsState")],
    );
    let corrupt_dir = fixture.config.log_root.join("2024-03-03");
    fs::create_dir_all(&corrupt_dir).unwrap();
    fs::write(corrupt_dir.join("rlog.zst"), b"not compressed").unwrap();
    fixture.add_drive("2024-03-04", &[12.0, 13.0]);

    let renderer = RecordingRenderer::default();
    let report = run_batch(&fixture.config, &renderer).unwrap();

    assert_eq!(renderer.drive_names(), vec!["2024-03-04"]);
    assert_eq!(report.records.len(), 1);
    assert!(!fixture.config.output_root.join("2024-03-02").exists());
    assert!(!fixture.config.output_root.join("2024-03-03").exists());
}

#[test]
fn test_boot_is_excluded_and_only_five_recent_drives_run() {
    let fixture = Fixture::new();
    for day in 1..=7 {
        fixture.add_drive(&format!("2024-02-0{day}"), &[10.0]);
    }
    fixture.add_drive("boot", &[10.0]);

    let renderer = RecordingRenderer::default();
    let report = run_batch(&fixture.config, &renderer).unwrap();

    let drives: Vec<&str> = report.records.iter().map(|r| r.drive.as_str()).collect();
    assert_eq!(
        drives,
        vec!["2024-02-07", "2024-02-06", "2024-02-05", "2024-02-04", "2024-02-03"]
    );
    assert!(fixture.summary()[0]["analysis"]["torque_std"].is_null());
}

#[test]
fn test_summary_is_byte_identical_across_runs() {
    let fixture = Fixture::new();
    fixture.add_drive("2024-04-01", &[8.0, 9.0, 12.0, 15.5, 18.0, 21.0]);
    fixture.add_drive("2024-04-02", &[10.0, 10.5, 11.0]);

    run_batch(&fixture.config, &RecordingRenderer::default()).unwrap();
    let first = fs::read(fixture.config.summary_path()).unwrap();
    run_batch(&fixture.config, &RecordingRenderer::default()).unwrap();
    let second = fs::read(fixture.config.summary_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_batch_still_writes_summary() {
    let fixture = Fixture::new();

    let report = run_batch(&fixture.config, &RecordingRenderer::default()).unwrap();

    assert!(report.records.is_empty());
    assert_eq!(fixture.summary(), Value::Array(Vec::new()));
}

#[test]
fn test_plot_failure_aborts_batch_by_default() {
    let fixture = Fixture::new();
    fixture.add_drive("2024-05-01", &[10.0, 11.0]);
    fixture.add_drive("2024-05-02", &[10.0, 11.0]);

    let renderer = RecordingRenderer::failing_for("2024-05-02");
    let result = run_batch(&fixture.config, &renderer);

    assert!(result.is_err());
    assert!(renderer.drive_names().is_empty());
    assert!(!fixture.config.summary_path().exists());
}

#[test]
fn test_plot_failure_can_skip_only_that_drive() {
    let mut fixture = Fixture::new();
    fixture.config.plot_failure_policy = PlotFailurePolicy::SkipDrive;
    fixture.add_drive("2024-05-01", &[10.0, 11.0]);
    fixture.add_drive("2024-05-02", &[10.0, 11.0]);

    let renderer = RecordingRenderer::failing_for("2024-05-02");
    let report = run_batch(&fixture.config, &renderer).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].drive, "2024-05-01");
    assert_eq!(fixture.summary().as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_log_root_is_fatal() {
    let fixture = Fixture::new();
    let config = AnalysisConfig {
        log_root: fixture.config.log_root.join("does-not-exist"),
        ..fixture.config.clone()
    };

    assert!(run_batch(&config, &RecordingRenderer::default()).is_err());
}
