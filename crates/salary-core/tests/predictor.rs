//! Integration tests for the prediction handle.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use salary_core::{
    ArtifactError, FileModelLoader, LinearModel, ModelArtifact, ModelError, ModelSpec,
    PredictError, PredictorConfig, Regressor, SalaryPredictor, round_currency,
};
use salary_model::{ColumnSchema, RawProfile};
use salary_standards::default_schema;

/// Returns a fixed value and remembers the rows it was asked about.
struct StubModel {
    output: f64,
    seen: Mutex<Vec<Vec<f64>>>,
}

impl StubModel {
    fn new(output: f64) -> Self {
        Self {
            output,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Regressor for StubModel {
    fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        let mut seen = self.seen.lock().unwrap();
        seen.extend(rows.iter().map(|row| row.to_vec()));
        Ok(vec![self.output; rows.len()])
    }
}

struct FailingModel;

impl Regressor for FailingModel {
    fn predict(&self, _rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::FeatureCount {
            expected: 3,
            actual: 38,
        })
    }
}

fn scenario_profile() -> RawProfile {
    RawProfile::new()
        .with_years(5u32)
        .with_country("India")
        .with_ed_level("Master's degree")
        .with_employment("Employed, full-time")
        .with_remote_work("Remote")
        .with_org_size("2 to 9 employees")
}

fn small_schema() -> ColumnSchema {
    ColumnSchema::new(vec![
        "YearsCodePro".to_string(),
        "Country_India".to_string(),
        "RemoteWork_Remote".to_string(),
    ])
    .expect("schema")
}

#[test]
fn end_to_end_with_stub_model() {
    let schema = default_schema().expect("schema");
    let stub = Arc::new(StubModel::new(100_000.0));
    let predictor = SalaryPredictor::with_model(schema.clone(), stub.clone());

    let salary = predictor.predict(&scenario_profile()).expect("predict");
    assert_eq!(salary, 100_000.0);

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let row = &seen[0];
    assert_eq!(row.len(), schema.len());
    let value = |name: &str| row[schema.position(name).expect(name)];
    assert_eq!(value("YearsCodePro"), 5.0);
    assert_eq!(value("Country_India"), 1.0);
    assert_eq!(value("RemoteWork_Remote"), 1.0);
    assert_eq!(value("Employment_Employed, full-time"), 1.0);
    assert_eq!(value("OrgSize_2 to 9 employees"), 1.0);
    assert_eq!(value("EdLevel_Other"), 0.0);
    assert_eq!(value("EdLevel_Professional"), 0.0);
}

#[test]
fn prediction_is_rounded_to_cents() {
    let predictor =
        SalaryPredictor::with_model(small_schema(), Arc::new(StubModel::new(54_321.4567)));
    assert_eq!(predictor.predict(&RawProfile::new()).expect("predict"), 54_321.46);
    assert_eq!(round_currency(0.004), 0.0);
    assert_eq!(round_currency(-12.345_67), -12.35);
}

#[test]
fn exact_cent_ties_round_to_even() {
    assert_eq!(round_currency(0.125), 0.12);
    assert_eq!(round_currency(0.375), 0.38);
    assert_eq!(round_currency(2.5), 2.5);
}

#[test]
fn output_overflowing_when_rounded_is_prediction_failed() {
    let predictor = SalaryPredictor::with_model(small_schema(), Arc::new(StubModel::new(1e307)));
    let error = predictor.predict(&RawProfile::new()).unwrap_err();
    assert!(matches!(error, PredictError::PredictionFailed(_)));
}

#[test]
fn model_is_loaded_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let predictor = SalaryPredictor::new(
        small_schema(),
        move || -> Result<Arc<dyn Regressor>, ArtifactError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubModel::new(1.0)))
        },
    );
    assert!(!predictor.is_loaded());
    for _ in 0..3 {
        predictor.predict(&RawProfile::new()).expect("predict");
    }
    assert!(predictor.is_loaded());
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_first_requests_share_one_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let predictor = Arc::new(SalaryPredictor::new(
        small_schema(),
        move || -> Result<Arc<dyn Regressor>, ArtifactError> {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Ok(Arc::new(StubModel::new(42.0)))
        },
    ));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            thread::spawn(move || predictor.predict(&RawProfile::new()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().expect("predict"), 42.0);
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_requests_share_one_failed_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let predictor = Arc::new(SalaryPredictor::new(
        small_schema(),
        move || -> Result<Arc<dyn Regressor>, ArtifactError> {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(200));
            Err(ArtifactError::NotFound {
                path: "models/reg_model.json".into(),
            })
        },
    ));
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                predictor.predict(&RawProfile::new())
            })
        })
        .collect();
    let messages: Vec<String> = handles
        .into_iter()
        .map(|handle| {
            let error = handle.join().unwrap().unwrap_err();
            assert!(error.is_model_unavailable());
            error.to_string()
        })
        .collect();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(messages.iter().all(|message| *message == messages[0]));

    // A later request retries.
    assert!(predictor.predict(&RawProfile::new()).is_err());
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_load_is_retried_on_next_request() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let predictor = SalaryPredictor::new(
        small_schema(),
        move || -> Result<Arc<dyn Regressor>, ArtifactError> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ArtifactError::NotFound {
                    path: "models/reg_model.json".into(),
                })
            } else {
                Ok(Arc::new(StubModel::new(7.0)))
            }
        },
    );
    let error = predictor.predict(&RawProfile::new()).unwrap_err();
    assert!(error.is_model_unavailable());
    assert!(!predictor.is_loaded());
    assert_eq!(predictor.predict(&RawProfile::new()).expect("retry"), 7.0);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn missing_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = PredictorConfig::with_model_path(dir.path().join("reg_model.json"));
    let predictor = SalaryPredictor::from_config(small_schema(), &config);
    let error = predictor.predict(&RawProfile::new()).unwrap_err();
    match &error {
        PredictError::ModelUnavailable { location, reason } => {
            assert!(location.contains("reg_model.json"));
            assert!(reason.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("MODEL_PATH"));
}

#[test]
fn unparsable_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reg_model.json");
    fs::write(&path, "not json").expect("write artifact");
    let predictor = SalaryPredictor::new(small_schema(), FileModelLoader::new(&path));
    assert!(
        predictor
            .predict(&RawProfile::new())
            .unwrap_err()
            .is_model_unavailable()
    );
}

#[test]
fn model_failure_is_prediction_failed() {
    let predictor = SalaryPredictor::with_model(small_schema(), Arc::new(FailingModel));
    let error = predictor.predict(&RawProfile::new()).unwrap_err();
    assert!(matches!(error, PredictError::PredictionFailed(_)));
    assert!(!error.is_model_unavailable());
}

#[test]
fn non_finite_output_is_prediction_failed() {
    let predictor =
        SalaryPredictor::with_model(small_schema(), Arc::new(StubModel::new(f64::NAN)));
    assert!(matches!(
        predictor.predict(&RawProfile::new()),
        Err(PredictError::PredictionFailed(_))
    ));
}

#[test]
fn linear_artifact_from_disk() {
    let schema = small_schema();
    let artifact = ModelArtifact::new(ModelSpec::Linear(LinearModel {
        intercept: 20_000.0,
        coefficients: vec![3_000.0, -5_000.0, 10_000.0],
    }))
    .with_feature_names(schema.columns().to_vec());
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reg_model.json");
    fs::write(&path, serde_json::to_vec(&artifact).expect("serialize")).expect("write");

    let predictor = SalaryPredictor::new(schema, FileModelLoader::new(&path));
    let profile = RawProfile::new()
        .with_years("4")
        .with_country("India")
        .with_remote_work("Remote");
    assert_eq!(predictor.predict(&profile).expect("predict"), 37_000.0);

    let model = predictor.model().expect("model");
    assert_eq!(model.kind(), "linear");
    assert_eq!(model.fingerprint().map(str::len), Some(64));
}

#[test]
fn feature_name_mismatch_is_prediction_failed() {
    let artifact = ModelArtifact::new(ModelSpec::Linear(LinearModel {
        intercept: 0.0,
        coefficients: vec![1.0, 1.0, 1.0],
    }))
    .with_feature_names(vec![
        "YearsCodePro".to_string(),
        "RemoteWork_Remote".to_string(),
        "Country_India".to_string(),
    ]);
    let predictor = SalaryPredictor::with_model(small_schema(), Arc::new(artifact));
    let error = predictor.predict(&RawProfile::new()).unwrap_err();
    match error {
        PredictError::PredictionFailed(message) => assert!(message.contains("position 1")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn pinned_digest_mismatch_is_model_unavailable() {
    let artifact = ModelArtifact::new(ModelSpec::Linear(LinearModel {
        intercept: 1.0,
        coefficients: vec![0.0, 0.0, 0.0],
    }));
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reg_model.json");
    fs::write(&path, serde_json::to_vec(&artifact).expect("serialize")).expect("write");

    let loader = FileModelLoader::new(&path).with_expected_sha256("00".repeat(32));
    assert!(matches!(
        loader.load_artifact(),
        Err(ArtifactError::Sha256Mismatch { .. })
    ));

    let digest = FileModelLoader::new(&path)
        .load_artifact()
        .expect("load")
        .sha256;
    let pinned = FileModelLoader::new(&path).with_expected_sha256(digest.to_uppercase());
    assert!(pinned.load_artifact().is_ok());
}
