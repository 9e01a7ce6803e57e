//! Integration tests for CSV batch prediction and profile input.

use std::fs;
use std::sync::{Arc, Mutex};

use csv::StringRecord;
use salary_cli::batch::{ERROR_COLUMN, PREDICTION_COLUMN, profile_from_record, run_batch};
use salary_cli::profile::{ProfileInput, parse_years_arg, read_profile_json};
use salary_core::{FileModelLoader, ModelError, PredictError, Regressor, SalaryPredictor};
use salary_model::{Experience, ProfileField, RawProfile};
use salary_standards::default_schema;
use salary_transform::encode;

struct StubModel {
    output: f64,
    calls: Mutex<usize>,
}

impl StubModel {
    fn new(output: f64) -> Self {
        Self {
            output,
            calls: Mutex::new(0),
        }
    }
}

impl Regressor for StubModel {
    fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        *self.calls.lock().unwrap() += 1;
        Ok(vec![self.output; rows.len()])
    }
}

struct FailingModel;

impl Regressor for FailingModel {
    fn predict(&self, _rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::EmptyForest)
    }
}

fn predictor(model: Arc<dyn Regressor>) -> SalaryPredictor {
    SalaryPredictor::with_model(default_schema().unwrap(), model)
}

fn run(predictor: &SalaryPredictor, input: &str) -> (String, salary_cli::batch::BatchSummary) {
    let mut output = Vec::new();
    let summary = run_batch(predictor, input.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), summary)
}

#[test]
fn appends_prediction_columns() {
    let predictor = predictor(Arc::new(StubModel::new(1234.5)));
    let (output, summary) = run(&predictor, "YearsCodePro,Country,Note\n5,India,a\n");

    insta::assert_snapshot!(output, @r"
    YearsCodePro,Country,Note,PredictedSalary,Error
    5,India,a,1234.50,
    ");
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.predicted, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn predicts_every_row_with_one_model() {
    let model = Arc::new(StubModel::new(50_000.0));
    let predictor = predictor(model.clone());
    let input = "\
YearsCodePro,Country,EdLevel,Employment,RemoteWork,OrgSize
5,India,Master's degree,\"Employed, full-time\",Remote,2 to 9 employees
12,Germany,Other,\"Retired;Employed, full-time\",In-person,I don't know
";
    let (output, summary) = run(&predictor, input);

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.predicted, 2);
    assert_eq!(*model.calls.lock().unwrap(), 2);

    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let salary_idx = headers.iter().position(|h| h == PREDICTION_COLUMN).unwrap();
    let error_idx = headers.iter().position(|h| h == ERROR_COLUMN).unwrap();
    for record in reader.records() {
        let record = record.unwrap();
        assert_eq!(&record[salary_idx], "50000.00");
        assert_eq!(&record[error_idx], "");
    }
}

#[test]
fn records_row_failures_and_continues() {
    let predictor = predictor(Arc::new(FailingModel));
    let (output, summary) = run(&predictor, "Country\nIndia\nGermany\n");

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.predicted, 0);
    assert_eq!(summary.failed, 2);

    let mut reader = csv::Reader::from_reader(output.as_bytes());
    for record in reader.records() {
        let record = record.unwrap();
        assert_eq!(&record[1], "");
        assert!(record[2].starts_with("prediction failed"));
    }
}

#[test]
fn missing_model_aborts_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FileModelLoader::new(dir.path().join("absent.json"));
    let predictor = SalaryPredictor::new(default_schema().unwrap(), loader);

    let mut output = Vec::new();
    let error = run_batch(&predictor, "Country\nIndia\n".as_bytes(), &mut output).unwrap_err();
    let predict_error = error.downcast_ref::<PredictError>().unwrap();
    assert!(predict_error.is_model_unavailable());
}

#[test]
fn record_employment_is_canonicalized() {
    let headers = StringRecord::from(vec!["employment", "COUNTRY", "Other"]);
    let record = StringRecord::from(vec![
        "Retired ; Employed, full-time;Retired",
        "India",
        "ignored",
    ]);
    let columns = vec![(0, ProfileField::Employment), (1, ProfileField::Country)];
    assert_eq!(ProfileField::from_name(&headers[0]), Some(ProfileField::Employment));
    assert_eq!(ProfileField::from_name(&headers[1]), Some(ProfileField::Country));
    assert_eq!(ProfileField::from_name(&headers[2]), None);

    let profile = profile_from_record(&record, &columns);
    assert_eq!(
        profile.employment.as_deref(),
        Some("Employed, full-time;Retired")
    );
    assert_eq!(profile.country.as_deref(), Some("India"));
}

#[test]
fn blank_cells_stay_unset() {
    let record = StringRecord::from(vec!["", "  "]);
    let columns = vec![(0, ProfileField::YearsCodePro), (1, ProfileField::OrgSize)];
    let profile = profile_from_record(&record, &columns);
    assert_eq!(profile, RawProfile::new());
}

#[test]
fn command_line_selections_are_canonicalized() {
    let employment = vec![
        "Student, part-time".to_string(),
        "Employed, full-time".to_string(),
    ];
    let profile = ProfileInput {
        years: 7.0,
        country: "India",
        education: "Other",
        employment: &employment,
        remote: "Remote",
        org_size: "I don't know",
    }
    .into_profile();

    assert_eq!(profile.years_code_pro, Some(Experience::Number(7.0)));
    assert_eq!(
        profile.employment.as_deref(),
        Some("Employed, full-time;Student, part-time")
    );
    assert_eq!(profile.org_size.as_deref(), Some("I don't know"));
}

#[test]
fn years_flag_accepts_the_form_range() {
    assert_eq!(parse_years_arg("0"), Ok(0.0));
    assert_eq!(parse_years_arg(" 12.5 "), Ok(12.5));
    assert_eq!(parse_years_arg("50"), Ok(50.0));
}

#[test]
fn years_flag_rejects_values_outside_the_form_range() {
    for value in ["-3", "500", "50.5", "NaN", "inf"] {
        let error = parse_years_arg(value).unwrap_err();
        assert!(error.contains("between 0 and 50"), "{value}: {error}");
    }
    assert!(parse_years_arg("five").unwrap_err().contains("not a number"));
}

#[test]
fn empty_employment_selection_sets_no_indicator() {
    let profile = ProfileInput {
        years: 3.0,
        country: "India",
        ..ProfileInput::default()
    }
    .into_profile();
    assert_eq!(profile.employment.as_deref(), Some(""));

    let schema = default_schema().unwrap();
    let row = encode(&profile, &schema);
    assert!(
        row.non_zero()
            .all(|(column, _)| !ProfileField::Employment.owns_column(column))
    );
}

#[test]
fn profile_json_rejects_out_of_range_years() {
    let dir = tempfile::tempdir().unwrap();
    for years in ["-3", "500", "\"75\""] {
        let path = dir.path().join("profile.json");
        fs::write(&path, format!(r#"{{"YearsCodePro": {years}, "Country": "India"}}"#)).unwrap();
        let error = read_profile_json(&path).unwrap_err();
        assert!(format!("{error:#}").contains("between 0 and 50"), "{years}");
    }
}

#[test]
fn reads_profile_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(
        &path,
        r#"{
            "YearsCodePro": 5,
            "Country": "India",
            "Employment": "Retired;Employed, full-time"
        }"#,
    )
    .unwrap();

    let profile = read_profile_json(&path).unwrap();
    assert_eq!(profile.years_code_pro, Some(Experience::Number(5.0)));
    assert_eq!(profile.country.as_deref(), Some("India"));
    assert_eq!(
        profile.employment.as_deref(),
        Some("Employed, full-time;Retired")
    );
    assert!(profile.ed_level.is_none());
}

#[test]
fn rejects_malformed_profile_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(&path, "{ not json").unwrap();

    let error = read_profile_json(&path).unwrap_err();
    assert!(format!("{error:#}").contains("parse profile"));
}
