use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use salary_cli::batch::{BatchSummary, run_batch};
use salary_cli::profile::{ProfileInput, read_profile_json, trace_profile};
use salary_core::{FileModelLoader, PredictorConfig, SalaryPredictor};
use salary_model::{ColumnSchema, RawProfile};
use salary_standards::{FormCatalog, load_schema_or_default, resolve_schema_path};
use salary_transform::FeatureEncoder;

use crate::cli::{BatchArgs, EncodeArgs, ModelArgs, PredictArgs, ProfileArgs, SchemaArgs};
use crate::summary::{print_encoded, print_options, print_schema};

pub fn run_predict(args: &PredictArgs) -> Result<f64> {
    let span = info_span!("predict");
    let _guard = span.enter();
    let predictor = build_predictor(&args.model)?;
    let profile = build_profile(&args.profile)?;
    let salary = predictor.predict(&profile)?;
    info!(salary, "prediction complete");
    Ok(salary)
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let schema = load_schema_or_default(args.schema.as_deref()).context("load column schema")?;
    let encoder = FeatureEncoder::new(schema);
    let profile = build_profile(&args.profile)?;
    let row = encoder.encode(&profile);
    if args.json {
        let json = if args.all {
            serde_json::to_string_pretty(&row)
        } else {
            let non_zero: serde_json::Map<String, serde_json::Value> = row
                .non_zero()
                .map(|(column, value)| (column.to_string(), serde_json::Value::from(value)))
                .collect();
            serde_json::to_string_pretty(&non_zero)
        }
        .context("serialize encoded row")?;
        println!("{json}");
    } else {
        print_encoded(&row, args.all);
    }
    Ok(())
}

pub fn run_batch_command(args: &BatchArgs) -> Result<BatchSummary> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();
    let predictor = build_predictor(&args.model)?;
    let input = File::open(&args.input)
        .with_context(|| format!("open batch input: {}", args.input.display()))?;
    let input = BufReader::new(input);
    match &args.output {
        Some(path) => {
            let output = File::create(path)
                .with_context(|| format!("create batch output: {}", path.display()))?;
            run_batch(&predictor, input, BufWriter::new(output))
        }
        None => run_batch(&predictor, input, io::stdout().lock()),
    }
}

pub fn run_options() -> Result<()> {
    print_options(FormCatalog);
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = load_schema_or_default(args.schema.as_deref()).context("load column schema")?;
    let origin = match resolve_schema_path(args.schema.as_deref()) {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    print_schema(&schema, &origin);
    Ok(())
}

fn build_predictor(args: &ModelArgs) -> Result<SalaryPredictor> {
    let schema: ColumnSchema =
        load_schema_or_default(args.schema.as_deref()).context("load column schema")?;
    let config = PredictorConfig::resolve(args.model.as_deref());
    info!(
        model = %config.model_path.display(),
        source = %config.model_source,
        columns = schema.len(),
        "predictor configured"
    );
    let mut loader = FileModelLoader::from_config(&config);
    if let Some(digest) = &args.model_sha256 {
        loader = loader.with_expected_sha256(digest.trim());
    }
    Ok(SalaryPredictor::new(schema, loader))
}

fn build_profile(args: &ProfileArgs) -> Result<RawProfile> {
    let profile = match &args.profile {
        Some(path) => read_profile_json(path)?,
        None => ProfileInput {
            years: args.years,
            country: &args.country,
            education: &args.education,
            employment: if args.no_employment {
                &[]
            } else {
                args.employment.as_slice()
            },
            remote: &args.remote,
            org_size: &args.org_size,
        }
        .into_profile(),
    };
    trace_profile(&profile);
    Ok(profile)
}
