//! Command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use avandar::emitter::to_postgrest_query;
use avandar::scaffold::{ScaffoldRequest, Scaffolder};
use avandar::{apply_filters_to_rows, compile_query, parser, Config, Filters, QueryResult};
use serde_json::{Map, Value};

use crate::cli::{CompileArgs, FilterArgs, ScaffoldArgs};

pub fn run_compile(args: &CompileArgs) -> Result<String> {
    let catalog = parser::parse_catalog_file(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;
    let query = parser::parse_structured_query_file(&args.query)
        .with_context(|| format!("loading query {}", args.query.display()))?;
    let sql = compile_query(&catalog, &query).context("compiling query")?;
    Ok(sql)
}

pub fn run_filter(args: &FilterArgs) -> Result<String> {
    let filters = read_filters(&args.filters)?;

    if args.postgrest {
        return Ok(to_postgrest_query(&filters.to_by_column()));
    }

    let raw = read_to_string(&args.rows)?;
    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing rows {}", args.rows.display()))?;

    // Engine results keep their column metadata
    if value.is_object() {
        let result: QueryResult = serde_json::from_value(value)
            .with_context(|| format!("decoding result {}", args.rows.display()))?;
        let filtered = result.filter(&filters);
        tracing::info!(total = result.num_rows, passing = filtered.num_rows, "filtered result");
        return Ok(serde_json::to_string_pretty(&filtered)?);
    }

    let rows: Vec<Map<String, Value>> = serde_json::from_value(value)
        .with_context(|| format!("decoding rows {}", args.rows.display()))?;
    let passing = apply_filters_to_rows(&rows, &filters);
    tracing::info!(total = rows.len(), passing = passing.len(), "filtered rows");
    Ok(serde_json::to_string_pretty(&*passing)?)
}

pub fn run_scaffold(args: &ScaffoldArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let mut templates = config.templates.clone();
    if let Some(root) = &args.templates {
        templates.root = root.clone();
    }

    let mut request = ScaffoldRequest::new(&args.kind, &args.name, &args.out);
    for (key, value) in &args.params {
        request = request.with_param(key, value);
    }

    let written = Scaffolder::new(templates)
        .generate(&request)
        .with_context(|| format!("scaffolding {} '{}'", args.kind, args.name))?;
    Ok(written)
}

/// Tagged `{"kind", "filters"}` documents first, then either bare shape
fn read_filters(path: &Path) -> Result<Filters> {
    let raw = read_to_string(path)?;
    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing filters {}", path.display()))?;
    if let Ok(filters) = serde_json::from_value::<Filters>(value.clone()) {
        return Ok(filters);
    }
    Filters::from_untagged(&value).with_context(|| format!("decoding filters {}", path.display()))
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
