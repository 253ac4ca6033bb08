//! Integration tests for the structured query model
//!
//! Versioned decoding, validation and derived column names.

mod common;

use avandar::parser::parse_structured_query_str;
use avandar::query::{
    get_aggregation_column_name, DuckDbNaming, QueryValidationError, STRUCTURED_QUERY_VERSION,
};
use avandar::{
    DataSource, Filters, OrderDirection, ParseError, QueryAggregationType, QueryColumnId, StructuredQuery,
};
use common::{dataset_query_column, entity_query_column, load_catalog, load_query};

#[test]
fn test_fixture_decodes() {
    let query = load_query("sales_by_region.json");

    assert_eq!(query.version, STRUCTURED_QUERY_VERSION);
    assert_eq!(
        query.data_source,
        Some(DataSource::Dataset { dataset_id: "ds_sales".into() })
    );
    assert_eq!(query.query_columns.len(), 2);
    assert_eq!(query.order_by_column, Some(QueryColumnId::new("dataset_column:col_amount")));
    assert_eq!(query.order_by_direction, OrderDirection::Desc);
    assert!(matches!(query.filters, Some(Filters::ByOperator(_))));
    assert_eq!(query.limit, Some(10));
    assert!(query.validate().is_ok());
}

#[test]
fn test_encoded_query_decodes_to_itself() {
    let catalog = load_catalog("catalog.yaml");
    let region = dataset_query_column(&catalog, "ds_sales", "col_region");
    let query = StructuredQuery::empty()
        .with_data_source(DataSource::Dataset { dataset_id: "ds_sales".into() })
        .with_column(region.clone())
        .with_aggregation(&region.id, QueryAggregationType::GroupBy)
        .with_order_by(&region.id, OrderDirection::Asc);

    let json = serde_json::to_string(&query).unwrap();
    let decoded = parse_structured_query_str(&json).unwrap();
    assert_eq!(decoded, query);
}

#[test]
fn test_newer_version_rejected() {
    let mut value = serde_json::to_value(StructuredQuery::empty()).unwrap();
    value["version"] = serde_json::json!(STRUCTURED_QUERY_VERSION + 1);

    let err = parse_structured_query_str(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnsupportedVersion { found, supported }
            if found == u64::from(STRUCTURED_QUERY_VERSION + 1) && supported == STRUCTURED_QUERY_VERSION
    ));
}

#[test]
fn test_unknown_aggregation_tag_fails_decode() {
    let json = r#"{"id": "q", "version": 1, "aggregations": {"dataset_column:x": "median"}}"#;
    let err = parse_structured_query_str(json).unwrap_err();
    assert!(err.to_string().contains("median"), "{err}");
}

#[test]
fn test_order_by_must_be_selected() {
    let catalog = load_catalog("catalog.yaml");
    let region = dataset_query_column(&catalog, "ds_sales", "col_region");
    let amount = dataset_query_column(&catalog, "ds_sales", "col_amount");
    let query = StructuredQuery::empty()
        .with_column(region)
        .with_order_by(&amount.id, OrderDirection::Desc);

    assert_eq!(
        query.validate(),
        Err(QueryValidationError::OrderByColumnMissing(amount.id.clone()))
    );
}

#[test]
fn test_derived_column_names() {
    let catalog = load_catalog("catalog.yaml");
    let amount = dataset_query_column(&catalog, "ds_sales", "col_amount");

    assert_eq!(amount.derived_column_name(&DuckDbNaming), "amount");
    for passthrough in [QueryAggregationType::None, QueryAggregationType::GroupBy] {
        let column = amount.clone().with_aggregation(passthrough);
        assert_eq!(column.derived_column_name(&DuckDbNaming), "amount");
    }
    assert_eq!(
        amount.clone().with_aggregation(QueryAggregationType::Avg).derived_column_name(&DuckDbNaming),
        "avg(amount)"
    );

    let revenue = entity_query_column(&catalog, "ent_customer", "fld_revenue")
        .with_aggregation(QueryAggregationType::Max);
    assert_eq!(revenue.derived_column_name(&DuckDbNaming), "max(Revenue)");
}

#[test]
fn test_aggregation_name_from_tag() {
    assert_eq!(get_aggregation_column_name("count", "id", &DuckDbNaming).unwrap(), "count(id)");
    assert_eq!(get_aggregation_column_name("group_by", "id", &DuckDbNaming).unwrap(), "id");

    let err = get_aggregation_column_name("median", "id", &DuckDbNaming).unwrap_err();
    assert_eq!(err.input, "median");
}
