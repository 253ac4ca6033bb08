use crate::catalog::Catalog;
use crate::dataset::Dataset;
use crate::entity::{EntityConfig, EntityFieldConfig};
use crate::filters::FiltersByColumn;
use crate::query::{
    AggregationNaming, DataSource, DuckDbNaming, QueryColumn, QueryColumnSource, StructuredQuery,
};

use super::error::ResolveError;
use super::types::{ResolvedColumn, ResolvedQuery, ResolvedSort};

/// The table a query reads, with the metadata needed to name its columns
enum SourceTable<'a> {
    Dataset(&'a Dataset),
    Entity {
        config: &'a EntityConfig,
        dataset: &'a Dataset,
    },
}

impl<'a> SourceTable<'a> {
    fn lookup(catalog: &'a Catalog, source: &DataSource) -> Result<Self, ResolveError> {
        match source {
            DataSource::Dataset { dataset_id } => {
                Ok(SourceTable::Dataset(catalog.require_dataset(dataset_id)?))
            }
            DataSource::Entity { entity_config_id } => {
                let config = catalog.require_entity_config(entity_config_id)?;
                let dataset_id = config
                    .dataset_id
                    .as_deref()
                    .ok_or_else(|| ResolveError::EntityWithoutDataset(config.id.clone()))?;
                let dataset = catalog.require_dataset(dataset_id)?;
                Ok(SourceTable::Entity { config, dataset })
            }
        }
    }

    fn dataset(&self) -> &'a Dataset {
        match self {
            SourceTable::Dataset(dataset) => *dataset,
            SourceTable::Entity { dataset, .. } => *dataset,
        }
    }

    fn not_in_source(&self, column: &str) -> ResolveError {
        ResolveError::ColumnNotInSource {
            column: column.to_string(),
            source_table: self.dataset().table_name().to_string(),
        }
    }

    /// Engine column name backing a query column
    fn physical_name(&self, catalog: &Catalog, column: &QueryColumnSource) -> Result<String, ResolveError> {
        match (self, column) {
            (SourceTable::Dataset(dataset), QueryColumnSource::DatasetColumn(col)) => {
                if col.dataset_id != dataset.id {
                    return Err(self.not_in_source(&col.name));
                }
                // Re-read the name from the catalog in case the column was renamed
                let current = catalog.require_column(&dataset.id, &col.id)?;
                Ok(current.name.clone())
            }
            (SourceTable::Entity { config, .. }, QueryColumnSource::EntityField(field)) => {
                if field.entity_config_id != config.id {
                    return Err(self.not_in_source(&field.name));
                }
                self.entity_field_column(catalog, field)
            }
            _ => Err(self.not_in_source(column.name())),
        }
    }

    fn entity_field_column(&self, catalog: &Catalog, field: &EntityFieldConfig) -> Result<String, ResolveError> {
        let dataset = self.dataset();
        let Some((dataset_id, column_id)) = field.value_extractor.source_column() else {
            return Err(ResolveError::UnresolvableEntityField {
                field: field.name.clone(),
                reason: "manually entered values are not stored in a dataset".to_string(),
            });
        };
        if dataset_id != dataset.id {
            return Err(ResolveError::UnresolvableEntityField {
                field: field.name.clone(),
                reason: format!("reads dataset '{}', not the entity's dataset '{}'", dataset_id, dataset.id),
            });
        }
        Ok(catalog.require_column(dataset_id, column_id)?.name.clone())
    }

    /// Engine column name for a user-facing column name used in a filter
    fn filter_column(&self, catalog: &Catalog, name: &str) -> Result<String, ResolveError> {
        match self {
            SourceTable::Dataset(dataset) => dataset
                .get_column_by_name(name)
                .map(|c| c.name.clone())
                .ok_or_else(|| ResolveError::UnknownFilterColumn(name.to_string())),
            SourceTable::Entity { config, .. } => {
                let field = config
                    .get_field_by_name(name)
                    .ok_or_else(|| ResolveError::UnknownFilterColumn(name.to_string()))?;
                self.entity_field_column(catalog, field)
            }
        }
    }
}

/// Resolve a structured query against a catalog using the embedded engine's naming
pub fn resolve_query<'a>(
    catalog: &'a Catalog,
    query: &'a StructuredQuery,
) -> Result<ResolvedQuery<'a>, ResolveError> {
    resolve_query_with(catalog, query, &DuckDbNaming)
}

/// Resolve a structured query with an explicit aggregate naming convention
pub fn resolve_query_with<'a>(
    catalog: &'a Catalog,
    query: &'a StructuredQuery,
    naming: &dyn AggregationNaming,
) -> Result<ResolvedQuery<'a>, ResolveError> {
    query.validate()?;

    let data_source = query.data_source.as_ref().ok_or(ResolveError::MissingDataSource)?;
    if query.query_columns.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }
    let source = SourceTable::lookup(catalog, data_source)?;

    // 1. Map every query column to its engine column
    let columns = query
        .query_columns
        .iter()
        .map(|column| -> Result<ResolvedColumn<'a>, ResolveError> {
            let aggregation = query.aggregation_for(column);
            let effective = QueryColumn { aggregation, ..column.clone() };
            Ok(ResolvedColumn {
                id: &column.id,
                physical_name: source.physical_name(catalog, &column.base_column)?,
                output_name: effective.derived_column_name(naming),
                aggregation,
                data_type: column.base_column.data_type(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // 2. Rename filter columns to engine columns, skipping empty records
    let mut filters = FiltersByColumn::new();
    if let Some(query_filters) = &query.filters {
        for (name, record) in query_filters.to_by_column().iter() {
            if record.is_empty() {
                continue;
            }
            let physical = source.filter_column(catalog, name)?;
            for (operator, value) in record.iter() {
                filters = filters.with(physical.clone(), operator, value.clone());
            }
        }
    }

    // 3. Ordering refers to the result column
    let order_by = query.order_by_column.as_ref().and_then(|id| {
        columns.iter().find(|c| c.id == id).map(|c| ResolvedSort {
            output_name: c.output_name.clone(),
            direction: query.order_by_direction,
        })
    });

    tracing::debug!(
        query_id = %query.id,
        table = source.dataset().table_name(),
        columns = columns.len(),
        "resolved structured query"
    );

    Ok(ResolvedQuery {
        query,
        table: source.dataset().table_name(),
        columns,
        filters,
        order_by,
        limit: query.limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::dataset::{DataType, DatasetColumn, DatasetSourceType};
    use crate::entity::{ValueExtractor, ValuePickerRule};
    use crate::filters::FilterOperator;
    use crate::query::{OrderDirection, QueryAggregationType};
    use serde_json::json;

    fn dataset_column(id: &str, name: &str, data_type: DataType) -> DatasetColumn {
        DatasetColumn {
            id: id.into(),
            dataset_id: "ds_sales".into(),
            name: name.into(),
            data_type,
            column_idx: 0,
            description: None,
        }
    }

    fn entity_field(id: &str, name: &str, extractor: ValueExtractor) -> EntityFieldConfig {
        EntityFieldConfig {
            id: id.into(),
            entity_config_id: "ent_store".into(),
            name: name.into(),
            description: None,
            data_type: DataType::Varchar,
            value_extractor: extractor,
            is_id_field: false,
            is_title_field: false,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            datasets: vec![Dataset {
                id: "ds_sales".into(),
                workspace_id: "ws_1".into(),
                name: "Sales".into(),
                description: None,
                source_type: DatasetSourceType::CsvFile,
                columns: vec![
                    dataset_column("col_region", "region", DataType::Varchar),
                    dataset_column("col_amount", "amount", DataType::Double),
                ],
            }],
            entity_configs: vec![EntityConfig {
                id: "ent_store".into(),
                workspace_id: "ws_1".into(),
                name: "Store".into(),
                description: None,
                dataset_id: Some("ds_sales".into()),
                fields: vec![
                    entity_field(
                        "fld_region",
                        "Region",
                        ValueExtractor::DatasetColumnValue {
                            dataset_id: "ds_sales".into(),
                            column_id: "col_region".into(),
                            value_picker_rule: ValuePickerRule::MostFrequent,
                        },
                    ),
                    entity_field("fld_notes", "Notes", ValueExtractor::Manual),
                ],
            }],
        }
    }

    fn region() -> QueryColumn {
        QueryColumn::from_dataset_column(dataset_column("col_region", "region", DataType::Varchar))
    }

    fn amount() -> QueryColumn {
        QueryColumn::from_dataset_column(dataset_column("col_amount", "amount", DataType::Double))
    }

    #[test]
    fn test_resolve_dataset_query() {
        let catalog = catalog();
        let amount = amount().with_aggregation(QueryAggregationType::Sum);
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_sales".into() })
            .with_column(region().with_aggregation(QueryAggregationType::GroupBy))
            .with_column(amount.clone())
            .with_order_by(&amount.id, OrderDirection::Desc)
            .with_filters(FiltersByColumn::new().with("region", FilterOperator::In, json!(["north", "south"])));

        let resolved = resolve_query(&catalog, &query).unwrap();

        assert_eq!(resolved.table, "ds_sales");
        assert_eq!(resolved.columns.len(), 2);
        assert_eq!(resolved.columns[1].physical_name, "amount");
        assert_eq!(resolved.columns[1].output_name, "sum(amount)");
        assert!(resolved.is_aggregated());
        assert_eq!(
            resolved.order_by,
            Some(ResolvedSort { output_name: "sum(amount)".into(), direction: OrderDirection::Desc })
        );
        assert!(resolved.filters.get("region").is_some());
    }

    #[test]
    fn test_resolve_entity_query() {
        let catalog = catalog();
        let field = catalog.entity_configs[0].fields[0].clone();
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Entity { entity_config_id: "ent_store".into() })
            .with_column(QueryColumn::from_entity_field(field))
            .with_filters(FiltersByColumn::new().with("Region", FilterOperator::Eq, json!("north")));

        let resolved = resolve_query(&catalog, &query).unwrap();

        assert_eq!(resolved.table, "ds_sales");
        assert_eq!(resolved.columns[0].physical_name, "region");
        assert_eq!(resolved.columns[0].output_name, "Region");
        assert!(resolved.filters.get("region").is_some());
    }

    #[test]
    fn test_manual_entity_field_is_unresolvable() {
        let catalog = catalog();
        let field = catalog.entity_configs[0].fields[1].clone();
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Entity { entity_config_id: "ent_store".into() })
            .with_column(QueryColumn::from_entity_field(field));

        let err = resolve_query(&catalog, &query).unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvableEntityField { .. }));
    }

    #[test]
    fn test_missing_dataset() {
        let catalog = catalog();
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_missing".into() })
            .with_column(region());

        let err = resolve_query(&catalog, &query).unwrap_err();
        assert!(matches!(err, ResolveError::Catalog(CatalogError::DatasetNotFound(_))));
    }

    #[test]
    fn test_entity_column_on_dataset_source() {
        let catalog = catalog();
        let field = catalog.entity_configs[0].fields[0].clone();
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_sales".into() })
            .with_column(QueryColumn::from_entity_field(field));

        let err = resolve_query(&catalog, &query).unwrap_err();
        assert!(matches!(err, ResolveError::ColumnNotInSource { .. }));
    }

    #[test]
    fn test_empty_and_sourceless_queries() {
        let catalog = catalog();
        let no_source = StructuredQuery::empty().with_column(region());
        assert!(matches!(resolve_query(&catalog, &no_source), Err(ResolveError::MissingDataSource)));

        let no_columns = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_sales".into() });
        assert!(matches!(resolve_query(&catalog, &no_columns), Err(ResolveError::EmptyQuery)));
    }

    #[test]
    fn test_unknown_filter_column() {
        let catalog = catalog();
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_sales".into() })
            .with_column(region())
            .with_filters(FiltersByColumn::new().with("country", FilterOperator::Eq, json!("PE")));

        let err = resolve_query(&catalog, &query).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownFilterColumn(name) if name == "country"));
    }
}
