use crate::domain::entities::{Dataset, Measurement};
use crate::domain::value_objects::{DatasetId, MeasurementId, Slug, Unit, ViewType};
use crate::infrastructure::cache::rows::{DatasetRow, MeasurementRow, ViewRow};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};

pub fn dataset_from_rows(
    dataset: DatasetRow,
    measurements: Vec<MeasurementRow>,
    views: Vec<ViewRow>,
) -> Result<Dataset, AppError> {
    let id = DatasetId::new(dataset.id).map_err(AppError::ValidationError)?;
    let slug = Slug::new(dataset.slug).map_err(AppError::ValidationError)?;
    let unit = Unit::parse(&dataset.unit).map_err(AppError::DeserializationError)?;
    let mut views = views;
    views.sort_by_key(|row| row.position);
    let views = views
        .into_iter()
        .map(|row| ViewType::parse(&row.view_type).map_err(AppError::DeserializationError))
        .collect::<Result<Vec<_>, _>>()?;
    let measurements = measurements
        .into_iter()
        .map(measurement_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::assemble(
        id,
        slug,
        dataset.title,
        dataset.description,
        unit,
        views,
        measurements,
        dataset.is_optimistic,
    ))
}

pub fn measurement_from_row(row: MeasurementRow) -> Result<Measurement, AppError> {
    let id = MeasurementId::new(row.id).map_err(AppError::ValidationError)?;
    let timestamp = timestamp_from_millis(row.timestamp_ms)?;
    Ok(Measurement::new(id, timestamp, row.value))
}

pub fn timestamp_from_millis(ms: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::DeserializationError(format!("Timestamp out of range: {ms}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_from_rows_assembles_and_sorts() {
        let dataset_row = DatasetRow {
            id: "steps-abc1234".into(),
            slug: "steps".into(),
            title: "Steps".into(),
            description: None,
            unit: "count".into(),
            is_optimistic: false,
        };
        let measurements = vec![
            MeasurementRow {
                id: "m2".into(),
                dataset_id: "steps-abc1234".into(),
                timestamp_ms: 2_000,
                value: 2.0,
            },
            MeasurementRow {
                id: "m1".into(),
                dataset_id: "steps-abc1234".into(),
                timestamp_ms: 1_000,
                value: 1.0,
            },
        ];
        let views = vec![ViewRow {
            dataset_id: "steps-abc1234".into(),
            view_type: "line".into(),
            position: 0,
        }];

        let dataset = dataset_from_rows(dataset_row, measurements, views).unwrap();
        assert_eq!(dataset.views, vec![ViewType::Line]);
        assert_eq!(dataset.measurements[0].id.as_str(), "m1");
        assert_eq!(dataset.measurements[1].id.as_str(), "m2");
    }

    #[test]
    fn bad_unit_is_a_deserialization_error() {
        let dataset_row = DatasetRow {
            id: "x-1".into(),
            slug: "x".into(),
            title: "X".into(),
            description: None,
            unit: "parsecs".into(),
            is_optimistic: false,
        };
        let err = dataset_from_rows(dataset_row, vec![], vec![]).unwrap_err();
        assert!(matches!(err, AppError::DeserializationError(_)));
    }
}
