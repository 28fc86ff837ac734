use crate::domain::entities::{Dataset, Measurement, MeasurementDraft};
use crate::domain::value_objects::{DatasetId, MeasurementId, Slug, Unit, ViewType};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire shape of a dataset. The remote never sees the client-only
/// `is_optimistic` flag; anything coming back from the remote is confirmed
/// by definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit: String,
    pub views: Vec<String>,
    pub measurements: Vec<MeasurementDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementDto {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurementDto {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub dataset_slug: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloResponseDto {
    pub greeting: String,
}

impl From<&Dataset> for DatasetDto {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id.as_str().to_string(),
            slug: dataset.slug.as_str().to_string(),
            title: dataset.title.clone(),
            description: dataset.description.clone(),
            unit: dataset.unit.as_str().to_string(),
            views: dataset.views.iter().map(|v| v.as_str().to_string()).collect(),
            measurements: dataset.measurements.iter().map(MeasurementDto::from).collect(),
        }
    }
}

impl From<&Measurement> for MeasurementDto {
    fn from(measurement: &Measurement) -> Self {
        Self {
            id: measurement.id.as_str().to_string(),
            timestamp: measurement.timestamp,
            value: measurement.value,
        }
    }
}

impl From<&MeasurementDraft> for NewMeasurementDto {
    fn from(draft: &MeasurementDraft) -> Self {
        Self {
            value: draft.value,
            timestamp: draft.timestamp,
            dataset_slug: draft.dataset_slug.as_str().to_string(),
        }
    }
}

pub fn dataset_from_dto(dto: DatasetDto) -> Result<Dataset, AppError> {
    let id = DatasetId::new(dto.id).map_err(AppError::ValidationError)?;
    let slug = Slug::new(dto.slug).map_err(AppError::ValidationError)?;
    let unit = Unit::parse(&dto.unit).map_err(AppError::DeserializationError)?;
    let views = dto
        .views
        .iter()
        .map(|v| ViewType::parse(v).map_err(AppError::DeserializationError))
        .collect::<Result<Vec<_>, _>>()?;
    let measurements = dto
        .measurements
        .into_iter()
        .map(measurement_from_dto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::assemble(
        id,
        slug,
        dto.title,
        dto.description,
        unit,
        views,
        measurements,
        false,
    ))
}

pub fn measurement_from_dto(dto: MeasurementDto) -> Result<Measurement, AppError> {
    let id = MeasurementId::new(dto.id).map_err(AppError::ValidationError)?;
    Ok(Measurement::new(id, dto.timestamp, dto.value))
}
