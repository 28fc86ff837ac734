use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DatasetRow {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub unit: String,
    pub is_optimistic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeasurementRow {
    pub id: String,
    pub dataset_id: String,
    pub timestamp_ms: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ViewRow {
    pub dataset_id: String,
    pub view_type: String,
    pub position: i64,
}
