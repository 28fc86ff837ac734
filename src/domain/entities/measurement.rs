use crate::domain::value_objects::{MeasurementId, Slug};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped numeric data point. Owned by exactly one dataset;
/// replaced wholesale with its siblings whenever the owning family syncs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: MeasurementId,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Measurement {
    pub fn new(id: MeasurementId, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            id,
            timestamp,
            value,
        }
    }

    /// Builds a measurement under a temporary client-generated id. The
    /// server assigns the permanent id; the next background sync replaces
    /// this one.
    pub fn optimistic(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self::new(MeasurementId::generate(), timestamp, value)
    }
}

/// Input of an append: the dataset is addressed by slug because that is the
/// key the remote resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDraft {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub dataset_slug: Slug,
}

impl MeasurementDraft {
    pub fn new(value: f64, timestamp: DateTime<Utc>, dataset_slug: Slug) -> Self {
        Self {
            value,
            timestamp,
            dataset_slug,
        }
    }
}
