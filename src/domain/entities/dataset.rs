use crate::domain::entities::measurement::Measurement;
use crate::domain::value_objects::{DatasetId, Slug, Unit, ViewType};
use serde::{Deserialize, Serialize};

/// A named, unit-tagged collection of measurements with one or more chart
/// view configurations. `is_optimistic` marks a record created locally that
/// the remote has not yet confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub slug: Slug,
    pub title: String,
    pub description: Option<String>,
    pub unit: Unit,
    pub views: Vec<ViewType>,
    pub measurements: Vec<Measurement>,
    pub is_optimistic: bool,
}

impl Dataset {
    /// Builds a new locally created dataset: slug derived from the title,
    /// slug-prefixed id, no measurements yet.
    pub fn create(
        title: &str,
        description: Option<String>,
        unit: Unit,
        views: Vec<ViewType>,
    ) -> Result<Self, String> {
        if title.trim().is_empty() {
            return Err("Dataset title cannot be empty".to_string());
        }
        let views = dedup_views(views);
        if views.is_empty() {
            return Err("Dataset needs at least one view".to_string());
        }
        let slug = Slug::from_title(title)?;
        let id = DatasetId::generate(&slug);
        Ok(Self {
            id,
            slug,
            title: title.to_string(),
            description,
            unit,
            views,
            measurements: Vec::new(),
            is_optimistic: true,
        })
    }

    /// Reassembles a dataset replicated from the remote or read back from
    /// the local cache.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        id: DatasetId,
        slug: Slug,
        title: String,
        description: Option<String>,
        unit: Unit,
        views: Vec<ViewType>,
        measurements: Vec<Measurement>,
        is_optimistic: bool,
    ) -> Self {
        let mut dataset = Self {
            id,
            slug,
            title,
            description,
            unit,
            views: dedup_views(views),
            measurements,
            is_optimistic,
        };
        dataset.sort_measurements();
        dataset
    }

    /// Measurements are kept ascending by timestamp everywhere they surface.
    pub fn sort_measurements(&mut self) {
        self.measurements
            .sort_by_key(|m| (m.timestamp, m.id.as_str().to_string()));
    }
}

fn dedup_views(views: Vec<ViewType>) -> Vec<ViewType> {
    let mut seen = Vec::with_capacity(views.len());
    for view in views {
        if !seen.contains(&view) {
            seen.push(view);
        }
    }
    seen
}
