pub mod dataset;
pub mod measurement;

pub use dataset::Dataset;
pub use measurement::{Measurement, MeasurementDraft};
