pub mod dataset_id;
pub mod measurement_id;
pub mod slug;
pub mod unit;
pub mod view_type;

pub use dataset_id::DatasetId;
pub use measurement_id::MeasurementId;
pub use slug::Slug;
pub use unit::Unit;
pub use view_type::ViewType;
