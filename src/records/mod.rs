mod category;
mod group;
mod manifest;
mod record;
mod working_set;

pub use category::Category;
pub use group::RecordGroup;
pub use record::{ClassificationRecord, RecordEdit};
pub use working_set::WorkingSet;
