pub mod store;
pub mod types;

pub use store::{get_store_path, ProjectStore};
pub use types::{
    CostBreakdown, Project, ProjectClass, StoredScores, DEFAULT_SITE_BUILT_TIMELINE_MONTHS,
};
