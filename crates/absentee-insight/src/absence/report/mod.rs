mod clusters;
mod features;
mod summary;
pub mod views;

pub use clusters::{cluster_profiles, scatter_points};
pub use features::{category_totals, feature_views, top_features, FeatureCategory};
pub use summary::DashboardSummary;
