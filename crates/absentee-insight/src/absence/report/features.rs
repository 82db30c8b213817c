use super::super::domain::FeatureImportance;
use super::views::{CategoryTotal, FeatureImportanceView};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Demographic,
    Experience,
    Organizational,
    Geographic,
    Derived,
}

impl FeatureCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Demographic,
            Self::Experience,
            Self::Organizational,
            Self::Geographic,
            Self::Derived,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Demographic => "Demographic",
            Self::Experience => "Experience",
            Self::Organizational => "Organizational",
            Self::Geographic => "Geographic",
            Self::Derived => "Derived",
        }
    }

    /// Keyword precedence: age, then tenure, then organisation, then location.
    pub fn classify(feature: &str) -> Self {
        let has = |needle: &str| feature.contains(needle);
        if has("Age") {
            Self::Demographic
        } else if has("Service") || has("Length") {
            Self::Experience
        } else if has("Department") || has("Business") || has("Division") {
            Self::Organizational
        } else if has("City") || has("Store") {
            Self::Geographic
        } else {
            Self::Derived
        }
    }
}

pub fn feature_views(features: &[FeatureImportance]) -> Vec<FeatureImportanceView> {
    let total: f64 = features.iter().map(|f| f.importance).sum();

    features
        .iter()
        .map(|feature| {
            let category = FeatureCategory::classify(&feature.feature);
            FeatureImportanceView {
                name: feature.feature.replace('_', " "),
                full_name: feature.feature.clone(),
                importance_pct: feature.importance * 100.0,
                share_of_total_pct: if total > 0.0 {
                    feature.importance / total * 100.0
                } else {
                    0.0
                },
                category,
                category_label: category.label(),
                description: feature.description.clone(),
            }
        })
        .collect()
}

/// Highest-weighted features first; input order breaks ties.
pub fn top_features(features: &[FeatureImportance], limit: usize) -> Vec<FeatureImportanceView> {
    let mut views = feature_views(features);
    views.sort_by(|a, b| b.importance_pct.total_cmp(&a.importance_pct));
    views.truncate(limit);
    views
}

pub fn category_totals(features: &[FeatureImportance]) -> Vec<CategoryTotal> {
    let views = feature_views(features);

    FeatureCategory::ordered()
        .into_iter()
        .map(|category| {
            let members = views.iter().filter(|view| view.category == category);
            let (feature_count, importance_pct) = members
                .fold((0, 0.0), |(count, sum), view| (count + 1, sum + view.importance_pct));
            CategoryTotal {
                category,
                category_label: category.label(),
                feature_count,
                importance_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::reference;

    #[test]
    fn classifies_by_keyword_precedence() {
        assert_eq!(
            FeatureCategory::classify("Service per Age"),
            FeatureCategory::Demographic
        );
        assert_eq!(
            FeatureCategory::classify("Length of Service"),
            FeatureCategory::Experience
        );
        assert_eq!(
            FeatureCategory::classify("Business Unit_Technology"),
            FeatureCategory::Organizational
        );
        assert_eq!(
            FeatureCategory::classify("City_San Francisco"),
            FeatureCategory::Geographic
        );
        assert_eq!(
            FeatureCategory::classify("Gender_Male"),
            FeatureCategory::Derived
        );
    }

    #[test]
    fn views_expand_labels_and_percentages() {
        let views = feature_views(&reference::feature_importances());
        let department = &views[3];
        assert_eq!(department.name, "Department Engineering");
        assert_eq!(department.full_name, "Department_Engineering");
        assert!((department.importance_pct - 12.0).abs() < 1e-9);
        assert!((department.share_of_total_pct - 12.0).abs() < 1e-6);
    }

    #[test]
    fn top_features_are_ranked() {
        let top = top_features(&reference::feature_importances(), 5);
        let names: Vec<&str> = top.iter().map(|v| v.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Age",
                "Length of Service",
                "Service per Age",
                "Department_Engineering",
                "Business Unit_Technology"
            ]
        );
    }

    #[test]
    fn category_totals_cover_every_category() {
        let totals = category_totals(&reference::feature_importances());
        assert_eq!(totals.len(), 5);
        let demographic = &totals[0];
        assert_eq!(demographic.feature_count, 3);
        assert!((demographic.importance_pct - 46.0).abs() < 1e-9);
        assert_eq!(totals[4].feature_count, 0);
    }
}
