use serde::{Deserialize, Serialize};

/// Attribute a categorical rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Department,
    BusinessUnit,
    City,
}

impl CategoryField {
    pub const fn ordered() -> [Self; 3] {
        [Self::Department, Self::BusinessUnit, Self::City]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::BusinessUnit => "business unit",
            Self::City => "city",
        }
    }
}

/// How a rule keyword is compared against the attribute text. Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatch {
    Contains,
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub field: CategoryField,
    pub keyword: String,
    pub adjustment: f64,
    pub matching: KeywordMatch,
}

impl CategoryRule {
    pub fn contains(field: CategoryField, keyword: &str, adjustment: f64) -> Self {
        Self {
            field,
            keyword: keyword.to_string(),
            adjustment,
            matching: KeywordMatch::Contains,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim().to_lowercase();
        let keyword = self.keyword.to_lowercase();
        match self.matching {
            KeywordMatch::Contains => value.contains(&keyword),
            KeywordMatch::Exact => value == keyword,
        }
    }
}

/// Weights of the fixed weighted-sum absence model.
///
/// Rules are evaluated per [`CategoryField`] in table order and only the first
/// matching rule of each field contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_hours: f64,
    pub age_pivot: f64,
    pub age_weight: f64,
    pub service_weight: f64,
    pub service_per_age_weight: f64,
    pub jitter_spread: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    pub rules: Vec<CategoryRule>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_hours: 15.0,
            age_pivot: 30.0,
            age_weight: 0.4,
            service_weight: 0.8,
            service_per_age_weight: 20.0,
            jitter_spread: 2.0,
            min_hours: 5.0,
            max_hours: 50.0,
            rules: vec![
                CategoryRule::contains(CategoryField::Department, "engineering", 3.0),
                CategoryRule::contains(CategoryField::Department, "hr", 5.0),
                CategoryRule::contains(CategoryField::BusinessUnit, "technology", -2.0),
                CategoryRule::contains(CategoryField::City, "san francisco", -1.0),
                CategoryRule::contains(CategoryField::City, "new york", 1.0),
            ],
        }
    }
}
