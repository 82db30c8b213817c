use super::super::domain::EmployeeAttributes;
use super::config::{CategoryField, ScoringConfig};
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn score_attributes(
    attributes: &EmployeeAttributes,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::new();
    let mut total = config.base_hours;

    components.push(ScoreComponent {
        factor: ScoreFactor::Base,
        adjustment: config.base_hours,
        notes: format!("base of {:.1} hours per month", config.base_hours),
    });

    let age = f64::from(attributes.age);
    let age_adjustment = (age - config.age_pivot) * config.age_weight;
    components.push(ScoreComponent {
        factor: ScoreFactor::Age,
        adjustment: age_adjustment,
        notes: format!("age {} against pivot {:.0}", attributes.age, config.age_pivot),
    });
    total += age_adjustment;

    let service = f64::from(attributes.service_length);
    let service_adjustment = service * config.service_weight;
    components.push(ScoreComponent {
        factor: ScoreFactor::ServiceLength,
        adjustment: service_adjustment,
        notes: format!("{} year(s) of service", attributes.service_length),
    });
    total += service_adjustment;

    // Zero age only reaches the engine from hand-built attributes.
    let ratio = if attributes.age == 0 { 0.0 } else { service / age };
    let ratio_adjustment = ratio * config.service_per_age_weight;
    components.push(ScoreComponent {
        factor: ScoreFactor::ServicePerAge,
        adjustment: ratio_adjustment,
        notes: format!("service per age ratio {ratio:.3}"),
    });
    total += ratio_adjustment;

    for field in CategoryField::ordered() {
        let value = category_value(attributes, field);
        let matched = config
            .rules
            .iter()
            .filter(|rule| rule.field == field)
            .find(|rule| rule.matches(value));

        if let Some(rule) = matched {
            components.push(ScoreComponent {
                factor: ScoreFactor::Category(field),
                adjustment: rule.adjustment,
                notes: format!("{} '{}' matched '{}'", field.label(), value, rule.keyword),
            });
            total += rule.adjustment;
        }
    }

    (components, total)
}

fn category_value(attributes: &EmployeeAttributes, field: CategoryField) -> &str {
    match field {
        CategoryField::Department => &attributes.department,
        CategoryField::BusinessUnit => &attributes.business_unit,
        CategoryField::City => &attributes.city,
    }
}
