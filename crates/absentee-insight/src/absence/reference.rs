//! Compiled-in reference datasets: the sample employee roster, cohort
//! definitions, feature importances and headline model metrics.

use super::domain::{
    ClusterDefinition, Employee, EmployeeAttributes, FeatureImportance, Gender, ModelMetrics,
    RiskLevel,
};

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            1,
            "Sarah Johnson",
            Gender::Female,
            ["New York", "Data Analyst", "Analytics", "NYC Main", "Technology", "Data Science"],
            (28, 3),
            (24.5, Some(26.0)),
            0,
        ),
        employee(
            2,
            "Michael Chen",
            Gender::Male,
            [
                "San Francisco",
                "Senior Developer",
                "Engineering",
                "SF Tech Hub",
                "Technology",
                "Software",
            ],
            (34, 7),
            (18.2, Some(19.0)),
            1,
        ),
        employee(
            3,
            "Emma Rodriguez",
            Gender::Female,
            ["Chicago", "HR Manager", "Human Resources", "Chicago Central", "Operations", "People"],
            (42, 12),
            (32.1, Some(30.0)),
            2,
        ),
        employee(
            4,
            "David Kim",
            Gender::Male,
            ["Seattle", "Product Manager", "Product", "Seattle North", "Product", "Innovation"],
            (31, 5),
            (21.8, Some(23.0)),
            1,
        ),
        employee(
            5,
            "Lisa Wang",
            Gender::Female,
            ["Austin", "Marketing Director", "Marketing", "Austin Central", "Marketing", "Digital"],
            (38, 9),
            (28.7, Some(27.0)),
            2,
        ),
        employee(
            6,
            "James Wilson",
            Gender::Male,
            ["Boston", "Sales Representative", "Sales", "Boston Downtown", "Sales", "Enterprise"],
            (26, 2),
            (16.3, Some(18.0)),
            0,
        ),
        employee(
            7,
            "Maria Garcia",
            Gender::Female,
            ["Miami", "Finance Manager", "Finance", "Miami South", "Finance", "Accounting"],
            (45, 15),
            (35.9, Some(34.0)),
            3,
        ),
        employee(
            8,
            "Robert Taylor",
            Gender::Male,
            [
                "Denver",
                "Operations Specialist",
                "Operations",
                "Denver West",
                "Operations",
                "Logistics",
            ],
            (29, 4),
            (20.1, Some(22.0)),
            0,
        ),
    ]
}

fn employee(
    id: u32,
    name: &str,
    gender: Gender,
    text: [&str; 6],
    (age, service_length): (u32, u32),
    (predicted_absent, actual_absent): (f64, Option<f64>),
    cluster: u8,
) -> Employee {
    let [city, job_title, department, store, business_unit, division] = text;
    let attributes = EmployeeAttributes {
        gender,
        city: city.to_string(),
        job_title: job_title.to_string(),
        department: department.to_string(),
        store: store.to_string(),
        business_unit: business_unit.to_string(),
        division: division.to_string(),
        age,
        service_length,
    };
    Employee::new(id, name, attributes, predicted_absent, actual_absent, cluster)
}

pub fn clusters() -> Vec<ClusterDefinition> {
    vec![
        cluster(
            0,
            "Young Professionals",
            "Early career employees with low absenteeism",
            (27.7, 3.0, 18.6, 3),
            RiskLevel::Low,
            [
                "High engagement and motivation",
                "Fewer family responsibilities",
                "Strong attendance patterns",
                "Career-focused mindset",
            ],
        ),
        cluster(
            1,
            "Mid-Career Professionals",
            "Experienced employees with moderate absenteeism",
            (32.5, 6.0, 20.0, 2),
            RiskLevel::Medium,
            [
                "Balanced work-life approach",
                "Moderate family commitments",
                "Stable performance patterns",
                "Leadership potential",
            ],
        ),
        cluster(
            2,
            "Senior Contributors",
            "Established employees with higher absenteeism",
            (40.0, 10.5, 30.4, 2),
            RiskLevel::High,
            [
                "Significant family responsibilities",
                "Health considerations increasing",
                "High expertise and value",
                "Work-life balance priorities",
            ],
        ),
        cluster(
            3,
            "Veteran Employees",
            "Long-tenure employees with variable patterns",
            (45.0, 15.0, 35.9, 1),
            RiskLevel::Critical,
            [
                "Extensive organizational knowledge",
                "Pre-retirement considerations",
                "Health-related absences",
                "Mentorship responsibilities",
            ],
        ),
    ]
}

fn cluster(
    cluster_id: u8,
    name: &str,
    description: &str,
    (avg_age, avg_service, avg_absent, employee_count): (f64, f64, f64, u32),
    risk_level: RiskLevel,
    characteristics: [&str; 4],
) -> ClusterDefinition {
    ClusterDefinition {
        cluster_id,
        name: name.to_string(),
        description: description.to_string(),
        avg_age,
        avg_service,
        avg_absent,
        employee_count,
        characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        risk_level,
    }
}

pub fn feature_importances() -> Vec<FeatureImportance> {
    [
        (
            "Age",
            0.23,
            "Employee age is the strongest predictor of absenteeism patterns",
        ),
        (
            "Length of Service",
            0.19,
            "Years of service significantly impacts absence behavior",
        ),
        (
            "Service per Age",
            0.15,
            "Ratio of service years to age reveals career progression patterns",
        ),
        (
            "Department_Engineering",
            0.12,
            "Engineering department shows distinct absence patterns",
        ),
        (
            "Business Unit_Technology",
            0.10,
            "Technology business unit has unique work-life balance needs",
        ),
        (
            "Age Squared",
            0.08,
            "Non-linear age effects capture complex life stage impacts",
        ),
        (
            "Service Squared",
            0.07,
            "Non-linear service effects show tenure-based patterns",
        ),
        (
            "City_San Francisco",
            0.06,
            "Geographic location influences absence due to local factors",
        ),
    ]
    .into_iter()
    .map(|(feature, importance, description)| FeatureImportance {
        feature: feature.to_string(),
        importance,
        description: description.to_string(),
    })
    .collect()
}

pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        r2_score: 0.847,
        rmse: 12.34,
        mae: 8.92,
        accuracy: 84.7,
    }
}
