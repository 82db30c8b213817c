use absentee_insight::absence::{
    export_csv, query, reference, CsvQuoting, EmployeeQuery, QueryParams, SortDirection,
    SortField,
};

fn names(rows: &[absentee_insight::absence::Employee]) -> Vec<&str> {
    rows.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn open_filters_keep_everyone_and_sort_descending() {
    let employees = reference::employees();
    let rows = query(&employees, &QueryParams::default()).expect("query runs");

    assert_eq!(rows.len(), employees.len());
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].predicted_absent >= pair[1].predicted_absent));
}

#[test]
fn department_filter_finds_the_engineer() {
    let params = QueryParams {
        department: Some("Engineering".to_string()),
        ..QueryParams::default()
    };
    let rows = query(&reference::employees(), &params).expect("query runs");
    assert_eq!(names(&rows), vec!["Michael Chen"]);
}

#[test]
fn cluster_filter_orders_by_predicted_absence() {
    let params = QueryParams {
        cluster: Some("0".to_string()),
        sort: Some("predictedAbsent".to_string()),
        direction: Some("desc".to_string()),
        ..QueryParams::default()
    };
    let rows = query(&reference::employees(), &params).expect("query runs");
    assert_eq!(
        names(&rows),
        vec!["Sarah Johnson", "Robert Taylor", "James Wilson"]
    );
}

#[test]
fn repeated_queries_are_identical() {
    let employees = reference::employees();
    let query = EmployeeQuery {
        search: "an".to_string(),
        sort_field: SortField::Age,
        sort_direction: SortDirection::Asc,
        ..EmployeeQuery::default()
    };

    let first = query.apply(&employees);
    let second = query.apply(&employees);
    assert_eq!(first, second);
    assert_eq!(employees, reference::employees());
}

#[test]
fn exported_rows_match_the_filtered_table() {
    let employees = reference::employees();
    let clusters = reference::clusters();

    for cluster in ["all", "0", "1", "2", "3"] {
        let params = QueryParams {
            cluster: Some(cluster.to_string()),
            ..QueryParams::default()
        };
        let rows = query(&employees, &params).expect("query runs");
        let csv = export_csv(&rows, &clusters, CsvQuoting::Standard).expect("export");

        let data_rows: Vec<Vec<&str>> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').collect())
            .collect();
        assert_eq!(data_rows.len(), rows.len(), "cluster {cluster}");
        assert!(data_rows.iter().all(|fields| fields.len() == 8));
    }
}

#[test]
fn unknown_sort_fields_are_rejected() {
    let params = QueryParams {
        sort: Some("salary".to_string()),
        ..QueryParams::default()
    };
    assert!(query(&reference::employees(), &params).is_err());
}
