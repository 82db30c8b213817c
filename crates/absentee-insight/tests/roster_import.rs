use absentee_insight::absence::{
    query, reference, Gender, QueryParams, RosterImporter, ScoringEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn sample_roster_imports_and_queries() {
    let data = include_bytes!("../MFGEmployees_sample.csv");
    let engine = ScoringEngine::default();
    let clusters = reference::clusters();

    let employees = RosterImporter::new(&engine, &clusters)
        .from_reader(&data[..], &mut StdRng::seed_from_u64(17))
        .expect("roster imports");

    assert_eq!(employees.len(), 10);
    assert!(employees
        .iter()
        .all(|e| (5.0..=50.0).contains(&e.predicted_absent)));
    assert!(employees
        .iter()
        .all(|e| clusters.iter().any(|c| c.cluster_id == e.cluster)));

    let doris = employees
        .iter()
        .find(|e| e.id == 5)
        .expect("employee 5 present");
    assert_eq!(doris.name, "Doris Hubbard");
    assert_eq!(doris.gender, Gender::Female);
    assert_eq!(doris.age, 26);
    assert!(doris.actual_absent.is_none());

    let params = QueryParams {
        department: Some("Bakery".to_string()),
        ..QueryParams::default()
    };
    let bakers = query(&employees, &params).expect("query runs");
    assert_eq!(bakers.len(), 4);
}

#[test]
fn same_seed_reproduces_the_roster() {
    let data = include_bytes!("../MFGEmployees_sample.csv");
    let engine = ScoringEngine::default();
    let clusters = reference::clusters();
    let importer = RosterImporter::new(&engine, &clusters);

    let first = importer
        .from_reader(&data[..], &mut StdRng::seed_from_u64(3))
        .expect("first import");
    let second = importer
        .from_reader(&data[..], &mut StdRng::seed_from_u64(3))
        .expect("second import");
    assert_eq!(first, second);
}
