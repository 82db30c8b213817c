use super::domain::ClusterDefinition;

/// Pick the cluster whose profile (average age, service, absence) is closest
/// to the given employee after scaling each axis by its spread across clusters.
pub fn nearest_cluster<'a>(
    clusters: &'a [ClusterDefinition],
    age: u32,
    service_length: u32,
    predicted_hours: f64,
) -> Option<&'a ClusterDefinition> {
    let point = [f64::from(age), f64::from(service_length), predicted_hours];
    let spreads = axis_spreads(clusters);

    clusters
        .iter()
        .map(|cluster| {
            let centroid = [cluster.avg_age, cluster.avg_service, cluster.avg_absent];
            let distance: f64 = point
                .iter()
                .zip(centroid.iter())
                .zip(spreads.iter())
                .map(|((value, center), spread)| ((value - center) / spread).powi(2))
                .sum();
            (cluster, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(cluster, _)| cluster)
}

/// Look up a cluster's display name, falling back to `Unknown`.
pub fn cluster_name(clusters: &[ClusterDefinition], cluster_id: u8) -> &str {
    clusters
        .iter()
        .find(|cluster| cluster.cluster_id == cluster_id)
        .map(|cluster| cluster.name.as_str())
        .unwrap_or("Unknown")
}

fn axis_spreads(clusters: &[ClusterDefinition]) -> [f64; 3] {
    let axes: [fn(&ClusterDefinition) -> f64; 3] = [
        |c| c.avg_age,
        |c| c.avg_service,
        |c| c.avg_absent,
    ];

    axes.map(|axis| {
        let (min, max) = clusters
            .iter()
            .map(axis)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let spread = max - min;
        if spread.is_finite() && spread > 0.0 {
            spread
        } else {
            1.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::reference;

    #[test]
    fn assigns_reference_employees_to_their_cohorts() {
        let clusters = reference::clusters();
        for employee in reference::employees() {
            let assigned = nearest_cluster(
                &clusters,
                employee.age,
                employee.service_length,
                employee.predicted_absent,
            )
            .expect("clusters available");
            assert_eq!(assigned.cluster_id, employee.cluster, "{}", employee.name);
        }
    }

    #[test]
    fn empty_definitions_yield_none() {
        assert!(nearest_cluster(&[], 30, 3, 20.0).is_none());
    }

    #[test]
    fn names_fall_back_for_unknown_ids() {
        let clusters = reference::clusters();
        assert_eq!(cluster_name(&clusters, 3), "Veteran Employees");
        assert_eq!(cluster_name(&clusters, 9), "Unknown");
    }
}
