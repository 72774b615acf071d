use crate::types::ContainerSnapshot;

/// Case-insensitive substring match on name, status and image. An empty
/// filter keeps every row.
pub fn apply_filter(snapshots: &[ContainerSnapshot], filter: &str) -> Vec<ContainerSnapshot> {
    let needle = filter.to_lowercase();
    if needle.is_empty() {
        return snapshots.to_vec();
    }
    snapshots
        .iter()
        .filter(|c| matches(c, &needle))
        .cloned()
        .collect()
}

fn matches(c: &ContainerSnapshot, needle: &str) -> bool {
    [&c.name, &c.status, &c.image]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::summary;
    use crate::metrics::Metrics;
    use crate::snapshot::build_snapshot;

    fn rows() -> Vec<ContainerSnapshot> {
        vec![
            build_snapshot(
                summary("abc123", "Nginx-Proxy", "nginx:1.27", "running", "Up 2 minutes"),
                Metrics::default(),
            ),
            build_snapshot(
                summary("def456", "db", "postgres:16", "exited", "Exited (0)"),
                Metrics::default(),
            ),
            build_snapshot(
                summary("fed789", "cache", "redis:7", "running", "Up 3 hours"),
                Metrics::default(),
            ),
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let all = rows();
        assert_eq!(apply_filter(&all, ""), all);
    }

    #[test]
    fn filter_ignores_case() {
        let all = rows();
        for text in ["proxy", "PROXY", "Proxy"] {
            let hits = apply_filter(&all, text);
            assert_eq!(hits.len(), 1, "filter {:?}", text);
            assert_eq!(hits[0].name, "Nginx-Proxy");
        }
    }

    #[test]
    fn filter_matches_status_and_image() {
        let all = rows();
        assert_eq!(apply_filter(&all, "exited")[0].name, "db");
        assert_eq!(apply_filter(&all, "redis")[0].name, "cache");
        let up: Vec<_> = apply_filter(&all, "up").into_iter().map(|c| c.name).collect();
        assert_eq!(up, ["Nginx-Proxy", "cache"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let all = rows();
        let once = apply_filter(&all, "up");
        assert_eq!(apply_filter(&once, "up"), once);
    }

    #[test]
    fn filter_leaves_source_untouched() {
        let all = rows();
        let _ = apply_filter(&all, "db");
        assert_eq!(all.len(), 3);
    }
}
