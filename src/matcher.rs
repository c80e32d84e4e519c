use crate::wallpaper::{Fingerprint, WallpaperRecord};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no wallpapers indexed; run `walltime update` first")]
pub struct EmptyIndexError;

/// Closest record to `target` by Euclidean distance.
///
/// Equal distances go to the lexicographically smallest identifier, so the
/// result does not depend on the order of `records`.
pub fn best_match<'a>(
    target: &Fingerprint,
    records: &'a [WallpaperRecord],
) -> Result<&'a WallpaperRecord, EmptyIndexError> {
    let mut best: Option<(f64, &WallpaperRecord)> = None;

    for record in records {
        let dist = target.distance(&record.fingerprint);
        let better = match best {
            None => true,
            Some((best_dist, best_record)) => {
                closer(dist, &record.identifier, best_dist, &best_record.identifier)
                    == Ordering::Less
            }
        };
        if better {
            best = Some((dist, record));
        }
    }

    best.map(|(_, record)| record).ok_or(EmptyIndexError)
}

/// Up to `limit` records nearest to `target`, closest first.
pub fn rank<'a>(
    target: &Fingerprint,
    records: &'a [WallpaperRecord],
    limit: usize,
) -> Vec<(&'a WallpaperRecord, f64)> {
    let mut scored: Vec<_> = records
        .iter()
        .map(|record| (record, target.distance(&record.fingerprint)))
        .collect();

    scored.sort_by(|a, b| closer(a.1, &a.0.identifier, b.1, &b.0.identifier));
    scored.truncate(limit);
    scored
}

fn closer(dist_a: f64, id_a: &str, dist_b: f64, id_b: &str) -> Ordering {
    dist_a.total_cmp(&dist_b).then_with(|| id_a.cmp(id_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, l: f64, a: f64, b: f64) -> WallpaperRecord {
        WallpaperRecord::new(id, Fingerprint::new(l, a, b))
    }

    fn sample() -> Vec<WallpaperRecord> {
        vec![
            record("A", 50.0, 0.0, 0.0),
            record("B", 10.0, 0.0, 0.0),
            record("C", 90.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_best_match_nearest() {
        let records = sample();
        let target = Fingerprint::new(48.0, 0.0, 0.0);
        assert_eq!(best_match(&target, &records).unwrap().identifier, "A");

        let target = Fingerprint::new(5.0, 0.0, 0.0);
        assert_eq!(best_match(&target, &records).unwrap().identifier, "B");
    }

    #[test]
    fn test_best_match_uses_all_three_axes() {
        let records = vec![
            record("warm", 50.0, 40.0, 30.0),
            record("cool", 50.0, -20.0, -30.0),
        ];
        let target = Fingerprint::new(50.0, -15.0, -25.0);
        assert_eq!(best_match(&target, &records).unwrap().identifier, "cool");
    }

    #[test]
    fn test_best_match_empty() {
        let target = Fingerprint::new(48.0, 0.0, 0.0);
        assert_eq!(best_match(&target, &[]), Err(EmptyIndexError));
    }

    #[test]
    fn test_tie_goes_to_smallest_identifier() {
        let target = Fingerprint::new(50.0, 0.0, 0.0);
        let forward = vec![record("b.png", 40.0, 0.0, 0.0), record("a.png", 60.0, 0.0, 0.0)];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(best_match(&target, &forward).unwrap().identifier, "a.png");
        assert_eq!(best_match(&target, &backward).unwrap().identifier, "a.png");
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let records = sample();
        let target = Fingerprint::new(48.0, 0.0, 0.0);
        let ranked = rank(&target, &records, 2);

        let names: Vec<_> = ranked.iter().map(|(r, _)| r.identifier.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert!((ranked[0].1 - 2.0).abs() < 1e-12);
        assert!((ranked[1].1 - 38.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_agrees_with_best_match() {
        let records = sample();
        for l in [0.0, 29.9, 30.0, 70.0, 100.0] {
            let target = Fingerprint::new(l, 0.0, 0.0);
            let best = best_match(&target, &records).unwrap();
            assert_eq!(rank(&target, &records, 1)[0].0, best);
        }
    }
}
