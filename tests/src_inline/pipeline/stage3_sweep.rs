use super::*;

fn rec(id: &str, count: i64) -> CountRecord {
    CountRecord::new(id, count)
}

fn row(threshold: u64, group_count: u64, total_count: u64) -> ThresholdRow {
    ThresholdRow {
        threshold,
        group_count,
        total_count,
    }
}

fn pseudo_random_records(n: usize, seed: u64) -> Vec<CountRecord> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            rec(&format!("G{i}"), ((state >> 33) % 50) as i64)
        })
        .collect()
}

#[test]
fn test_worked_example() {
    let records = vec![rec("A", 5), rec("B", 5), rec("C", 3), rec("D", 1)];
    let rows = compute(&records).unwrap();
    assert_eq!(rows, vec![row(5, 2, 10), row(3, 3, 13), row(1, 4, 14)]);
}

#[test]
fn test_empty_input() {
    assert_eq!(compute(&[]).unwrap(), Vec::new());
}

#[test]
fn test_negative_count_is_invalid_input() {
    let err = compute(&[rec("A", -1)]).unwrap_err();
    assert_eq!(
        err,
        SweepError::InvalidInput {
            group_id: "A".to_string(),
            count: -1
        }
    );
}

#[test]
fn test_negative_count_anywhere_fails() {
    let records = vec![rec("A", 4), rec("B", 2), rec("C", -3)];
    assert!(compute(&records).is_err());
}

#[test]
fn test_zero_counts_form_a_threshold() {
    let rows = compute(&[rec("A", 0), rec("B", 2), rec("C", 0)]).unwrap();
    assert_eq!(rows, vec![row(2, 1, 2), row(0, 3, 2)]);
}

#[test]
fn test_input_order_does_not_matter() {
    let mut records = pseudo_random_records(200, 7);
    let forward = compute(&records).unwrap();
    records.reverse();
    assert_eq!(compute(&records).unwrap(), forward);
}

#[test]
fn test_sweep_properties() {
    for seed in [1u64, 2, 3, 42] {
        let records = pseudo_random_records(500, seed);
        let rows = compute(&records).unwrap();

        let mut distinct = records.iter().map(|r| r.count as u64).collect::<Vec<_>>();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();
        assert_eq!(
            rows.iter().map(|r| r.threshold).collect::<Vec<_>>(),
            distinct
        );

        for pair in rows.windows(2) {
            assert!(pair[0].threshold > pair[1].threshold);
            assert!(pair[0].group_count <= pair[1].group_count);
            assert!(pair[0].total_count <= pair[1].total_count);
        }

        let last = rows.last().unwrap();
        assert_eq!(last.group_count, records.len() as u64);
        assert_eq!(
            last.total_count,
            records.iter().map(|r| r.count as u64).sum::<u64>()
        );

        let first = rows[0];
        let at_max = records
            .iter()
            .filter(|r| r.count as u64 == first.threshold)
            .count() as u64;
        assert_eq!(first.group_count, at_max);

        for r in &rows {
            let naive_groups = records.iter().filter(|x| x.count as u64 >= r.threshold).count();
            let naive_total: u64 = records
                .iter()
                .filter(|x| x.count as u64 >= r.threshold)
                .map(|x| x.count as u64)
                .sum();
            assert_eq!(r.group_count, naive_groups as u64);
            assert_eq!(r.total_count, naive_total);
        }

        assert_eq!(compute(&records).unwrap(), rows);
    }
}

#[test]
fn test_row_at_between_thresholds() {
    let rows = compute(&[rec("A", 5), rec("B", 5), rec("C", 3), rec("D", 1)]).unwrap();
    assert_eq!(row_at(&rows, 4), row(4, 2, 10));
    assert_eq!(row_at(&rows, 3), row(3, 3, 13));
    assert_eq!(row_at(&rows, 0), row(0, 4, 14));
    assert_eq!(row_at(&rows, 6), row(6, 0, 0));
    assert_eq!(row_at(&[], 2), row(2, 0, 0));
}

#[test]
fn test_total_count_overflow_is_rejected() {
    let records = vec![rec("A", i64::MAX), rec("B", i64::MAX), rec("C", i64::MAX)];
    assert_eq!(
        compute(&records).unwrap_err(),
        SweepError::Overflow {
            threshold: i64::MAX as u64
        }
    );
}

#[test]
fn test_two_max_counts_fit() {
    let rows = compute(&[rec("A", i64::MAX), rec("B", i64::MAX)]).unwrap();
    assert_eq!(rows, vec![row(i64::MAX as u64, 2, u64::MAX - 1)]);
}

#[test]
fn test_validate_counts_names_first_negative() {
    let records = vec![rec("A", 4), rec("B", -1), rec("C", -7)];
    assert_eq!(
        validate_counts(&records).unwrap_err(),
        SweepError::InvalidInput {
            group_id: "B".to_string(),
            count: -1
        }
    );
    assert!(validate_counts(&records[..1]).is_ok());
}
