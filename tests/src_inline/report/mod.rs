use super::*;

#[test]
fn test_median_count() {
    let odd = vec![
        CountRecord::new("A", 5),
        CountRecord::new("B", 1),
        CountRecord::new("C", 3),
    ];
    assert_eq!(median_count(&odd), 3.0);

    let even = vec![
        CountRecord::new("A", 5),
        CountRecord::new("B", 1),
        CountRecord::new("C", 3),
        CountRecord::new("D", 4),
    ];
    assert_eq!(median_count(&even), 3.5);
    assert_eq!(median_count(&[]), 0.0);
}

#[test]
fn test_fraction() {
    assert_eq!(fraction(1, 4), 0.25);
    assert_eq!(fraction(3, 0), 0.0);
    assert_eq!(format_f64_4(0.5), "0.5000");
}
