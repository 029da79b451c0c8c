//! Accuracy regression tests for contour-dtw.
//!
//! Reference values were worked out by hand from the recurrence
//! `D[i][j] = |a[i-1] - b[j-1]| + min(D[i-1][j], D[i][j-1], D[i-1][j-1])`
//! and are hardcoded to catch regressions.

use contour_dtw::{Contour, Dtw};

fn contour(values: Vec<f64>) -> Contour {
    Contour::new(values).expect("valid test contour")
}

// ---------------------------------------------------------------------------
// a) distances_match_known_values
// ---------------------------------------------------------------------------

#[test]
fn distances_match_known_values() {
    let pairs: Vec<(Contour, Contour, f64)> = vec![
        (contour(vec![0.0, 0.0, 0.0]), contour(vec![1.0, 1.0, 1.0]), 3.0), // constant offset
        (contour(vec![0.0, 1.0, 0.0]), contour(vec![0.0, 0.0, 0.0]), 1.0), // single peak
        (contour(vec![1.0, 2.0, 3.0, 4.0]), contour(vec![1.0, 2.0, 3.0, 4.0]), 0.0), // identical
        (contour(vec![1.0, 2.0, 3.0]), contour(vec![3.0, 2.0, 1.0]), 4.0), // reversed
        (contour(vec![1.0]), contour(vec![5.0]), 4.0),                     // single point
        (contour(vec![0.0, 0.0, 1.0]), contour(vec![1.0, 0.0, 0.0]), 2.0), // shifted peak
    ];

    let dtw = Dtw::new();
    for (i, (a, b, expected)) in pairs.iter().enumerate() {
        let dist = dtw.distance(a.as_view(), b.as_view()).value();
        assert!(
            (dist - expected).abs() < 1e-12,
            "pair {i}: got {dist:.15}, expected {expected:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// b) closer_candidate_never_scores_worse
// ---------------------------------------------------------------------------

/// Moving the last candidate point further from the reference can only grow
/// every path's cost, so the distance cannot shrink.
#[test]
fn closer_candidate_never_scores_worse() {
    let reference = contour(vec![0.0, 1.0, 2.0]);
    let close = contour(vec![0.0, 1.0, 2.5]);
    let far = contour(vec![0.0, 1.0, 4.0]);

    let dtw = Dtw::new();
    let d_close = dtw.distance(reference.as_view(), close.as_view()).value();
    let d_far = dtw.distance(reference.as_view(), far.as_view()).value();

    assert!((d_close - 0.5).abs() < 1e-12);
    assert!((d_far - 2.0).abs() < 1e-12);
    assert!(d_close <= d_far);
}

// ---------------------------------------------------------------------------
// c) rolling_matches_full_matrix
// ---------------------------------------------------------------------------

#[test]
fn rolling_matches_full_matrix() {
    let pairs: Vec<(Contour, Contour)> = vec![
        (contour(vec![1.0, 2.0, 3.0]), contour(vec![3.0, 2.0, 1.0])),
        (contour(vec![0.0, 5.0, 0.0, 5.0]), contour(vec![5.0, 0.0, 5.0, 0.0])),
        (contour(vec![0.0, 0.25, 0.5, 0.75, 1.0]), contour(vec![300.0, 250.0, 200.0, 150.0, 100.0])),
        (contour(vec![0.0, 1.0, 4.0, 9.0]), contour(vec![0.0, 2.0, 3.0, 8.0, 8.5, 9.0])),
        (contour(vec![10.0, 5.0, 1.0]), contour(vec![1.0, 5.0, 10.0])),
    ];

    let dtw = Dtw::new();
    for (i, (a, b)) in pairs.iter().enumerate() {
        let rolling = dtw.distance(a.as_view(), b.as_view()).value();
        let (full, _) = dtw.distance_and_path(a.as_view(), b.as_view());
        assert_eq!(rolling, full.value(), "pair {i}: rolling != full matrix");
    }
}

// ---------------------------------------------------------------------------
// d) distance_is_symmetric
// ---------------------------------------------------------------------------

#[test]
fn distance_is_symmetric() {
    let contours = [
        contour(vec![100.0, 150.0, 200.0, 250.0, 300.0]),
        contour(vec![300.0, 250.0, 200.0, 150.0, 100.0]),
        contour(vec![0.0, 0.2, 0.9]),
        contour(vec![0.5]),
    ];

    let dtw = Dtw::new();
    for a in &contours {
        for b in &contours {
            let ab = dtw.distance(a.as_view(), b.as_view()).value();
            let ba = dtw.distance(b.as_view(), a.as_view()).value();
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
        }
    }
}
