use fastchart::data_types::samples::{nearest_in, SampleStore};
use fastchart::data_types::PlotPoint;

fn ramp(n: usize) -> Vec<PlotPoint> {
    (0..n)
        .map(|i| PlotPoint::new(i as f64, i as f64))
        .collect()
}

#[test]
fn test_store_bounds() {
    let store = SampleStore::new(ramp(100));
    assert_eq!(store.bounds(), Some((0.0, 99.0, 0.0, 99.0)));
    assert_eq!(store.len(), 100);
}

#[test]
fn test_empty_store_has_no_bounds() {
    let store = SampleStore::new(vec![]);
    assert_eq!(store.bounds(), None);
    assert_eq!(store.y_range(0.0, 10.0), None);
    assert!(store.is_empty());
}

#[test]
fn test_y_range_windows() {
    let mut data = ramp(2000);
    data[1000].y = 50_000.0; // spike at x=1000

    let store = SampleStore::new(data);

    // Window missing the spike.
    let (lo, hi) = store.y_range(0.0, 10.0).unwrap();
    assert_eq!(lo, 0.0);
    assert_eq!(hi, 10.0);

    // Window containing the spike; answered partly from chunk cache.
    let (_, hi) = store.y_range(900.0, 1100.0).unwrap();
    assert_eq!(hi, 50_000.0);
}

#[test]
fn test_push_keeps_cache_consistent() {
    let mut store = SampleStore::new(ramp(600));
    for i in 600..1200 {
        store.push(PlotPoint::new(i as f64, -(i as f64)));
    }
    let (x_min, x_max, y_min, _) = store.bounds().unwrap();
    assert_eq!(x_min, 0.0);
    assert_eq!(x_max, 1199.0);
    assert_eq!(y_min, -1199.0);
}

#[test]
fn test_replace_rebuilds_cache() {
    let mut store = SampleStore::new(ramp(100));
    store.replace(vec![PlotPoint::new(5.0, 7.0)]);
    assert_eq!(store.bounds(), Some((5.0, 5.0, 7.0, 7.0)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_range_pads_one_point_each_side() {
    let store = SampleStore::new(ramp(100));
    let window = store.range(10.0, 20.0);
    // 10..=20 plus one padding point on each side for line continuity.
    assert_eq!(window.first().unwrap().x, 9.0);
    assert_eq!(window.last().unwrap().x, 21.0);
}

#[test]
fn test_nan_samples_do_not_poison_bounds() {
    let mut data = ramp(10);
    data[5].y = f64::NAN;
    let store = SampleStore::new(data);
    let (_, _, y_min, y_max) = store.bounds().unwrap();
    assert_eq!(y_min, 0.0);
    assert_eq!(y_max, 9.0);
}

#[test]
fn test_nearest_index() {
    let points = ramp(10);
    assert_eq!(nearest_in(&points, -3.0), Some(0));
    assert_eq!(nearest_in(&points, 4.4), Some(4));
    assert_eq!(nearest_in(&points, 4.6), Some(5));
    assert_eq!(nearest_in(&points, 99.0), Some(9));
    assert_eq!(nearest_in(&[], 1.0), None);
}
