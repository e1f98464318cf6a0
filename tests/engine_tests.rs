use std::cell::Cell;
use std::rc::Rc;

use fastchart::data_types::{AxisKind, AxisModel, PlotPoint, Rgba, ScatterConfig};
use fastchart::engine::dispatch;
use fastchart::host::MemoryHost;
use fastchart::{ChartEngine, FastScatterSeries, LocalQueue, Series, ValueKind};

const RED: Rgba = Rgba::opaque(255, 0, 0);

fn one_px(color: Rgba) -> ScatterConfig {
    ScatterConfig {
        color,
        marker_size: 1,
    }
}

fn scatter(points: &[(f64, f64)], color: Rgba) -> FastScatterSeries {
    FastScatterSeries::new(points.iter().map(|&(x, y)| PlotPoint::new(x, y)).collect())
        .with_config(one_px(color))
}

fn engine_400x300() -> (ChartEngine, std::rc::Rc<LocalQueue>, Rc<std::cell::RefCell<fastchart::host::Frame>>) {
    let host = MemoryHost::new();
    let frame = host.frame();
    let queue = LocalQueue::new();
    let mut engine = ChartEngine::new(Box::new(host), queue.clone());
    engine.set_x_axis(AxisModel::with_range(AxisKind::Numeric, 0.0, 400.0));
    engine.set_y_axis(AxisModel::with_range(AxisKind::Numeric, 0.0, 300.0));
    engine.set_plot_size(400, 300);
    (engine, queue, frame)
}

fn offset(x: u32, y_row: u32) -> u32 {
    (y_row * 400 + x) * 4
}

#[test]
fn test_first_render_paints_and_latches_loaded() {
    let (mut engine, queue, frame) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    assert!(!engine.is_loaded());

    dispatch::drain(&queue, &mut engine);

    assert!(engine.is_loaded());
    assert_eq!(engine.surface().unwrap().read(offset(100, 0)), RED.bgra());
    let frame = frame.borrow();
    assert_eq!(frame.presents, 1);
    assert_eq!(&frame.pixels[offset(100, 0) as usize..offset(100, 0) as usize + 4], &RED.bgra());
}

#[test]
fn test_incremental_append_paints_over_without_clear() {
    let (mut engine, queue, frame) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);

    engine.append_sample("s", PlotPoint::new(200.0, 300.0));
    dispatch::drain(&queue, &mut engine);

    let surface = engine.surface().unwrap();
    // New point painted, old one survived: no clear ran.
    assert_eq!(surface.read(offset(200, 0)), RED.bgra());
    assert_eq!(surface.read(offset(100, 0)), RED.bgra());
    assert_eq!(frame.borrow().presents, 2);
}

#[test]
fn test_incremental_pass_skips_clean_series() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("a", scatter(&[(50.0, 300.0)], RED)));
    engine.add_series(Series::new("b", scatter(&[(60.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);

    // Only "b" is dirtied; "a" keeps its pixel set untouched.
    {
        let model = engine.series()[0].model.read();
        let cell = model.raster_cell().unwrap();
        assert!(cell.needs_conversion());
    }
    engine.set_selected_index(Some(0)); // forces conversion of both cells
    engine.set_selected_index(None);

    engine.append_sample("b", PlotPoint::new(61.0, 300.0));
    dispatch::drain(&queue, &mut engine);

    let model = engine.series()[0].model.read();
    // "a" was not repainted, so its raw log stayed empty after conversion.
    assert!(!model.raster_cell().unwrap().needs_conversion());
    let model_b = engine.series()[1].model.read();
    assert!(model_b.raster_cell().unwrap().needs_conversion());
}

#[test]
fn test_replace_samples_forces_cleared_repaint() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);
    assert_eq!(engine.surface().unwrap().read(offset(100, 0)), RED.bgra());

    engine.replace_samples("s", vec![PlotPoint::new(150.0, 300.0)]);
    dispatch::drain(&queue, &mut engine);

    let surface = engine.surface().unwrap();
    assert_eq!(surface.read(offset(100, 0)), [0, 0, 0, 0], "stale pixel must be cleared");
    assert_eq!(surface.read(offset(150, 0)), RED.bgra());
}

#[test]
fn test_hidden_series_is_not_painted() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    engine.set_series_visible("s", false);
    dispatch::drain(&queue, &mut engine);

    assert_eq!(engine.surface().unwrap().read(offset(100, 0)), [0, 0, 0, 0]);

    engine.set_series_visible("s", true);
    dispatch::drain(&queue, &mut engine);
    assert_eq!(engine.surface().unwrap().read(offset(100, 0)), RED.bgra());
}

#[test]
fn test_resize_recreates_surface_and_repaints() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);
    assert_eq!(engine.surface().unwrap().len(), 480_000);

    engine.set_plot_size(200, 100);
    dispatch::drain(&queue, &mut engine);

    let surface = engine.surface().unwrap();
    assert_eq!(surface.len(), 200 * 100 * 4);
    // Same data domain, new geometry: x=100 of 400 -> pixel 50 of 200,
    // still on row 0.
    assert_eq!(surface.read(50 * 4), RED.bgra());
}

#[test]
fn test_collapsed_plot_area_drops_surface() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);
    assert!(engine.surface().is_some());

    engine.set_plot_size(0, 300);
    assert!(engine.surface().is_none());
}

#[test]
fn test_default_x_axis_kind_follows_first_series() {
    let queue = LocalQueue::new();
    let mut engine = ChartEngine::new(Box::new(MemoryHost::new()), queue.clone());
    engine.add_series(Series::new(
        "times",
        FastScatterSeries::new(vec![PlotPoint::new(1.7e12, 1.0)])
            .with_value_kind(ValueKind::DateTime),
    ));
    engine.add_series(Series::new(
        "numbers",
        FastScatterSeries::new(vec![PlotPoint::new(1.0, 1.0)]),
    ));
    dispatch::drain(&queue, &mut engine);

    let x_axis = engine.x_axis().unwrap();
    assert_eq!(x_axis.kind, AxisKind::DateTime);
    assert_eq!(engine.y_axis().unwrap().kind, AxisKind::Numeric);
    assert_eq!(x_axis.registered, vec!["times".to_string(), "numbers".to_string()]);
}

#[test]
fn test_explicit_axis_is_not_defaulted_away() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new(
        "times",
        FastScatterSeries::new(vec![PlotPoint::new(5.0, 5.0)])
            .with_value_kind(ValueKind::DateTime),
    ));
    dispatch::drain(&queue, &mut engine);

    // The explicit numeric axis set in the fixture wins over the series kind.
    assert_eq!(engine.x_axis().unwrap().kind, AxisKind::Numeric);
    let (min, max) = engine.x_axis().unwrap().range.clamped_bounds();
    assert_eq!((min, max), (0.0, 400.0));
}

#[test]
fn test_auto_range_unions_visible_series() {
    let queue = LocalQueue::new();
    let mut engine = ChartEngine::new(Box::new(MemoryHost::new()), queue.clone());
    engine.add_series(Series::new(
        "a",
        FastScatterSeries::new(vec![PlotPoint::new(-5.0, 1.0), PlotPoint::new(10.0, 2.0)]),
    ));
    engine.add_series(Series::new(
        "b",
        FastScatterSeries::new(vec![PlotPoint::new(0.0, -3.0), PlotPoint::new(40.0, 7.0)]),
    ));
    dispatch::drain(&queue, &mut engine);

    let x = engine.x_axis().unwrap();
    assert_eq!((x.range.min, x.range.max), (-5.0, 40.0));
    let y = engine.y_axis().unwrap();
    assert_eq!((y.range.min, y.range.max), (-3.0, 7.0));
}

#[test]
fn test_indicator_contributes_to_range_but_is_not_painted() {
    // Range participation, even when hidden.
    let queue = LocalQueue::new();
    let mut engine = ChartEngine::new(Box::new(MemoryHost::new()), queue.clone());
    engine.add_series(Series::new(
        "main",
        FastScatterSeries::new(vec![PlotPoint::new(0.0, 1.0), PlotPoint::new(10.0, 2.0)]),
    ));
    let mut overlay = Series::new(
        "band",
        FastScatterSeries::new(vec![PlotPoint::new(0.0, -50.0), PlotPoint::new(10.0, 50.0)]),
    )
    .as_indicator();
    overlay.visible = false;
    engine.add_series(overlay);
    dispatch::drain(&queue, &mut engine);

    let y = engine.y_axis().unwrap();
    assert_eq!((y.range.min, y.range.max), (-50.0, 50.0));

    // Not part of the painted stack.
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("main", scatter(&[(100.0, 300.0)], RED)));
    engine.add_series(Series::new("band", scatter(&[(200.0, 300.0)], RED)).as_indicator());
    dispatch::drain(&queue, &mut engine);

    let surface = engine.surface().unwrap();
    assert_eq!(surface.read(offset(100, 0)), RED.bgra());
    assert_eq!(surface.read(offset(200, 0)), [0, 0, 0, 0]);
}

#[test]
fn test_preset_selection_notifies_once_on_first_render() {
    let (mut engine, queue, _) = engine_400x300();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::new(Cell::new(None));
    {
        let calls = calls.clone();
        let seen = seen.clone();
        engine.set_selection_listener(move |idx| {
            calls.set(calls.get() + 1);
            seen.set(idx);
        });
    }
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    engine.set_selected_index(Some(0));
    assert_eq!(calls.get(), 0, "not loaded yet: notification is deferred");

    dispatch::drain(&queue, &mut engine);
    assert_eq!(calls.get(), 1);
    assert_eq!(seen.get(), Some(0));
    // Pre-set selection is painted with the first render.
    let brush = engine.theme().selection_brush;
    assert_eq!(engine.surface().unwrap().read(offset(100, 0)), brush.bgra());

    dispatch::drain(&queue, &mut engine);
    assert_eq!(calls.get(), 1, "the deferred notification fires once");
}

#[test]
fn test_selection_listener_fires_on_change() {
    let (mut engine, queue, _) = engine_400x300();
    let calls = Rc::new(Cell::new(0u32));
    {
        let calls = calls.clone();
        engine.set_selection_listener(move |_| calls.set(calls.get() + 1));
    }
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);

    engine.set_selected_index(Some(0));
    engine.set_selected_index(Some(0)); // no change, no notification
    engine.set_selected_index(None);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_tooltip_latch_and_hit_test() {
    let (mut engine, queue, _) = engine_400x300();
    engine.add_series(Series::new("plain", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);
    assert!(!engine.tooltip_enabled());
    assert_eq!(engine.hit_test(100.0, 0.0), None);

    engine.add_series(Series::new(
        "tips",
        FastScatterSeries::new(vec![
            PlotPoint::new(50.0, 300.0),
            PlotPoint::new(120.0, 300.0),
        ])
        .with_config(one_px(RED))
        .with_tooltip(),
    ));
    dispatch::drain(&queue, &mut engine);
    assert!(engine.tooltip_enabled());

    // Pixel 118 inverts to x=118, nearest tooltip point is (120, _) at
    // index 1 of series 1.
    assert_eq!(engine.hit_test(118.0, 0.0), Some((1, 1)));
    assert_eq!(engine.hit_test(10.0, 0.0), Some((1, 0)));
}

#[test]
fn test_dense_series_paints_within_bounds() {
    use rand::Rng;

    let (mut engine, queue, _) = engine_400x300();
    let mut rng = rand::rng();
    let points: Vec<PlotPoint> = (0..20_000)
        .map(|_| {
            PlotPoint::new(
                rng.random_range(0.0..400.0),
                rng.random_range(0.5..300.0),
            )
        })
        .collect();
    engine.add_series(Series::new(
        "dense",
        FastScatterSeries::new(points).with_config(one_px(RED)),
    ));
    dispatch::drain(&queue, &mut engine);

    // Force conversion, then check every recorded offset is in bounds.
    engine.set_selected_index(Some(0));
    let len = engine.surface().unwrap().len() as u32;
    let model = engine.series()[0].model.read();
    let cell = model.raster_cell().unwrap();
    assert!(!cell.set().is_empty());
    for &off in cell.set() {
        assert!(off + 3 < len);
    }
}

#[test]
fn test_dispose_drops_surface_and_ignores_everything() {
    let (mut engine, queue, frame) = engine_400x300();
    engine.add_series(Series::new("s", scatter(&[(100.0, 300.0)], RED)));
    dispatch::drain(&queue, &mut engine);
    let presents_before = frame.borrow().presents;

    engine.dispose();
    assert!(engine.surface().is_none());

    engine.set_selected_index(Some(0));
    engine.set_plot_size(50, 50);
    engine.request_update(fastchart::ChangeFlags::ALL);
    dispatch::drain(&queue, &mut engine);

    assert_eq!(frame.borrow().presents, presents_before, "no commits after dispose");
}
