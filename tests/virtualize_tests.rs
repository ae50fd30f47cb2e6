use gantt_planner::chart::virtualize::{column_window, row_window, OVERSCAN_ROWS};
use gantt_planner::chart::{ScrollMetrics, Virtualizer, WindowParams, HEADER_HEIGHT, ROW_HEIGHT};

fn params(rows: usize, days: usize) -> WindowParams {
    WindowParams {
        row_count: rows,
        row_height: ROW_HEIGHT,
        header_height: HEADER_HEIGHT,
        total_days: days,
        col_width: 60.0,
        fit_enabled: false,
        export: false,
    }
}

fn at(scroll_top: f32, scroll_left: f32) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        scroll_left,
        viewport_width: 1200.0,
        viewport_height: 20.0 * ROW_HEIGHT,
    }
}

#[test]
fn overscan_never_goes_negative() {
    let window = row_window(&params(500, 30), &at(560.0, 0.0));
    assert_eq!(window.start, 0);
    assert!(window.end <= 500);
}

#[test]
fn visible_rows_are_always_covered() {
    let p = params(500, 30);
    let content = HEADER_HEIGHT + 500.0 * ROW_HEIGHT;
    let mut top = 0.0;
    while top < content {
        let m = at(top, 0.0);
        let window = row_window(&p, &m);
        let first = ((top - HEADER_HEIGHT).max(0.0) / ROW_HEIGHT).floor() as usize;
        let last = (((top + m.viewport_height - HEADER_HEIGHT) / ROW_HEIGHT).ceil() as usize).min(500);
        for row in first..last {
            assert!(window.contains(row), "row {row} missing at scroll {top}");
        }
        assert!(window.len() <= 20 + 2 * OVERSCAN_ROWS as usize + 2);
        top += 137.0;
    }
}

#[test]
fn visible_columns_are_always_covered() {
    let p = params(10, 2000);
    let mut left = 0.0;
    while left < 2000.0 * 60.0 {
        let m = at(0.0, left);
        let window = column_window(&p, &m);
        let first = (left / 60.0).floor() as usize;
        let last = (((left + m.viewport_width) / 60.0).ceil() as usize).min(2000);
        for col in first..last {
            assert!(window.contains(col), "column {col} missing at scroll {left}");
        }
        assert!(window.end <= 2000);
        left += 911.0;
    }
}

#[test]
fn fit_mode_and_export_disable_column_windowing() {
    let mut p = params(500, 2000);
    p.fit_enabled = true;
    assert_eq!(column_window(&p, &at(0.0, 5000.0)).len(), 2000);

    let mut p = params(500, 2000);
    p.export = true;
    assert_eq!(row_window(&p, &at(9000.0, 0.0)).len(), 500);
    assert_eq!(column_window(&p, &at(0.0, 5000.0)).len(), 2000);
}

#[test]
fn shrinking_data_clamps_stale_windows() {
    let mut v = Virtualizer::new(params(500, 30));
    v.observe(at(20_000.0, 0.0));
    v.flush();
    assert!(v.rows().start > 0);

    v.set_params(params(5, 30));
    // Before the next flush the window is still clamped to the new count.
    assert!(v.rows().end <= 5);
    v.flush();
    assert_eq!(v.rows().range(), 0..5);
}

#[test]
fn repeated_scroll_events_are_coalesced() {
    let mut v = Virtualizer::new(params(500, 30));
    for top in [100.0, 200.0, 300.0, 400.0] {
        v.observe(at(top, 0.0));
    }
    assert!(v.flush());
    assert!(!v.flush());
    assert!(v.rows().contains(((400.0 - HEADER_HEIGHT) / ROW_HEIGHT) as usize));
}
