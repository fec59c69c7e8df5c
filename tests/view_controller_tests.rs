mod common;

use common::*;
use trellis_view::data_types::{ChartKind, ViewConfig};
use trellis_view::layout::PageSize;
use trellis_view::{Command, ViewController};

fn controller() -> ViewController {
    ViewController::new(ViewConfig::default())
}

#[test]
fn test_refresh_keeps_bucket_counts() {
    let s = state(1.0, false);
    let t = controller().next_state(&s, Command::Refresh).unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.chart_kind, ChartKind::Trellis2DHistogram);
    assert_eq!(request.columns, vec![x_column(), legend_column(), group_column()]);
    assert_eq!(request.bucket_counts, vec![10, 4, 3]);
    assert!(request.options.exact);
    assert!(request.options.reuse_page);
    assert!(!t.redraw);
}

#[test]
fn test_refresh_sampled_is_not_exact() {
    let s = state(0.1, false);
    let t = controller().next_state(&s, Command::Refresh).unwrap();
    assert!(!t.request.unwrap().options.exact);
}

#[test]
fn test_toggle_to_relative_sampled_forces_exact() {
    let s = state(0.25, false);
    let t = controller().next_state(&s, Command::ToggleNormalization).unwrap();
    let request = t.request.expect("sampled relative view must be recomputed");
    assert!(request.options.exact);
    assert!(request.options.relative);
    assert!(t.state.relative);
    assert_eq!(t.state.sampling_rate, 1.0);
}

#[test]
fn test_toggle_exact_never_requests() {
    let c = controller();
    let s = state(1.0, false);
    let t = c.next_state(&s, Command::ToggleNormalization).unwrap();
    assert!(t.request.is_none());
    assert!(t.redraw);
    assert!(t.state.relative);

    // and back to absolute
    let t = c.next_state(&t.state, Command::ToggleNormalization).unwrap();
    assert!(t.request.is_none());
    assert!(!t.state.relative);
}

#[test]
fn test_toggle_to_absolute_sampled_only_redraws() {
    let s = state(0.25, true);
    let t = controller().next_state(&s, Command::ToggleNormalization).unwrap();
    assert!(t.request.is_none());
    assert!(!t.state.relative);
}

#[test]
fn test_change_groups_to_one_is_2d_histogram() {
    let s = state(1.0, false);
    assert_eq!(s.panel_count(), 3);
    let t = controller()
        .next_state(&s, Command::ChangeGroups(Some(1)))
        .unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.chart_kind, ChartKind::Histogram2D);
    assert_eq!(request.chart_kind.as_str(), "2DHistogram");
    assert_eq!(request.columns, vec![x_column(), legend_column()]);
    assert_eq!(request.bucket_counts, vec![0, 0]);
    assert!(!request.targets_current_view());
}

#[test]
fn test_change_groups_relayouts() {
    let s = state(1.0, false);
    let t = controller()
        .next_state(&s, Command::ChangeGroups(Some(6)))
        .unwrap();
    assert_eq!(t.state.shape.bucket_count, 6);
    assert_eq!(t.state.group_by_axis.bucket_count(), 6);
    assert!(t.state.shape.x_num * t.state.shape.y_num >= 6);
    let request = t.request.unwrap();
    // results come back to this view, so they must match its axes
    assert_eq!(
        request.bucket_counts,
        vec![s.x_axis.bucket_count(), s.legend_axis.bucket_count(), 6]
    );
    assert!(request.targets_current_view());
}

#[test]
fn test_change_groups_rejects_invalid() {
    let c = controller();
    let s = state(1.0, false);
    for groups in [None, Some(0), Some(-3)] {
        let err = c.next_state(&s, Command::ChangeGroups(groups)).unwrap_err();
        assert!(err.is_user_input());
        assert_eq!(err.user_message(), "Illegal group count");
    }

    let max = c.config().max_bucket_count as i64;
    for groups in [max + 1, 5000, i64::MAX] {
        let err = c.next_state(&s, Command::ChangeGroups(Some(groups))).unwrap_err();
        assert!(err.is_user_input());
        assert_eq!(err.user_message(), "Number of groups must be between 1 and 40");
    }
}

#[test]
fn test_change_groups_accepts_max() {
    let c = controller();
    let s = state(1.0, false);
    let max = c.config().max_bucket_count;
    let t = c
        .next_state(&s, Command::ChangeGroups(Some(max as i64)))
        .unwrap();
    assert_eq!(t.state.shape.bucket_count, max);
    assert_eq!(t.request.unwrap().bucket_counts[2], max);
}

#[test]
fn test_choose_buckets_with_cache_is_local() {
    let mut s = state(1.0, false);
    s.data = Some(std::sync::Arc::new(heatmap(10, &[5, 5, 5])));
    let t = controller().next_state(&s, Command::ChooseBuckets(4)).unwrap();
    assert!(t.request.is_none());
    assert!(t.redraw);
    assert_eq!(t.state.x_axis.bucket_count(), 4);
    assert!(t.state.has_data());
}

#[test]
fn test_choose_buckets_without_cache_refreshes() {
    let s = state(1.0, false);
    let t = controller().next_state(&s, Command::ChooseBuckets(7)).unwrap();
    assert_eq!(t.request.unwrap().bucket_counts, vec![7, 4, 3]);
}

#[test]
fn test_choose_buckets_out_of_range() {
    let c = controller();
    let s = state(1.0, false);
    assert!(c.next_state(&s, Command::ChooseBuckets(0)).is_err());
    assert!(c.next_state(&s, Command::ChooseBuckets(41)).is_err());
    assert!(c.next_state(&s, Command::ChooseBuckets(40)).is_ok());
}

#[test]
fn test_swap_axes() {
    let c = controller();
    let s = state(0.5, false);
    let t = c.next_state(&s, Command::SwapAxes).unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.columns, vec![legend_column(), x_column(), group_column()]);
    assert_eq!(
        request.bucket_counts,
        vec![4, s.default_buckets(c.config()), 3]
    );
    assert!(request.options.exact);
    assert_eq!(t.state.x_axis.column(), &legend_column());
    assert_eq!(t.state.legend_axis.column(), &x_column());
    assert_eq!(t.state.shape, s.shape);
}

#[test]
fn test_heatmap_opens_new_page() {
    let c = controller();
    let s = state(0.5, false);
    let t = c.next_state(&s, Command::Heatmap).unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.chart_kind, ChartKind::TrellisHeatmap);
    assert!(!request.options.reuse_page);
    assert!(request.options.exact);
    assert_eq!(request.bucket_counts[1..], [4, 3]);
}

#[test]
fn test_table_orders_rows() {
    let s = state(1.0, false);
    let t = controller().next_state(&s, Command::Table).unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.chart_kind, ChartKind::Table);
    assert!(request.options.reuse_page);
    let order = request.order.unwrap();
    let names: Vec<&str> = order.0.iter().map(|o| o.column_description.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "G"]);
    assert!(order.0.iter().all(|o| o.is_ascending));
    assert_eq!(request.row_limit, Some(20));
}

#[test]
fn test_exact_uses_default_buckets() {
    let c = controller();
    let s = state(0.1, false);
    let t = c.next_state(&s, Command::Exact).unwrap();
    let request = t.request.unwrap();
    assert!(request.options.exact);
    assert_eq!(request.bucket_counts[0], s.default_buckets(c.config()));
    assert!(t.state.is_exact());
}

#[test]
fn test_resize_is_local() {
    let s = state(1.0, false);
    let t = controller()
        .next_state(&s, Command::Resize(PageSize::new(500.0, 400.0)))
        .unwrap();
    assert!(t.request.is_none());
    assert!(t.redraw);
    assert_eq!(t.state.shape.bucket_count, 3);
    assert!(t.state.shape.size.width < s.shape.size.width);
}

#[test]
fn test_legend_filter_inverted_selection() {
    // pixels [0, 100] map to values [0, 100]
    let axis = x_axis(10);
    let filter = ViewController::legend_filter(&axis, 50.0, 10.0, 100.0, false).unwrap();
    assert_eq!(filter.min, 10.0);
    assert_eq!(filter.max, 50.0);
    assert_eq!(filter.cd, x_column());
}

#[test]
fn test_legend_filter_unloaded_axis() {
    let axis = trellis_view::AxisDescriptor::unloaded(x_column(), 10);
    let err = ViewController::legend_filter(&axis, 50.0, 10.0, 100.0, false).unwrap_err();
    assert_eq!(err.user_message(), "No data selected");
}

#[test]
fn test_group_filter_spans_panels() {
    let filter = ViewController::group_filter(&group_axis(3), 2, 1, true).unwrap();
    assert_eq!(filter.min, 1.0);
    assert_eq!(filter.max, 3.0);
    assert!(filter.complement);
    assert_eq!(filter.cd, group_column());
}

#[test]
fn test_filter_request() {
    let s = state(1.0, false);
    let filter = ViewController::range_filter(&s.x_axis, 0.0, 50.0, 100.0, false).unwrap();
    let t = controller().next_state(&s, Command::Filter(filter)).unwrap();
    let request = t.request.unwrap();
    assert_eq!(request.chart_kind, ChartKind::Trellis2DHistogram);
    assert!(!request.options.reuse_page);
    assert_eq!(request.bucket_counts, vec![0, 0, 0]);
    assert_eq!(request.title.as_deref(), Some("Filtered on Alpha"));
    assert!(!request.targets_current_view());
}
