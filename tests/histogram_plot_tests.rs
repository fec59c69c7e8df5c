mod common;

use common::*;
use trellis_view::data_types::Heatmap;
use trellis_view::layout::PageSize;
use trellis_view::plot_types::{Histogram2DPlot, PanelPlot};

fn plot_with(buckets: Vec<Vec<u64>>, rate: f64, relative: bool, max: u64) -> Histogram2DPlot {
    let mut plot = Histogram2DPlot::new(PageSize::new(200.0, 100.0));
    let total = buckets.iter().flatten().sum();
    plot.set_data(
        Heatmap {
            buckets,
            missing_data: 0,
            total_size: total,
        },
        &x_axis(2),
        rate,
        relative,
        &schema(),
        max,
    );
    plot.draw();
    plot
}

#[test]
fn test_bars_are_stacked() {
    let plot = plot_with(vec![vec![10, 30], vec![0, 50]], 1.0, false, 50);
    let bars = plot.bars();
    // the empty box is skipped
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].height, 20.0);
    assert_eq!(bars[1].y + bars[1].height, bars[0].y);
    assert_eq!(bars[2].x, 100.0);
    assert_eq!(bars[2].height, 100.0);
    assert_eq!(plot.x_label(), "Alpha");
}

#[test]
fn test_sampled_counts_are_extrapolated() {
    let plot = plot_with(vec![vec![10, 0], vec![5, 0]], 0.5, false, 10);
    assert_eq!(plot.y_scale().domain(), (0.0, 20.0));
    // 10 sampled rows stand for 20
    assert_eq!(plot.bars()[0].height, 100.0);
}

#[test]
fn test_relative_columns_fill_panel() {
    let plot = plot_with(vec![vec![1, 3], vec![50, 50]], 1.0, true, 100);
    let column_heights: Vec<f64> = [0, 1]
        .iter()
        .map(|&x| {
            plot.bars()
                .iter()
                .filter(|b| b.x_index == x)
                .map(|b| b.height)
                .sum()
        })
        .collect();
    assert_eq!(column_heights, vec![100.0, 100.0]);
}

#[test]
fn test_box_info() {
    let plot = plot_with(vec![vec![10, 30], vec![0, 50]], 1.0, false, 50);
    let info = plot.box_info(50.0, 25.0).unwrap();
    assert_eq!(info.x_index, 0);
    assert_eq!(info.y_index, 1);
    assert_eq!(info.count, 30);
    assert_eq!(info.count_below, 40);
    assert_eq!(info.column_total, 40);
    assert_eq!(info.fraction(), 0.75);

    // above the stack
    let above = plot.box_info(50.0, 45.0).unwrap();
    assert_eq!(above.y_index, 2);
    assert_eq!(above.count, 0);

    assert!(plot.box_info(250.0, 10.0).is_none());
    assert!(plot.box_info(-1.0, 10.0).is_none());
}

#[test]
fn test_empty_max_keeps_scale_usable() {
    let plot = plot_with(vec![vec![0, 0]], 1.0, false, 0);
    assert_eq!(plot.y_scale().domain(), (0.0, 1.0));
    assert!(plot.bars().is_empty());
}

#[test]
fn test_resize_rescales() {
    let mut plot = plot_with(vec![vec![10, 0], vec![10, 0]], 1.0, false, 10);
    plot.set_size(PageSize::new(100.0, 50.0));
    plot.draw();
    assert_eq!(plot.bars()[1].x, 50.0);
    assert_eq!(plot.bars()[0].height, 50.0);
}
