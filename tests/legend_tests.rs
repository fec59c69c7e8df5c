mod common;

use common::*;
use trellis_view::plot_types::{HistogramLegendPlot, LegendPlot};

#[test]
fn test_legend_swatches() {
    let mut legend = HistogramLegendPlot::new(400.0);
    legend.set_data(&legend_axis(), false, &schema());
    legend.draw();

    let entries = legend.entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].label, "a");
    assert_eq!(entries[3].label, "d");
    assert_eq!(entries[2].x, 200.0);
    assert!(entries.iter().all(|e| e.width == 100.0));
    assert_eq!(legend.title(), "B");
    assert!(!legend.shows_missing());
}

#[test]
fn test_legend_highlight() {
    let mut legend = HistogramLegendPlot::new(400.0);
    legend.set_data(&legend_axis(), true, &schema());
    legend.draw();

    legend.highlight(Some(2));
    assert_eq!(legend.highlighted(), Some(2));
    let lit: Vec<usize> = legend
        .entries()
        .iter()
        .filter(|e| e.highlighted)
        .map(|e| e.index)
        .collect();
    assert_eq!(lit, vec![2]);

    // the missing-data pseudo bucket has no swatch
    legend.highlight(Some(4));
    assert!(legend.entries().iter().all(|e| !e.highlighted));

    legend.highlight(None);
    assert_eq!(legend.highlighted(), None);
    assert!(legend.shows_missing());
}

#[test]
fn test_highlight_survives_redraw() {
    let mut legend = HistogramLegendPlot::new(400.0);
    legend.set_data(&legend_axis(), false, &schema());
    legend.highlight(Some(1));
    legend.draw();
    assert!(legend.entries()[1].highlighted);
}

#[test]
fn test_legend_clear() {
    let mut legend = HistogramLegendPlot::new(400.0);
    legend.draw();
    assert!(legend.entries().is_empty());

    legend.set_data(&legend_axis(), false, &schema());
    legend.draw();
    legend.highlight(Some(0));
    legend.clear();
    assert!(legend.entries().is_empty());
    assert_eq!(legend.highlighted(), None);
    assert_eq!(legend.width(), 400.0);
}
