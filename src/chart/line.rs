// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::attempts::AttemptCounts;
use crate::chart::Anchor;
use crate::chart::BASELINE;
use crate::chart::CHART_HEIGHT;
use crate::chart::Chart;
use crate::chart::ChartView;
use crate::chart::LABEL_Y;
use crate::chart::PLOT_HEIGHT;
use crate::chart::Primitive;
use crate::chart::Stroke;
use crate::chart::TOP_PADDING;
use crate::chart::paginate;
use crate::chart::px;

pub const NO_PROGRESS_DATA: &str = "No progress data available.";
pub const NO_VALID_PROGRESS_DATA: &str = "No valid progress data available.";

const MIN_WIDTH: f64 = 600.0;
const POINT_SPACING: f64 = 50.0;
/// Distance between the plot and the left and right edges.
const MARGIN: f64 = 50.0;
const POINT_RADIUS: f64 = 6.0;
const GRID_LINES: usize = 5;

/// Renders one page of attempts-to-success as a line chart.
///
/// Unlike the bar chart, the vertical scale only considers the visible page.
pub fn render(counts: &AttemptCounts, page: usize) -> ChartView {
    if counts.is_empty() {
        return ChartView::Placeholder(NO_VALID_PROGRESS_DATA.to_string());
    }
    let entries: Vec<(&String, usize)> = counts.iter().map(|(k, v)| (k, *v)).collect();
    let (entries, pager) = paginate(&entries, page);

    let n = entries.len();
    let max_attempts = entries.iter().map(|(_, count)| *count).max().unwrap_or(1).max(1);
    let width = MIN_WIDTH.max(n as f64 * POINT_SPACING);
    let scale_x = |i: usize| {
        if n > 1 {
            px(MARGIN + i as f64 * (width - 2.0 * MARGIN) / (n - 1) as f64)
        } else {
            MARGIN
        }
    };
    let scale_y = |value: usize| px(BASELINE - value as f64 / max_attempts as f64 * PLOT_HEIGHT);

    let mut primitives = vec![
        Primitive::Line {
            x1: MARGIN,
            y1: TOP_PADDING,
            x2: MARGIN,
            y2: BASELINE,
            stroke: Stroke::Axis,
        },
        Primitive::Line {
            x1: MARGIN,
            y1: BASELINE,
            x2: width - MARGIN,
            y2: BASELINE,
            stroke: Stroke::Axis,
        },
    ];

    let step = max_attempts.div_ceil(GRID_LINES).max(1);
    for value in (0..=max_attempts).step_by(step) {
        let y = scale_y(value);
        primitives.push(Primitive::Text {
            x: MARGIN - 5.0,
            y: y + 4.0,
            content: value.to_string(),
            anchor: Anchor::End,
            vertical: false,
        });
        primitives.push(Primitive::Line {
            x1: MARGIN,
            y1: y,
            x2: width - MARGIN,
            y2: y,
            stroke: Stroke::Grid,
        });
    }

    let points: Vec<(f64, f64)> = entries
        .iter()
        .enumerate()
        .map(|(i, (_, attempts))| (scale_x(i), scale_y(*attempts)))
        .collect();
    primitives.push(Primitive::Path {
        points: points.clone(),
    });
    for ((segment, attempts), (x, y)) in entries.iter().zip(points) {
        primitives.push(Primitive::Circle {
            cx: x,
            cy: y,
            r: POINT_RADIUS,
            tooltip: tooltip(segment, *attempts),
        });
        primitives.push(Primitive::Text {
            x,
            y: LABEL_Y,
            content: segment.to_string(),
            anchor: Anchor::End,
            vertical: true,
        });
    }

    ChartView::Drawn(Chart {
        width,
        height: CHART_HEIGHT,
        primitives,
        pager,
    })
}

fn tooltip(segment: &str, attempts: usize) -> String {
    let noun = if attempts > 1 { "attempts" } else { "attempt" };
    format!("{segment}: {attempts} {noun}")
}
