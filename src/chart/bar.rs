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

use crate::chart::Anchor;
use crate::chart::BASELINE;
use crate::chart::CHART_HEIGHT;
use crate::chart::Chart;
use crate::chart::ChartView;
use crate::chart::LABEL_Y;
use crate::chart::PAGE_SIZE;
use crate::chart::PLOT_HEIGHT;
use crate::chart::Primitive;
use crate::chart::Stroke;
use crate::chart::TOP_PADDING;
use crate::chart::paginate;
use crate::chart::px;
use crate::format::format_xp;
use crate::path::terminal_segment;
use crate::xp::XpBuckets;

pub const NO_XP_DATA: &str = "No XP data available.";

/// Horizontal space taken by one bar and its gap.
const SLOT_WIDTH: f64 = 60.0;
const BAR_WIDTH: f64 = 40.0;
const FIRST_BAR_X: f64 = 30.0;
const AXIS_X: f64 = 20.0;

/// Renders one page of XP-per-path bars.
///
/// Bar heights are relative to the largest value in the whole data set, not
/// just the visible page, so bars can be compared across pages.
pub fn render(buckets: &XpBuckets, page: usize) -> ChartView {
    if buckets.is_empty() {
        return ChartView::Placeholder(NO_XP_DATA.to_string());
    }
    let entries: Vec<(&String, f64)> = buckets.iter().map(|(k, v)| (k, *v)).collect();
    let max = entries
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max);
    let (entries, pager) = paginate(&entries, page);

    let width = PAGE_SIZE as f64 * SLOT_WIDTH + 50.0;
    let mut primitives = vec![
        Primitive::Line {
            x1: AXIS_X,
            y1: TOP_PADDING,
            x2: AXIS_X,
            y2: BASELINE,
            stroke: Stroke::Axis,
        },
        Primitive::Line {
            x1: AXIS_X,
            y1: BASELINE,
            x2: width - AXIS_X,
            y2: BASELINE,
            stroke: Stroke::Axis,
        },
    ];
    for (i, (path, value)) in entries.iter().enumerate() {
        let height = px(bar_height(*value, max));
        let x = i as f64 * SLOT_WIDTH + FIRST_BAR_X;
        let y = px(BASELINE - height);
        let center = x + BAR_WIDTH / 2.0;
        let formatted = format_xp(*value);
        primitives.push(Primitive::Rect {
            x,
            y,
            width: BAR_WIDTH,
            height,
            tooltip: format!("{path}: {formatted}"),
        });
        primitives.push(Primitive::Text {
            x: center,
            y: px(y - 5.0),
            content: formatted,
            anchor: Anchor::Middle,
            vertical: false,
        });
        primitives.push(Primitive::Text {
            x: center,
            y: LABEL_Y,
            content: terminal_segment(path).to_string(),
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

fn bar_height(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max).max(0.0) * PLOT_HEIGHT
    } else {
        0.0
    }
}
