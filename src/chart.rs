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

//! Charts are described as a flat list of drawable primitives, so the
//! renderers can be tested without a browser. The `svg` module turns a
//! description into markup.

pub mod bar;
pub mod line;
pub mod svg;

use serde::Serialize;

/// Entries shown per page, for both charts.
pub const PAGE_SIZE: usize = 10;

pub const CHART_HEIGHT: f64 = 250.0;
pub const TOP_PADDING: f64 = 30.0;
pub const BOTTOM_PADDING: f64 = 15.0;
pub const PLOT_HEIGHT: f64 = CHART_HEIGHT - TOP_PADDING - BOTTOM_PADDING;
/// The y coordinate of the horizontal axis.
pub const BASELINE: f64 = CHART_HEIGHT - BOTTOM_PADDING;
/// Where the rotated category labels are anchored.
pub const LABEL_Y: f64 = CHART_HEIGHT - 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    Axis,
    Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        tooltip: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        tooltip: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: Anchor,
        /// Rotated a quarter turn counter-clockwise around `(x, y)`.
        vertical: bool,
    },
    /// An open polyline through the given points.
    Path { points: Vec<(f64, f64)> },
}

/// Pagination state of a rendered chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pager {
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    pub pager: Pager,
}

/// What a chart area shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum ChartView {
    /// Nothing to draw. Not an error.
    Placeholder(String),
    /// The data could not be interpreted.
    Failed(String),
    Drawn(Chart),
}

#[cfg(test)]
impl ChartView {
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartView::Drawn(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Number of pages needed for `total` entries. An empty set still has one
/// (empty) page.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Returns the entries on `page`, clamping the page to the last one.
pub fn paginate<T>(items: &[T], page: usize) -> (&[T], Pager) {
    let page_count = page_count(items.len());
    let page = page.min(page_count - 1);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());
    let pager = Pager {
        page,
        page_count,
        has_prev: page > 0,
        has_next: end < items.len(),
    };
    (&items[start..end], pager)
}

/// Rounds a coordinate to hundredths of a pixel.
pub(crate) fn px(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
