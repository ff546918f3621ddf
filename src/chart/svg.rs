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

use maud::Markup;
use maud::html;

use crate::chart::Anchor;
use crate::chart::Chart;
use crate::chart::ChartView;
use crate::chart::Pager;
use crate::chart::Primitive;
use crate::chart::Stroke;

const ACCENT: &str = "#3B82F6";
const LABEL_FILL: &str = "#f3f4f6";
const FONT_SIZE: &str = "16";

/// Form actions posted by a chart's pagination buttons.
pub struct PagerActions {
    pub prev: &'static str,
    pub next: &'static str,
}

/// Renders a chart area: the SVG and its pagination controls, a
/// placeholder, or an error message. Without `actions` the controls are
/// left out.
pub fn chart_area(view: &ChartView, actions: Option<&PagerActions>) -> Markup {
    match view {
        ChartView::Placeholder(message) => html! {
            p.placeholder { (message) }
        },
        ChartView::Failed(message) => html! {
            p.error { "Error: " (message) }
        },
        ChartView::Drawn(chart) => html! {
            (svg(chart))
            @if let Some(actions) = actions {
                (pager_controls(&chart.pager, actions))
            }
        },
    }
}

pub fn svg(chart: &Chart) -> Markup {
    let view_box = format!("0 0 {} {}", chart.width, chart.height);
    // Shapes get an explicit closing tag: in HTML, a foreign element without
    // one swallows its siblings.
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="100%" height=(chart.height) viewBox=(view_box) preserveAspectRatio="xMidYMid meet" {
            @for primitive in &chart.primitives {
                (shape(primitive))
            }
        }
    }
}

fn shape(primitive: &Primitive) -> Markup {
    match primitive {
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => match stroke {
            Stroke::Axis => html! {
                line x1=(x1) y1=(y1) x2=(x2) y2=(y2) stroke="#000" {}
            },
            Stroke::Grid => html! {
                line x1=(x1) y1=(y1) x2=(x2) y2=(y2) stroke="#e5e7eb" stroke-dasharray="2,2" {}
            },
        },
        Primitive::Rect {
            x,
            y,
            width,
            height,
            tooltip,
        } => html! {
            rect x=(x) y=(y) width=(width) height=(height) fill=(ACCENT) rx="4" {
                title { (tooltip) }
            }
        },
        Primitive::Circle { cx, cy, r, tooltip } => html! {
            circle cx=(cx) cy=(cy) r=(r) fill=(ACCENT) cursor="pointer" {
                title { (tooltip) }
            }
        },
        Primitive::Text {
            x,
            y,
            content,
            anchor,
            vertical,
        } => {
            let anchor = match anchor {
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            if *vertical {
                let transform = format!("rotate(-90 {x} {y})");
                html! {
                    text x=(x) y=(y) text-anchor=(anchor) dominant-baseline="hanging" font-size=(FONT_SIZE) fill=(LABEL_FILL) transform=(transform) {
                        (content)
                    }
                }
            } else {
                html! {
                    text x=(x) y=(y) text-anchor=(anchor) font-size=(FONT_SIZE) fill=(LABEL_FILL) {
                        (content)
                    }
                }
            }
        }
        Primitive::Path { points } => {
            let d = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    let command = if i == 0 { 'M' } else { 'L' };
                    format!("{command}{x} {y}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            html! {
                path d=(d) stroke=(ACCENT) stroke-width="2" fill="none" {}
            }
        }
    }
}

fn pager_controls(pager: &Pager, actions: &PagerActions) -> Markup {
    html! {
        form.pager action="/" method="post" {
            button type="submit" name="action" value=(actions.prev) disabled[!pager.has_prev] {
                "< Prev"
            }
            span.page { (pager.page + 1) " / " (pager.page_count) }
            button type="submit" name="action" value=(actions.next) disabled[!pager.has_next] {
                "Next >"
            }
        }
    }
}
