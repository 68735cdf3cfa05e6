//! Dashboard HTML
//!
//! Two page flavours share the same cards:
//! - the live shell, where every card starts as a spinner and a small script
//!   swaps in `/widgets/{id}` once (no polling)
//! - the static page, rendered with every widget already resolved
//!
//! Markup lives in `templates/dashboard.html` and `templates/widget/`.

use askama::Template;
use askama_web::WebTemplate;
use std::fmt;

use crate::chart::Chart;
use crate::widget::{Span, WidgetSpec, WidgetState};

const PAGE_TITLE: &str = "Booking Analytics";

/// Spinner shown while a widget is `Loading`
#[derive(Template)]
#[template(path = "widget/loading.html")]
pub struct LoadingPlaceholder {
    pub accent: String,
}

/// What sits inside a card
pub enum WidgetBody {
    Loading(LoadingPlaceholder),
    Chart(Chart),
}

impl fmt::Display for WidgetBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetBody::Loading(placeholder) => placeholder.render_into(f).map_err(|_| fmt::Error),
            WidgetBody::Chart(chart) => write!(f, "{chart}"),
        }
    }
}

/// Standalone card body, served as `/widgets/{id}`
#[derive(Template, WebTemplate)]
#[template(path = "widget/fragment.html")]
pub struct WidgetFragment {
    pub body: WidgetBody,
}

pub struct Card {
    pub id: String,
    pub title: String,
    pub accent: String,
    pub body: WidgetBody,
}

pub struct Row {
    /// Every card in the row is half width
    pub halves: bool,
    pub cards: Vec<Card>,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub title: &'static str,
    pub rows: Vec<Row>,
    /// Include the loader script
    pub live: bool,
}

pub fn loading_placeholder(spec: &WidgetSpec) -> LoadingPlaceholder {
    LoadingPlaceholder {
        accent: spec.accent.clone(),
    }
}

/// Card body for a widget in the given state
pub fn widget_body(spec: &WidgetSpec, state: &WidgetState) -> WidgetBody {
    match state.points() {
        None => WidgetBody::Loading(loading_placeholder(spec)),
        Some(points) => WidgetBody::Chart(Chart::new(points, spec.kind())),
    }
}

fn card(spec: &WidgetSpec, body: WidgetBody) -> Card {
    Card {
        id: spec.id.clone(),
        title: spec.title.clone(),
        accent: spec.accent.clone(),
        body,
    }
}

/// Group cards into rows: consecutive half-width cards pair up
fn rows<'a>(cards: impl Iterator<Item = (&'a WidgetSpec, WidgetBody)>) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    for (spec, body) in cards {
        let half = spec.span == Span::Half;
        let pairs_up = half && matches!(rows.last(), Some(row) if row.halves && row.cards.len() == 1);

        if pairs_up {
            if let Some(row) = rows.last_mut() {
                row.cards.push(card(spec, body));
            }
        } else {
            rows.push(Row {
                halves: half,
                cards: vec![card(spec, body)],
            });
        }
    }
    rows
}

/// Page where every card starts loading and fetches its own fragment
pub fn page_shell<'a>(widgets: impl Iterator<Item = &'a WidgetSpec>) -> DashboardPage {
    DashboardPage {
        title: PAGE_TITLE,
        rows: rows(widgets.map(|spec| (spec, WidgetBody::Loading(loading_placeholder(spec))))),
        live: true,
    }
}

/// Page with every widget already resolved
pub fn static_page<'a>(resolved: impl Iterator<Item = (&'a WidgetSpec, &'a WidgetState)>) -> DashboardPage {
    DashboardPage {
        title: PAGE_TITLE,
        rows: rows(resolved.map(|(spec, state)| (spec, widget_body(spec, state)))),
        live: false,
    }
}
