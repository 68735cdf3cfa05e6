//! Dashboard Composition
//!
//! Binds the widget catalog to a stats fetcher. Widgets are independent:
//! each activation is its own task and nothing flows between them.

pub mod page;

pub use page::{DashboardPage, WidgetFragment};

use futures_util::future::join_all;
use std::sync::Arc;

use crate::pipeline::StatsFetcher;
use crate::widget::{Catalog, WidgetHandle, WidgetSpec, WidgetState};

/// The booking dashboard: a catalog of widgets plus where to fetch from
#[derive(Clone)]
pub struct Dashboard {
    fetcher: Arc<dyn StatsFetcher>,
    catalog: Arc<Catalog>,
}

impl Dashboard {
    pub fn new(fetcher: Arc<dyn StatsFetcher>, catalog: Catalog) -> Self {
        Self {
            fetcher,
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a widget's single fetch in the background
    pub fn activate(&self, id: &str) -> Option<WidgetHandle> {
        let spec = self.catalog.get(id)?;
        Some(WidgetHandle::activate(
            Arc::clone(&self.fetcher),
            spec.source.clone(),
        ))
    }

    /// Activate a widget and wait for it to settle
    ///
    /// `None` only for unknown ids. If the activation task dies the widget
    /// still resolves, to its fallback data.
    pub async fn resolve(&self, id: &str) -> Option<WidgetState> {
        let spec = self.catalog.get(id)?;
        let handle = self.activate(id)?;

        let state = match handle.resolved().await {
            Some(state) => state,
            None => {
                tracing::warn!(widget = %id, "Widget task ended without resolving");
                WidgetState::Fallback(spec.source.fallback_data.clone())
            }
        };
        Some(state)
    }

    /// Resolve every widget concurrently, in catalog order
    pub async fn resolve_all(&self) -> Vec<(&WidgetSpec, WidgetState)> {
        let states = join_all(self.catalog.iter().map(|spec| self.resolve(&spec.id))).await;

        self.catalog
            .iter()
            .zip(states)
            .map(|(spec, state)| {
                let state = state.unwrap_or_else(|| WidgetState::Fallback(spec.source.fallback_data.clone()));
                (spec, state)
            })
            .collect()
    }

    /// Live page: spinners that load their own fragments
    pub fn render_shell(&self) -> DashboardPage {
        page::page_shell(self.catalog.iter())
    }

    /// Resolved chart fragment for one widget
    pub async fn render_widget(&self, id: &str) -> Option<WidgetFragment> {
        let spec = self.catalog.get(id)?;
        let state = self.resolve(id).await?;
        Some(WidgetFragment {
            body: page::widget_body(spec, &state),
        })
    }

    /// Fully resolved standalone page
    pub async fn render_static(&self) -> DashboardPage {
        let resolved = self.resolve_all().await;
        page::static_page(resolved.iter().map(|(spec, state)| (*spec, state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::ScriptedFetcher;
    use crate::pipeline::{ChartPoint, Origin};
    use askama::Template;
    use std::time::{Duration, Instant};

    fn dashboard(fetcher: ScriptedFetcher) -> Dashboard {
        Dashboard::new(Arc::new(fetcher), Catalog::default())
    }

    #[tokio::test]
    async fn test_resolve_unknown_widget() {
        let dash = dashboard(ScriptedFetcher::new());
        assert!(dash.resolve("referrer").await.is_none());
        assert!(dash.activate("referrer").is_none());
        assert!(dash.render_widget("referrer").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_all_mixed_sources() {
        let fetcher = ScriptedFetcher::new()
            .body(
                "/api/daily_stats",
                r#"{"success": true, "data": [
                    {"date": "2024-08-02", "bookings": "92000"},
                    {"date": "2024-08-01", "bookings": 85000}
                ]}"#,
            )
            .body("/api/os_stats", r#"{"success": false}"#)
            .failing("/api/browser_stats");
        let dash = dashboard(fetcher);

        let resolved = dash.resolve_all().await;
        let ids: Vec<&str> = resolved.iter().map(|(spec, _)| spec.id.as_str()).collect();
        assert_eq!(ids, vec!["browser", "os", "daily"]);

        let (browser, browser_state) = &resolved[0];
        assert_eq!(browser_state, &WidgetState::Fallback(browser.source.fallback_data.clone()));

        let (_, os_state) = &resolved[1];
        assert_eq!(os_state.origin(), Some(Origin::Fallback));

        let (_, daily_state) = &resolved[2];
        assert_eq!(
            daily_state,
            &WidgetState::Ready(vec![ChartPoint::new("Aug 1", 85000), ChartPoint::new("Aug 2", 92000)])
        );
    }

    #[tokio::test]
    async fn test_widgets_fetch_concurrently() {
        let fetcher = Arc::new(ScriptedFetcher::new().delayed(Duration::from_millis(100)));
        let dash = Dashboard::new(fetcher.clone(), Catalog::default());

        let started = Instant::now();
        let resolved = dash.resolve_all().await;

        assert_eq!(resolved.len(), 3);
        assert_eq!(fetcher.calls(), 3);
        assert!(started.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_render_widget_fragment() {
        let fetcher = ScriptedFetcher::new().body(
            "/api/os_stats",
            r#"{"success": true, "data": [{"name": "WINDOWS", "value": "3200"}, {"name": "IOS", "value": 443}]}"#,
        );
        let dash = dashboard(fetcher);

        let html = dash.render_widget("os").await.unwrap().render().unwrap();

        assert!(html.contains(">3,643</text>"));
        assert!(html.contains("#0078D4"));
        assert!(!html.contains("spinner"));
    }

    #[tokio::test]
    async fn test_render_static_page_never_empty() {
        let dash = dashboard(ScriptedFetcher::new());

        let html = dash.render_static().await.render().unwrap();

        assert!(html.contains(">7,443</text>"));
        assert!(html.contains(">Aug 5</text>"));
        assert!(!html.contains("spinner\""));
    }
}
