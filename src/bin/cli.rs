//! Booking Dashboard CLI
//!
//! Command-line access to the dashboard pipeline without running the server:
//! - Resolve a widget and print its points
//! - Render a widget's chart or the whole page to a file
//! - Generate a default config file

use anyhow::{bail, Context};
use askama::Template;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use booking_dashboard::chart::format_thousands;
use booking_dashboard::config::{generate_default_config, Config};
use booking_dashboard::pipeline::{total, ChartKind, HttpFetcher};
use booking_dashboard::widget::{Catalog, WidgetState};
use booking_dashboard::Dashboard;

#[derive(Parser)]
#[command(name = "booking-dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Booking statistics from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Stats backend URL (default: from config, then http://localhost:5000)
    #[arg(long, global = true)]
    pub upstream: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a widget and print its points
    Resolve {
        /// Widget id (browser, os, daily)
        widget: String,
    },

    /// Render a widget's chart markup
    Render {
        /// Widget id (browser, os, daily)
        widget: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the whole dashboard as a static HTML page
    Page {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available widgets
    Widgets,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_default();
    config.logging.init();

    let upstream = cli
        .upstream
        .clone()
        .unwrap_or_else(|| config.upstream.base_url.clone());
    let dashboard = Dashboard::new(Arc::new(HttpFetcher::new(upstream)), Catalog::default());

    match cli.command {
        Commands::Resolve { widget } => {
            let Some(spec) = dashboard.catalog().get(&widget) else {
                bail!(unknown_widget(&dashboard, &widget));
            };
            let state = dashboard
                .resolve(&widget)
                .await
                .with_context(|| format!("Widget '{}' did not resolve", widget))?;

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&state)?);
                }
                OutputFormat::Table => print_points(&spec.title, &state),
            }
        }

        Commands::Render { widget, output } => {
            let fragment = match dashboard.render_widget(&widget).await {
                Some(fragment) => fragment,
                None => bail!(unknown_widget(&dashboard, &widget)),
            };
            write_output(output.as_deref(), &fragment.render()?)?;
        }

        Commands::Page { output } => {
            let page = dashboard.render_static().await;
            write_output(output.as_deref(), &page.render()?)?;
        }

        Commands::Widgets => match cli.format {
            OutputFormat::Json => {
                let widgets: Vec<_> = dashboard
                    .catalog()
                    .iter()
                    .map(|spec| {
                        serde_json::json!({
                            "id": spec.id,
                            "title": spec.title,
                            "kind": spec.kind(),
                            "endpoint": spec.source.endpoint,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&widgets)?);
            }
            OutputFormat::Table => {
                println!("{:<10} {:<24} {:<6} {}", "ID", "Title", "Kind", "Endpoint");
                println!("{}", "-".repeat(60));
                for spec in dashboard.catalog().iter() {
                    println!(
                        "{:<10} {:<24} {:<6} {}",
                        spec.id,
                        spec.title,
                        kind_label(spec.kind()),
                        spec.source.endpoint
                    );
                }
            }
        },

        Commands::Config { output } => {
            write_output(output.as_deref(), &generate_default_config())?;
        }
    }

    Ok(())
}

fn unknown_widget(dashboard: &Dashboard, id: &str) -> String {
    format!(
        "Unknown widget '{}'. Available: {}",
        id,
        dashboard.catalog().ids().join(", ")
    )
}

/// Same spelling as the `kind` field in JSON output
fn kind_label(kind: ChartKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|value| value.as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn print_points(title: &str, state: &WidgetState) {
    let points = state.points().unwrap_or_default();

    println!("{}", title);
    if let Some(origin) = state.origin() {
        println!("Source: {:?}", origin);
    }
    println!();
    println!("{:<16} {:>12} {}", "Label", "Value", "Color");
    println!("{}", "-".repeat(40));
    for point in points {
        println!(
            "{:<16} {:>12} {}",
            point.label,
            format_thousands(point.value),
            point.color_hint.as_deref().unwrap_or("-")
        );
    }
    println!("{}", "-".repeat(40));
    println!("{:<16} {:>12}", "Total", format_thousands(total(points)));
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Wrote {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["booking-dashboard-cli", "--format", "json", "widgets"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Widgets));

        let cli = Cli::try_parse_from(["booking-dashboard-cli", "widgets"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);

        assert!(Cli::try_parse_from(["booking-dashboard-cli", "--format", "csv", "widgets"]).is_err());
    }

    #[test]
    fn test_kind_label_matches_json() {
        assert_eq!(kind_label(ChartKind::Area), "area");
        assert_eq!(kind_label(ChartKind::Pie), "pie");
        assert_eq!(
            serde_json::json!({ "kind": ChartKind::Area })["kind"],
            kind_label(ChartKind::Area)
        );
    }
}
