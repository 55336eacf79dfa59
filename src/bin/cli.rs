//! Tally CLI
//!
//! Command-line client for a running Tally API:
//! - List orders
//! - Show aggregates, KPIs and real-time data
//! - Check health
//! - Print a default config file

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tally::client::{ClientError, DashboardClient};
use tally::config::{generate_default_config, Config};
use tally::display::{format_percent, group_thousands};

#[derive(Parser)]
#[command(name = "tally-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: from config or environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

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
    /// List the order catalog
    Orders {
        /// Show only the first N orders
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the latest aggregate snapshot
    Aggregates,

    /// Show server health
    Health,

    /// Show KPI panel and engineering metrics
    Metrics,

    /// Show the clock, pipeline chart and real-time series
    Realtime,

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

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut client_config = Config::load_from(cli.config.as_deref())?.client;
    if let Some(url) = cli.api_url.clone() {
        client_config.base_url = Some(url);
    }
    let client = DashboardClient::new(&client_config)?;

    if let Err(e) = run(&cli, &client).await {
        eprintln!("{}", e);
        if let ClientError::Request(_) = e {
            eprintln!();
            eprintln!("Cannot reach the Tally API at {}", client.base_url());
            eprintln!("Make sure the server is running:");
            eprintln!("  cargo run --bin tally-api");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli, client: &DashboardClient) -> Result<(), ClientError> {
    match &cli.command {
        Commands::Orders { limit } => {
            let data = client.get_orders().await?;
            if cli.format == OutputFormat::Json {
                print_json(&data);
                return Ok(());
            }

            let shown = limit.unwrap_or(data.total).min(data.orders.len());
            println!("{:<6} {:<28} {:>12}", "ID", "Customer", "Amount");
            println!("{}", "-".repeat(48));
            for order in &data.orders[..shown] {
                println!(
                    "{:<6} {:<28} {:>12}",
                    order.id,
                    order.customer_name,
                    format!("${}", order.amount_usd)
                );
            }
            println!();
            println!("{} of {} orders", shown, data.total);
        }

        Commands::Aggregates => {
            let data = client.get_aggregates().await?;
            if cli.format == OutputFormat::Json {
                print_json(&data);
                return Ok(());
            }

            let summary = &data.snapshot.summary;
            println!("Aggregates (revision {})", data.revision);
            println!("Generated: {}", data.snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!();
            println!("  Total orders:    {}", summary.total_orders);
            println!("  Total revenue:   ${}", summary.total_revenue);
            println!("  Total customers: {}", summary.total_customers);
            println!("  Total products:  {}", summary.total_products);
            println!();
            println!("Performance:");
            for (name, value) in data.snapshot.performance.to_map() {
                println!("  {:<24} {}", name, value);
            }
        }

        Commands::Health => {
            let health = client.get_health().await?;
            if cli.format == OutputFormat::Json {
                print_json(&health);
                return Ok(());
            }

            println!("Tally v{}", health.version);
            println!();
            println!("API Status: {}", health.status);
            println!("WebSocket connections: {}", health.ws_connections);
            println!(
                "Last aggregate refresh: {}",
                health.last_aggregate_refresh.format("%H:%M:%S")
            );
            println!();
            println!("Uptime: {}", format_duration(health.uptime_seconds));
        }

        Commands::Metrics => {
            let data = client.get_dashboard_metrics().await?;
            if cli.format == OutputFormat::Json {
                print_json(&data);
                return Ok(());
            }

            let display = &data.display;
            println!("{:<20} {}", "Sales", display.sales_value);
            println!("{:<20} {}", "Orders", display.order_count);
            println!("{:<20} {}", "Avg order value", display.avg_order_value);
            println!("{:<20} {}", "Health", display.health_value);
            println!("{:<20} {}", "Throughput", display.throughput_value);
            println!("{:<20} {}", "Latency", display.latency_value);
            println!("{:<20} {}", "Error rate", display.error_rate_value);
            println!();
            println!("Gauges:");
            println!("  Pipeline health: {}", format_percent(data.gauges.pipeline_health));
            println!("  Data quality:    {}", format_percent(data.gauges.data_quality));
            println!();
            let eng = &data.engineering;
            println!("Engineering:");
            println!("  Data velocity:   {}/s", group_thousands(eng.data_velocity));
            println!("  Throughput:      {}", group_thousands(eng.throughput));
            println!("  Latency:         {:.0}ms", eng.latency);
            println!("  Error rate:      {}", format_percent(eng.error_rate));
        }

        Commands::Realtime => {
            let data = client.get_real_time_data().await?;
            if cli.format == OutputFormat::Json {
                print_json(&data);
                return Ok(());
            }

            println!("Server time: {}", data.now.format("%H:%M:%S"));
            println!();
            print!("{:<16}", "Stage");
            for series in &data.pipeline.series {
                print!(" {:>12}", series.name);
            }
            println!();
            println!("{}", "-".repeat(16 + 13 * data.pipeline.series.len()));
            for (i, stage) in data.pipeline.stages.iter().enumerate() {
                print!("{:<16}", stage);
                for series in &data.pipeline.series {
                    match series.points.get(i) {
                        Some(v) => print!(" {:>12.1}", v),
                        None => print!(" {:>12}", "-"),
                    }
                }
                println!();
            }
            println!();
            println!("Real-time series (latest of {}):", data.series.data_quality.len());
            print_latest("Data quality", &data.series.data_quality);
            print_latest("Processing", &data.series.processing_efficiency);
            print_latest("System uptime", &data.series.system_uptime);
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to encode response: {}", e),
    }
}

fn print_latest(label: &str, points: &[f64]) {
    match points.last() {
        Some(v) => println!("  {:<16} {}", label, format_percent(*v)),
        None => println!("  {:<16} -", label),
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
