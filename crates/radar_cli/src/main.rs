use anyhow::Context;
use clap::Parser;
use chrono::Utc;
use radar_core::dashboard::list_label;
use radar_core::freshness::assess;
use radar_core::{DashboardConfig, DataStoreReader};
use radar_web::{create_app, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

mod logging;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_value = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // a trailing number without a unit is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| format!("Duration too large: {}", s))?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "News monitoring dashboard", long_about = None)]
pub struct Cli {
    /// Directory holding articles.json and latest_update.json
    #[arg(long, env = "RADAR_DATA_DIR", default_value = radar_core::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// How long loaded data is reused before the files are read again (e.g. 60s, 5m)
    #[arg(long, default_value = "60s")]
    cache_ttl: HumanDuration,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },
    /// Print the current update status and article list
    Status,
}

async fn serve(config: DashboardConfig, bind: SocketAddr) -> anyhow::Result<()> {
    if let Err(e) = tokio::fs::create_dir_all(config.data_dir()).await {
        warn!("⚠️ Could not create data directory {}: {}", config.data_dir().display(), e);
    }

    let app = create_app(AppState::new(&config)).await;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!("📰 Dashboard listening on http://{} (data: {})", bind, config.data_dir().display());
    axum::serve(listener, app).await?;
    Ok(())
}

async fn print_status(config: DashboardConfig) {
    let reader = DataStoreReader::from_config(&config);
    let articles = reader.load_articles().await;
    let status = reader.load_update_status().await;
    let report = assess(&status.value, Utc::now());

    println!("{} · {} (last update {})", report.freshness.label(), status.value.status, status.value.last_update);
    println!("Processed in total: {}", status.value.total_articles_today);
    for diagnostic in [articles.diagnostic, status.diagnostic, report.diagnostic].into_iter().flatten() {
        eprintln!("⚠️ {}", diagnostic);
    }
    println!("Articles ({}):", articles.value.articles.len());
    for article in &articles.value.articles {
        println!("  {}  {}", article.id, list_label(article));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = DashboardConfig::new(cli.data_dir).with_cache_ttl(cli.cache_ttl.0);

    match cli.command {
        Commands::Serve { bind } => serve(config, bind).await?,
        Commands::Status => print_status(config).await,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("60s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(60));
        assert_eq!("1m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(60));
        assert_eq!("1h15m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(4530));
        assert_eq!("90".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("m".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        assert!("9999999999999999999h".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s1s".parse::<HumanDuration>().is_err());
        assert!("99999999999999999999".parse::<HumanDuration>().is_err());
        assert!(Cli::try_parse_from(["radar", "--cache-ttl", "9999999999999999999h", "status"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["radar", "serve"]).unwrap();
        assert_eq!(cli.cache_ttl.0, Duration::from_secs(60));
        assert!(!cli.verbose);
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.port(), 8501),
            Commands::Status => panic!("expected serve"),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from(["radar", "--data-dir", "/tmp/radar", "--cache-ttl", "5m", "-v", "status"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/radar"));
        assert_eq!(cli.cache_ttl.0, Duration::from_secs(300));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }
}
