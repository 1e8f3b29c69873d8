use anyhow::{Context, Result};
use clap::Parser;
use seeder::reconcile::SeedAction;
use seeder::{Catalogue, RunEvent, RunMode, SeederConfig};

#[derive(Parser, Debug)]
#[command(
    name = "kuma-seed",
    about = "Seed the built-in catalogue of HTTP test monitors into an Uptime Kuma database",
    long_about = "Seed the built-in catalogue of HTTP test monitors into an Uptime Kuma database.\n\n\
                  Monitors are matched by URL, so re-running only adds what is missing. \
                  Configure with KUMA_SEED_DB_PATH, KUMA_SEED_BASE_URL, KUMA_SEED_OWNER_ID \
                  and KUMA_SEED_DEFAULT_TIMEOUT."
)]
struct Cli {
    /// Delete every monitor under the base URL before seeding.
    #[arg(long)]
    clear: bool,

    /// Same as --clear.
    #[arg(long)]
    force: bool,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SeederConfig::from_env().context("load seeder configuration")?;
    run_seed(&config, RunMode::from_flags(cli.clear, cli.force))
}

fn run_seed(config: &SeederConfig, mode: RunMode) -> Result<()> {
    println!("Kuma Monitor Seeder");
    println!(
        "Database: {}  base URL: {}",
        config.db_path.display(),
        config.base_url
    );

    let report = seeder::run(config, Catalogue::builtin(), mode, |event| {
        println!("{}", render_event(&event));
    })?;

    println!(
        "Seed complete: inserted={} skipped={}",
        report.seed.inserted, report.seed.skipped
    );
    println!("Total monitors in database: {}", report.total);
    Ok(())
}

fn render_event(event: &RunEvent<'_>) -> String {
    match event {
        RunEvent::Cleared { deleted } => format!("Cleared {deleted} existing monitor(s)"),
        RunEvent::Seeded(outcome) => {
            let verb = match outcome.action {
                SeedAction::Inserted => "inserted",
                SeedAction::Skipped => "skipped ",
            };
            format!(
                "  {verb} {} -> {} (id {})",
                outcome.name, outcome.url, outcome.monitor_id
            )
        }
    }
}
