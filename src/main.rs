mod cli;

use scenefetch::{config, Queue, Site};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "scenefetch=trace,scenefetch_lftp=debug".to_string()
        } else {
            "scenefetch=info,scenefetch_lftp=info".to_string()
        }
    });

    // Scripts go to stdout in dry-run mode, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    if cli.test {
        return validate_config(&config);
    }

    for site in config.compile()? {
        let name = site.name.clone();
        run_site(Arc::new(site), &cli).with_context(|| format!("Site '{}' failed", name))?;
    }

    Ok(())
}

fn run_site(site: Arc<Site>, cli: &Cli) -> Result<()> {
    tracing::info!("Listing {} on {}", site.dir, site.name);
    let entries = site.client.list(&site.name, &site.dir)?;

    let queue = Queue::new(Arc::clone(&site), entries, Utc::now());
    let script = queue.script();

    if cli.dry_run {
        if !cli.quiet {
            for item in queue.items() {
                println!("# {}", item);
            }
        }
        print!("{}", script);
        return Ok(());
    }

    if script.is_empty() {
        tracing::info!("Nothing to transfer from {}", site.name);
        return Ok(());
    }

    site.client.run(&script)?;
    queue.run_post_command()?;

    Ok(())
}

fn validate_config(config: &config::Config) -> Result<()> {
    let sites = config.compile()?;

    println!("✓ Configuration is valid");
    println!("  Sites: {}", sites.len());
    for site in &sites {
        println!(
            "    {}: dir={} parser={} local_dir={} deduplicate={}",
            site.name, site.dir, site.parser, site.local_dir, site.deduplicate
        );
    }

    let mut clients: Vec<&str> = sites.iter().map(|s| s.client.path.as_str()).collect();
    clients.sort_unstable();
    clients.dedup();
    for path in clients {
        let tool = scenefetch_lftp::check_tool(path);
        if !tool.available {
            tracing::warn!("Transfer tool not available: {}", path);
        }
    }

    Ok(())
}
