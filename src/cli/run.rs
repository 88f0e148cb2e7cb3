use crate::cli::args::{BuildArgs, Cli, Commands};
use crate::core::io::DatasetCache;
use crate::deck::build::{self, BuildConfig};
use crate::report;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;
use std::time::{Duration, Instant};

const DEFAULT_TITLE: &str = "New York Housing";
const MIN_CONTAINER: f64 = 200.0;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => build(args),
    }
}

fn build(args: BuildArgs) -> Result<()> {
    let t0 = Instant::now();

    stage("preflight", || {
        if args.input.as_os_str() == "-" {
            bail!("stdin is not supported; provide a CSV file path");
        }
        if !args.input.is_file() {
            bail!("input file not found: {}", args.input.display());
        }
        if !(args.width >= MIN_CONTAINER && args.height >= MIN_CONTAINER) {
            bail!("--width and --height must be at least {MIN_CONTAINER}");
        }
        Ok(())
    })?;

    let title = args
        .title
        .clone()
        .or_else(|| env::var("DECK_TITLE").ok().filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let config = BuildConfig {
        out_dir: args.out.clone(),
        title,
        container: (args.width, args.height),
    };
    let cache = DatasetCache::new(&args.input);

    let t_deck = Instant::now();
    let output = build::run(&config, &cache)?;
    stage_done("deck", t_deck);
    if output.failed_charts > 0 {
        log::error!(
            "{} chart(s) could not be drawn; their slides show an inline message instead",
            output.failed_charts
        );
    }

    if cache.is_loaded() {
        let dataset = cache.get()?;
        let t_summary = Instant::now();
        let summary_path = config.out_dir.join("summary.txt");
        report::summary_txt::write(&summary_path, &dataset)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;
        stage_done("summary", t_summary);
    }

    if args.export_figures {
        let t_fig = Instant::now();
        report::figures::write(&config.out_dir.join("figures"), &output.figures)
            .with_context(|| "failed to export figures")?;
        stage_done("figures", t_fig);
    }

    if !args.no_zip {
        let t_zip = Instant::now();
        let zip_path =
            report::zip::write_zip(&config.out_dir).with_context(|| "failed to create zip output")?;
        stage_done("zip", t_zip);
        log::info!("bundled deck into {}", zip_path.display());
    }

    log::info!(
        "wrote {} pages to {} in {}",
        output.pages.len(),
        config.out_dir.display(),
        fmt_dur(t0.elapsed())
    );
    Ok(())
}

fn stage<F>(name: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t = Instant::now();
    let res = f();
    log::debug!("stage={} time={}", name, fmt_dur(t.elapsed()));
    res
}

fn stage_done(name: &str, t: Instant) {
    log::debug!("stage={} time={}", name, fmt_dur(t.elapsed()));
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
