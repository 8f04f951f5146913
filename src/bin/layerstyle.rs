use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::mpsc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use layerstyle::{Action, FixtureHost, Panel, PanelSnapshot, PollOpts};

#[derive(Parser, Debug)]
#[command(name = "layerstyle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the panel snapshot of a fixture document as JSON.
    Snapshot(SnapshotArgs),
    /// Apply a JSON list of actions, then print the resulting snapshot.
    Apply(ApplyArgs),
    /// Run the adaptive poll loop and log every tick.
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Fixture document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Requested style id.
    #[arg(long, default_value = "innerShadow")]
    style: String,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Fixture document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// JSON array of actions.
    #[arg(long)]
    actions: PathBuf,

    /// Requested style id for the printed snapshot.
    #[arg(long, default_value = "innerShadow")]
    style: String,

    /// Write the mutated document here.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Fixture document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Requested style id.
    #[arg(long, default_value = "innerShadow")]
    style: String,

    /// Stop after this many ticks.
    #[arg(long, default_value_t = 10)]
    ticks: usize,

    /// Delay between ticks while the layer is changing.
    #[arg(long)]
    active_ms: Option<u64>,

    /// Delay between ticks once the layer is quiet.
    #[arg(long)]
    idle_ms: Option<u64>,

    /// Quiet time before switching to the idle delay.
    #[arg(long)]
    idle_threshold_ms: Option<u64>,
}

impl WatchArgs {
    fn poll_opts(&self) -> PollOpts {
        let mut opts = PollOpts::default();
        if let Some(ms) = self.active_ms {
            opts.active_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.idle_ms {
            opts.idle_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.idle_threshold_ms {
            opts.idle_threshold = Duration::from_millis(ms);
        }
        opts
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

fn read_doc(path: &Path) -> anyhow::Result<FixtureHost> {
    FixtureHost::from_path(path).with_context(|| format!("load document '{}'", path.display()))
}

fn read_actions(path: &Path) -> anyhow::Result<Vec<Action>> {
    let f = File::open(path).with_context(|| format!("open actions '{}'", path.display()))?;
    let actions: Vec<Action> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse actions JSON")?;
    Ok(actions)
}

fn print_snapshot(snapshot: &PanelSnapshot) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, snapshot).with_context(|| "serialize snapshot")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let panel = Panel::new(read_doc(&args.doc)?);
    print_snapshot(&panel.get_snapshot(&args.style))
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let panel = Panel::new(read_doc(&args.doc)?);
    let actions = read_actions(&args.actions)?;
    for action in &actions {
        panel.apply(action);
    }
    tracing::info!(applied = actions.len(), "actions applied");

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let doc = layerstyle::poll::worker::lock_host(panel.host()).to_doc();
        let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &doc).with_context(|| "serialize document")?;
        w.flush()
            .with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    print_snapshot(&panel.get_snapshot(&args.style))
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let opts = args.poll_opts();
    let mut panel = Panel::new(read_doc(&args.doc)?);
    let (tx, rx) = mpsc::channel();
    panel.start_polling(opts, &args.style, move |update| {
        let _ = tx.send(update);
    })?;

    for tick in 0..args.ticks {
        let update = rx
            .recv()
            .with_context(|| "poll loop ended unexpectedly")?;
        tracing::info!(
            tick,
            hash = %update.snapshot.layer_hash,
            style = %update.snapshot.current_style_id,
            changed = update.changed,
            next_delay_ms = update.next_delay.as_millis() as u64,
            "poll tick"
        );
    }
    panel.stop_polling();
    Ok(())
}
