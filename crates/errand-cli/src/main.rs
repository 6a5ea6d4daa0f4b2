use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use errand_core::app::ProgressEntry;
use errand_core::ports::{Clock, SystemClock};
use errand_core::{Job, PoolConfig, ProgressBoard, TaskPool, TaskStatus, channel_observer};
use tokio::time::interval;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a handful of simulated desktop chores on the background pool and
/// render their progress as events arrive.
#[derive(Debug, Parser)]
#[command(name = "errand", version)]
struct Opts {
    /// Number of worker threads (ignored when --config is given).
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// JSON pool config, e.g. {"max_workers": 2}.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Make the archive chore fail.
    #[arg(long)]
    fail: bool,
}

/// Stand-in for the real tool modules (image, PDF, disk cleanup, ...).
struct SimulatedChore {
    name: &'static str,
    duration: Duration,
    fail_with: Option<&'static str>,
}

impl Job for SimulatedChore {
    type Output = ();
    type Error = String;

    fn name(&self) -> String {
        self.name.to_string()
    }

    fn run(self) -> Result<(), String> {
        std::thread::sleep(self.duration);
        match self.fail_with {
            Some(reason) => Err(reason.to_string()),
            None => Ok(()),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_config(opts: &Opts) -> anyhow::Result<PoolConfig> {
    match &opts.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            Ok(PoolConfig::from_json_str(&raw)?)
        }
        None => Ok(PoolConfig::builder().max_workers(opts.workers).build()?),
    }
}

fn render(entry: &ProgressEntry) {
    let marker = match entry.status {
        TaskStatus::Started => "..",
        TaskStatus::Succeeded => "ok",
        TaskStatus::Failed => "!!",
    };
    println!("[{marker}] {:<8} {}", entry.task_id.to_string(), entry.message);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    init_tracing();

    // (A) プロセス共有のプールを用意し、observer を UI ループ向けの channel にする
    let config = load_config(&opts)?;
    let pool = TaskPool::shared_with(config)?;
    let (observer, mut events) = channel_observer();
    pool.set_observer(observer);
    info!(max_workers = pool.max_workers(), "pool ready");

    // (B) タスク投入（submit は即座に ID を返す）
    let chores = [
        SimulatedChore {
            name: "Disk cleanup",
            duration: Duration::from_millis(1500),
            fail_with: None,
        },
        SimulatedChore {
            name: "Image compression",
            duration: Duration::from_millis(600),
            fail_with: None,
        },
        SimulatedChore {
            name: "Encrypted archive",
            duration: Duration::from_millis(900),
            fail_with: opts.fail.then_some("wrong password"),
        },
        SimulatedChore {
            name: "Cloud backup",
            duration: Duration::from_millis(1200),
            fail_with: None,
        },
    ];
    let submitted = chores.len();
    for chore in chores {
        let id = pool.submit_job(chore);
        println!("submitted {id}");
    }

    // (C) UI ループ: イベントを自分のスレッドで受けて board に畳み込む
    let mut board = ProgressBoard::new();
    let mut finished = 0;
    let mut tick = interval(Duration::from_millis(250));
    while finished < submitted {
        tokio::select! {
            Some(event) = events.recv() => {
                board.apply(&event);
                if event.is_terminal() {
                    finished += 1;
                }
                if let Some(entry) = board.get(event.task_id) {
                    render(entry);
                }
            }
            _ = tick.tick() => {
                board.prune(SystemClock.now());
            }
        }
    }

    // (D) 失敗した行は board に残っている
    let failures: Vec<&ProgressEntry> = board
        .entries()
        .filter(|e| e.status == TaskStatus::Failed)
        .collect();
    println!(
        "done: {} succeeded, {} failed, active now: {:?}",
        submitted - failures.len(),
        failures.len(),
        pool.counts()
    );
    for entry in failures {
        render(entry);
    }

    Ok(())
}
