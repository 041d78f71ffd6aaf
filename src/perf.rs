//! Stage timings and the render debug log.
//!
//! With `--perf`, every [`scope`] adds its elapsed time to a per-stage table.
//! The table is printed by [`report`] once the terminal is restored, since
//! anything written to stderr while the editor is drawn lands on screen.
//!
//! `--render-debug-log` appends one line per pipeline event to a file, stamped
//! with milliseconds since the log was opened.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

static TIMING: AtomicBool = AtomicBool::new(false);
static STAGES: LazyLock<Mutex<StageTable>> = LazyLock::new(|| Mutex::new(StageTable::default()));
static EVENT_LOG: LazyLock<Mutex<Option<EventLog>>> = LazyLock::new(|| Mutex::new(None));

/// Lock a diagnostics table, carrying on with whatever a panicked holder left.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Accumulated timings for one named stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageTotals {
    pub calls: u64,
    pub total: Duration,
    pub max: Duration,
}

impl StageTotals {
    pub fn mean(&self) -> Duration {
        u32::try_from(self.calls)
            .ok()
            .filter(|&calls| calls > 0)
            .map_or(Duration::ZERO, |calls| self.total / calls)
    }
}

/// Stage name to totals, kept in name order for a stable report.
#[derive(Debug, Default)]
pub struct StageTable {
    stages: BTreeMap<&'static str, StageTotals>,
}

impl StageTable {
    pub fn record(&mut self, stage: &'static str, elapsed: Duration) {
        let totals = self.stages.entry(stage).or_default();
        totals.calls += 1;
        totals.total += elapsed;
        totals.max = totals.max.max(elapsed);
    }

    pub fn get(&self, stage: &str) -> Option<StageTotals> {
        self.stages.get(stage).copied()
    }

    pub fn render(&self) -> String {
        self.stages
            .iter()
            .map(|(stage, totals)| {
                format!(
                    "[perf] {stage}: {} calls, {:.3} ms mean, {:.3} ms max\n",
                    totals.calls,
                    totals.mean().as_secs_f64() * 1000.0,
                    totals.max.as_secs_f64() * 1000.0
                )
            })
            .collect()
    }
}

/// Times one stage until dropped.
#[derive(Debug)]
#[must_use = "the stage is timed until the scope is dropped"]
pub struct Scope {
    stage: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if is_enabled() {
            lock(&STAGES).record(self.stage, self.start.elapsed());
        }
    }
}

pub fn set_enabled(enabled: bool) {
    TIMING.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    TIMING.load(Ordering::Relaxed)
}

pub fn scope(stage: &'static str) -> Scope {
    Scope {
        stage,
        start: Instant::now(),
    }
}

/// Stage timings gathered so far, empty unless `--perf` is on.
pub fn report() -> String {
    if is_enabled() {
        lock(&STAGES).render()
    } else {
        String::new()
    }
}

#[derive(Debug)]
struct EventLog {
    opened: Instant,
    writer: BufWriter<File>,
}

/// Start a fresh render debug log at `path`, or close it with `None`.
pub fn set_debug_log_path(path: Option<&Path>) -> io::Result<()> {
    let mut slot = lock(&EVENT_LOG);
    *slot = None;
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "# markpad pipeline events ({})", path.display())?;
        writer.flush()?;
        *slot = Some(EventLog {
            opened: Instant::now(),
            writer,
        });
    }
    Ok(())
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut slot = lock(&EVENT_LOG);
    let Some(log) = slot.as_mut() else {
        return;
    };
    let at_ms = log.opened.elapsed().as_secs_f64() * 1000.0;
    let _ = writeln!(log.writer, "{at_ms:>10.3} {name} {}", detail.as_ref())
        .and_then(|()| log.writer.flush());
}
