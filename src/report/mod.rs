//! Progress display and the final results table

use crate::expr::Rendering;
use crate::library::FunctionLibrary;
use crate::search::candidate::Candidate;
use crate::search::parallel::ProgressSnapshot;
use crate::search::result::SearchStatistics;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Receiver of worker progress. Called from a single thread only.
pub trait ProgressSink {
    fn snapshot(&mut self, snapshot: &ProgressSnapshot);

    fn finished(&mut self, _worker_id: usize, _statistics: &SearchStatistics) {}
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn snapshot(&mut self, _snapshot: &ProgressSnapshot) {}
}

/// Emits progress as tracing events
pub struct LogProgress {
    library: Arc<FunctionLibrary>,
    rendering: Rendering,
}

impl LogProgress {
    pub fn new(library: Arc<FunctionLibrary>, rendering: Rendering) -> Self {
        Self { library, rendering }
    }
}

impl ProgressSink for LogProgress {
    fn snapshot(&mut self, snapshot: &ProgressSnapshot) {
        let percent = (snapshot.fraction_done() * 1000.0).round() / 10.0;
        match &snapshot.best {
            Some(best) => tracing::info!(
                worker = snapshot.worker_id,
                percent,
                remaining = %format_eta(snapshot.remaining),
                best = %best.expression.render(&self.library, self.rendering),
                value = %format_value(best.value),
                error = best.error,
                "progress"
            ),
            None => tracing::info!(
                worker = snapshot.worker_id,
                percent,
                remaining = %format_eta(snapshot.remaining),
                "progress, nothing found yet"
            ),
        }
    }

    fn finished(&mut self, worker_id: usize, statistics: &SearchStatistics) {
        tracing::info!(
            worker = worker_id,
            evaluated = statistics.candidates_evaluated,
            inserted = statistics.inserted,
            elapsed = ?statistics.elapsed_time,
            "worker done"
        );
    }
}

/// Live terminal view: one row per worker, redrawn in place.
pub struct ConsoleProgress<W: Write> {
    library: Arc<FunctionLibrary>,
    rendering: Rendering,
    out: W,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr(library: Arc<FunctionLibrary>, rendering: Rendering) -> Self {
        Self::new(library, rendering, io::stderr())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(library: Arc<FunctionLibrary>, rendering: Rendering, out: W) -> Self {
        Self {
            library,
            rendering,
            out,
        }
    }

    /// Clear the screen; used before the first row and after the last.
    pub fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "\x1b[;H\x1b[J")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()> {
        let row = snapshot.worker_id + 1;
        let eta = snapshot.remaining.as_secs();
        match &snapshot.best {
            Some(best) => write!(
                self.out,
                "\x1b[{};H\x1b[K {}s\t{}\t{}\t({:.12})\r",
                row,
                eta,
                best.expression.render(&self.library, self.rendering),
                format_value(best.value),
                best.error
            )?,
            None => write!(self.out, "\x1b[{};H\x1b[K {}s\t-\r", row, eta)?,
        }
        self.out.flush()
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn snapshot(&mut self, snapshot: &ProgressSnapshot) {
        if let Err(e) = self.draw(snapshot) {
            tracing::debug!(error = %e, "progress row not drawn");
        }
    }
}

/// Fixed twelve-decimal rendering used in every output line
pub fn format_value(value: f64) -> String {
    format!("{:.12}", value)
}

/// Compact `1h02m03s` style duration
pub fn format_eta(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Write the ranked results, one tab separated row per candidate.
pub fn write_report<W: Write>(
    out: &mut W,
    ranked: &[Candidate],
    library: &FunctionLibrary,
    rendering: Rendering,
) -> io::Result<()> {
    writeln!(out, "Expression\tValue\t\t(Error)")?;
    for candidate in ranked {
        writeln!(
            out,
            "{}\t{}\t({:.12})",
            candidate.expression.render(library, rendering),
            format_value(candidate.value),
            candidate.error
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expression;

    fn one_plus_one() -> Candidate {
        Candidate::new(Expression::from_codes(&[1, 1, 2]), 2.0, 2.5)
    }

    fn snapshot(best: Option<Candidate>) -> ProgressSnapshot {
        ProgressSnapshot {
            worker_id: 2,
            iteration: 10,
            total_iterations: 100,
            remaining: Duration::from_secs(42),
            best,
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(2.0), "2.000000000000");
        assert_eq!(format_value(-0.5), "-0.500000000000");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(Duration::from_secs(5)), "5s");
        assert_eq!(format_eta(Duration::from_secs(65)), "1m05s");
        assert_eq!(format_eta(Duration::from_secs(3723)), "1h02m03s");
    }

    #[test]
    fn test_write_report() {
        let lib = FunctionLibrary::arithmetic();
        let mut out = Vec::new();
        write_report(&mut out, &[one_plus_one()], &lib, Rendering::Letters).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Expression\tValue\t\t(Error)\nBBC\t2.000000000000\t(0.500000000000)\n"
        );
    }

    #[test]
    fn test_write_report_names() {
        let lib = FunctionLibrary::arithmetic();
        let mut out = Vec::new();
        write_report(&mut out, &[one_plus_one()], &lib, Rendering::Names).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1 1 add\t2.000000000000"));
    }

    #[test]
    fn test_console_row() {
        let lib = Arc::new(FunctionLibrary::arithmetic());
        let mut console = ConsoleProgress::new(lib, Rendering::Letters, Vec::new());
        console.snapshot(&snapshot(Some(one_plus_one())));
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "\x1b[3;H\x1b[K 42s\tBBC\t2.000000000000\t(0.500000000000)\r"
        );
    }

    #[test]
    fn test_console_row_without_best() {
        let lib = Arc::new(FunctionLibrary::arithmetic());
        let mut console = ConsoleProgress::new(lib, Rendering::Letters, Vec::new());
        console.snapshot(&snapshot(None));
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert!(text.ends_with(" 42s\t-\r"));
    }
}
