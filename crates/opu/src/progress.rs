// AI
//! 📊 progress.rs: "Are we there yet?" - every upload, every time, forever.
//!
//! A progress bar while chunks are in flight, and a comfy table at the end so
//! the answer to "did it work?" is more than a wall of response bodies.
//!
//! ⚠️ Watching this progress bar will not make it go faster. Science says no. 🦆

use std::time::{Duration, Instant};

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use indicatif::{ProgressBar, ProgressStyle};

use crate::uploader::UploadReport;

/// 🔢 "1000000" → "1,000,000". You're welcome, eyes.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// ⏱️ MM:SS, or HH:MM:SS if you should probably call your mom.
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// 📊 Documents-uploaded progress bar.
///
/// indicatif hides the bar on its own when stderr is not a terminal, so CI logs
/// and `cargo test` stay clean.
pub(crate) struct UploadProgress {
    progress_bar: ProgressBar,
    start_time: Instant,
}

impl std::fmt::Debug for UploadProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // -- 🎭 ProgressBar is a diva and doesn't derive Debug
        f.debug_struct("UploadProgress")
            .field("position", &self.progress_bar.position())
            .finish()
    }
}

impl UploadProgress {
    pub(crate) fn new(total_docs: u64) -> Self {
        let progress_bar = ProgressBar::new(total_docs);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} docs")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        progress_bar.set_style(style);

        Self {
            progress_bar,
            start_time: Instant::now(),
        }
    }

    /// 🔄 One more chunk is done (accepted or not, it's done).
    pub(crate) fn update(&self, chunk_number: usize, docs_in_chunk: u64) {
        self.progress_bar.inc(docs_in_chunk);
        self.progress_bar.set_message(format!(
            "chunk {} · {} elapsed",
            chunk_number,
            format_duration(self.start_time.elapsed())
        ));
    }

    pub(crate) fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

/// 🍽️ Render the end-of-run report as a two-column table.
pub fn render_summary(report: &UploadReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["upload", ""]);

    let rows = [
        ("documents sent", report.documents_sent as u64),
        ("chunks sent", report.chunks_sent as u64),
        ("chunks accepted (2xx)", report.chunks_accepted() as u64),
        ("chunks rejected", report.chunks_rejected as u64),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_number(value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("elapsed"),
        Cell::new(format_duration(report.elapsed)).set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}
