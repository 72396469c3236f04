//! Console progress reporting
//!
//! Two mutually exclusive modes: a line per byte rendered with the requested
//! [`OutputFormat`], or a single percentage line redrawn in place.

use std::io::Write;

use i2cprog_common::{OutputFormat, TransferRequest};

/// Reporting mode for a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// One `0x%06x: <value>` line per byte
    PerByte(OutputFormat),
    /// A live `<pct> %` line
    Percent,
}

/// Percentage of a transfer completed once the byte at `offset` is processed
///
/// A one-byte transfer is complete after its only byte.
#[must_use]
pub fn percent_complete(offset: u64, total: u64) -> u64 {
    if total <= 1 {
        return 100;
    }
    let percent = u128::from(offset) * 100 / u128::from(total - 1);
    percent.min(100) as u64
}

/// Writes per-byte reports or progress to the console
///
/// Console errors are ignored: a closed stdout must not abort a transfer.
pub struct ProgressReporter<W> {
    out: W,
    mode: ReportMode,
    total: u64,
    last_percent: Option<u64>,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W, mode: ReportMode, total: u64) -> Self {
        Self {
            out,
            mode,
            total,
            last_percent: None,
        }
    }

    /// Reporter configured from a transfer request
    pub fn for_request(out: W, request: &TransferRequest) -> Self {
        let mode = if request.print_enabled() {
            ReportMode::PerByte(request.format())
        } else {
            ReportMode::Percent
        };
        Self::new(out, mode, request.byte_count())
    }

    /// Report the byte processed at `offset`
    pub fn record(&mut self, offset: u64, byte: u8) {
        match self.mode {
            ReportMode::PerByte(format) => {
                let _ = self.out.write_all(&format.render_line(offset, byte));
            }
            ReportMode::Percent => {
                let percent = percent_complete(offset, self.total);
                if self.last_percent != Some(percent) {
                    self.last_percent = Some(percent);
                    let _ = write!(self.out, "\r{} %", percent);
                    let _ = self.out.flush();
                }
            }
        }
    }

    /// End the progress line, if one was started
    pub fn finish(&mut self) {
        if self.last_percent.is_some() {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
