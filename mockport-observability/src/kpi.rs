use mockport_core::log::LogRecord;
use serde::Serialize;

/// KPIs derived from a window of call records.
///
/// `None` means "no data" and is never the same as zero: an empty window
/// must not read as "0 ms" or "0 % errors".
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Kpis {
    pub avg_latency_ms: Option<u32>,
    pub error_rate_pct: Option<u32>,
    pub sample_count: usize,
}

/// Reduce a window of records to its KPIs.
pub fn aggregate(records: &[LogRecord]) -> Kpis {
    let n = records.len() as u64;
    if n == 0 {
        return Kpis::default();
    }

    let latency_sum: u64 = records.iter().map(|r| u64::from(r.latency_ms)).sum();
    let errors = records.iter().filter(|r| r.is_error()).count() as u64;

    Kpis {
        avg_latency_ms: Some(round_half_up(latency_sum, n)),
        error_rate_pct: Some(round_half_up(100 * errors, n)),
        sample_count: records.len(),
    }
}

/// `num / den` rounded to nearest, halves away from zero, without floats.
fn round_half_up(num: u64, den: u64) -> u32 {
    ((2 * num + den) / (2 * den)) as u32
}

impl Kpis {
    pub fn has_data(&self) -> bool {
        self.sample_count > 0
    }

    /// `"150 ms"`, or `"—"` without data.
    pub fn latency_label(&self) -> String {
        self.avg_latency_ms
            .map(|ms| format!("{ms} ms"))
            .unwrap_or_else(|| "—".to_string())
    }

    /// `"50%"`, or `"—"` without data.
    pub fn error_rate_label(&self) -> String {
        self.error_rate_pct
            .map(|pct| format!("{pct}%"))
            .unwrap_or_else(|| "—".to_string())
    }
}
