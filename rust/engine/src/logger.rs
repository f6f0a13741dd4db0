use serde::{Deserialize, Serialize};

use crate::lottery::LotteryResult;
use crate::slot::SlotOutput;
use crate::state::GameState;

/// Which lottery moment a record captures.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SpinMode {
    /// Normal-mode lottery
    Normal,
    /// Rush-mode lottery
    Rush,
    /// Rush-continuation lottery
    RushContinue,
}

/// Complete record of one spin: outcome, rendered reels, and the state the
/// game landed in. Serialized to JSONL for session history storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Unique identifier for this spin (format: YYYYMMDD-NNNNNN)
    pub spin_id: String,
    /// Base RNG seed of the session (enables deterministic replay)
    pub seed: Option<u64>,
    /// Which lottery produced this spin
    pub mode: SpinMode,
    /// The drawn outcome
    pub result: LotteryResult,
    /// The rendered reel pair
    pub reel: SlotOutput,
    /// Game state after the spin resolved
    pub state_after: GameState,
    /// Timestamp when the spin was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_spin_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Buffered JSONL writer for spin records with date-scoped sequence ids.
pub struct SpinLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl SpinLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that assigns ids but writes nowhere (dry runs and tests).
    pub fn sink(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_spin_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &SpinRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
