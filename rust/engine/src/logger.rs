use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::pot::ShowdownResult;
use crate::rules::Action;
use crate::seat::SeatId;

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Phase of a hand. Betting only happens on the first four.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Settled without evaluation: everyone else folded
    Showdown,
    /// Settled by comparing hands
    Finished,
}

impl Street {
    /// Streets that still accept actions.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Street::Preflop | Street::Flop | Street::Turn | Street::River
        )
    }

    /// The next betting street and how many community cards it reveals.
    /// `None` after the river.
    pub fn next_betting(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            _ => None,
        }
    }
}

/// One accepted action, with the chips it moved.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat_id: SeatId,
    pub street: Street,
    pub action: Action,
    /// Chips moved from stack to contribution by this action
    pub chips: u32,
}

/// Per-seat summary in a hand record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat_id: SeatId,
    pub initial_stack: u32,
    pub contribution: u32,
    /// Only present for seats whose cards were shown down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<[Card; 2]>,
}

/// Complete history of one hand, serialized one per line to JSONL.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    /// RNG seed used for the shuffle (enables deterministic replay)
    pub seed: u64,
    pub small_blind: u32,
    pub button: usize,
    pub seats: Vec<SeatRecord>,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub street: Street,
    #[serde(default)]
    pub showdown: Option<ShowdownResult>,
    /// Timestamp when the hand was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

/// Append-only JSONL writer for settled hands.
pub struct HandLogger {
    writer: BufWriter<File>,
}

impl std::fmt::Debug for HandLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandLogger").finish_non_exhaustive()
    }
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
