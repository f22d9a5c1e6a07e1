//! Defines the core data model for ledger entries and the conversion between
//! typed records and the raw five-column rows the backing stores deal in.

use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The column headers shared by the spreadsheet worksheet and the CSV
/// fallback file.
pub const HEADER: [&str; 5] = ["Time", "Type", "Item", "Points", "Note"];

/// Timestamps are stored with minute precision.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Whether a ledger entry added points or spent them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Points earned by completing a task.
    Income,
    /// Points spent on a reward.
    Expense,
}

impl EntryKind {
    /// The string stored in the Type column.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    fn parse(text: &str) -> Option<EntryKind> {
        match text {
            "Income" => Some(EntryKind::Income),
            "Expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

/// One point-affecting event: a task completed or a reward redeemed.
///
/// Records are append-only. Once written to the backing store they are never
/// updated or deleted, and the running balance is always recomputed from the
/// full sequence rather than kept as a counter anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// When the entry was recorded, minute precision.
    pub timestamp: PrimitiveDateTime,
    /// Whether points were earned or spent.
    pub kind: EntryKind,
    /// The task or reward name. Mystery-box redemptions embed the drawn
    /// outcome label here so the ledger shows what was won.
    pub item: String,
    /// The signed point delta: positive for income, negative for expenses.
    pub points: i64,
    /// Free-text annotation, empty in the store when `None`.
    pub note: Option<String>,
}

impl Record {
    /// Create an income entry worth `points` (a positive magnitude).
    ///
    /// The sign convention is enforced here: there is no way to construct an
    /// income entry with a negative delta.
    pub fn income(
        item: impl Into<String>,
        points: i64,
        note: Option<String>,
        timestamp: PrimitiveDateTime,
    ) -> Self {
        debug_assert!(points > 0, "income magnitude must be positive");

        Self {
            timestamp,
            kind: EntryKind::Income,
            item: item.into(),
            points,
            note,
        }
    }

    /// Create an expense entry costing `cost` points (a positive magnitude).
    ///
    /// The stored delta is `-cost`.
    pub fn expense(
        item: impl Into<String>,
        cost: i64,
        note: Option<String>,
        timestamp: PrimitiveDateTime,
    ) -> Self {
        debug_assert!(cost > 0, "expense magnitude must be positive");

        Self {
            timestamp,
            kind: EntryKind::Expense,
            item: item.into(),
            points: -cost,
            note,
        }
    }

    /// Parse a raw five-column row into a typed record.
    ///
    /// `row` is the 1-based row number in the backing store (header included)
    /// and is only used to point at the offending row in error messages. The
    /// Note column may be missing or empty; every other column is required.
    ///
    /// The sign of the Points column is *not* validated against the Type
    /// column so that hand-edited rows from older deployments still load.
    ///
    /// # Errors
    /// Returns [Error::InvalidRow] when a required column is missing, the
    /// timestamp does not match `YYYY-MM-DD HH:MM`, the Type column is not
    /// `Income` or `Expense`, or the Points column is not an integer.
    pub fn from_cells(cells: &[String], row: usize) -> Result<Record, Error> {
        if cells.len() < 4 {
            return Err(Error::InvalidRow {
                row,
                reason: format!("expected at least 4 columns, got {}", cells.len()),
            });
        }

        let timestamp = PrimitiveDateTime::parse(cells[0].trim(), TIMESTAMP_FORMAT).map_err(
            |error| Error::InvalidRow {
                row,
                reason: format!("invalid timestamp \"{}\": {error}", cells[0]),
            },
        )?;

        let kind = EntryKind::parse(cells[1].trim()).ok_or_else(|| Error::InvalidRow {
            row,
            reason: format!("unknown entry type \"{}\"", cells[1]),
        })?;

        let points = cells[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidRow {
                row,
                reason: format!("points \"{}\" is not an integer", cells[3]),
            })?;

        let note = match cells.get(4).map(|note| note.trim()) {
            None | Some("") => None,
            Some(note) => Some(note.to_owned()),
        };

        Ok(Record {
            timestamp,
            kind,
            item: cells[2].trim().to_owned(),
            points,
            note,
        })
    }

    /// Serialize the record back into the five-column wire form.
    pub fn to_cells(&self) -> [String; 5] {
        let timestamp = self
            .timestamp
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| self.timestamp.to_string());

        [
            timestamp,
            self.kind.as_str().to_owned(),
            self.item.clone(),
            self.points.to_string(),
            self.note.clone().unwrap_or_default(),
        ]
    }
}
