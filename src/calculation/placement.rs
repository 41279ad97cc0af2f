//! Placing shortfalls on the day's timeline.
//!
//! Calculators decide *what* is owed and where it is anchored; the placer
//! turns each [`Shortfall`] into a [`SynthesizedEntry`]. Shortfalls that share
//! an anchor are laid end to end, and no entry may reach into the next worked
//! interval. A chained entry with no room left before the next clock-in falls
//! back to its own anchor, overlapping its neighbour.

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::{ShortfallKind, SynthesizedEntry, hours_from_duration};

/// Unworked time owed by one rule, before it is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// The rule that produced it.
    pub kind: ShortfallKind,
    /// Where the entry should start.
    pub anchor: NaiveDateTime,
    /// How much time is owed. Always positive.
    pub owed: TimeDelta,
    /// Counts toward billing.
    pub is_bill: bool,
    /// Counts toward payroll.
    pub is_pay: bool,
    /// The worked line that triggered it.
    pub origin_line_id: Option<String>,
}

/// A placed entry, and whether its span had to be shortened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The entry as it lands on the time card.
    pub entry: SynthesizedEntry,
    /// True when `time_out` was cut short by the next worked interval.
    pub clipped: bool,
}

/// Lays shortfalls on the timeline in the order they are given.
///
/// Shortfalls must be fed in non-decreasing anchor order.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::{EntryPlacer, Shortfall};
/// use timecard_rules::models::ShortfallKind;
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let mut placer = EntryPlacer::new();
/// let placed = placer.place(
///     Shortfall {
///         kind: ShortfallKind::AfterUnpaidMeal,
///         anchor: dt("2026-05-19 09:30:00"),
///         owed: TimeDelta::minutes(90),
///         is_bill: true,
///         is_pay: true,
///         origin_line_id: Some("TCL_2".to_string()),
///     },
///     None,
/// );
/// assert_eq!(placed.entry.time_out, dt("2026-05-19 11:00:00"));
/// assert!(!placed.clipped);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryPlacer {
    cursor: Option<NaiveDateTime>,
}

impl EntryPlacer {
    /// Creates a placer with an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a shortfall, ending no later than `limit` (the start of the
    /// next worked interval, if any).
    pub fn place(&mut self, shortfall: Shortfall, limit: Option<NaiveDateTime>) -> Placement {
        let pushed = match self.cursor {
            Some(cursor) if cursor > shortfall.anchor => cursor,
            _ => shortfall.anchor,
        };
        // No room left before the next clock-in: start at the anchor and
        // overlap the earlier entry rather than collapse onto the clock-in.
        let time_in = match limit {
            Some(limit) if pushed >= limit => shortfall.anchor.min(limit),
            _ => pushed,
        };

        let natural_end = time_in
            .checked_add_signed(shortfall.owed)
            .unwrap_or(NaiveDateTime::MAX);
        let (time_out, clipped) = match limit {
            Some(limit) if natural_end > limit => (limit, true),
            _ => (natural_end, false),
        };
        self.cursor = Some(self.cursor.map_or(time_out, |cursor| cursor.max(time_out)));

        Placement {
            entry: SynthesizedEntry {
                time_in,
                time_out,
                hours_unworked: hours_from_duration(shortfall.owed),
                is_bill: shortfall.is_bill,
                is_pay: shortfall.is_pay,
                is_minimum_call: shortfall.kind.is_minimum_call(),
                rule: shortfall.kind,
                note_rule: shortfall.kind.note_rule().to_string(),
                origin_line_id: shortfall.origin_line_id,
            },
            clipped,
        }
    }
}
