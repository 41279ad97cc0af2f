//! Request types for the rule engine API.
//!
//! This module defines the JSON request structure for `PUT /timecards/:id`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::models::{ClockInterval, TimeCard};

/// Request body for `PUT /timecards/:id`.
///
/// Carries the time card header and its worked clock lines. Clock times are
/// times of day on `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeCardRequest {
    /// The contract whose rules apply to the card.
    pub contract_id: String,
    /// The worker the card belongs to.
    pub worker_id: String,
    /// The day the card covers.
    pub date: NaiveDate,
    /// Worked clock lines, in any order.
    #[serde(default)]
    pub clocks: Vec<ClockRequest>,
}

/// A worked clock line in a time card request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// Identifier of the time card line.
    pub line_id: String,
    /// Clock-in time of day.
    pub time_in: NaiveTime,
    /// Clock-out time of day. `00:00:00` means midnight at the end of the day.
    pub time_out: NaiveTime,
}

impl ClockRequest {
    /// Places the clock line on `date`.
    pub fn on_date(self, date: NaiveDate) -> ClockInterval {
        ClockInterval {
            source_line_id: self.line_id,
            time_in: date.and_time(self.time_in),
            time_out: clock_out_on(date, self.time_out),
        }
    }
}

fn clock_out_on(date: NaiveDate, time_out: NaiveTime) -> NaiveDateTime {
    let at = date.and_time(time_out);
    if time_out == NaiveTime::MIN {
        at + TimeDelta::days(1)
    } else {
        at
    }
}

impl TimeCardRequest {
    /// Splits the request into the card header and its clock intervals.
    pub fn into_parts(self, id: &str) -> (TimeCard, Vec<ClockInterval>) {
        let date = self.date;
        let card = TimeCard {
            id: id.to_string(),
            contract_id: self.contract_id,
            worker_id: self.worker_id,
            date,
        };
        let intervals = self.clocks.into_iter().map(|c| c.on_date(date)).collect();
        (card, intervals)
    }
}
