//! Recurring date generation.
//!
//! Weekly and biweekly cadences are anchored on a preferred weekday. When the
//! start date already falls on that weekday it is the first occurrence.
//! Monthly cadences keep the start's day-of-month and clamp to the last day
//! of shorter months (Jan 31 -> Feb 29 -> Mar 31).

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::domain::Frequency;
use crate::error::{PlannerError, PlannerResult};

/// A cadence plus the weekday it is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Ignored for monthly cadences. `None` anchors on the start date's weekday.
    pub preferred_day: Option<Weekday>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, preferred_day: Option<Weekday>) -> Self {
        Self {
            frequency,
            preferred_day,
        }
    }

    /// Build a rule from user-facing strings such as `"biweekly"` and `"Friday"`.
    pub fn parse(frequency: &str, preferred_day: Option<&str>) -> PlannerResult<Self> {
        let frequency = frequency.parse::<Frequency>()?;
        let preferred_day = match preferred_day.map(str::trim) {
            None | Some("") => None,
            Some(day) => Some(
                day.parse::<Weekday>()
                    .map_err(|_| PlannerError::InvalidWeekday(day.to_string()))?,
            ),
        };
        Ok(Self::new(frequency, preferred_day))
    }

    /// Lazily enumerate occurrences on or after `start`.
    pub fn occurrences(&self, start: NaiveDate) -> Occurrences {
        let first = match self.frequency {
            Frequency::Monthly => Some(start),
            Frequency::Weekly | Frequency::Biweekly => {
                let day = self.preferred_day.unwrap_or_else(|| start.weekday());
                let ahead = (7 + day.num_days_from_monday() - start.weekday().num_days_from_monday())
                    % 7;
                start.checked_add_days(Days::new(u64::from(ahead)))
            }
        };

        Occurrences {
            frequency: self.frequency,
            first,
            index: 0,
        }
    }

    /// Exactly `count` strictly increasing dates, none before `start`.
    pub fn dates(&self, start: NaiveDate, count: i64) -> PlannerResult<Vec<NaiveDate>> {
        let wanted = usize::try_from(count)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(PlannerError::InvalidCount(count))?;

        let dates: Vec<NaiveDate> = self.occurrences(start).take(wanted).collect();
        if dates.len() < wanted {
            return Err(PlannerError::DateOutOfRange);
        }
        Ok(dates)
    }
}

/// Iterator over the occurrences of a [`RecurrenceRule`].
///
/// Every date is computed from the first occurrence rather than the previous
/// one, so monthly clamping never drifts (Feb 29 does not turn March into the 29th).
#[derive(Debug, Clone)]
pub struct Occurrences {
    frequency: Frequency,
    first: Option<NaiveDate>,
    index: u32,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let first = self.first?;
        let date = match self.frequency.step_days() {
            Some(step) => {
                let offset = step.checked_mul(u64::from(self.index))?;
                first.checked_add_days(Days::new(offset))
            }
            None => first.checked_add_months(Months::new(self.index)),
        };

        match (date, self.index.checked_add(1)) {
            (Some(date), Some(next)) => {
                self.index = next;
                Some(date)
            }
            _ => {
                self.first = None;
                None
            }
        }
    }
}

/// Generate `count` future posting dates from `start`.
///
/// Deterministic and side-effect free, so callers can preview a schedule and
/// re-derive the same dates before persisting it.
pub fn generate_recurring_schedule(
    start: NaiveDate,
    frequency: Frequency,
    preferred_day: Option<Weekday>,
    count: i64,
) -> PlannerResult<Vec<NaiveDate>> {
    RecurrenceRule::new(frequency, preferred_day).dates(start, count)
}
