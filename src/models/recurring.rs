//! Recurring transaction templates
//!
//! A template produces one transaction per occurrence. Occurrence `n` is
//! always computed from `start_date` rather than from the previous occurrence,
//! so month-end dates do not drift (Jan 31 -> Feb 28 -> Mar 31).

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecurringId;
use super::money::Money;

/// How often a template repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// A template that generates transactions on a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: RecurringId,

    pub account: String,

    pub amount: Money,

    #[serde(default)]
    pub description: String,

    pub frequency: Frequency,

    /// Repeat every `interval` units of `frequency`
    pub interval: u32,

    /// First occurrence
    pub start_date: DateTime<Utc>,

    /// Last instant an occurrence may fall on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Date of the newest occurrence already turned into a transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<DateTime<Utc>>,

    /// Generated transactions are held pending until confirmed by hand
    #[serde(default)]
    pub hold_as_pending: bool,

    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RecurringTransaction {
    /// Create a new active template
    pub fn new(
        account: impl Into<String>,
        amount: Money,
        frequency: Frequency,
        start_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            account: account.into(),
            amount,
            description: String::new(),
            frequency,
            interval: 1,
            start_date,
            end_date: None,
            last_generated: None,
            hold_as_pending: false,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The `n`th occurrence (0 = `start_date`), or None past `end_date`
    pub fn occurrence(&self, n: u32) -> Option<DateTime<Utc>> {
        let steps = n.checked_mul(self.interval)?;
        let date = match self.frequency {
            Frequency::Daily => self
                .start_date
                .checked_add_signed(Duration::days(i64::from(steps)))?,
            Frequency::Weekly => self
                .start_date
                .checked_add_signed(Duration::weeks(i64::from(steps)))?,
            Frequency::Monthly => self.start_date.checked_add_months(Months::new(steps))?,
            Frequency::Yearly => self
                .start_date
                .checked_add_months(Months::new(steps.checked_mul(12)?))?,
        };

        match self.end_date {
            Some(end) if date > end => None,
            _ => Some(date),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.account.trim().is_empty() {
            return Err("Recurring transaction must belong to an account".into());
        }
        if self.amount.is_zero() {
            return Err("Recurring amount cannot be zero".into());
        }
        if self.interval == 0 {
            return Err("Interval must be at least 1".into());
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err("End date is before start date".into());
            }
        }
        Ok(())
    }
}

impl fmt::Display for RecurringTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interval == 1 {
            write!(f, "{} {} {}", self.description, self.amount, self.frequency)
        } else {
            write!(
                f,
                "{} {} every {} x {}",
                self.description, self.amount, self.interval, self.frequency
            )
        }
    }
}
