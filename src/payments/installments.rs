use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::types::{validate_due_day, Installment, InstallmentStatus};

/// inputs for an installment calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRequest {
    pub installments_total: u32,
    #[serde(default)]
    pub installments_paid: u32,
    #[serde(default)]
    pub first_installment_date: Option<NaiveDate>,
    pub due_day: u32,
}

impl InstallmentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.installments_total == 0 {
            return Err(EngineError::invalid("installmentsTotal", "must be at least one"));
        }
        if self.installments_paid > self.installments_total {
            return Err(EngineError::invalid(
                "installmentsPaid",
                format!(
                    "{} paid exceeds {} total",
                    self.installments_paid, self.installments_total
                ),
            ));
        }
        validate_due_day(self.due_day)
    }
}

/// ordered installments of one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallmentSchedule {
    pub installments: Vec<Installment>,
}

impl InstallmentSchedule {
    pub fn paid_count(&self) -> usize {
        self.installments.iter().filter(|i| i.is_paid()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.installments.len() - self.paid_count()
    }

    /// earliest installment still pending
    pub fn next_pending(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| !i.is_paid())
    }

    pub fn last_due_date(&self) -> Option<NaiveDate> {
        self.installments.last().map(|i| i.due_date)
    }

    pub fn into_vec(self) -> Vec<Installment> {
        self.installments
    }
}

/// Builds a loan's installment calendar.
///
/// Installment 1 falls on the first installment date when one is given,
/// otherwise on this month's due day (or next month's once it has passed).
/// Every later installment moves forward whole months from installment 1 and
/// lands on the due day, clamped to the last day of shorter months.
pub struct InstallmentScheduleGenerator<'a> {
    time_provider: &'a SafeTimeProvider,
}

impl<'a> InstallmentScheduleGenerator<'a> {
    pub fn new(time_provider: &'a SafeTimeProvider) -> Self {
        Self { time_provider }
    }

    pub fn generate(&self, request: &InstallmentRequest) -> Result<InstallmentSchedule> {
        request.validate()?;

        let first_date = match request.first_installment_date {
            Some(date) => date,
            None => self.default_first_date(request.due_day)?,
        };
        // reject calendars past chrono's range before allocating anything
        shift_to_due_day(first_date, request.installments_total - 1, request.due_day)?;

        let installments = (1..=request.installments_total)
            .map(|number| -> Result<Installment> {
                let due_date = if number == 1 {
                    first_date
                } else {
                    shift_to_due_day(first_date, number - 1, request.due_day)?
                };
                let status = if number <= request.installments_paid {
                    InstallmentStatus::Paid
                } else {
                    InstallmentStatus::Pending
                };
                Ok(Installment {
                    number,
                    status,
                    due_date,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(InstallmentSchedule { installments })
    }

    /// this month's due day if it has not passed yet, else next month's
    fn default_first_date(&self, due_day: u32) -> Result<NaiveDate> {
        let today = self.time_provider.now().date_naive();
        let this_month = shift_to_due_day(today, 0, due_day)?;
        if this_month >= today {
            Ok(this_month)
        } else {
            shift_to_due_day(today, 1, due_day)
        }
    }
}

/// move `date` forward `months` calendar months and set its day to `due_day`,
/// clamping to the month's last day
pub fn shift_to_due_day(date: NaiveDate, months: u32, due_day: u32) -> Result<NaiveDate> {
    let out_of_range = || {
        EngineError::invalid("installmentsTotal", "schedule runs past the supported calendar")
    };

    let month_index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| out_of_range())?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = due_day.min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
