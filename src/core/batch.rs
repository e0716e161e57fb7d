//! Regular vs supplementary cohort classification

use once_cell::sync::Lazy;
use regex::Regex;

static ADMISSION_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[A-Z]+)?([0-9]{2})[A-Z]{2}[0-9]{3}").unwrap());

/// Two-digit admission year encoded in a register number (`TCR22CS061` → 22)
#[must_use]
pub fn admission_year(register_no: &str) -> Option<u32> {
    ADMISSION_YEAR_RE
        .captures(register_no)
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether the student was admitted in the batch that sits this exam on schedule.
///
/// `batch_year` may be given as two digits (`22`) or four (`2022`); only the
/// last two digits are compared. Register numbers that don't carry a year are
/// treated as supplementary.
#[must_use]
pub fn is_regular_batch(register_no: &str, batch_year: u32) -> bool {
    admission_year(register_no).is_some_and(|year| year == batch_year % 100)
}

/// Like [`is_regular_batch`], but everyone is supplementary when the batch is unknown
#[must_use]
pub fn is_regular_in(register_no: &str, batch_year: Option<u32>) -> bool {
    batch_year.is_some_and(|year| is_regular_batch(register_no, year))
}

/// Human label for a student's cohort
#[must_use]
pub const fn batch_label(regular: bool) -> &'static str {
    if regular {
        "Regular"
    } else {
        "Supplementary"
    }
}
