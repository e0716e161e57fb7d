//! Grade token model

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A letter grade as printed on the result sheet.
///
/// Tokens outside the university scale are kept verbatim in [`Grade::Other`]
/// so that they still show up in the report; they earn zero grade points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grade {
    /// Outstanding
    S,
    /// A+
    APlus,
    /// A
    A,
    /// B+
    BPlus,
    /// B
    B,
    /// C+
    CPlus,
    /// C
    C,
    /// D
    D,
    /// Pass
    P,
    /// Fail
    F,
    /// Failed for lack of eligibility
    FE,
    /// Incomplete
    I,
    /// Absent for the examination
    Absent,
    /// Any other token captured from the text
    Other(String),
}

impl Grade {
    /// Every recognised grade, best first. Report histograms follow this order.
    pub const SCALE: [Self; 13] = [
        Self::S,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::CPlus,
        Self::C,
        Self::D,
        Self::P,
        Self::F,
        Self::FE,
        Self::I,
        Self::Absent,
    ];

    /// Token as it appears on the result sheet
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::S => "S",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::P => "P",
            Self::F => "F",
            Self::FE => "FE",
            Self::I => "I",
            Self::Absent => "Absent",
            Self::Other(token) => token,
        }
    }

    /// Whether this grade counts as a failure (F, FE or Absent).
    ///
    /// `I` (incomplete) is not a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::F | Self::FE | Self::Absent)
    }
}

impl FromStr for Grade {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "S" => Self::S,
            "A+" => Self::APlus,
            "A" => Self::A,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "D" => Self::D,
            "P" => Self::P,
            "F" => Self::F,
            "FE" => Self::FE,
            "I" => Self::I,
            "Absent" => Self::Absent,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for Grade {
    fn from(token: &str) -> Self {
        match token.parse() {
            Ok(grade) => grade,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_tokens_parse_back() {
        for grade in Grade::SCALE {
            assert_eq!(Grade::from(grade.as_str()), grade);
        }
    }

    #[test]
    fn test_unknown_token_is_kept() {
        let grade = Grade::from("W");
        assert_eq!(grade, Grade::Other("W".to_string()));
        assert_eq!(grade.to_string(), "W");
        assert!(!grade.is_failure());
    }

    #[test]
    fn test_failure_grades() {
        assert!(Grade::F.is_failure());
        assert!(Grade::FE.is_failure());
        assert!(Grade::Absent.is_failure());
        assert!(!Grade::I.is_failure());
        assert!(!Grade::P.is_failure());
    }
}
