//! History entry representing a finished calculation.

use std::fmt;

use crate::calculator::CalcResult;

/// Separator between input and result of an equation entry.
const EQUATION_SEPARATOR: &str = " => ";
/// Separator between input and result of an arithmetic entry.
const ARITHMETIC_SEPARATOR: &str = " = ";

/// One line of calculation history, e.g. `2+2 = 4` or `2*x=6  =>  x=3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry(String);

impl HistoryEntry {
    /// Create a history entry from a CalcResult.
    ///
    /// Failed calculations have no entry.
    pub fn from_calc_result(result: &CalcResult) -> Option<Self> {
        result.history_line().map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the input part of the entry, to put it back into the input field.
    pub fn recalled_input(&self) -> &str {
        let separator = if self.0.contains(EQUATION_SEPARATOR) {
            EQUATION_SEPARATOR
        } else {
            ARITHMETIC_SEPARATOR
        };

        self.0
            .split(separator)
            .next()
            .unwrap_or_default()
            .trim()
    }
}

impl From<String> for HistoryEntry {
    fn from(line: String) -> Self {
        Self(line)
    }
}

impl From<&str> for HistoryEntry {
    fn from(line: &str) -> Self {
        Self(line.to_string())
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate;

    #[test]
    fn test_from_success() {
        let result = calculate("2+2").unwrap();
        let entry = HistoryEntry::from_calc_result(&result).unwrap();
        assert_eq!(entry.as_str(), "2+2 = 4");
    }

    #[test]
    fn test_from_error() {
        let result = calculate("1/0").unwrap();
        assert!(HistoryEntry::from_calc_result(&result).is_none());
    }

    #[test]
    fn test_recalled_input() {
        assert_eq!(HistoryEntry::from("2+2 = 4").recalled_input(), "2+2");
        assert_eq!(
            HistoryEntry::from("2*x+4=10  =>  x=3").recalled_input(),
            "2*x+4=10"
        );
        assert_eq!(HistoryEntry::from("plain").recalled_input(), "plain");
    }
}
