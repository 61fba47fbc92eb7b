//! Merging the name and registration verdicts into one status.

use crate::types::Verdict;

/// Combined status for one row.
///
/// A name match wins over a registration match, so when both joins hit
/// different partners only the name partner is reported.
pub fn combine(by_name: &Verdict, by_registration: &Verdict) -> Verdict {
    if by_name.is_safe() && by_registration.is_safe() {
        return Verdict::Safe;
    }
    if !by_name.is_safe() {
        return by_name.clone();
    }
    if !by_registration.is_safe() {
        return by_registration.clone();
    }
    Verdict::Safe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted(label: &str) -> Verdict {
        Verdict::Restricted(label.to_string())
    }

    #[test]
    fn test_both_safe() {
        assert_eq!(combine(&Verdict::Safe, &Verdict::Safe), Verdict::Safe);
    }

    #[test]
    fn test_name_only() {
        assert_eq!(combine(&restricted("Flagged"), &Verdict::Safe), restricted("Flagged"));
    }

    #[test]
    fn test_registration_only() {
        assert_eq!(combine(&Verdict::Safe, &restricted("Flagged")), restricted("Flagged"));
    }

    #[test]
    fn test_name_takes_precedence() {
        assert_eq!(combine(&restricted("A"), &restricted("B")), restricted("A"));
    }
}
