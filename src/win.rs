// Win evaluation: middle-row equality check
//
// Deliberately minimal. Hosts receive the full final windows in the spin
// outcome and are expected to run their own payout logic; this check only
// drives the cosmetic win-line pulse.

use crate::types::ReelWindow;

/// True when the middle symbol of every reel is the same.
///
/// A single-reel spin trivially wins; an empty window list does not.
pub fn middle_row_wins(windows: &[ReelWindow]) -> bool {
    let mut middles = windows.iter().map(|w| &w[1]);
    match middles.next() {
        Some(first) => middles.all(|m| m == first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(a: &str, b: &str, c: &str) -> ReelWindow {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    #[test]
    fn test_matching_middle_row_wins() {
        let windows = vec![
            window("a", "b", "c"),
            window("d", "b", "e"),
            window("f", "b", "g"),
        ];
        assert!(middle_row_wins(&windows));
    }

    #[test]
    fn test_mismatched_middle_row_loses() {
        let windows = vec![
            window("a", "b", "c"),
            window("d", "b", "e"),
            window("f", "c", "g"),
        ];
        assert!(!middle_row_wins(&windows));
    }

    #[test]
    fn test_top_and_bottom_rows_ignored() {
        let windows = vec![window("a", "x", "c"), window("a", "x", "c"), window("b", "x", "d")];
        assert!(middle_row_wins(&windows));
    }

    #[test]
    fn test_single_reel_wins_trivially() {
        assert!(middle_row_wins(&[window("a", "b", "c")]));
    }

    #[test]
    fn test_no_reels_no_win() {
        assert!(!middle_row_wins(&[]));
    }
}
