//! Consensus thresholds shared by governance votes and observation voters.

/// Denominator of the supermajority fraction (2/3).
const SUPER_MAJORITY_FACTOR: usize = 3;
const SIMPLE_MAJORITY_FACTOR: usize = 2;

/// Smallest signer count that is a supermajority of `total`.
pub fn get_threshold(total: usize) -> usize {
    let doubled = total * 2;
    doubled / SUPER_MAJORITY_FACTOR + usize::from(doubled % SUPER_MAJORITY_FACTOR > 0)
}

/// True when `signers` is at least two thirds of `total`, rounded up.
///
/// More signers than the total, or no signers at all, never qualifies.
pub fn has_super_majority(signers: usize, total: usize) -> bool {
    if signers == 0 || signers > total {
        return false;
    }
    signers >= get_threshold(total)
}

/// True when `signers` is at least half of `total`, rounded up.
pub fn has_simple_majority(signers: usize, total: usize) -> bool {
    if signers == 0 || signers > total {
        return false;
    }
    let min = total / SIMPLE_MAJORITY_FACTOR + usize::from(total % SIMPLE_MAJORITY_FACTOR > 0);
    signers >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_majority() {
        assert!(has_super_majority(2, 3));
        assert!(!has_super_majority(1, 3));
        assert!(has_super_majority(3, 4));
        assert!(!has_super_majority(2, 4));
        assert!(has_super_majority(67, 100));
        assert!(!has_super_majority(66, 100));
        assert!(!has_super_majority(0, 0));
        assert!(!has_super_majority(4, 3));
    }

    #[test]
    fn test_simple_majority() {
        assert!(has_simple_majority(2, 3));
        assert!(has_simple_majority(2, 4));
        assert!(!has_simple_majority(1, 4));
        assert!(!has_simple_majority(5, 4));
    }

    #[test]
    fn test_threshold() {
        assert_eq!(get_threshold(3), 2);
        assert_eq!(get_threshold(4), 3);
        assert_eq!(get_threshold(100), 67);
        assert_eq!(get_threshold(0), 0);
    }
}
