use common_artydrop::PlanTier;

/// A numeric ceiling. `Unlimited` is a real variant, not a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Bounded(u32),
}

impl Limit {
    /// Whether one more item may be created given `existing` items.
    /// Creation is denied at the ceiling: `existing >= n` blocks.
    #[must_use]
    pub fn allows_one_more(self, existing: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Bounded(ceiling) => existing < ceiling,
        }
    }

    /// Whether a running total is acceptable. Landing exactly on the ceiling
    /// is allowed, unlike `allows_one_more` which blocks at it.
    #[must_use]
    pub fn allows_total(self, total: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Bounded(ceiling) => total <= ceiling,
        }
    }
}

/// Per-tier ceilings.
#[derive(Debug, Clone, Copy)]
pub struct TierLimits {
    pub galleries: Limit,
    pub photos_per_gallery: Limit,
}

/// Ceilings per plan tier. `None` has no limits because it grants nothing;
/// callers must reject it before consulting this table.
#[must_use]
pub fn limits_for(tier: PlanTier) -> Option<TierLimits> {
    match tier {
        PlanTier::None => None,
        PlanTier::Test => Some(TierLimits {
            galleries: Limit::Bounded(1),
            photos_per_gallery: Limit::Bounded(50),
        }),
        PlanTier::Payg => Some(TierLimits {
            galleries: Limit::Unlimited,
            photos_per_gallery: Limit::Bounded(500),
        }),
        PlanTier::Studio => Some(TierLimits {
            galleries: Limit::Unlimited,
            photos_per_gallery: Limit::Unlimited,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Limit::Bounded(3), 2, true)] // creating the 3rd of 3 allowed
    #[case(Limit::Bounded(3), 3, false)] // creating the 4th denied
    #[case(Limit::Bounded(1), 0, true)]
    #[case(Limit::Bounded(1), 1, false)]
    #[case(Limit::Unlimited, 1_000_000, true)]
    fn gallery_creation_boundary(
        #[case] limit: Limit,
        #[case] existing: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(limit.allows_one_more(existing), expected);
    }

    #[rstest]
    #[case(Limit::Bounded(50), 50, true)] // exactly at the ceiling allowed
    #[case(Limit::Bounded(50), 51, false)] // one over denied
    #[case(Limit::Bounded(50), 0, true)]
    #[case(Limit::Unlimited, u32::MAX, true)]
    fn upload_total_boundary(#[case] limit: Limit, #[case] total: u32, #[case] expected: bool) {
        assert_eq!(limit.allows_total(total), expected);
    }

    #[test]
    fn the_two_boundary_rules_differ_at_the_ceiling() {
        // 50 existing with a ceiling of 50: a total of 50 is fine for
        // uploads, but a 51st creation is not.
        let limit = Limit::Bounded(50);
        assert!(limit.allows_total(50));
        assert!(!limit.allows_one_more(50));
    }

    #[test]
    fn none_tier_has_no_limit_table() {
        assert!(limits_for(common_artydrop::PlanTier::None).is_none());
        assert!(limits_for(common_artydrop::PlanTier::Studio).is_some());
    }
}
