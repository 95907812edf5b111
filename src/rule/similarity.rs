use super::{Certainty, Similarity};
use std::cmp::Ordering;

impl Similarity {
    /// The multiplicative monoid on similarity scores: `Dissimilar`
    /// absorbs, `ExactlyEqual` is the identity.
    pub fn combine(self, other: Similarity) -> Similarity {
        match (self, other) {
            (Similarity::Dissimilar, _) | (_, Similarity::Dissimilar) => Similarity::Dissimilar,
            (Similarity::ExactlyEqual, s) | (s, Similarity::ExactlyEqual) => s,
            (Similarity::Similar(x), Similarity::Similar(y)) => Similarity::Similar(x * y),
        }
    }

    /// The score as a weight factor: 0 for `Dissimilar`, 1 for
    /// `ExactlyEqual`.
    pub fn factor(&self) -> f64 {
        match self {
            Similarity::Dissimilar => 0.0,
            Similarity::Similar(x) => *x,
            Similarity::ExactlyEqual => 1.0,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Similarity::Dissimilar)
    }

    fn rank(&self) -> u8 {
        match self {
            Similarity::Dissimilar => 0,
            Similarity::Similar(_) => 1,
            Similarity::ExactlyEqual => 2,
        }
    }
}

impl PartialEq for Similarity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Similarity {}

impl PartialOrd for Similarity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Similarity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Similarity::Similar(x), Similarity::Similar(y)) => x.total_cmp(y),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Certainty {
    /// Full certainty, the weight every query starts with.
    pub fn full() -> Self {
        Certainty(1.0)
    }

    /// Decay the weight by a match factor.
    pub fn and(self, factor: f64) -> Self {
        Certainty(self.0 * factor)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Certainty {
    fn default() -> Self {
        Certainty::full()
    }
}

impl PartialEq for Certainty {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Certainty {}

impl PartialOrd for Certainty {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Certainty {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Similarity;

    #[test]
    fn the_order_is_dissimilar_similar_exact() {
        assert!(Similarity::Dissimilar < Similarity::Similar(0.1));
        assert!(Similarity::Similar(0.1) < Similarity::Similar(0.9));
        assert!(Similarity::Similar(0.999) < Similarity::ExactlyEqual);
    }

    #[test]
    fn combine_is_a_product_with_absorption() {
        assert_eq!(
            Similarity::Similar(0.5).combine(Similarity::Similar(0.5)),
            Similarity::Similar(0.25)
        );
        assert_eq!(
            Similarity::ExactlyEqual.combine(Similarity::Similar(0.3)),
            Similarity::Similar(0.3)
        );
        assert_eq!(
            Similarity::Dissimilar.combine(Similarity::ExactlyEqual),
            Similarity::Dissimilar
        );
    }
}
