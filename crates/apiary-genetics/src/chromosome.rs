//! Trait pairs: one active and one inactive allele of the same category.

use std::sync::Arc;

use rand::Rng;

use crate::allele::Allele;
use crate::error::GeneticsError;

/// A pair of alleles for one trait category.
///
/// The active allele is the expressed one. When exactly one of the two
/// alleles is dominant it is active; otherwise the first allele given to
/// the constructor is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    active: Arc<Allele>,
    inactive: Arc<Allele>,
}

impl Chromosome {
    /// Pair two alleles, resolving which one is active.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::MismatchedPair`] when the alleles belong to
    /// different categories.
    pub fn new(first: Arc<Allele>, second: Arc<Allele>) -> Result<Self, GeneticsError> {
        if first.kind() != second.kind() {
            return Err(GeneticsError::MismatchedPair {
                first: first.uid().clone(),
                first_kind: first.kind(),
                second: second.uid().clone(),
                second_kind: second.kind(),
            });
        }
        Ok(Self::resolve(first, second))
    }

    /// A pure-bred pair carrying the same allele twice.
    pub fn pure(allele: Arc<Allele>) -> Self {
        Self {
            active: Arc::clone(&allele),
            inactive: allele,
        }
    }

    /// Dominance resolution for alleles already known to share a category.
    fn resolve(first: Arc<Allele>, second: Arc<Allele>) -> Self {
        if second.is_dominant() && !first.is_dominant() {
            Self {
                active: second,
                inactive: first,
            }
        } else {
            Self {
                active: first,
                inactive: second,
            }
        }
    }

    /// Combine one chromosome from each parent into an offspring chromosome.
    ///
    /// Each parent contributes one of its two alleles with equal odds. The
    /// two contributions are then ordered by a further coin flip, so when
    /// dominance does not decide, either allele is equally likely to be
    /// active.
    pub fn inherit(rng: &mut impl Rng, first: &Self, second: &Self) -> Self {
        let choice1 = if rng.random_bool(0.5) {
            Arc::clone(&first.active)
        } else {
            Arc::clone(&first.inactive)
        };
        let choice2 = if rng.random_bool(0.5) {
            Arc::clone(&second.active)
        } else {
            Arc::clone(&second.inactive)
        };

        if rng.random_bool(0.5) {
            Self::resolve(choice2, choice1)
        } else {
            Self::resolve(choice1, choice2)
        }
    }

    /// The expressed allele.
    pub const fn active(&self) -> &Arc<Allele> {
        &self.active
    }

    /// The carried, unexpressed allele.
    pub const fn inactive(&self) -> &Arc<Allele> {
        &self.inactive
    }

    /// Whether both alleles are the same.
    pub fn is_pure_bred(&self) -> bool {
        self.active.uid() == self.inactive.uid()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::allele::AlleleValue;

    fn integer(uid: &str, dominant: bool, value: u32) -> Arc<Allele> {
        Arc::new(Allele::new(uid, uid, dominant, AlleleValue::Integer(value)))
    }

    #[test]
    fn dominant_allele_becomes_active() {
        let recessive = integer("low", false, 1);
        let dominant = integer("high", true, 3);
        let pair = Chromosome::new(recessive, Arc::clone(&dominant)).unwrap();
        assert_eq!(pair.active().uid(), dominant.uid());
        assert_eq!(pair.inactive().uid().as_str(), "low");
    }

    #[test]
    fn first_allele_wins_a_tie() {
        let a = integer("a", true, 1);
        let b = integer("b", true, 2);
        let pair = Chromosome::new(Arc::clone(&a), b).unwrap();
        assert_eq!(pair.active().uid(), a.uid());
    }

    #[test]
    fn mismatched_categories_are_rejected() {
        let number = integer("n", true, 1);
        let flag = Arc::new(Allele::new("f", "f", true, AlleleValue::Boolean(true)));
        let result = Chromosome::new(number, flag);
        assert!(matches!(result, Err(GeneticsError::MismatchedPair { .. })));
    }

    #[test]
    fn inheritance_draws_from_both_parents() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mother = Chromosome::pure(integer("m", false, 1));
        let father = Chromosome::pure(integer("f", false, 2));
        for _ in 0..50 {
            let child = Chromosome::inherit(&mut rng, &mother, &father);
            let uids = [child.active().uid().as_str(), child.inactive().uid().as_str()];
            assert!(uids.contains(&"m"));
            assert!(uids.contains(&"f"));
        }
    }

    #[test]
    fn inheritance_respects_dominance() {
        let mut rng = SmallRng::seed_from_u64(11);
        let dominant = Chromosome::pure(integer("d", true, 1));
        let recessive = Chromosome::pure(integer("r", false, 2));
        for _ in 0..50 {
            let child = Chromosome::inherit(&mut rng, &recessive, &dominant);
            assert_eq!(child.active().uid().as_str(), "d");
        }
    }

    #[test]
    fn tie_resolution_picks_either_allele() {
        let mut rng = SmallRng::seed_from_u64(3);
        let left = Chromosome::pure(integer("l", false, 1));
        let right = Chromosome::pure(integer("r", false, 2));
        let mut left_active = 0_u32;
        for _ in 0..200 {
            let child = Chromosome::inherit(&mut rng, &left, &right);
            if child.active().uid().as_str() == "l" {
                left_active = left_active.saturating_add(1);
            }
        }
        assert!(left_active > 50 && left_active < 150, "got {left_active}/200");
    }
}
