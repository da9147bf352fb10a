use super::{Genotype, Haplotype};

/// A pair of candidate haplotypes selected as the explanation of one genotype.
///
/// The pair is unordered from the problem's point of view; the primary and
/// secondary roles only reflect which selection block of the encoding each
/// haplotype was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainingPair {
    primary: Haplotype,
    secondary: Haplotype,
}

impl ExplainingPair {
    /// Builds an explaining pair from the two selected haplotypes.
    pub fn new(primary: Haplotype, secondary: Haplotype) -> Self {
        Self { primary, secondary }
    }

    /// Returns the haplotype selected as the first strand.
    pub fn primary(&self) -> &Haplotype {
        &self.primary
    }

    /// Returns the haplotype selected as the second strand.
    pub fn secondary(&self) -> &Haplotype {
        &self.secondary
    }
}

/// Checks a decoded decomposition against the genotypes it must explain.
///
/// The check is independent of the way the pairs were produced: each genotype
/// must be explained by its own pair at every site.
/// A missing pair counts as a failure, as does a number of pairs different
/// from the number of genotypes.
///
/// # Example
///
/// ```
/// # use haplopar::genetics::{verify_decomposition, ExplainingPair, Genotype, Haplotype};
/// let first = "01".parse::<Haplotype>().unwrap();
/// let second = "10".parse::<Haplotype>().unwrap();
/// let genotype = Genotype::from_haplotype_pair(&first, &second);
/// let pairs = vec![Some(ExplainingPair::new(first, second))];
/// assert!(verify_decomposition(&pairs, &[genotype]));
/// ```
pub fn verify_decomposition(pairs: &[Option<ExplainingPair>], genotypes: &[Genotype]) -> bool {
    pairs.len() == genotypes.len()
        && pairs
            .iter()
            .zip(genotypes.iter())
            .all(|(pair, genotype)| match pair {
                Some(p) => genotype.is_explained_by(p.primary(), p.secondary()),
                None => false,
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haplotype(s: &str) -> Haplotype {
        s.parse().unwrap()
    }

    fn pair(first: &str, second: &str) -> Option<ExplainingPair> {
        Some(ExplainingPair::new(haplotype(first), haplotype(second)))
    }

    #[test]
    fn test_verify_generating_pairs() {
        let genotypes = vec![
            Genotype::from_haplotype_pair(&haplotype("01"), &haplotype("10")),
            Genotype::from_haplotype_pair(&haplotype("11"), &haplotype("11")),
        ];
        assert!(verify_decomposition(
            &[pair("01", "10"), pair("11", "11")],
            &genotypes
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_pair() {
        let genotypes = vec![Genotype::from_haplotype_pair(
            &haplotype("01"),
            &haplotype("10"),
        )];
        assert!(!verify_decomposition(&[pair("01", "01")], &genotypes));
    }

    #[test]
    fn test_verify_rejects_missing_pair() {
        let genotypes = vec![Genotype::from_haplotype_pair(
            &haplotype("0"),
            &haplotype("0"),
        )];
        assert!(!verify_decomposition(&[None], &genotypes));
    }

    #[test]
    fn test_verify_rejects_pair_count_mismatch() {
        let genotypes = vec![
            Genotype::from_haplotype_pair(&haplotype("0"), &haplotype("0")),
            Genotype::from_haplotype_pair(&haplotype("1"), &haplotype("1")),
        ];
        assert!(!verify_decomposition(&[pair("0", "0")], &genotypes));
    }

    #[test]
    fn test_verify_empty() {
        assert!(verify_decomposition(&[], &[]));
    }
}
