use super::Haplotype;
use std::fmt::Display;

/// The value observed for a genotype at a single polymorphic site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeSite {
    /// Both strands agree at this site; the flag gives the shared state.
    Homozygous(bool),
    /// The two strands disagree at this site.
    Heterozygous,
}

impl Display for GenotypeSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenotypeSite::Homozygous(false) => write!(f, "0"),
            GenotypeSite::Homozygous(true) => write!(f, "1"),
            GenotypeSite::Heterozygous => write!(f, "2"),
        }
    }
}

/// A genotype: the site-wise combination of two haplotypes, as observed.
///
/// At each site, the genotype carries the shared state when both strands agree,
/// and an ambiguity marker when they disagree.
///
/// # Example
///
/// ```
/// # use haplopar::genetics::{Genotype, Haplotype};
/// let first = "011".parse::<Haplotype>().unwrap();
/// let second = "001".parse::<Haplotype>().unwrap();
/// let genotype = Genotype::from_haplotype_pair(&first, &second);
/// assert_eq!("021", genotype.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genotype(Vec<GenotypeSite>);

impl Genotype {
    /// Builds the genotype observed when combining the two provided haplotypes.
    ///
    /// # Panics
    ///
    /// Panics if the two haplotypes do not have the same number of sites.
    pub fn from_haplotype_pair(first: &Haplotype, second: &Haplotype) -> Self {
        assert_eq!(
            first.n_sites(),
            second.n_sites(),
            "cannot combine haplotypes with different numbers of sites"
        );
        Self(
            first
                .iter()
                .zip(second.iter())
                .map(|(a, b)| {
                    if a == b {
                        GenotypeSite::Homozygous(a)
                    } else {
                        GenotypeSite::Heterozygous
                    }
                })
                .collect(),
        )
    }

    /// Returns the number of polymorphic sites of this genotype.
    pub fn n_sites(&self) -> usize {
        self.0.len()
    }

    /// Returns the value of this genotype at the site with the provided index.
    ///
    /// # Panics
    ///
    /// Panics if the site index is higher or equal to the number of sites.
    pub fn site(&self, site: usize) -> GenotypeSite {
        self.0[site]
    }

    /// Returns an iterator over the site values of this genotype.
    pub fn iter(&self) -> impl Iterator<Item = GenotypeSite> + '_ {
        self.0.iter().copied()
    }

    /// Checks whether the provided pair of haplotypes explains this genotype.
    ///
    /// A pair explains a genotype if and only if, at every site, both haplotypes
    /// carry the shared state of a homozygous site and carry opposite states at
    /// a heterozygous site.
    /// The pair is unordered: swapping the two haplotypes does not change the
    /// result.
    pub fn is_explained_by(&self, first: &Haplotype, second: &Haplotype) -> bool {
        first.n_sites() == self.n_sites()
            && second.n_sites() == self.n_sites()
            && self.iter().enumerate().all(|(j, site)| match site {
                GenotypeSite::Homozygous(b) => first.site(j) == b && second.site(j) == b,
                GenotypeSite::Heterozygous => first.site(j) != second.site(j),
            })
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|s| write!(f, "{}", s))
    }
}
