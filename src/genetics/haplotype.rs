use anyhow::{anyhow, Result};
use std::{fmt::Display, str::FromStr};

/// A haplotype, giving the binary state of one chromosomal strand at each of its polymorphic sites.
///
/// Haplotypes are immutable; they are built from their site values and never updated.
///
/// # Example
///
/// ```
/// # use haplopar::genetics::Haplotype;
/// let haplotype = "0110".parse::<Haplotype>().unwrap();
/// assert_eq!(4, haplotype.n_sites());
/// assert!(!haplotype.site(0));
/// assert!(haplotype.site(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Haplotype(Vec<bool>);

impl Haplotype {
    /// Builds a haplotype from its site values.
    pub fn new(sites: Vec<bool>) -> Self {
        Self(sites)
    }

    /// Returns the number of polymorphic sites of this haplotype.
    pub fn n_sites(&self) -> usize {
        self.0.len()
    }

    /// Returns the state of this haplotype at the site with the provided index.
    ///
    /// # Panics
    ///
    /// Panics if the site index is higher or equal to the number of sites.
    pub fn site(&self, site: usize) -> bool {
        self.0[site]
    }

    /// Returns an iterator over the site values of this haplotype.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<bool>> for Haplotype {
    fn from(sites: Vec<bool>) -> Self {
        Self::new(sites)
    }
}

impl FromStr for Haplotype {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(anyhow!(r#"unexpected character "{}" in haplotype"#, c)),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Self::new)
    }
}

impl Display for Haplotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0
            .iter()
            .try_for_each(|b| write!(f, "{}", if *b { 1 } else { 0 }))
    }
}
