use super::{Genotype, Haplotype};
use anyhow::{anyhow, Result};

/// A pure parsimony haplotyping instance.
///
/// An instance is built from a sample of haplotypes.
/// The genotypes to explain are derived by pairing consecutive haplotypes of
/// the sample: the genotype with index `i` combines the haplotypes with
/// indexes `2i` and `2i + 1`.
/// The sample itself is a trivial explanation of its genotypes, making its
/// size an upper bound on the minimum number of explaining haplotypes.
///
/// # Example
///
/// ```
/// # use haplopar::genetics::{Haplotype, HaplotypingInstance};
/// let haplotypes = vec![
///     "01".parse::<Haplotype>().unwrap(),
///     "10".parse::<Haplotype>().unwrap(),
/// ];
/// let instance = HaplotypingInstance::new_with_haplotypes(haplotypes).unwrap();
/// assert_eq!(2, instance.n_haplotypes());
/// assert_eq!(1, instance.n_genotypes());
/// assert_eq!("22", instance.genotypes()[0].to_string());
/// ```
pub struct HaplotypingInstance {
    haplotypes: Vec<Haplotype>,
    genotypes: Vec<Genotype>,
}

impl HaplotypingInstance {
    /// Builds an instance given its haplotype sample.
    ///
    /// An error is returned if the number of haplotypes is odd or if two
    /// haplotypes have different numbers of sites.
    pub fn new_with_haplotypes(haplotypes: Vec<Haplotype>) -> Result<Self> {
        if haplotypes.len() & 1 == 1 {
            return Err(anyhow!(
                "expected an even number of haplotypes, got {}",
                haplotypes.len()
            ));
        }
        let n_sites = haplotypes.first().map(Haplotype::n_sites).unwrap_or_default();
        if let Some((i, h)) = haplotypes
            .iter()
            .enumerate()
            .find(|(_, h)| h.n_sites() != n_sites)
        {
            return Err(anyhow!(
                "error in haplotype with index {}: expected {} site(s), got {}",
                i,
                n_sites,
                h.n_sites()
            ));
        }
        let genotypes = haplotypes
            .chunks_exact(2)
            .map(|pair| Genotype::from_haplotype_pair(&pair[0], &pair[1]))
            .collect();
        Ok(Self {
            haplotypes,
            genotypes,
        })
    }

    /// Returns the number of haplotypes in the sample.
    pub fn n_haplotypes(&self) -> usize {
        self.haplotypes.len()
    }

    /// Returns the number of genotypes derived from the sample.
    pub fn n_genotypes(&self) -> usize {
        self.genotypes.len()
    }

    /// Returns the number of polymorphic sites of the instance.
    pub fn n_sites(&self) -> usize {
        self.haplotypes
            .first()
            .map(Haplotype::n_sites)
            .unwrap_or_default()
    }

    /// Returns the haplotype sample.
    pub fn haplotypes(&self) -> &[Haplotype] {
        &self.haplotypes
    }

    /// Returns the genotypes to explain.
    pub fn genotypes(&self) -> &[Genotype] {
        &self.genotypes
    }
}
