use crate::{
    genetics::{ExplainingPair, Haplotype, HaplotypingInstance},
    sat::{Assignment, SatSolver},
};

/// The trait for encoders reducing haplotype inference to SAT.
pub trait ConstraintsEncoder {
    /// Encodes into the solver the constraints stating that every genotype of
    /// the instance is explained by two of the `n_candidates` candidate haplotypes.
    fn encode_constraints(
        &self,
        instance: &HaplotypingInstance,
        n_candidates: usize,
        solver: &mut dyn SatSolver,
    );

    /// Translates back a SAT assignment into the candidate haplotypes.
    fn assignment_to_candidates(
        &self,
        assignment: &Assignment,
        instance: &HaplotypingInstance,
        n_candidates: usize,
    ) -> Vec<Haplotype>;

    /// Translates back a SAT assignment into the pair of candidates selected for each genotype.
    ///
    /// For each genotype, the first candidate which primary (resp. secondary)
    /// selector is true in the assignment gives the first (resp. second)
    /// haplotype of the pair.
    /// [Option::None] flags a genotype for which no pair could be decoded;
    /// callers must treat such an output as a decoding failure for this
    /// genotype, not as an explained genotype.
    fn assignment_to_pairs(
        &self,
        assignment: &Assignment,
        instance: &HaplotypingInstance,
        n_candidates: usize,
    ) -> Vec<Option<ExplainingPair>>;
}
