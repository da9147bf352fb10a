use super::ParsimonyOutcome;
use anyhow::Result;

/// A trait for solvers computing a minimum-cardinality haplotype decomposition.
pub trait MinimumHaplotypeSetComputer {
    /// Runs the search and returns its outcome.
    ///
    /// An error is returned if the SAT collaborator was unable to decide the
    /// satisfiability of a probe; such a status is never interpreted as
    /// satisfiable nor unsatisfiable.
    fn compute_minimum_haplotype_set(&mut self) -> Result<ParsimonyOutcome>;
}
