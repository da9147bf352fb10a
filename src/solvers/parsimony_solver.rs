use super::{
    binary_search::{ProbeOutcome, SearchBounds},
    MinimumHaplotypeSetComputer,
};
use crate::{
    encodings::{
        CardinalityEncoder, ConstraintsEncoder, DefaultConstraintsEncoder,
        PairwiseCardinalityEncoder,
    },
    genetics::{verify_decomposition, ExplainingPair, Haplotype, HaplotypingInstance},
    sat::{DefaultSatSolverFactory, SatSolverFactory, SolvingResult},
};
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// The statistics accumulated over all the probes of a search.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    n_probes: usize,
    solve_time: Duration,
    n_clauses: usize,
    n_vars: usize,
}

impl SearchStats {
    fn record_probe(&mut self, solve_time: Duration, n_clauses: usize, n_vars: usize) {
        self.n_probes += 1;
        self.solve_time += solve_time;
        self.n_clauses += n_clauses;
        self.n_vars += n_vars;
    }

    /// Returns the number of candidate counts that were probed.
    pub fn n_probes(&self) -> usize {
        self.n_probes
    }

    /// Returns the time spent in the SAT collaborator, all probes included.
    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }

    /// Returns the number of clauses built, all probes included.
    pub fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    /// Returns the number of variables allocated, all probes included.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }
}

/// A minimum decomposition: the candidate haplotypes and the pair explaining each genotype.
pub struct ParsimonySolution {
    haplotypes: Vec<Haplotype>,
    pairs: Vec<ExplainingPair>,
}

impl ParsimonySolution {
    /// Returns the number of haplotypes of the decomposition.
    pub fn n_haplotypes(&self) -> usize {
        self.haplotypes.len()
    }

    /// Returns the haplotypes of the decomposition.
    pub fn haplotypes(&self) -> &[Haplotype] {
        &self.haplotypes
    }

    /// Returns the explaining pairs, in genotype order.
    pub fn pairs(&self) -> &[ExplainingPair] {
        &self.pairs
    }
}

/// The outcome of a search: the best confirmed decomposition, if any, and the statistics.
pub struct ParsimonyOutcome {
    solution: Option<ParsimonySolution>,
    stats: SearchStats,
}

impl ParsimonyOutcome {
    /// Returns the minimum decomposition found, or [Option::None] if no probe was confirmed.
    pub fn solution(&self) -> Option<&ParsimonySolution> {
        self.solution.as_ref()
    }

    /// Returns the statistics accumulated during the search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// A solver searching for the minimum number of haplotypes explaining an instance.
///
/// The search is a binary search on the candidate count, between one and the
/// size of the haplotype sample.
/// Each probe encodes the instance for the candidate count under test, calls
/// the SAT collaborator, and on satisfiability decodes the model and checks
/// the decomposition against the genotypes.
/// Only a decomposition passing this verification narrows the search down;
/// unsatisfiable probes and failed verifications narrow it up.
///
/// # Example
///
/// ```
/// # use haplopar::genetics::{Haplotype, HaplotypingInstance};
/// # use haplopar::solvers::{MinimumHaplotypeSetComputer, ParsimonySolver};
/// let haplotypes = vec![
///     "01".parse::<Haplotype>().unwrap(),
///     "10".parse::<Haplotype>().unwrap(),
/// ];
/// let instance = HaplotypingInstance::new_with_haplotypes(haplotypes).unwrap();
/// let mut solver = ParsimonySolver::new(&instance);
/// let outcome = solver.compute_minimum_haplotype_set().unwrap();
/// assert_eq!(2, outcome.solution().unwrap().n_haplotypes());
/// ```
pub struct ParsimonySolver<'a> {
    instance: &'a HaplotypingInstance,
    solver_factory: Box<dyn SatSolverFactory>,
    constraints_encoder: Box<dyn ConstraintsEncoder>,
    cardinality_encoder: Box<dyn CardinalityEncoder>,
}

impl<'a> ParsimonySolver<'a> {
    /// Builds a new solver for the provided instance.
    ///
    /// The underlying SAT solver is the default one and the constraints rely
    /// on the default encoder.
    pub fn new(instance: &'a HaplotypingInstance) -> Self {
        Self::new_with_sat_solver_factory(instance, Box::<DefaultSatSolverFactory>::default())
    }

    /// Builds a new solver for the provided instance, given the factory building its SAT solvers.
    pub fn new_with_sat_solver_factory(
        instance: &'a HaplotypingInstance,
        solver_factory: Box<dyn SatSolverFactory>,
    ) -> Self {
        Self::new_with_sat_solver_factory_and_constraints_encoder(
            instance,
            solver_factory,
            Box::<DefaultConstraintsEncoder>::default(),
        )
    }

    /// Builds a new solver given both the SAT solver factory and the constraints encoder to use.
    pub fn new_with_sat_solver_factory_and_constraints_encoder(
        instance: &'a HaplotypingInstance,
        solver_factory: Box<dyn SatSolverFactory>,
        constraints_encoder: Box<dyn ConstraintsEncoder>,
    ) -> Self {
        Self {
            instance,
            solver_factory,
            constraints_encoder,
            cardinality_encoder: Box::new(PairwiseCardinalityEncoder),
        }
    }

    fn probe(
        &self,
        n_candidates: usize,
        stats: &mut SearchStats,
    ) -> Result<Option<ParsimonySolution>> {
        debug!("probing a decomposition into {} haplotype(s)", n_candidates);
        let mut solver = self.solver_factory.new_solver();
        self.constraints_encoder
            .encode_constraints(self.instance, n_candidates, solver.as_mut());
        // cap on the number of used candidates; its variable slice lies inside
        // the candidate-site range, and the bound covers the whole slice
        let candidate_usage_vars = (1..=n_candidates).collect::<Vec<usize>>();
        self.cardinality_encoder
            .encode_at_most(&candidate_usage_vars, n_candidates, solver.as_mut());
        let start = Instant::now();
        let solving_result = solver.solve();
        stats.record_probe(start.elapsed(), solver.n_clauses(), solver.n_vars());
        match solving_result {
            SolvingResult::Satisfiable(assignment) => {
                let pairs =
                    self.constraints_encoder
                        .assignment_to_pairs(&assignment, self.instance, n_candidates);
                if verify_decomposition(&pairs, self.instance.genotypes()) {
                    info!(
                        "found a valid decomposition into {} haplotype(s)",
                        n_candidates
                    );
                    let haplotypes = self.constraints_encoder.assignment_to_candidates(
                        &assignment,
                        self.instance,
                        n_candidates,
                    );
                    Ok(Some(ParsimonySolution {
                        haplotypes,
                        pairs: pairs.into_iter().flatten().collect(),
                    }))
                } else {
                    debug!(
                        "the decomposition decoded for {} haplotype(s) failed verification",
                        n_candidates
                    );
                    Ok(None)
                }
            }
            SolvingResult::Unsatisfiable => Ok(None),
            SolvingResult::Unknown => Err(anyhow!(
                "the SAT solver was unable to decide the probe of {} haplotype(s)",
                n_candidates
            )),
        }
    }
}

impl MinimumHaplotypeSetComputer for ParsimonySolver<'_> {
    fn compute_minimum_haplotype_set(&mut self) -> Result<ParsimonyOutcome> {
        let mut bounds = SearchBounds::new(self.instance.n_haplotypes());
        let mut stats = SearchStats::default();
        let mut best = None;
        while !bounds.is_exhausted() {
            let n_candidates = bounds.midpoint();
            match self.probe(n_candidates, &mut stats)? {
                Some(solution) => {
                    best = Some(solution);
                    bounds.update(n_candidates, ProbeOutcome::Feasible);
                }
                None => bounds.update(n_candidates, ProbeOutcome::Infeasible),
            }
        }
        if best.is_none() && self.instance.n_haplotypes() > 0 {
            warn!("no valid decomposition found, although the full sample is a trivial one");
        }
        Ok(ParsimonyOutcome {
            solution: best,
            stats,
        })
    }
}
