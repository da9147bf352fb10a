use super::{
    cardinality::PairwiseCardinalityEncoder, CardinalityEncoder, ConstraintsEncoder,
    VariableLayout,
};
use crate::{
    clause,
    genetics::{ExplainingPair, GenotypeSite, Haplotype, HaplotypingInstance},
    sat::{Assignment, Literal, SatSolver},
};
use strum_macros::{Display, EnumString, EnumVariantNames};

/// The formulation applied to heterozygous sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum HeterozygousEncoding {
    /// Two complementary auxiliary variables per heterozygous site, linked to
    /// the selected candidates' states for every candidate.
    Exhaustive,
    /// A single auxiliary variable per heterozygous site, tied to the first
    /// candidate only.
    ///
    /// This formulation is cheaper but narrower: it constrains a heterozygous
    /// site only when the first candidate takes part in the explanation of the
    /// genotype, and leaves the secondary selection unconstrained at such a
    /// site.
    /// Decompositions decoded from its models may thus fail verification, in
    /// which case the probed candidate count is handled as infeasible.
    Reduced,
}

/// An encoder stating that each genotype is explained by a pair of candidate haplotypes.
///
/// For every genotype, a primary and a secondary selection of one candidate
/// among the `r` available ones are constrained through exactly-one
/// cardinality constraints over the selector variables of the
/// [layout](VariableLayout).
/// Site constraints then tie the states of the selected candidates to the
/// genotype values; the handling of heterozygous sites depends on the chosen
/// [HeterozygousEncoding].
pub struct PairConstraintsEncoder {
    het_encoding: HeterozygousEncoding,
    cardinality_encoder: Box<dyn CardinalityEncoder>,
}

impl PairConstraintsEncoder {
    /// Builds an encoder using the exhaustive heterozygous formulation.
    pub fn new_exhaustive() -> Self {
        Self::new_with_heterozygous_encoding(HeterozygousEncoding::Exhaustive)
    }

    /// Builds an encoder using the reduced heterozygous formulation.
    pub fn new_reduced() -> Self {
        Self::new_with_heterozygous_encoding(HeterozygousEncoding::Reduced)
    }

    /// Builds an encoder using the provided heterozygous formulation.
    pub fn new_with_heterozygous_encoding(het_encoding: HeterozygousEncoding) -> Self {
        Self {
            het_encoding,
            cardinality_encoder: Box::new(PairwiseCardinalityEncoder),
        }
    }

    fn encode_homozygous_site(
        layout: &VariableLayout,
        site: usize,
        state: bool,
        primary: &[usize],
        secondary: &[usize],
        solver: &mut dyn SatSolver,
    ) {
        for k in 0..primary.len() {
            let h = layout.candidate_site_var(k, site) as isize;
            let h = if state { h } else { -h };
            solver.add_clause(clause![h, -(primary[k] as isize)]);
            solver.add_clause(clause![h, -(secondary[k] as isize)]);
        }
    }

    fn encode_heterozygous_site(
        layout: &VariableLayout,
        site: usize,
        primary: &[usize],
        secondary: &[usize],
        solver: &mut dyn SatSolver,
    ) {
        let ga = layout.new_aux_var(solver) as isize;
        let gb = layout.new_aux_var(solver) as isize;
        solver.add_clause(clause![-ga, -gb]);
        solver.add_clause(clause![ga, gb]);
        for k in 0..primary.len() {
            let h = layout.candidate_site_var(k, site) as isize;
            let a = primary[k] as isize;
            let b = secondary[k] as isize;
            solver.add_clause(clause![h, -ga, -a]);
            solver.add_clause(clause![-h, ga, -a]);
            solver.add_clause(clause![h, -gb, -b]);
            solver.add_clause(clause![-h, gb, -b]);
        }
    }

    fn encode_heterozygous_site_reduced(
        layout: &VariableLayout,
        site: usize,
        primary: &[usize],
        solver: &mut dyn SatSolver,
    ) {
        let t = layout.new_aux_var(solver) as isize;
        let h = layout.candidate_site_var(0, site) as isize;
        let a = primary[0] as isize;
        solver.add_clause(clause![-t, -h, -a]);
        solver.add_clause(clause![t, h, a]);
    }
}

impl Default for PairConstraintsEncoder {
    fn default() -> Self {
        Self::new_exhaustive()
    }
}

impl ConstraintsEncoder for PairConstraintsEncoder {
    fn encode_constraints(
        &self,
        instance: &HaplotypingInstance,
        n_candidates: usize,
        solver: &mut dyn SatSolver,
    ) {
        let layout = VariableLayout::new(n_candidates, instance.n_sites(), instance.n_genotypes());
        solver.reserve(layout.n_fixed_vars());
        for (i, genotype) in instance.genotypes().iter().enumerate() {
            let primary = (0..n_candidates)
                .map(|k| layout.primary_selector_var(i, k))
                .collect::<Vec<usize>>();
            let secondary = (0..n_candidates)
                .map(|k| layout.secondary_selector_var(i, k))
                .collect::<Vec<usize>>();
            debug_assert_eq!(n_candidates, primary.len());
            debug_assert_eq!(n_candidates, secondary.len());
            self.cardinality_encoder
                .encode_exactly_one(&primary, solver);
            self.cardinality_encoder
                .encode_exactly_one(&secondary, solver);
            for (j, site) in genotype.iter().enumerate() {
                match site {
                    GenotypeSite::Homozygous(state) => {
                        Self::encode_homozygous_site(&layout, j, state, &primary, &secondary, solver)
                    }
                    GenotypeSite::Heterozygous => match self.het_encoding {
                        HeterozygousEncoding::Exhaustive => Self::encode_heterozygous_site(
                            &layout, j, &primary, &secondary, solver,
                        ),
                        HeterozygousEncoding::Reduced => {
                            Self::encode_heterozygous_site_reduced(&layout, j, &primary, solver)
                        }
                    },
                }
            }
        }
    }

    fn assignment_to_candidates(
        &self,
        assignment: &Assignment,
        instance: &HaplotypingInstance,
        n_candidates: usize,
    ) -> Vec<Haplotype> {
        let layout = VariableLayout::new(n_candidates, instance.n_sites(), instance.n_genotypes());
        (0..n_candidates)
            .map(|k| {
                Haplotype::new(
                    (0..instance.n_sites())
                        .map(|j| assignment.value_of(layout.candidate_site_var(k, j)) == Some(true))
                        .collect(),
                )
            })
            .collect()
    }

    fn assignment_to_pairs(
        &self,
        assignment: &Assignment,
        instance: &HaplotypingInstance,
        n_candidates: usize,
    ) -> Vec<Option<ExplainingPair>> {
        let layout = VariableLayout::new(n_candidates, instance.n_sites(), instance.n_genotypes());
        let candidates = self.assignment_to_candidates(assignment, instance, n_candidates);
        (0..instance.n_genotypes())
            .map(|i| {
                let primary = (0..n_candidates).find(|k| {
                    assignment.value_of(layout.primary_selector_var(i, *k)) == Some(true)
                });
                let secondary = (0..n_candidates).find(|k| {
                    assignment.value_of(layout.secondary_selector_var(i, *k)) == Some(true)
                });
                match (primary, secondary) {
                    (Some(a), Some(b)) => Some(ExplainingPair::new(
                        candidates[a].clone(),
                        candidates[b].clone(),
                    )),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        genetics::verify_decomposition,
        sat::{default_solver, SolvingResult},
    };
    use paste::paste;

    fn instance(rows: &[&str]) -> HaplotypingInstance {
        HaplotypingInstance::new_with_haplotypes(rows.iter().map(|r| r.parse().unwrap()).collect())
            .unwrap()
    }

    fn encoder(het_encoding: HeterozygousEncoding) -> PairConstraintsEncoder {
        PairConstraintsEncoder::new_with_heterozygous_encoding(het_encoding)
    }

    macro_rules! determinism_tests {
        ($($strategy:ident),+) => {
            $(paste! {
                #[test]
                fn [<test_determinism_ $strategy:lower>]() {
                    let instance = instance(&["0101", "0110", "1100", "1100"]);
                    let counts = (0..2)
                        .map(|_| {
                            let mut solver = default_solver();
                            encoder(HeterozygousEncoding::$strategy).encode_constraints(
                                &instance,
                                3,
                                solver.as_mut(),
                            );
                            (solver.n_clauses(), solver.n_vars())
                        })
                        .collect::<Vec<(usize, usize)>>();
                    assert_eq!(counts[0], counts[1]);
                }
            })+
        };
    }

    determinism_tests!(Exhaustive, Reduced);

    #[test]
    fn test_exhaustive_counts_on_heterozygous_instance() {
        let instance = instance(&["01", "10"]);
        let mut solver = default_solver();
        encoder(HeterozygousEncoding::Exhaustive).encode_constraints(&instance, 2, solver.as_mut());
        assert_eq!(24, solver.n_clauses());
        assert_eq!(12, solver.n_vars());
    }

    #[test]
    fn test_reduced_counts_on_heterozygous_instance() {
        let instance = instance(&["01", "10"]);
        let mut solver = default_solver();
        encoder(HeterozygousEncoding::Reduced).encode_constraints(&instance, 2, solver.as_mut());
        assert_eq!(8, solver.n_clauses());
        assert_eq!(10, solver.n_vars());
    }

    #[test]
    fn test_no_aux_var_on_homozygous_instance() {
        let instance = instance(&["00", "00"]);
        let mut solver = default_solver();
        encoder(HeterozygousEncoding::Exhaustive).encode_constraints(&instance, 1, solver.as_mut());
        let layout = VariableLayout::new(1, 2, 1);
        assert_eq!(layout.n_fixed_vars(), solver.n_vars());
        assert_eq!(6, solver.n_clauses());
    }

    #[test]
    fn test_exhaustive_solution_passes_verification() {
        let instance = instance(&["01", "10"]);
        let encoder = encoder(HeterozygousEncoding::Exhaustive);
        let mut solver = default_solver();
        encoder.encode_constraints(&instance, 2, solver.as_mut());
        let assignment = solver.solve().unwrap_model().unwrap();
        let pairs = encoder.assignment_to_pairs(&assignment, &instance, 2);
        assert!(verify_decomposition(&pairs, instance.genotypes()));
    }

    #[test]
    fn test_exhaustive_unsat_below_minimum() {
        let instance = instance(&["01", "10"]);
        let mut solver = default_solver();
        encoder(HeterozygousEncoding::Exhaustive).encode_constraints(&instance, 1, solver.as_mut());
        assert_eq!(SolvingResult::Unsatisfiable, solver.solve());
    }

    #[test]
    fn test_decode_round_trip() {
        let instance = instance(&["01", "10"]);
        let encoder = encoder(HeterozygousEncoding::Exhaustive);
        // candidate 0 set to 01, candidate 1 set to 10, the primary selection
        // on candidate 0 and the secondary selection on candidate 1
        let assignment = Assignment::new(vec![
            Some(false),
            Some(true),
            Some(true),
            Some(false),
            Some(true),
            Some(false),
            Some(false),
            Some(true),
        ]);
        let candidates = encoder.assignment_to_candidates(&assignment, &instance, 2);
        assert_eq!(
            vec!["01".to_string(), "10".to_string()],
            candidates
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<String>>()
        );
        let pairs = encoder.assignment_to_pairs(&assignment, &instance, 2);
        assert_eq!(1, pairs.len());
        let pair = pairs[0].as_ref().unwrap();
        assert_eq!("01", pair.primary().to_string());
        assert_eq!("10", pair.secondary().to_string());
        assert!(verify_decomposition(&pairs, instance.genotypes()));
    }

    #[test]
    fn test_decode_failure_on_unset_selectors() {
        let instance = instance(&["00", "00"]);
        let encoder = encoder(HeterozygousEncoding::Exhaustive);
        let assignment = Assignment::new(vec![Some(false); 4]);
        let pairs = encoder.assignment_to_pairs(&assignment, &instance, 1);
        assert_eq!(vec![None], pairs);
        assert!(!verify_decomposition(&pairs, instance.genotypes()));
    }

    #[test]
    fn test_heterozygous_encoding_from_str() {
        assert_eq!(
            HeterozygousEncoding::Exhaustive,
            "exhaustive".parse().unwrap()
        );
        assert_eq!(HeterozygousEncoding::Reduced, "reduced".parse().unwrap());
        assert!("foo".parse::<HeterozygousEncoding>().is_err());
    }
}
