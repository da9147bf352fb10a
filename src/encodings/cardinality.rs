use crate::sat::{Literal, SatSolver};
use permutator::Combination;

/// A trait for cardinality constraint encoders.
///
/// Encoders add to the solver a set of clauses bounding the number of true
/// variables among a list of identifiers.
/// An encoder introducing auxiliary variables must reserve them on the solver,
/// so that the allocation frontier seen by the caller accounts for them.
pub trait CardinalityEncoder {
    /// Adds clauses forcing exactly one of the provided variables to be true.
    fn encode_exactly_one(&self, vars: &[usize], solver: &mut dyn SatSolver);

    /// Adds clauses forcing at most `bound` of the provided variables to be true.
    ///
    /// When the bound is higher or equal to the number of variables, the
    /// constraint always holds and no clause is added.
    fn encode_at_most(&self, vars: &[usize], bound: usize, solver: &mut dyn SatSolver);
}

/// The pairwise cardinality encoding.
///
/// A set of `bound + 1` true variables is forbidden by the clause made of
/// their negations; the encoding enumerates all such sets.
/// No auxiliary variable is introduced.
#[derive(Default)]
pub struct PairwiseCardinalityEncoder;

impl CardinalityEncoder for PairwiseCardinalityEncoder {
    fn encode_exactly_one(&self, vars: &[usize], solver: &mut dyn SatSolver) {
        solver.add_clause(vars.iter().map(|v| Literal::from(*v as isize)).collect());
        vars.iter().enumerate().for_each(|(i, v)| {
            vars[i + 1..].iter().for_each(|w| {
                solver.add_clause(vec![
                    Literal::from(-(*v as isize)),
                    Literal::from(-(*w as isize)),
                ])
            })
        });
    }

    fn encode_at_most(&self, vars: &[usize], bound: usize, solver: &mut dyn SatSolver) {
        if bound >= vars.len() {
            return;
        }
        vars.combination(bound + 1).for_each(|subset| {
            solver.add_clause(
                subset
                    .iter()
                    .map(|v| Literal::from(-(**v as isize)))
                    .collect(),
            )
        });
    }
}
