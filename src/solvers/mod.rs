//! Objects used to search for minimum haplotype decompositions.

mod binary_search;

mod parsimony_solver;
pub use parsimony_solver::ParsimonyOutcome;
pub use parsimony_solver::ParsimonySolution;
pub use parsimony_solver::ParsimonySolver;
pub use parsimony_solver::SearchStats;

mod specs;
pub use specs::MinimumHaplotypeSetComputer;
