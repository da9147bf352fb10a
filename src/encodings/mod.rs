//! Objects used to encode haplotyping instances into SAT solvers.

mod cardinality;
pub use cardinality::CardinalityEncoder;
pub use cardinality::PairwiseCardinalityEncoder;

mod pair_constraints_encoder;
pub use pair_constraints_encoder::HeterozygousEncoding;
pub use pair_constraints_encoder::PairConstraintsEncoder;

mod specs;
pub use specs::ConstraintsEncoder;

mod variables;
pub use variables::VariableLayout;

/// The default encoder, relying on the exhaustive heterozygous formulation.
pub type DefaultConstraintsEncoder = PairConstraintsEncoder;
