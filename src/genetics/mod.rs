//! The domain objects handled by the solver: haplotypes, genotypes and instances.

mod explanation;
pub use explanation::verify_decomposition;
pub use explanation::ExplainingPair;

mod genotype;
pub use genotype::Genotype;
pub use genotype::GenotypeSite;

mod haplotype;
pub use haplotype::Haplotype;

mod instance;
pub use instance::HaplotypingInstance;
