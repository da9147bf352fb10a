use crate::sat::SatSolver;

/// The deterministic variable numbering used by the encodings.
///
/// For a candidate count `r`, a site count `m` and a genotype count `g`,
/// three disjoint identifier ranges are laid out:
///
/// * the site variables of the candidate haplotypes, from `1` to `r·m`;
/// * the selector variables, from `r·m + 1` to `r·m + 2·g·r`, grouped by
///   genotype (primary block first, then secondary block);
/// * the auxiliary variables, above `r·m + 2·g·r`, allocated on demand
///   through the solver's variable frontier.
///
/// Auxiliary allocation queries the solver for its highest identifier in use,
/// so that identifiers consumed by collaborating encoders (in particular the
/// cardinality encoder) are never attributed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    n_candidates: usize,
    n_sites: usize,
    n_genotypes: usize,
}

impl VariableLayout {
    /// Builds the layout for the provided candidate, site and genotype counts.
    pub fn new(n_candidates: usize, n_sites: usize, n_genotypes: usize) -> Self {
        Self {
            n_candidates,
            n_sites,
            n_genotypes,
        }
    }

    /// Returns the identifier of the variable giving the state of a candidate haplotype at a site.
    pub fn candidate_site_var(&self, candidate: usize, site: usize) -> usize {
        debug_assert!(candidate < self.n_candidates);
        debug_assert!(site < self.n_sites);
        candidate * self.n_sites + site + 1
    }

    /// Returns the identifier of the variable selecting a candidate as the first strand of a genotype.
    pub fn primary_selector_var(&self, genotype: usize, candidate: usize) -> usize {
        debug_assert!(genotype < self.n_genotypes);
        debug_assert!(candidate < self.n_candidates);
        self.n_candidates * self.n_sites + 2 * genotype * self.n_candidates + candidate + 1
    }

    /// Returns the identifier of the variable selecting a candidate as the second strand of a genotype.
    pub fn secondary_selector_var(&self, genotype: usize, candidate: usize) -> usize {
        self.primary_selector_var(genotype, candidate) + self.n_candidates
    }

    /// Returns the number of statically laid out variables.
    ///
    /// Auxiliary variables get identifiers above this frontier.
    pub fn n_fixed_vars(&self) -> usize {
        self.n_candidates * self.n_sites + 2 * self.n_genotypes * self.n_candidates
    }

    /// Allocates a fresh auxiliary variable above the solver's current frontier.
    pub fn new_aux_var(&self, solver: &mut dyn SatSolver) -> usize {
        let v = solver.n_vars() + 1;
        solver.reserve(v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::default_solver;
    use std::collections::HashSet;

    #[test]
    fn test_candidate_site_vars() {
        let layout = VariableLayout::new(2, 3, 2);
        assert_eq!(1, layout.candidate_site_var(0, 0));
        assert_eq!(3, layout.candidate_site_var(0, 2));
        assert_eq!(4, layout.candidate_site_var(1, 0));
        assert_eq!(6, layout.candidate_site_var(1, 2));
    }

    #[test]
    fn test_selector_vars() {
        let layout = VariableLayout::new(2, 3, 2);
        assert_eq!(7, layout.primary_selector_var(0, 0));
        assert_eq!(8, layout.primary_selector_var(0, 1));
        assert_eq!(9, layout.secondary_selector_var(0, 0));
        assert_eq!(10, layout.secondary_selector_var(0, 1));
        assert_eq!(11, layout.primary_selector_var(1, 0));
        assert_eq!(13, layout.secondary_selector_var(1, 0));
    }

    #[test]
    fn test_ranges_are_disjoint() {
        let layout = VariableLayout::new(3, 4, 5);
        let mut seen = HashSet::new();
        for k in 0..3 {
            for j in 0..4 {
                assert!(seen.insert(layout.candidate_site_var(k, j)));
            }
        }
        for i in 0..5 {
            for k in 0..3 {
                assert!(seen.insert(layout.primary_selector_var(i, k)));
                assert!(seen.insert(layout.secondary_selector_var(i, k)));
            }
        }
        assert_eq!(layout.n_fixed_vars(), seen.len());
        assert_eq!(layout.n_fixed_vars(), *seen.iter().max().unwrap());
    }

    #[test]
    fn test_new_aux_var_above_fixed_ranges() {
        let layout = VariableLayout::new(2, 2, 1);
        let mut solver = default_solver();
        solver.reserve(layout.n_fixed_vars());
        assert_eq!(layout.n_fixed_vars() + 1, layout.new_aux_var(solver.as_mut()));
        assert_eq!(layout.n_fixed_vars() + 2, layout.new_aux_var(solver.as_mut()));
    }

    #[test]
    fn test_new_aux_var_follows_consumed_ids() {
        let layout = VariableLayout::new(2, 2, 1);
        let mut solver = default_solver();
        solver.reserve(layout.n_fixed_vars());
        solver.reserve(layout.n_fixed_vars() + 3);
        assert_eq!(layout.n_fixed_vars() + 4, layout.new_aux_var(solver.as_mut()));
    }
}
