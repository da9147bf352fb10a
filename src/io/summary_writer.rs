use crate::genetics::Haplotype;
use anyhow::{Context, Result};
use std::{io::Write, time::Duration};

/// The summary of the processing of one instance.
pub struct InstanceSummary {
    instance_name: String,
    found: bool,
    n_genotypes: usize,
    n_sites: usize,
    n_haplotypes: usize,
    solve_time: Duration,
    n_clauses: usize,
    n_vars: usize,
}

impl InstanceSummary {
    /// Builds a summary from the instance identifier, the search result and the accumulated statistics.
    ///
    /// The haplotype count is the size of the minimum decomposition, or zero
    /// when no decomposition was found.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instance_name: &str,
        found: bool,
        n_genotypes: usize,
        n_sites: usize,
        n_haplotypes: usize,
        solve_time: Duration,
        n_clauses: usize,
        n_vars: usize,
    ) -> Self {
        Self {
            instance_name: instance_name.to_string(),
            found,
            n_genotypes,
            n_sites,
            n_haplotypes,
            solve_time,
            n_clauses,
            n_vars,
        }
    }
}

/// A writer for solutions and per-instance summary records.
///
/// The summary record is a single comma-separated line giving the instance
/// identifier, a flag telling if a decomposition was found, the genotype and
/// site counts, the size of the minimum decomposition (zero if none), and the
/// solving time, clause count and variable count accumulated over the whole
/// search.
/// The record is preceded by a separator line, allowing its extraction from
/// the surrounding diagnostics.
#[derive(Default)]
pub struct SummaryWriter {}

impl SummaryWriter {
    /// Writes a set of haplotypes, one 0/1 row per line.
    pub fn write_haplotypes(
        &self,
        writer: &mut dyn Write,
        haplotypes: &[Haplotype],
    ) -> Result<()> {
        let context = "while writing haplotypes";
        haplotypes
            .iter()
            .try_for_each(|h| writeln!(writer, "{}", h).context(context))?;
        writer.flush().context(context)
    }

    /// Writes the separator line and the summary record of an instance.
    pub fn write_record(&self, writer: &mut dyn Write, summary: &InstanceSummary) -> Result<()> {
        let context = "while writing the instance summary";
        writeln!(writer, "######").context(context)?;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            summary.instance_name,
            u8::from(summary.found),
            summary.n_genotypes,
            summary.n_sites,
            summary.n_haplotypes,
            summary.solve_time.as_secs_f64(),
            summary.n_clauses,
            summary.n_vars,
        )
        .context(context)?;
        writer.flush().context(context)
    }
}
