//! Objects used to read haplotyping instances and write solutions and summaries.

mod ms_reader;
pub use ms_reader::MsReader;

mod specs;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod summary_writer;
pub use summary_writer::InstanceSummary;
pub use summary_writer::SummaryWriter;
