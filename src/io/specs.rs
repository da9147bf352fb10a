use crate::genetics::HaplotypingInstance;
use anyhow::Result;
use std::io::Read;

/// A type for functions used to take warnings into account.
///
/// Warnings are raised by instance readers for recoverable anomalies.
/// The first parameter is the number of the line at which the warning is raised,
/// while the second is the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait for objects able to read haplotyping instances.
pub trait InstanceReader {
    /// Reads an instance.
    ///
    /// An error is raised if the content does not follow the expected format.
    fn read(&self, reader: &mut dyn Read) -> Result<HaplotypingInstance>;

    /// Adds a warning handler, called each time a warning is raised while reading an instance.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
