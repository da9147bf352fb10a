use super::{InstanceReader, WarningHandler};
use crate::genetics::{Haplotype, HaplotypingInstance};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref MS_COMMAND_PATTERN: Regex = Regex::new(r"^\S*?\bms\s+(\d+)(\s|$)").unwrap();
    static ref SEGSITES_PATTERN: Regex = Regex::new(r"^segsites:\s*(\d+)\s*$").unwrap();
}

/// A reader for instances following the output format of the `ms` coalescent simulator.
///
/// The header gives the haplotype count (on the simulator command line echo)
/// and the site count (on the `segsites:` line); the haplotype matrix follows
/// the `positions:` line, one haplotype per line, encoded as a 0/1 string.
/// The genotypes of the instance are derived by pairing consecutive
/// haplotypes of the matrix.
///
/// # Example format
///
/// ```text
/// ms 4 1 -s 3
/// 27473 29553 1828
///
/// //
/// segsites: 3
/// positions: 0.1162 0.2554 0.9287
/// 010
/// 110
/// 001
/// 001
/// ```
#[derive(Default)]
pub struct MsReader {
    warning_handlers: Vec<WarningHandler>,
}

impl MsReader {
    fn raise_warning(&self, line: usize, message: String) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, message.clone()));
    }
}

impl InstanceReader for MsReader {
    fn read(&self, reader: &mut dyn Read) -> Result<HaplotypingInstance> {
        let br = BufReader::new(reader);
        let mut n_haplotypes = None;
        let mut n_sites = None;
        let mut in_matrix = false;
        let mut haplotypes: Vec<Haplotype> = Vec::new();
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            let l = l.trim();
            if in_matrix && haplotypes.len() < n_haplotypes.unwrap() {
                let haplotype_context =
                    || format!("while reading haplotype with index {}", haplotypes.len());
                let haplotype = l
                    .parse::<Haplotype>()
                    .with_context(haplotype_context)
                    .with_context(context)?;
                if haplotype.n_sites() != n_sites.unwrap() {
                    return Err(anyhow!(
                        "expected {} site(s), got {}",
                        n_sites.unwrap(),
                        haplotype.n_sites()
                    ))
                    .with_context(haplotype_context)
                    .with_context(context);
                }
                haplotypes.push(haplotype);
            } else if in_matrix {
                if !l.is_empty() {
                    self.raise_warning(1 + i, format!(r#"unexpected trailing content "{}""#, l));
                }
            } else if let Some(c) = MS_COMMAND_PATTERN.captures(l) {
                let n = c
                    .get(1)
                    .unwrap()
                    .as_str()
                    .parse::<usize>()
                    .with_context(context)?;
                if n_haplotypes.is_none() {
                    n_haplotypes = Some(n);
                } else {
                    self.raise_warning(
                        1 + i,
                        "multiple ms command lines; keeping the first".to_string(),
                    );
                }
            } else if let Some(c) = SEGSITES_PATTERN.captures(l) {
                let m = c
                    .get(1)
                    .unwrap()
                    .as_str()
                    .parse::<usize>()
                    .with_context(context)?;
                if n_sites.is_none() {
                    n_sites = Some(m);
                } else {
                    self.raise_warning(
                        1 + i,
                        "multiple segsites lines; keeping the first".to_string(),
                    );
                }
            } else if l.starts_with("positions:") {
                if n_haplotypes.is_none() {
                    return Err(anyhow!("no ms command line found before the positions line"))
                        .with_context(context);
                }
                if n_sites.is_none() {
                    return Err(anyhow!("no segsites line found before the positions line"))
                        .with_context(context);
                }
                in_matrix = true;
            }
        }
        if !in_matrix {
            return Err(anyhow!("no positions line found"));
        }
        if haplotypes.len() != n_haplotypes.unwrap() {
            return Err(anyhow!(
                "expected {} haplotype(s), got {}",
                n_haplotypes.unwrap(),
                haplotypes.len()
            ));
        }
        HaplotypingInstance::new_with_haplotypes(haplotypes)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    const INSTANCE: &str = r#"ms 4 1 -s 3
27473 29553 1828

//
segsites: 3
positions: 0.1162 0.2554 0.9287
010
110
001
001
"#;

    #[test]
    fn test_ok() {
        let reader = MsReader::default();
        let instance = reader.read(&mut INSTANCE.as_bytes()).unwrap();
        assert_eq!(4, instance.n_haplotypes());
        assert_eq!(2, instance.n_genotypes());
        assert_eq!(3, instance.n_sites());
        assert_eq!("210", instance.genotypes()[0].to_string());
        assert_eq!("001", instance.genotypes()[1].to_string());
    }

    #[test]
    fn test_ok_missing_last_lf() {
        let instance_str = INSTANCE.trim_end();
        let reader = MsReader::default();
        let instance = reader.read(&mut instance_str.as_bytes()).unwrap();
        assert_eq!(4, instance.n_haplotypes());
    }

    #[test]
    fn test_ok_ms_command_with_path() {
        let instance_str = INSTANCE.replacen("ms 4", "./bin/ms 4", 1);
        let reader = MsReader::default();
        let instance = reader.read(&mut instance_str.as_bytes()).unwrap();
        assert_eq!(4, instance.n_haplotypes());
    }

    #[test]
    fn test_no_ms_command_line() {
        let instance_str = INSTANCE.replacen("ms 4 1 -s 3", "", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_no_segsites_line() {
        let instance_str = INSTANCE.replacen("segsites: 3", "", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_no_positions_line() {
        let instance_str = INSTANCE.replacen("positions: 0.1162 0.2554 0.9287", "", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_missing_haplotype_row() {
        let instance_str = INSTANCE.replacen("ms 4", "ms 6", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_haplotype_row_with_wrong_length() {
        let instance_str = INSTANCE.replacen("110", "11", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_haplotype_row_with_unexpected_char() {
        let instance_str = INSTANCE.replacen("110", "1x0", 1);
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_odd_haplotype_count() {
        let instance_str = "ms 3 1 -s 1\nsegsites: 1\npositions: 0.5\n0\n1\n0\n";
        assert!(MsReader::default()
            .read(&mut instance_str.as_bytes())
            .is_err());
    }

    #[test]
    fn test_empty_instance() {
        assert!(MsReader::default().read(&mut "".as_bytes()).is_err());
    }

    fn read_with_warnings(instance_str: &str) -> (HaplotypingInstance, Vec<(usize, String)>) {
        let warnings = Rc::new(RefCell::new(Vec::new()));
        let warnings_clone = Rc::clone(&warnings);
        let mut reader = MsReader::default();
        reader.add_warning_handler(Box::new(move |line, msg| {
            warnings_clone.borrow_mut().push((line, msg))
        }));
        let instance = reader.read(&mut instance_str.as_bytes()).unwrap();
        let collected = warnings.borrow().clone();
        (instance, collected)
    }

    #[test]
    fn test_no_warning_on_clean_instance() {
        let (_, warnings) = read_with_warnings(INSTANCE);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_warning_on_trailing_content() {
        let instance_str = format!("{}foo\n", INSTANCE);
        let (instance, warnings) = read_with_warnings(&instance_str);
        assert_eq!(4, instance.n_haplotypes());
        assert_eq!(1, warnings.len());
        assert_eq!(11, warnings[0].0);
    }

    #[test]
    fn test_warning_on_multiple_segsites_lines() {
        let instance_str = INSTANCE.replacen("//", "segsites: 3", 1);
        let (instance, warnings) = read_with_warnings(&instance_str);
        assert_eq!(3, instance.n_sites());
        assert_eq!(1, warnings.len());
        assert_eq!(5, warnings[0].0);
    }
}
