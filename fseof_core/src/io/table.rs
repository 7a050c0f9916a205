//! Tab separated export of the ranked amplification target table
//!
//! The output file is named deterministically from the target reaction's id,
//! so repeated runs against the same reaction overwrite their predecessor.
//! The column set depends on the scan mode: classification columns only exist
//! in range mode.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::flux_analysis::targets::AmplificationTarget;

/// Cell value for a reaction whose regression failed
const MISSING: &str = "NA";

/// Default output file name for a target reaction
pub fn default_output_path(product_id: &str) -> PathBuf {
    PathBuf::from(format!("AmplificationTargets_{}.tsv", product_id))
}

/// Write the ranked target collection as a tab separated table
///
/// # Parameters
/// - `path`: Output file path
/// - `targets`: The ranked target records, written in order
/// - `use_fva`: Include the range mode columns (`l_sol`, labels, class)
///
/// # Errors
/// Any I/O failure is fatal and surfaced as [`TableError::Io`] with the
/// offending path
pub fn write_targets<P: AsRef<Path>>(
    path: P,
    targets: &[AmplificationTarget],
    use_fva: bool,
) -> Result<(), TableError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, targets, use_fva).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rows<W: Write>(
    writer: &mut W,
    targets: &[AmplificationTarget],
    use_fva: bool,
) -> std::io::Result<()> {
    if use_fva {
        writeln!(
            writer,
            "reaction\tq_slope\tl_sol\tq_slope_classifier\tl_sol_classifier\treaction_class\treaction_string\tcompartments"
        )?;
    } else {
        writeln!(writer, "reaction\tq_slope\treaction_string\tcompartments")?;
    }
    for target in targets {
        let q_slope = float_cell(target.q_slope);
        let reaction_string = target.reaction_string.clone().unwrap_or_default();
        let compartments = target.compartments.join(",");
        if use_fva {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                target.reaction,
                q_slope,
                float_cell(target.l_sol),
                int_cell(target.q_slope_classifier),
                int_cell(target.l_sol_classifier),
                int_cell(target.reaction_class),
                reaction_string,
                compartments
            )?;
        } else {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                target.reaction, q_slope, reaction_string, compartments
            )?;
        }
    }
    writer.flush()
}

fn float_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => MISSING.to_string(),
    }
}

fn int_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => MISSING.to_string(),
    }
}

/// Errors reported by the table exporter
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Unable to write target table to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
