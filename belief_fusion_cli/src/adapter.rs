//! File adapters for belief systems.
//!
//! This module is intentionally small and policy-light:
//! - load flat mass-table files into `BeliefSystem`s
//! - store systems back as flat mass tables
//! - write pairwise product tables for combination audits
//!
//! Whole-buffer blocking IO only; record parsing lives in the core crate.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use belief_fusion_core::{Belief, BeliefSystem};

use crate::error::{Error, Result};

/// Load a belief system from a flat mass-table file.
///
/// One record per line, `<focal element><TAB><weight>` with `;` accepted as
/// a fallback delimiter. Empty lines are skipped and malformed lines degrade
/// to zero-weight records; the system is named after the file stem.
pub fn load_system(path: &Path) -> Result<BeliefSystem> {
    let text = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;

    let mut system = BeliefSystem::new(name);
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let belief = Belief::from_record(line);
        if belief.label().is_empty() {
            warn!("degraded record in {}: {:?}", path.display(), line);
        }
        system.push(belief);
    }

    info!(
        "loaded {} ({} records)",
        system.name,
        system.beliefs().len()
    );
    Ok(system)
}

/// Store a system as `<dir>/<name>.txt` in the canonical ordered record
/// form. Returns the written path.
pub fn store_system(system: &BeliefSystem, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", system.name));
    fs::write(&path, system.to_string())?;
    info!("stored {}", path.display());
    Ok(path)
}

/// Write the pairwise product table for `left` and `right` as
/// `<dir>/<left>x<right>.txt`. Returns the written path.
///
/// Both operands are prepared first. Rows follow the left matrix order and
/// columns follow the right matrix order, so the header row and every cell
/// always line up; cells carry the intersection products in
/// `m(<label>)=<weight>` form, conflict cells included.
pub fn write_combination_trace(
    left: &BeliefSystem,
    right: &BeliefSystem,
    dir: &Path,
) -> Result<PathBuf> {
    let left = left.prepared();
    let right = right.prepared();

    let rows: Vec<&Belief> = left
        .beliefs()
        .iter()
        .filter(|b| !b.label().is_empty())
        .collect();
    let columns: Vec<&Belief> = right
        .beliefs()
        .iter()
        .filter(|b| !b.label().is_empty())
        .collect();

    let mut table = String::new();
    table.push_str(&format!("\tm({})\n", right.name));

    let mut header = format!("m({})", left.name);
    for column in &columns {
        header.push('\t');
        header.push_str(&column.mass_string());
    }
    table.push_str(&header);
    table.push('\n');

    for row in &rows {
        let mut line = row.mass_string();
        for column in &columns {
            line.push('\t');
            line.push_str(&row.intersect(column).mass_string());
        }
        table.push_str(&line);
        table.push('\n');
    }

    let path = dir.join(format!("{}x{}.txt", left.name, right.name));
    fs::write(&path, table)?;
    info!("traced {}", path.display());
    Ok(path)
}
