//! Text rendering of basin reports and reconstructed paths.

use std::io::Write;

use barriers_core::{BarrierError, EntryId, Landscape, PathMark, PathStep};

use super::commands::{CliError, ExecutionSummary};

/// Writes the basin report: the reference header followed by one line per
/// reported basin.
///
/// Each line holds the basin number, its minimum, the minimum's energy, the
/// reported father (`0` for none) and the barrier height. Saddle structures
/// follow unless disabled (`~` padding for basins that never merged), then
/// pool sizes and free energies when pools were accumulated.
///
/// # Errors
/// Returns [`CliError::Write`] when the writer fails and
/// [`CliError::Landscape`] when a stored structure does not decode.
pub fn render_report(summary: &ExecutionSummary, mut writer: impl Write) -> Result<(), CliError> {
    let tree = &summary.tree;
    let rna = summary.landscape.is_rna();
    writeln!(writer, "     {}", summary.reference).map_err(write_error)?;

    for (rank, id) in summary.renumbering.iter() {
        let basin = tree.forest().get(id).ok_or(BarrierError::UnknownBasin {
            basin: id.get(),
            bound: tree.forest().len(),
        })?;
        let structure = structure_at(summary, basin.minimum())?;
        let father = basin
            .father()
            .and_then(|father| summary.renumbering.get(father))
            .unwrap_or(0);
        let barrier = tree.barrier(id).unwrap_or_default();
        let mut line = if rna {
            format!("{rank:4} {structure} {:6.2} {father:4} {barrier:6.2}", basin.energy())
        } else {
            format!("{rank:4} {structure} {:13.5} {father:4} {barrier:13.5}", basin.energy())
        };

        if summary.print_saddles {
            line.push(' ');
            match basin.saddle() {
                Some(saddle) => line.push_str(&structure_at(summary, saddle.entry())?),
                None => line.push_str(&"~".repeat(structure.chars().count())),
            }
        }
        if summary.pool_accounting {
            line.push_str(&format!(
                " {:12} {:8} {:7.3} {:8} {:7.3}",
                basin.pool(),
                basin.fathers_pool(),
                tree.free_energy(basin.z()),
                basin.gradient_pool(),
                tree.free_energy(basin.zg()),
            ));
        }
        writeln!(writer, "{line}").map_err(write_error)?;
    }
    Ok(())
}

/// Writes one `<structure> (<energy>) <mark>` line per path step.
///
/// Local minima are marked `L` with their reported number, the connecting
/// saddle `S` and everything else `I`.
///
/// # Errors
/// As [`render_report`].
pub fn render_path(
    summary: &ExecutionSummary,
    path: &[PathStep],
    mut writer: impl Write,
) -> Result<(), CliError> {
    for step in path {
        let entry = summary
            .tree
            .structure(step.entry())
            .ok_or(BarrierError::InconsistentForest {
                invariant: "path steps are indexed",
            })?;
        let structure = summary.landscape.unpack(entry.key())?;
        let mark = match step.mark() {
            PathMark::Minimum(basin) => {
                format!("L{:04}", summary.renumbering.get(basin).unwrap_or(0))
            }
            PathMark::Saddle => "S".to_owned(),
            PathMark::Intermediate => "I".to_owned(),
        };
        writeln!(writer, "{structure} ({:6.2}) {mark:<5}", entry.energy()).map_err(write_error)?;
    }
    Ok(())
}

fn structure_at(summary: &ExecutionSummary, entry: EntryId) -> Result<String, CliError> {
    let found = summary
        .tree
        .structure(entry)
        .ok_or(BarrierError::InconsistentForest {
            invariant: "basin structures are indexed",
        })?;
    Ok(summary.landscape.unpack(found.key())?)
}

fn write_error(source: std::io::Error) -> CliError {
    CliError::Write { source }
}
