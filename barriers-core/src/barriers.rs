//! Driver for the barrier analysis.
//!
//! Provides the [`Barriers`] entry point: it consumes a sorted record stream,
//! floods every record through the selected [`Landscape`], closes each energy
//! level as the energy rises and returns the finished [`BarrierTree`].

use std::{io::Write, sync::Arc};

use tracing::{Span, debug, field, info, instrument, trace, warn};

use crate::{
    Result,
    error::{BarrierError, LandscapeError},
    flooding::{ComponentReport, FloodSettings, FloodState},
    index::{HashStructureIndex, StructureIndex},
    landscape::Landscape,
    record::Record,
    result::BarrierTree,
};

/// Entry point for running a barrier analysis.
///
/// # Examples
/// ```
/// use barriers_core::{BarrierBuilder, Landscape, LandscapeError, Record};
///
/// struct Line;
///
/// impl Landscape for Line {
///     fn name(&self) -> &str { "line" }
///     fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
///         let position: u32 = configuration.parse().map_err(|_| LandscapeError::InvalidKey { length: 0 })?;
///         Ok(vec![position.saturating_sub(1).to_string(), (position + 1).to_string()])
///     }
/// }
///
/// let records = [("0", 0.0), ("2", 0.5), ("1", 1.0)]
///     .into_iter()
///     .map(|(configuration, energy)| Ok(Record::new(configuration, energy)));
/// let tree = BarrierBuilder::new().build()?.run(&Line, records)?;
/// assert_eq!(tree.forest().len(), 2);
/// assert_eq!(tree.saddle_count(), 1);
/// # Ok::<(), barriers_core::BarrierError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Barriers {
    minh: f64,
    max_print: usize,
    pool_accounting: bool,
    kt: f64,
    reference_energy: Option<f64>,
}

impl Barriers {
    pub(crate) fn new(
        minh: f64,
        max_print: usize,
        pool_accounting: bool,
        kt: f64,
        reference_energy: Option<f64>,
    ) -> Self {
        Self {
            minh,
            max_print,
            pool_accounting,
            kt,
            reference_energy,
        }
    }

    /// Significance threshold for barriers.
    #[must_use]
    pub fn minh(&self) -> f64 {
        self.minh
    }

    /// Output cap on significant basins, `0` for unlimited.
    #[must_use]
    pub fn max_print(&self) -> usize {
        self.max_print
    }

    /// Whether merges accumulate pools and partition sums.
    #[must_use]
    pub fn pool_accounting(&self) -> bool {
        self.pool_accounting
    }

    /// Thermal energy of the Boltzmann weights.
    #[must_use]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Reference energy override.
    #[must_use]
    pub fn reference_energy(&self) -> Option<f64> {
        self.reference_energy
    }

    /// Floods `records` over `landscape` with a hash-backed structure index.
    ///
    /// # Errors
    /// Returns [`BarrierError::EmptyInput`] for an empty stream,
    /// [`BarrierError::InputOrderViolation`] when energies decrease,
    /// [`BarrierError::DuplicateStructure`] when a configuration repeats,
    /// [`BarrierError::Landscape`] when the landscape rejects a configuration,
    /// and propagates record errors unchanged.
    pub fn run<L, R>(&self, landscape: &L, records: R) -> Result<BarrierTree>
    where
        L: Landscape + ?Sized,
        R: IntoIterator<Item = Result<Record>>,
    {
        self.run_with_index(landscape, records, HashStructureIndex::default(), None)
    }

    /// Like [`Self::run`], also writing one saddle-log line per component that
    /// joins more than one basin.
    ///
    /// # Errors
    /// As [`Self::run`], plus [`BarrierError::Io`] when writing the log fails.
    pub fn run_with_saddle_log<L, R, W>(
        &self,
        landscape: &L,
        records: R,
        saddle_log: &mut W,
    ) -> Result<BarrierTree>
    where
        L: Landscape + ?Sized,
        R: IntoIterator<Item = Result<Record>>,
        W: Write,
    {
        self.run_with_index(
            landscape,
            records,
            HashStructureIndex::default(),
            Some(saddle_log),
        )
    }

    /// Floods `records` into a caller-supplied structure index.
    ///
    /// # Errors
    /// As [`Self::run_with_saddle_log`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, landscape, records, index, saddle_log),
        fields(
            landscape = %landscape.name(),
            minh = self.minh,
            max_print = self.max_print,
            records = field::Empty,
            saddles = field::Empty,
        ),
    )]
    pub fn run_with_index<L, R, I>(
        &self,
        landscape: &L,
        records: R,
        index: I,
        mut saddle_log: Option<&mut dyn Write>,
    ) -> Result<BarrierTree<I>>
    where
        L: Landscape + ?Sized,
        R: IntoIterator<Item = Result<Record>>,
        I: StructureIndex,
    {
        let mut flood = FloodState::new(index, self.settings());

        for record in records {
            let record = record?;
            let energy = record.energy();
            if !energy.is_finite() {
                return Err(BarrierError::MalformedRecord {
                    line: record.line(),
                    reason: Arc::from("energy is not finite"),
                });
            }
            if flood.records == 0 {
                flood.start(energy, self.reference_energy);
            } else if energy < flood.energy {
                return Err(BarrierError::InputOrderViolation {
                    record: flood.records + 1,
                    previous: flood.energy,
                    current: energy,
                });
            } else if energy > flood.energy {
                let reports = flood.finalize_level()?;
                log_components(saddle_log.as_deref_mut(), landscape, &flood.index, &reports)?;
            }
            flood.energy = energy;
            flood.records += 1;
            flood_record(&mut flood, landscape, record.configuration())?;
            if flood.saturated() {
                debug!(saddles = flood.saddles, "requested number of saddles reached");
                break;
            }
        }

        if flood.records == 0 {
            warn!(landscape = landscape.name(), "record stream is empty");
            return Err(BarrierError::EmptyInput);
        }
        let reports = flood.finalize_level()?;
        log_components(saddle_log.as_deref_mut(), landscape, &flood.index, &reports)?;
        if let Some(log) = saddle_log {
            log.flush()
                .map_err(|error| BarrierError::io("flushing the saddle log", &error))?;
        }

        let tree = BarrierTree::from_flood(flood, self.minh, self.max_print);
        info!(
            records = tree.records_read(),
            saddles = tree.saddle_count(),
            false_minima = tree.false_minima(),
            basins = tree.forest().len(),
            structures = tree.index().len(),
            "flooding complete"
        );
        let span = Span::current();
        span.record("records", tree.records_read());
        span.record("saddles", tree.saddle_count());
        Ok(tree)
    }

    fn settings(&self) -> FloodSettings {
        FloodSettings {
            minh: self.minh,
            max_print: self.max_print,
            pool_accounting: self.pool_accounting,
            kt: self.kt,
        }
    }
}

fn landscape_error<L: Landscape + ?Sized>(landscape: &L, error: LandscapeError) -> BarrierError {
    BarrierError::Landscape {
        landscape: Arc::from(landscape.name()),
        error,
    }
}

fn flood_record<L, I>(flood: &mut FloodState<I>, landscape: &L, configuration: &str) -> Result<()>
where
    L: Landscape + ?Sized,
    I: StructureIndex,
{
    let wrap = |error| landscape_error(landscape, error);
    let key = landscape.pack(configuration).map_err(wrap)?;
    let neighbors = landscape
        .neighbors(configuration)
        .map_err(wrap)?
        .iter()
        .map(|neighbor| landscape.pack(neighbor))
        .collect::<core::result::Result<Vec<_>, _>>()
        .map_err(wrap)?;
    let outcome = flood.classify(configuration, key, &neighbors)?;
    trace!(
        entry = outcome.entry.get(),
        basin = outcome.basin.get(),
        component = outcome.component,
        minimum = outcome.is_minimum(),
        "classified record"
    );
    Ok(())
}

/// Writes `<energy> <size> <saddle> <basin>...` for each reported component.
fn log_components<L, I, W>(
    saddle_log: Option<&mut W>,
    landscape: &L,
    index: &I,
    reports: &[ComponentReport],
) -> Result<()>
where
    L: Landscape + ?Sized,
    I: StructureIndex,
    W: Write + ?Sized,
{
    let Some(log) = saddle_log else {
        return Ok(());
    };
    for report in reports {
        let entry = index
            .get(report.saddle)
            .ok_or(BarrierError::InconsistentForest {
                invariant: "component saddles are indexed",
            })?;
        let saddle = landscape
            .unpack(entry.key())
            .map_err(|error| landscape_error(landscape, error))?;
        let mut line = if landscape.is_rna() {
            format!("{:6.2} {:4} {saddle}", report.energy, report.size)
        } else {
            format!("{:13.5} {:4} {saddle}", report.energy, report.size)
        };
        for basin in &report.basins {
            line.push_str(&format!(" {basin:2}"));
        }
        writeln!(log, "{line}")
            .map_err(|error| BarrierError::io("writing the saddle log", &error))?;
    }
    Ok(())
}
