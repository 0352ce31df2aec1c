//! Human-readable run log.
//!
//! [`RunLog`] records every step of a run: the initial population, each
//! generation's fitness records, the selected parent pairs and the bred
//! population, then the final fitness and the winning route.

use crate::error::{GeoTspError, Result};
use crate::ga::{FitnessRecord, GaResult, GenerationObserver, GenerationStats, Population, SelectionPair};
use crate::geo::Location;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// [`GenerationObserver`] that writes the run log to any writer.
///
/// # Examples
///
/// ```
/// use u_geotsp::ga::{GaConfig, GaRunner};
/// use u_geotsp::geo::Location;
/// use u_geotsp::report::RunLog;
///
/// let locations = vec![
///     Location::from_degrees("A", 0.0, 0.0),
///     Location::from_degrees("B", 0.0, 90.0),
///     Location::from_degrees("C", 90.0, 0.0),
/// ];
/// let config = GaConfig::default().with_population_size(2).with_generations(1).with_seed(1);
/// let mut log = RunLog::new(Vec::new());
/// GaRunner::run_with_observer(&locations, &config, &mut log).unwrap();
/// let text = String::from_utf8(log.into_inner().unwrap()).unwrap();
/// assert!(text.starts_with("INITIAL POPULATION:\n"));
/// assert!(text.contains("DISTANCE: "));
/// ```
pub struct RunLog<W: Write> {
    out: W,
}

impl RunLog<BufWriter<File>> {
    /// Creates (or truncates) a log file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RunLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_population(&mut self, population: &Population) -> Result<()> {
        for tour in population {
            let line = tour
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

impl<W: Write> GenerationObserver for RunLog<W> {
    fn on_initial_population(&mut self, population: &Population) -> Result<()> {
        writeln!(self.out, "INITIAL POPULATION:")?;
        self.write_population(population)
    }

    fn on_fitness(&mut self, _stats: &GenerationStats, records: &[FitnessRecord]) -> Result<()> {
        writeln!(self.out, "FITNESS:")?;
        for r in records {
            writeln!(self.out, "{}:{}", r.index, r.distance)?;
        }
        Ok(())
    }

    fn on_selection(&mut self, _generation: usize, pairs: &[SelectionPair]) -> Result<()> {
        writeln!(self.out, "SELECTED PAIRS:")?;
        for p in pairs {
            writeln!(self.out, "({},{})", p.first, p.second)?;
        }
        Ok(())
    }

    fn on_generation(&mut self, generation: usize, population: &Population) -> Result<()> {
        writeln!(self.out, "GENERATION: {generation}")?;
        self.write_population(population)
    }

    fn on_solution(&mut self, result: &GaResult, locations: &[Location]) -> Result<()> {
        writeln!(self.out, "SOLUTION:")?;
        // closed route: repeat the start at the end
        for &i in result.best.iter().chain(result.best.first()) {
            let name = locations
                .get(i)
                .map(Location::name)
                .ok_or(GeoTspError::IndexOutOfRange {
                    context: "solution location index",
                    index: i,
                    bound: locations.len(),
                })?;
            writeln!(self.out, "{name}")?;
        }
        writeln!(self.out, "DISTANCE: {} miles", result.best_distance)?;
        self.out.flush()?;
        Ok(())
    }
}
