use crate::core::descriptors::oracle::DescriptorOracle;
use crate::core::models::graph::MoleculeGraph;
use crate::core::models::molecule::MoleculeRecord;
use crate::engine::assembler::assemble;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies the graph assembler to every molecule record over the worker pool.
///
/// The output sequence preserves input order regardless of completion order
/// across workers: `result[i]` corresponds to `records[i]`. The first failing
/// molecule (by input order) aborts the whole batch and its partial results
/// are discarded; silently excluding molecules would corrupt downstream index
/// alignment, so there is no retry and no best-effort partial dataset.
#[instrument(skip_all, name = "batch_runner")]
pub fn run<O: DescriptorOracle>(
    records: &[MoleculeRecord],
    oracle: &O,
    cutoff: f64,
    reporter: &ProgressReporter,
) -> Result<Vec<MoleculeGraph>, EngineError> {
    info!(molecules = records.len(), "Starting batch graph construction.");
    reporter.report(Progress::BatchStart {
        molecules: records.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = records.iter();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter();

    let results: Vec<Result<MoleculeGraph, EngineError>> = iterator
        .map(|record| {
            let graph = process_record(record, oracle, cutoff);
            reporter.report(Progress::MoleculeAssembled);
            graph
        })
        .collect();

    reporter.report(Progress::BatchFinish);

    let mut graphs = Vec::with_capacity(results.len());
    for result in results {
        graphs.push(result?);
    }

    info!(graphs = graphs.len(), "Batch graph construction finished.");
    Ok(graphs)
}

fn process_record<O: DescriptorOracle>(
    record: &MoleculeRecord,
    oracle: &O,
    cutoff: f64,
) -> Result<MoleculeGraph, EngineError> {
    let descriptors = oracle
        .compute(&record.sites())
        .map_err(|source| EngineError::Descriptor {
            index: record.index,
            source,
        })?;
    assemble(record, &descriptors, cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptors::oracle::{AtomSite, DescriptorError, DescriptorSet};
    use crate::core::descriptors::slater::SlaterOverlapOracle;
    use nalgebra::Point3;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        inner: SlaterOverlapOracle,
        calls: AtomicUsize,
    }

    impl CountingOracle {
        fn new() -> Self {
            Self {
                inner: SlaterOverlapOracle,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DescriptorOracle for CountingOracle {
        fn compute(&self, sites: &[AtomSite]) -> Result<DescriptorSet, DescriptorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.compute(sites)
        }
    }

    fn diatomic(index: usize, second_element: u32) -> MoleculeRecord {
        MoleculeRecord::new(
            vec![6, second_element],
            vec![Point3::origin(), Point3::new(1.1, 0.0, 0.0)],
            vec![index as f64],
            index,
        )
    }

    #[test]
    fn output_order_matches_input_order() {
        let records: Vec<MoleculeRecord> = (0..32).map(|i| diatomic(i, 1)).collect();
        let oracle = CountingOracle::new();
        let reporter = ProgressReporter::default();

        let graphs = run(&records, &oracle, 5.0, &reporter).unwrap();

        assert_eq!(graphs.len(), 32);
        for (i, graph) in graphs.iter().enumerate() {
            assert_eq!(graph.index, records[i].index);
            assert_eq!(graph.labels, records[i].labels);
        }
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn one_failing_molecule_aborts_the_batch() {
        // Molecule 2 carries an element the oracle rejects.
        let mut records: Vec<MoleculeRecord> = (0..5).map(|i| diatomic(i, 1)).collect();
        records[2] = diatomic(2, 92);
        let oracle = CountingOracle::new();
        let reporter = ProgressReporter::default();

        let result = run(&records, &oracle, 5.0, &reporter);
        assert!(matches!(
            result,
            Err(EngineError::Descriptor { index: 2, .. })
        ));
    }

    #[test]
    fn empty_input_produces_empty_output() {
        let oracle = CountingOracle::new();
        let reporter = ProgressReporter::default();
        let graphs = run(&[], &oracle, 5.0, &reporter).unwrap();
        assert!(graphs.is_empty());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn progress_increments_once_per_molecule() {
        let records: Vec<MoleculeRecord> = (0..8).map(|i| diatomic(i, 1)).collect();
        let oracle = CountingOracle::new();
        let increments = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if matches!(event, Progress::MoleculeAssembled) {
                increments.fetch_add(1, Ordering::SeqCst);
            }
        }));

        run(&records, &oracle, 5.0, &reporter).unwrap();
        assert_eq!(increments.load(Ordering::SeqCst), 8);
    }
}
