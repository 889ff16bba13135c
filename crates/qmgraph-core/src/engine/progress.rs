/// Progress events emitted by the dataset build pipeline.
///
/// The pipeline has exactly two shapes of activity: indeterminate stages
/// (parsing the source, cache lookups) and the molecule-counted assembly
/// batch. The events mirror that shape so a consumer can drive one spinner
/// and one counted bar without tracking pipeline internals.
#[derive(Debug, Clone)]
pub enum Progress {
    /// An indeterminate stage began.
    StageStart { name: &'static str },
    StageFinish,

    /// The assembly batch began; one [`Progress::MoleculeAssembled`] follows
    /// per molecule.
    BatchStart { molecules: u64 },
    MoleculeAssembled,
    BatchFinish,

    /// A one-off line worth surfacing to the user.
    Note(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `body` bracketed by stage start and finish events.
    pub fn stage<T>(&self, name: &'static str, body: impl FnOnce() -> T) -> T {
        self.report(Progress::StageStart { name });
        let out = body();
        self.report(Progress::StageFinish);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn stage_brackets_the_body_with_start_and_finish() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(format!("{event:?}"));
        }));

        let value = reporter.stage("Reading geometries", || 7);
        assert_eq!(value, 7);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("Reading geometries"));
        assert!(events[1].contains("StageFinish"));
    }

    #[test]
    fn reporter_without_callback_is_inert() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::BatchStart { molecules: 3 });
        assert_eq!(reporter.stage("noop", || 1), 1);
    }
}
