use indicatif::{ProgressBar, ProgressStyle};
use qmgraph::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders pipeline progress on stderr.
///
/// Indeterminate stages show as a spinner, the assembly batch as a
/// molecule-count bar. At most one element is drawn at a time; a new stage or
/// batch clears whatever was showing before it.
pub struct CliProgressHandler {
    display: Arc<Mutex<Display>>,
}

#[derive(Default)]
struct Display {
    active: Option<ProgressBar>,
}

impl Display {
    fn replace(&mut self, bar: ProgressBar) {
        if let Some(previous) = self.active.take() {
            previous.finish_and_clear();
        }
        self.active = Some(bar);
    }

    fn finish(&mut self, message: Option<&'static str>) {
        if let Some(bar) = self.active.take() {
            match message {
                Some(msg) => bar.finish_with_message(msg),
                None => bar.finish(),
            }
        }
    }
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self {
            display: Arc::new(Mutex::new(Display::default())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();

        Box::new(move |event: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned; dropping event.");
                return;
            };

            match event {
                Progress::StageStart { name } => {
                    let spinner = ProgressBar::new_spinner()
                        .with_style(spinner_style())
                        .with_message(name);
                    spinner.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    display.replace(spinner);
                }
                Progress::StageFinish => display.finish(Some("✓ Done")),
                Progress::BatchStart { molecules } => {
                    let bar = ProgressBar::new(molecules)
                        .with_style(bar_style())
                        .with_message("Assembling molecules");
                    bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                    display.replace(bar);
                }
                Progress::MoleculeAssembled => {
                    if let Some(bar) = &display.active {
                        bar.inc(1);
                    }
                }
                Progress::BatchFinish => display.finish(None),
                Progress::Note(note) => match &display.active {
                    Some(bar) => bar.println(format!("  {note}")),
                    None => eprintln!("  {note}"),
                },
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("Spinner style template is valid")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} molecules")
        .expect("Bar style template is valid")
        .progress_chars("=>-")
}
