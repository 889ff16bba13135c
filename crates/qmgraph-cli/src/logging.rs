use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// The console layer follows the `-v`/`-q` flags and only opens up this
/// binary and the qmgraph library; dependency crates stay capped at WARN no
/// matter how verbose the run is. The optional file layer always records at
/// DEBUG so a log file from a quiet run is still useful afterwards.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console_filter(verbosity, quiet));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(CliError::Io)?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_filter(EnvFilter::new("debug"));
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }

    Ok(())
}

fn console_filter(verbosity: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("off");
    }
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(format!("warn,qmgraph={level},qmgraph_cli={level}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing::{debug, info, warn};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_with_filter(filter: EnvFilter, emit: impl FnOnce()) -> String {
        let writer = CaptureWriter::default();
        let layer = fmt::layer()
            .with_writer(writer.clone())
            .with_ansi(false)
            .with_filter(filter);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, emit);
        writer.contents()
    }

    #[test]
    fn default_verbosity_keeps_info_silent() {
        let output = capture_with_filter(console_filter(0, false), || {
            info!("build starting");
            warn!("cutoff looks unusual");
        });
        assert!(!output.contains("build starting"));
        assert!(output.contains("cutoff looks unusual"));
    }

    #[test]
    fn verbose_mode_opens_this_crate_but_not_dependencies() {
        let output = capture_with_filter(console_filter(1, false), || {
            info!("parsing geometries");
            info!(target: "rayon::core", "worker spawned");
        });
        assert!(output.contains("parsing geometries"));
        assert!(!output.contains("worker spawned"));
    }

    #[test]
    fn quiet_wins_over_any_verbosity() {
        let output = capture_with_filter(console_filter(3, true), || {
            warn!("should not appear");
        });
        assert!(output.is_empty());
    }

    #[test]
    fn file_layer_keeps_debug_detail_when_console_drops_it() {
        let console = CaptureWriter::default();
        let file = CaptureWriter::default();
        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(console.clone())
                    .with_ansi(false)
                    .with_filter(console_filter(0, false)),
            )
            .with(
                fmt::layer()
                    .with_writer(file.clone())
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            );

        tracing::subscriber::with_default(subscriber, || {
            debug!("artifact path resolved");
        });

        assert!(console.contents().is_empty());
        assert!(file.contents().contains("artifact path resolved"));
        assert!(file.contents().contains("DEBUG"));
    }

    #[test]
    #[serial]
    fn log_file_pointing_at_a_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    #[serial]
    fn global_initialization_succeeds() {
        setup_logging(2, false, None).expect("Failed to install the global subscriber");
        info!("subscriber installed");
    }
}
