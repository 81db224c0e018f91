use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use kdam::{tqdm, BarExt, Column, RichProgress, Spinner};
use tracing::warn;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// Indeterminate spinner on stderr, drawn from its own thread until stopped.
pub(super) struct LoadingIndicator {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl LoadingIndicator {
    pub(super) fn start(title: &str) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let title = title.to_string();
        let handle = thread::spawn(move || {
            let mut pb = RichProgress::new(
                tqdm!(total = 0, leave = false),
                vec![
                    Column::Spinner(Spinner::new(&FRAMES, 80.0, 1.0)),
                    Column::Text(format!("[blue bold]{title}")),
                ],
            );
            while !flag.load(Ordering::Relaxed) {
                if let Err(e) = pb.refresh() {
                    warn!("spinner refresh failed: {e}");
                    break;
                }
                thread::sleep(TICK);
            }
            if let Err(e) = pb.clear() {
                warn!("spinner clear failed: {e}");
            }
        });
        LoadingIndicator { stop, handle }
    }

    /// Blocks for at most one tick.
    pub(super) fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            warn!("spinner thread panicked");
        }
    }
}
