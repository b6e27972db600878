use afpalign::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    bar: ProgressBar,
    phase: &'static str,
}

/// Renders engine progress events as a single indicatif spinner or bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    /// A handler drawing to stderr, or drawing nothing when `visible` is false.
    pub fn new(visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState { bar, phase: "" })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);
        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            Self::apply(&mut guard, progress);
        })
    }

    /// Removes the bar from the terminal.
    pub fn clear(&self) {
        if let Ok(guard) = self.state.lock() {
            guard.bar.finish_and_clear();
        }
    }

    fn apply(state: &mut BarState, progress: Progress) {
        let bar = &state.bar;
        match progress {
            Progress::PhaseStart { name } => {
                state.phase = name;
                bar.reset();
                bar.set_length(0);
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                bar.set_message(name);
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message(format!("✓ {}", state.phase));
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total_steps);
                bar.set_position(0);
                bar.set_style(Self::bar_style());
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::TaskFinish => {
                let length = bar.length().unwrap_or(0);
                if bar.position() < length {
                    bar.set_position(length);
                }
            }
            Progress::Message(msg) => bar.println(format!("  {}", msg)),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .map(|style| {
                style
                    .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                        let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                    })
                    .progress_chars("##-")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn bar(handler: &CliProgressHandler) -> ProgressBar {
        handler.state.lock().unwrap().bar.clone()
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new(false);
        let pb = bar(&handler);
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_phases_and_tasks() {
        let handler = CliProgressHandler::new(false);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Fragment detection" });
        assert_eq!(bar(&handler).message(), "Fragment detection");
        assert!(!bar(&handler).is_finished());

        callback(Progress::TaskStart { total_steps: 40 });
        assert_eq!(bar(&handler).length(), Some(40));
        assert_eq!(bar(&handler).position(), 0);

        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        assert_eq!(bar(&handler).position(), 2);

        callback(Progress::TaskFinish);
        assert_eq!(bar(&handler).position(), 40);

        callback(Progress::PhaseFinish);
        assert!(bar(&handler).is_finished());
        assert_eq!(bar(&handler).message(), "✓ Fragment detection");
    }

    #[test]
    fn callback_is_usable_from_worker_threads() {
        let handler = CliProgressHandler::new(false);
        let callbacks: Vec<_> = (0..4).map(|_| handler.get_callback()).collect();
        callback_from_threads(callbacks);
        assert_eq!(bar(&handler).position(), 4);
    }

    fn callback_from_threads(callbacks: Vec<ProgressCallback<'static>>) {
        let mut callbacks = callbacks.into_iter();
        if let Some(first) = callbacks.next() {
            first(Progress::PhaseStart { name: "Search" });
            first(Progress::TaskStart { total_steps: 4 });
            first(Progress::TaskIncrement);
        }
        let handles: Vec<_> = callbacks
            .map(|cb| thread::spawn(move || cb(Progress::TaskIncrement)))
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
