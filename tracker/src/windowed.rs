//! Bridges the session machine to the windowed runner.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use engine::TaskDriver;
use engine::app::TaskApp;
use engine::graphics::{Color, Renderer2d};
use rand::RngCore;
use tracing::{error, info};

use crate::report::SessionReport;
use crate::session::{SessionEvent, SessionLogic, SessionState};
use crate::settings::TaskSettings;

pub fn rgba(rgb: [u8; 3]) -> Color {
    [rgb[0], rgb[1], rgb[2], 255]
}

/// Where the telemetry dump goes after the session, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpTarget {
    Stdout,
    File(PathBuf),
}

pub fn write_dump(state: &SessionState, target: &DumpTarget) -> io::Result<()> {
    let report = SessionReport::from_state(state);
    match target {
        DumpTarget::Stdout => report.write_text(io::stdout().lock()),
        DumpTarget::File(path) => {
            let mut file = File::create(path)?;
            report.write_text(&mut file)?;
            file.flush()
        }
    }
}

/// The windowed task: owns the session driver and the per-trial stopwatch.
///
/// The stopwatch restarts on every hit; the machine itself never reads a
/// clock, it is handed the elapsed reading with each pointer event.
pub struct WindowedSession<R: RngCore> {
    driver: TaskDriver<SessionLogic<R>>,
    trial_clock: Instant,
    antialiasing: u32,
    target_color: Color,
    dump: Option<DumpTarget>,
}

impl<R: RngCore> WindowedSession<R> {
    pub fn new(
        driver: TaskDriver<SessionLogic<R>>,
        settings: &TaskSettings,
        dump: Option<DumpTarget>,
    ) -> Self {
        Self {
            driver,
            trial_clock: Instant::now(),
            antialiasing: settings.antialiasing,
            target_color: rgba(settings.target_color),
            dump,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.driver.state()
    }
}

impl<R: RngCore> TaskApp for WindowedSession<R> {
    fn pointer_moved(&mut self, pos: (i32, i32)) {
        let before = self.driver.state().trials_completed();
        self.driver.step(SessionEvent::PointerMoved {
            pos,
            elapsed: self.trial_clock.elapsed(),
        });
        let state = self.driver.state();
        if state.trials_completed() > before {
            if let Some(record) = state.records.last() {
                info!(
                    trial = state.trials_completed(),
                    of = state.targets_total,
                    elapsed_ms = record.elapsed.as_millis() as u64,
                    "target hit"
                );
            }
            self.trial_clock = Instant::now();
        }
    }

    fn close_requested(&mut self) {
        self.driver.step(SessionEvent::CloseRequested);
    }

    fn finished(&self) -> bool {
        self.driver.state().is_over()
    }

    fn take_redraw(&mut self) -> bool {
        self.driver.state_mut().take_redraw()
    }

    fn draw(&self, gfx: &mut dyn Renderer2d) {
        let state = self.driver.state();
        gfx.fill_disk(
            state.target.center,
            state.target.radius as u32,
            self.target_color,
            self.antialiasing,
        );
    }

    fn initial_pointer(&self) -> Option<(i32, i32)> {
        self.driver.state().trail.first().copied()
    }

    fn session_ended(&mut self) {
        let state = self.driver.state();
        info!(
            trials = state.trials_completed(),
            of = state.targets_total,
            "session ended"
        );
        if let Some(target) = &self.dump {
            if let Err(err) = write_dump(state, target) {
                // Dump failures never change the exit status.
                error!("failed to write telemetry dump: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::TargetSpawner;
    use crate::target::PaintingArea;
    use rand::{SeedableRng, rngs::StdRng};

    fn app(trials: u32) -> WindowedSession<StdRng> {
        let settings = TaskSettings {
            trial_count: trials,
            ..TaskSettings::default()
        };
        let area = PaintingArea::new(600, 400);
        let logic = SessionLogic::new(
            area,
            settings.target_radius,
            settings.trial_count,
            TargetSpawner::new(StdRng::seed_from_u64(3)),
        );
        WindowedSession::new(TaskDriver::new(logic), &settings, None)
    }

    fn bullseye(state: &SessionState) -> (i32, i32) {
        (
            state.target.center.0 + state.target.radius,
            state.target.center.1 + state.target.radius,
        )
    }

    #[test]
    fn initial_pointer_is_the_midpoint() {
        let app = app(3);
        assert_eq!(app.initial_pointer(), Some((300, 200)));
    }

    #[test]
    fn session_finishes_after_the_configured_trials() {
        let mut app = app(3);
        assert!(app.take_redraw(), "first frame should be pending");

        for _ in 0..3 {
            assert!(!app.finished());
            let pos = bullseye(app.state());
            app.pointer_moved(pos);
            assert!(app.take_redraw(), "hit should schedule a redraw");
            assert!(!app.take_redraw(), "redraw flag should clear");
        }
        assert!(app.finished());
    }

    #[test]
    fn close_finishes_immediately() {
        let mut app = app(3);
        app.close_requested();
        assert!(app.finished());
    }

    #[test]
    fn misses_do_not_schedule_redraws() {
        let mut app = app(3);
        app.take_redraw();
        app.pointer_moved((0, 0));
        assert!(!app.take_redraw());
    }
}
