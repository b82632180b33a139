pub mod app;
pub mod golden;
pub mod graphics;
pub mod pixels_renderer;

/// Task logic expressed as a state plus a transition over input events.
///
/// `step` takes `&mut self` so a logic may own stateful collaborators (a
/// pseudorandom source, most notably) while the state itself stays a plain
/// value that can be inspected, cloned, and replayed.
pub trait TaskLogic {
    type State;
    type Event;

    fn initial_state(&mut self) -> Self::State;
    fn step(&mut self, state: &Self::State, event: Self::Event) -> Self::State;
}

/// Drives a `TaskLogic` without a window.
///
/// The windowed runner and the tests both feed events through this, so the
/// behavior under test is exactly the behavior on screen.
pub struct TaskDriver<L: TaskLogic> {
    logic: L,
    state: L::State,
}

impl<L: TaskLogic> TaskDriver<L> {
    pub fn new(mut logic: L) -> Self {
        let state = logic.initial_state();
        Self { logic, state }
    }

    pub fn state(&self) -> &L::State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut L::State {
        &mut self.state
    }

    pub fn step(&mut self, event: L::Event) {
        self.state = self.logic.step(&self.state, event);
    }

    pub fn run<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = L::Event>,
    {
        for event in events {
            self.step(event);
        }
    }
}
