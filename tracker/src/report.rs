//! Post-session telemetry dump.
//!
//! Opt-in text report of the recorded trials: one elapsed-seconds line per
//! trial, then one `x<TAB>y` line per trail entry (the initial pointer
//! sample followed by every hit position).

use std::io::{self, Write};

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub elapsed_seconds: Vec<f64>,
    pub trail: Vec<(i32, i32)>,
}

impl SessionReport {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            elapsed_seconds: state
                .records
                .iter()
                .map(|r| r.elapsed.as_secs_f64())
                .collect(),
            trail: state.trail.clone(),
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        for secs in &self.elapsed_seconds {
            writeln!(out, "{secs:.6}")?;
        }
        for (x, y) in &self.trail {
            writeln!(out, "{x}\t{y}")?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        self.write_text(&mut buf)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("report text is ASCII")
    }
}
