pub mod report;
pub mod session;
pub mod settings;
pub mod spawner;
pub mod target;
pub mod windowed;
