// Host-side wiring of the build bridge.
// The IDE adapter calls into these; tests use them directly.

pub mod error;
pub mod logger;
pub mod plugin;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;
