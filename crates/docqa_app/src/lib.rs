//! DocQA terminal client: wires the core state machine to the engine.
pub mod platform;
