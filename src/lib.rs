//! Terminal dino runner: a pure fixed-tick simulation core with thin
//! crossterm rendering and input adapters around it.

pub mod compute;
pub mod display;
pub mod entities;
pub mod score;
