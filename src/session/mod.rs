//! Event-driven meme session.
//!
//! [`state`] holds the pure control state machine; [`controller`] owns the canvas and runs the
//! effects each transition asks for.

pub mod controller;
pub mod state;
