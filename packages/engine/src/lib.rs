// Rosematch Discovery & Matching Engine
//
// This crate implements the core of the Rosematch social-meetup app: computing
// the eligible candidate pool for a viewer, driving the one-card-at-a-time
// decision loop with single-step undo, recording decisions in the durable
// swipe ledger, and resolving accepted decisions into matches that create
// conversations.
//
// The surrounding app (auth, settings, chat UI) consumes this as a library;
// external collaborators are injected via the traits in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
