//! Corridor charger finder server.
//!
//! A web service that answers: "I'm driving between Rotterdam and Santa
//! Pola with this much range left, which fast chargers ahead of me can I
//! actually reach?"

pub mod blacklist;
pub mod cache;
pub mod corridor;
pub mod deadline;
pub mod directory;
pub mod domain;
pub mod finder;
pub mod geo;
pub mod location;
pub mod planner;
pub mod rate_limit;
pub mod synthetic;
pub mod web;
