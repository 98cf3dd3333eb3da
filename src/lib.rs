//! Football tournament simulator.
//!
//! [`sim`] holds the match engine: teams, rank-weighted scorelines, group
//! points and penalty shootouts. [`tournament`] drives a full group stage
//! and knockout bracket on top of it, [`ranking`] supplies team ranks and
//! [`stats`] turns final standings into reports.

pub mod config;
pub mod error;
pub mod ranking;
pub mod sim;
pub mod stats;
pub mod tournament;

pub use error::{Error, Result};
