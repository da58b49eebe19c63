//! CLI operation mode handlers.
//!
//! - [`branch_analysis`]: Classify the commits of one branch
//! - [`shortlist`]: Shortlist an organisation's repositories
//!
//! Output formatting utilities are in [`output`]; the console progress line
//! lives in [`progress`].

pub mod branch_analysis;
pub mod output;
pub mod progress;
pub mod shortlist;
