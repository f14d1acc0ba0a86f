//! planbench - a cost-based query plan workbench
//!
//! A read-only in-memory relational engine over a small IMDB-style
//! dataset. Queries arrive as structured descriptions (tables, scalar
//! filters, equi-joins); five planning strategies estimate their costs
//! from per-column histograms, and a materialising executor runs each
//! emitted plan row by row.

pub mod catalog;
pub mod executor;
pub mod learned;
pub mod loader;
pub mod output;
pub mod planner;
pub mod query;
pub mod repl;
pub mod stats;
