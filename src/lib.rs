//! timetable - An in-memory query engine over class-timetable records
//!
//! A batch of records is loaded once, indexed per attribute, and then
//! narrowed by chained filter, sort and range operations. The working
//! result can be reset to the full batch or exported chronologically.

pub mod cli;
pub mod config;
pub mod index;
pub mod ingest;
pub mod observability;
pub mod query;
pub mod record;
pub mod sort;
