//! Bulk pipeline for the Mentora content graph: destructive seed from
//! fixture data, and raw export to a JSON document.
//!
//! Both jobs are fatal-on-failure: any step error aborts the run with a
//! diagnostic and a non-zero exit. Seeding is not transactional; it is meant
//! to be re-run from a clean state.

pub mod export;
pub mod fixtures;
pub mod seed;
