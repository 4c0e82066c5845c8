//! Integration tests for sstkit
//!
//! Uses wiremock to stand in for the collection and diagnostic endpoints and
//! verifies the whole pipeline end to end: configure, model evaluation,
//! request assembly, dispatch and the error side channel.

mod common;

mod test_errors;
mod test_storage_flow;
mod test_track;
