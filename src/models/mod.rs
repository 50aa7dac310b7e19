pub mod analysis;
pub mod job;
pub mod report;
pub mod status;
pub mod trends;
