pub mod errors;
pub mod report;
