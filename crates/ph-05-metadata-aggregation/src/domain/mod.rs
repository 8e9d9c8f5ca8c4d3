pub mod contribution;
pub mod errors;
pub mod merge;
