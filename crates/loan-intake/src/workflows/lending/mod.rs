pub mod applications;
pub mod calculator;
pub mod samples;

pub use samples::SamplePortfolio;
