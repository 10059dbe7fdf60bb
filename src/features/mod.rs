pub mod improve;

pub use improve::ContentImprover;
