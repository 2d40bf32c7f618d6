pub mod builder;
pub mod optimizer;
pub mod termination;
