pub mod actions;
pub mod vault;
pub mod workflow;
