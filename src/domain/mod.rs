pub mod branch;
pub mod message;
pub mod remote;
pub mod step;
