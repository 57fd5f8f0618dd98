pub mod acquire;
pub mod devices;
pub mod mixer;
pub mod recorder;
