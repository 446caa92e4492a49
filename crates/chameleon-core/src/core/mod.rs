pub mod time;
pub mod timer;
