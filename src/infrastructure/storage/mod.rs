pub mod ready_flag;

pub use ready_flag::FileReadyFlag;
