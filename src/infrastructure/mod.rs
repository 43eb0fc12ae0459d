pub mod audio;
pub mod device;
pub mod observability;
pub mod speech;
pub mod storage;
