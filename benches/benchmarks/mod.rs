pub mod conversion;
pub mod verify;
