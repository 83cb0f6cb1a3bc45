pub mod session;
pub mod sweep;
