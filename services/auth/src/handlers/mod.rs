pub mod login;
pub mod session;
