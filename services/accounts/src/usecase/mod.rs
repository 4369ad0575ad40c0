pub mod account;
pub mod credential;
pub mod link;
pub mod password;
pub mod session;
pub mod verification;
