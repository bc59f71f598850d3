//! Value Object Module

pub mod address;
pub mod contact;
pub mod email;
pub mod handle;
pub mod user_password;
