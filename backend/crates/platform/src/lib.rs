//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, hex, constant-time comparison)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie building for the token transport
//! - Bearer credential extraction

pub mod bearer;
pub mod cookie;
pub mod crypto;
pub mod password;
