//! Authentication primitives
//!
//! - `jwt`: bearer token creation and validation (HS256)
//! - `password`: Argon2id hashing and verification
//! - `middleware`: the authenticated-identity context injected per request

pub mod jwt;
pub mod middleware;
pub mod password;
