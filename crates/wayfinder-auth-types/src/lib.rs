//! Access-token issuance/validation and the caller-identity extractor.
//!
//! Handlers receive the caller explicitly as an [`identity::Identity`]
//! argument; nothing reads ambient request state.

pub mod identity;
pub mod token;
