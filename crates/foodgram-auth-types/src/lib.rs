//! Auth types shared across Foodgram services.
//!
//! Token issuance lives in the auth service; services behind the gateway only
//! read the identity headers it injects.

pub mod identity;
