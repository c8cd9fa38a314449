//! Token validation for the external auth provider.
//!
//! Login and registration live with the provider; this server only checks
//! the HS256 access tokens it issues.

pub mod jwt;
