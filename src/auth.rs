pub mod jwt;
pub mod model;
pub mod verifier;
