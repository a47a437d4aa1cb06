pub mod verifier;

pub use verifier::{TotpEnrollment, TotpVerifier};
