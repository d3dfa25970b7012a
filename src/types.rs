mod mpint;
mod signature;

pub use self::{mpint::Mpint, signature::SignatureEnvelope};
