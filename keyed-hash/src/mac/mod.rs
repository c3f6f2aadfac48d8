#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Message Authentication Codes
//!
//! HMAC (FIPS 198-1, RFC 2104) over any [`crate::digest::DigestBinding`]:
//!
//! ```text
//! HMAC(K, text) = H((K0 ⊕ opad) || H((K0 ⊕ ipad) || text))
//! ```
//!
//! - [`key`]: K → K0 and the two pads
//! - [`transform`]: the incremental inner/outer digest state machine
//! - [`engine`]: the reusable public engine
//! - [`tag`]: the resulting authentication value

pub mod engine;
pub mod key;
pub mod tag;
pub mod transform;

pub use engine::{HmacEngine, compute_hmac, verify_hmac};
pub use key::{IPAD, NormalizedKey, OPAD, Pads};
pub use tag::Tag;
pub use transform::TransformState;
