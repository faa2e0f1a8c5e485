//! Error types.
//!
//! [`AssertionFailed`] reports data of the wrong shape and is what most code
//! handles. [`CantDecode`], [`CantEncode`] and [`Runtime`] cover the codec
//! boundaries and API misuse; [`Error`] unifies them all.

mod assertion;
mod codec;

pub use assertion::{AssertionFailed, ManyAssertionsFailed};
pub use codec::{CantDecode, CantEncode, Error, Runtime, TryIntoAssertion};
