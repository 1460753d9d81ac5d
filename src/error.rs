use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The render path itself never fails - out-of-range writes are dropped
/// silently to keep the display visually continuous. Errors here come from
/// the one-time geometry self check and host-side tooling.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("strip index {index} is unreachable from the lattice table")]
    UnreachableStripIndex { index: usize },

    #[display("strip index {index} appears more than once in the lattice table")]
    DuplicateStripIndex { index: usize },

    #[display("border path entry {entry} is not a valid strip index")]
    BorderOutOfRange { entry: usize },
}
