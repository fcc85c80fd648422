extern crate boolector;
extern crate r2pipe;
extern crate serde_json;

/// The 10x10 integer automaton and its fingerprint
pub mod brain;
/// Literal data and a solver for each reversing challenge
pub mod challenges;
/// Errors for every analysis
pub mod error;
/// Harvest xor keys from debugger frames or saved dumps
pub mod keys;
/// Little endian qword packing and block xor
pub mod qword;
/// Drive a radare2 debug session
pub mod r2_api;
/// Solve the automaton's input chunk by chunk
pub mod recover;
/// Options and console reporting around the challenges
pub mod session;
/// Utilities for using the SMT solver to evaluate symbolic values
pub mod solver;
mod test;
/// Abstraction for concrete and symbolic values
pub mod value;
/// Ordered xor mask chains
pub mod xorchain;

pub use crate::brain::Brain;
pub use crate::error::{Error, Result};
pub use crate::session::{Session, SessionOption};
pub use crate::value::{vc, Value};
pub use crate::xorchain::MaskChain;
