#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod parsed;
pub use parsed::{CompileError, PField, PMember, PStruct, PStructKind};

mod process_struct;

mod derive;
pub use derive::*;
