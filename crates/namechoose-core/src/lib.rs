//! Core contracts for namechoose.
//!
//! This crate defines the gender model, the immutable per-nationality name
//! tables, the generated-name value and the error taxonomy shared by the
//! rule, generation and CLI crates.

pub mod error;
pub mod gender;
pub mod name;
pub mod table;

pub use error::{NameError, Result};
pub use gender::{Gender, GenderTag};
pub use name::{GeneratedName, NameComponent, SlotLabel};
pub use table::{Category, NameEntry, NameTable};
