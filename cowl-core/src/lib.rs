#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Errors shared across the ecosystem
mod error;
pub use error::*;

// Per-field metadata and compiled operations
mod field;
pub use field::*;

// Lazily published name lookup tables
mod index;

// Type-erased member values
mod opaque;
pub use opaque::*;

// The `Record` trait and per-type shapes
mod shape;
pub use shape::*;

// Dynamic values and the coercion trait
mod value;
pub use value::*;

// `FieldType` implementations for the built-in member kinds
mod impls;
