//! Extensibility contract for the sprig expression language.
//!
//! Hosts embed sprig by registering callable functions and supplying a
//! runtime context; this crate defines everything that crosses that boundary.
//!
//! # Design
//!
//! - `Type` / `Value` — the closed type system shared by the compiler and hosts
//! - `Function` — the contract for host-registered callables
//! - `ArgumentDefinition` — per-argument schema the binder validates against
//! - `FunctionRegistry` — named, insertion-ordered collection of functions
//!
//! The registry and every registered function must tolerate concurrent reads;
//! nothing in this crate is mutated during evaluation.

mod function;
mod registry;
mod value;

pub use function::{ArgumentDefinition, Function, FunctionError, RuntimeContext};
pub use registry::FunctionRegistry;
pub use value::{Type, Value};
