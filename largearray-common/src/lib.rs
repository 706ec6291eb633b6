//! Platform level pieces shared by all large arrays.
//!
//! The raw memory primitive hands out untyped, 16-byte aligned
//! blocks and reads or writes primitive values at byte addresses.
//! It carries no bookkeeping of its own.
pub mod alloc;
pub mod error;
