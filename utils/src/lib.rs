//! Shared infrastructure utilities for Greenfield.
//!
//! Things several crates need that do not belong in the IO-free
//! `greenfield-types` crate:
//!
//! - **`atomic_file`**: crash-safe file persistence (temp + rename, `.bak` recovery)

pub mod atomic_file;

pub use atomic_file::{
    AtomicWriteOptions, FileMode, FileSyncPolicy, atomic_write_with_options, read_recovering,
    recover_bak_file, remove_with_backup,
};
