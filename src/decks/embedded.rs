//! Embedded deck
//!
//! Card faces compiled into the binary at build time.

// Include generated deck from build script
include!(concat!(env!("OUT_DIR"), "/symbols.rs"));
