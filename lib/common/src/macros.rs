//! Declarative macros shared between workspace crates.

mod meta;
