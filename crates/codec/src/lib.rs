// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-driven SCALE codec.
//!
//! Types are registered by name into a [`Registry`], either from Rust
//! builders or from JSON type tables, and resolved lazily into a cycle-safe
//! schema graph. Values are encoded and decoded against that graph and can
//! be bridged to JSON.

pub mod composite;
mod dispatch;
pub mod error;
pub mod format;
pub mod input;
pub mod json;
pub mod logging;
pub mod parser;
pub mod primitive;
pub mod registry;
pub mod schema;
pub mod shared;
pub mod table;
pub mod value;

pub use error::{CodecError, ErrorKind};
pub use input::Input;
pub use parser::{ParseError, parse_type};
pub use registry::{CodecOptions, Registry};
pub use schema::{SchemaId, TypeDef};
pub use shared::{SharedRegistry, global};
pub use table::{TableError, TypeTable};
pub use value::Value;
