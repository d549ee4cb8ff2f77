// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.kusama)
    #[arg(short, long)]
    pub env_file: Option<String>,

    /// Extra JSON type table to register (may be repeated)
    #[arg(short, long = "types")]
    pub types: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Decode a hex payload as the given type expression and print it as JSON
    Decode {
        /// Type expression, e.g. `Header` or `Vec<(u32, Compact<Balance>)>`
        type_name: String,
        /// SCALE bytes as hex, with or without 0x prefix
        hex: String,
    },
    /// Encode a JSON value as the given type expression and print it as hex
    Encode {
        /// Type expression
        type_name: String,
        /// JSON value
        json: String,
    },
    /// Resolve every registered type and report dangling or invalid definitions
    Validate,
    /// Print all registered type names
    List,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
