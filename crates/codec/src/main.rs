// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, bail};
use config::{Args, Command, RegistryConfig};
use scale_registry::format::{decode_hex, hex_with_prefix};
use scale_registry::logging::{self, LoggingConfig};
use scale_registry::{CodecOptions, Registry, TypeTable};

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = match &args.env_file {
        Some(path) => RegistryConfig::from_env_file(path)?,
        None => RegistryConfig::from_env()?,
    };
    logging::init_with_config(LoggingConfig::from(&config.log))?;

    let mut registry = Registry::with_options(CodecOptions::from(&config.codec));
    if config.types.bundled {
        let count = TypeTable::bundled()?.register_into(&mut registry)?;
        tracing::debug!("Registered {} bundled types", count);
    }
    for path in config.types.paths.iter().chain(&args.types) {
        let table = TypeTable::from_path(path)?;
        let count = table.register_into(&mut registry)?;
        tracing::info!("Registered {} types from {}", count, path);
    }

    match args.command {
        Command::Decode { type_name, hex } => {
            let bytes = decode_hex(&hex).with_context(|| format!("invalid hex '{}'", hex))?;
            let id = registry.schema_for(&type_name)?;
            let value = registry.decode_all(id, &bytes)?;
            let json = registry.to_json(id, &value)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Encode { type_name, json } => {
            let json: serde_json::Value =
                serde_json::from_str(&json).context("value is not valid JSON")?;
            let id = registry.schema_for(&type_name)?;
            let value = registry.from_json(id, &json)?;
            println!("{}", hex_with_prefix(&registry.encode(id, &value)?));
        }
        Command::Validate => {
            if let Err(errors) = registry.validate() {
                for error in &errors {
                    eprintln!("{}", error);
                }
                bail!("{} type(s) failed to resolve", errors.len());
            }
            println!("{} types resolved", registry.names().len());
        }
        Command::List => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
