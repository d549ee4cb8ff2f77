// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Thread-safe handle around a [`Registry`].
//!
//! Registration and resolution take the write lock. Encoding, decoding and
//! the JSON bridge only read the resolved schema graph and run in parallel.

use crate::error::CodecError;
use crate::registry::Registry;
use crate::schema::{SchemaId, TypeDef};
use crate::table::TypeTable;
use crate::value::Value;
use lazy_static::lazy_static;
use serde_json::Value as JsonValue;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref GLOBAL: SharedRegistry = SharedRegistry::default();
}

/// The process-wide registry.
pub fn global() -> &'static SharedRegistry {
    &GLOBAL
}

#[derive(Debug, Clone, Default)]
pub struct SharedRegistry(Arc<RwLock<Registry>>);

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// Poisoning is ignored: a builder that panics mid-resolution is rolled
    /// back before the panic leaves the registry, and a failed table load
    /// registers nothing.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register<F>(&self, name: impl Into<String>, builder: F) -> Result<SchemaId, CodecError>
    where
        F: Fn() -> TypeDef + Send + Sync + 'static,
    {
        self.write().register(name, builder)
    }

    /// Register every definition of a type table.
    pub fn load(&self, table: &TypeTable) -> Result<usize, CodecError> {
        table.register_into(&mut self.write())
    }

    pub fn resolve(&self, name: &str) -> Result<SchemaId, CodecError> {
        {
            let registry = self.read();
            if let Some(id) = registry.id_of(name).filter(|id| registry.is_resolved(*id)) {
                return Ok(id);
            }
        }
        self.write().resolve(name)
    }

    pub fn schema_for(&self, expr: &str) -> Result<SchemaId, CodecError> {
        let cached = self.read().cached(expr);
        if let Some(id) = cached {
            return Ok(id);
        }
        self.write().schema_for(expr)
    }

    pub fn encode(&self, id: SchemaId, value: &Value) -> Result<Vec<u8>, CodecError> {
        self.read().encode(id, value)
    }

    pub fn decode(&self, id: SchemaId, bytes: &[u8]) -> Result<(Value, usize), CodecError> {
        self.read().decode(id, bytes)
    }

    pub fn decode_all(&self, id: SchemaId, bytes: &[u8]) -> Result<Value, CodecError> {
        self.read().decode_all(id, bytes)
    }

    pub fn to_json(&self, id: SchemaId, value: &Value) -> Result<JsonValue, CodecError> {
        self.read().to_json(id, value)
    }

    pub fn from_json(&self, id: SchemaId, json: &JsonValue) -> Result<Value, CodecError> {
        self.read().from_json(id, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Primitive;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_concurrent_decode_after_registration() {
        let shared = SharedRegistry::default();
        shared
            .register("Balance", || TypeDef::Primitive(Primitive::U128))
            .unwrap();
        let id = shared.schema_for("Vec<Balance>").unwrap();

        let handles: Vec<_> = (0..4u8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let value = Value::Sequence(vec![Value::UInt(n as u128)]);
                    let bytes = shared.encode(id, &value).unwrap();
                    assert_eq!(shared.decode_all(id, &bytes).unwrap(), value);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_resolve_and_cached_expression() {
        let shared = SharedRegistry::new(Registry::new());
        shared.register("Index", || TypeDef::Primitive(Primitive::U32)).unwrap();

        let first = shared.resolve("Index").unwrap();
        assert_eq!(shared.resolve("Index").unwrap(), first);

        let expr = shared.schema_for("Option<Index>").unwrap();
        assert_eq!(shared.schema_for("Option<Index>").unwrap(), expr);
        assert_eq!(shared.read().cached("Option<Index>"), Some(expr));
    }

    #[test]
    fn test_load_table_and_json() {
        let shared = SharedRegistry::default();
        let table: TypeTable = r#"{ "Pair": { "a": "u8", "b": "Compact<u64>" } }"#
            .parse()
            .unwrap();
        assert_eq!(shared.load(&table).unwrap(), 1);

        let id = shared.resolve("Pair").unwrap();
        let value = shared
            .from_json(id, &serde_json::json!({ "a": 1, "b": 2 }))
            .unwrap();
        assert_eq!(shared.encode(id, &value).unwrap(), vec![1, 8]);
        assert_eq!(
            shared.to_json(id, &value).unwrap(),
            serde_json::json!({ "a": 1, "b": 2 })
        );
    }

    #[test]
    fn test_global_is_one_instance() {
        global().register("SharedGlobalMarker", || TypeDef::Unit).unwrap();
        assert!(global().read().contains("SharedGlobalMarker"));
        assert!(global().register("SharedGlobalMarker", || TypeDef::Unit).is_err());
    }
    #[test]
    fn test_panic_in_builder_does_not_strand_schema() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let shared = SharedRegistry::default();
        shared
            .register("Flaky", || {
                if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("builder failed");
                }
                TypeDef::Primitive(Primitive::U32)
            })
            .unwrap();

        let worker = shared.clone();
        assert!(thread::spawn(move || worker.resolve("Flaky")).join().is_err());
        let id = shared.read().id_of("Flaky").unwrap();
        assert!(!shared.read().is_resolved(id));

        assert_eq!(shared.resolve("Flaky").unwrap(), id);
        assert_eq!(
            shared.encode(id, &Value::from(7u32)).unwrap(),
            vec![7, 0, 0, 0]
        );
    }

    #[test]
    fn test_failed_load_leaves_registry_unchanged() {
        let shared = SharedRegistry::default();
        shared.register("B", || TypeDef::Unit).unwrap();
        let table: TypeTable = r#"{ "A": "u8", "B": "u16", "C": "u32" }"#.parse().unwrap();

        assert!(shared.load(&table).is_err());
        assert_eq!(shared.read().names(), vec!["B"]);
    }
}
