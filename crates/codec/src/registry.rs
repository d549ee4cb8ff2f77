// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named, lazily resolved schema registry.
//!
//! Schemas live in an arena of slots addressed by [`SchemaId`]. Registering a
//! name reserves a slot and stores its builder; resolving runs the builder and
//! lowers the returned [`TypeDef`] into arena nodes. A name that is met again
//! while its own builder is still running hands back its slot id instead of
//! recursing, so mutually recursive schemas (`Xcm` / `XcmOrder`) resolve to a
//! cyclic graph of ids.
//!
//! Resolution is all-or-nothing: if any reachable name fails, or a builder
//! panics, every slot the attempt touched returns to pending and the nodes it
//! created are dropped.

use crate::error::{CodecError, ErrorKind};
use crate::parser::parse_type;
use crate::schema::{
    BitSetDef, BitSetSchema, EnumDef, EnumSchema, Field, Primitive, Schema, SchemaId, TypeDef,
    Variant,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Produces the definition of a named schema on first resolution.
pub type Builder = Arc<dyn Fn() -> TypeDef + Send + Sync>;

const BITSET_WIDTHS: [u32; 5] = [8, 16, 32, 64, 128];

#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Resolving,
    Resolved(Schema),
}

/// Limits applied to every encode and decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Largest element count a length prefix may declare.
    pub max_sequence_len: u32,
    /// Deepest schema nesting a single call may reach.
    pub max_depth: usize,
    /// Treat any non-zero bool byte as `true`.
    pub lenient_bool: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_sequence_len: 1 << 20,
            max_depth: 256,
            lenient_bool: false,
        }
    }
}

impl From<&config::CodecConfig> for CodecOptions {
    fn from(config: &config::CodecConfig) -> Self {
        Self {
            max_sequence_len: config.max_sequence_len,
            max_depth: config.max_depth,
            lenient_bool: config.lenient_bool,
        }
    }
}

/// Bookkeeping for one resolution attempt, used to roll it back on failure.
#[derive(Default)]
struct Transaction {
    touched: Vec<SchemaId>,
    compacts: Vec<SchemaId>,
    depth: usize,
}

pub struct Registry {
    slots: Vec<Slot>,
    labels: Vec<Option<String>>,
    names: HashMap<String, SchemaId>,
    builders: HashMap<SchemaId, Builder>,
    interned: HashMap<Schema, SchemaId>,
    expressions: HashMap<String, SchemaId>,
    options: CodecOptions,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.slots.len())
            .field("names", &self.names.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_options(CodecOptions::default())
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            slots: Vec::new(),
            labels: Vec::new(),
            names: HashMap::new(),
            builders: HashMap::new(),
            interned: HashMap::new(),
            expressions: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Register a named schema. The builder runs on first resolution and may
    /// refer to names that are not registered yet.
    pub fn register<F>(&mut self, name: impl Into<String>, builder: F) -> Result<SchemaId, CodecError>
    where
        F: Fn() -> TypeDef + Send + Sync + 'static,
    {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(CodecError::schema(ErrorKind::DuplicateSchema(name)));
        }
        let id = self.push(Slot::Pending, Some(name.clone()));
        self.builders.insert(id, Arc::new(builder));
        trace!(name = %name, id = %id, "registered schema");
        self.names.insert(name, id);
        Ok(id)
    }

    /// Register a named schema from an already built definition.
    pub fn register_def(&mut self, name: impl Into<String>, def: TypeDef) -> Result<SchemaId, CodecError> {
        self.register(name, move || def.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn id_of(&self, name: &str) -> Option<SchemaId> {
        self.names.get(name).copied()
    }

    /// The registered name of a slot, if it has one.
    pub fn name_of(&self, id: SchemaId) -> Option<&str> {
        self.labels.get(id.index()).and_then(|label| label.as_deref())
    }

    pub fn is_resolved(&self, id: SchemaId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Resolved(_)))
    }

    /// The lowered node behind a handle, once resolved.
    pub fn schema(&self, id: SchemaId) -> Option<&Schema> {
        match self.slots.get(id.index()) {
            Some(Slot::Resolved(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Resolve a registered name, and everything it reaches, into arena nodes.
    pub fn resolve(&mut self, name: &str) -> Result<SchemaId, CodecError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| CodecError::schema(ErrorKind::UnresolvedSchema(name.to_string())))?;
        if self.is_resolved(id) {
            return Ok(id);
        }
        self.transaction(|registry, tx| {
            registry.resolve_slot(id, tx)?;
            Ok(id)
        })?;
        if !self.is_resolved(id) {
            return Err(CodecError::schema(ErrorKind::UnresolvedSchema(name.to_string())));
        }
        debug!(name = %name, id = %id, slots = self.slots.len(), "resolved schema");
        Ok(id)
    }

    /// Lower an anonymous definition. Named references inside it are resolved.
    pub fn define(&mut self, def: TypeDef) -> Result<SchemaId, CodecError> {
        self.transaction(|registry, tx| registry.lower(def, tx))
    }

    /// Parse and lower a type expression such as `"Vec<(u32, Balance)>"`,
    /// caching the handle by expression.
    pub fn schema_for(&mut self, expr: &str) -> Result<SchemaId, CodecError> {
        if let Some(id) = self.cached(expr) {
            return Ok(id);
        }
        let def = parse_type(expr)
            .map_err(|e| CodecError::schema(ErrorKind::InvalidSchema(e.to_string())))?;
        let id = self.define(def)?;
        self.expressions.insert(expr.to_string(), id);
        Ok(id)
    }

    /// Handle for an expression already lowered by [`Registry::schema_for`].
    pub fn cached(&self, expr: &str) -> Option<SchemaId> {
        self.expressions.get(expr).copied()
    }

    /// Resolve every registered name and check the whole graph, collecting
    /// every failure instead of stopping at the first.
    pub fn validate(&mut self) -> Result<(), Vec<CodecError>> {
        let names: Vec<String> = self.names().into_iter().map(str::to_string).collect();
        let mut errors = Vec::new();
        for name in &names {
            if let Err(err) = self.resolve(name) {
                warn!(name = %name, error = %err, "schema failed to resolve");
                errors.push(err);
            }
        }

        for (index, slot) in self.slots.iter().enumerate() {
            let id = SchemaId(index as u32);
            let check = match slot {
                Slot::Resolved(Schema::Compact(inner)) => self.compact_bits(*inner).map(|_| ()),
                Slot::Resolved(Schema::Alias(_)) => self.resolve_alias(id).map(|_| ()),
                _ => Ok(()),
            };
            if let Err(kind) = check {
                let err = self.label_error(id, CodecError::schema(kind));
                warn!(id = %id, error = %err, "schema failed validation");
                errors.push(err);
            }
        }

        if errors.is_empty() {
            debug!(names = names.len(), slots = self.slots.len(), "registry validated");
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The resolved node for `id`.
    pub(crate) fn node(&self, id: SchemaId) -> Result<&Schema, ErrorKind> {
        match self.slots.get(id.index()) {
            Some(Slot::Resolved(schema)) => Ok(schema),
            _ => Err(ErrorKind::UnresolvedSchema(self.describe(id))),
        }
    }

    /// Follow alias links to the first non-alias node.
    pub(crate) fn resolve_alias(&self, id: SchemaId) -> Result<(SchemaId, &Schema), ErrorKind> {
        let mut current = id;
        // A chain longer than the arena must revisit a slot.
        for _ in 0..=self.slots.len() {
            match self.node(current)? {
                Schema::Alias(target) => current = *target,
                schema => return Ok((current, schema)),
            }
        }
        Err(ErrorKind::InvalidSchema(format!(
            "alias cycle through {}",
            self.describe(id)
        )))
    }

    /// Bit width of the unsigned integer a `Compact` node wraps.
    pub(crate) fn compact_bits(&self, inner: SchemaId) -> Result<u32, ErrorKind> {
        match self.resolve_alias(inner)?.1 {
            Schema::Primitive(p) if p.is_unsigned() => p.bits().ok_or_else(|| {
                ErrorKind::InvalidSchema(format!("Compact over {}", p.name()))
            }),
            other => Err(ErrorKind::InvalidSchema(format!(
                "Compact over {}",
                other.kind_name()
            ))),
        }
    }

    pub(crate) fn is_u8(&self, id: SchemaId) -> bool {
        matches!(
            self.resolve_alias(id),
            Ok((_, Schema::Primitive(Primitive::U8)))
        )
    }

    pub(crate) fn is_bool(&self, id: SchemaId) -> bool {
        matches!(
            self.resolve_alias(id),
            Ok((_, Schema::Primitive(Primitive::Bool)))
        )
    }

    /// Prefix an error path with the slot's registered name, if any.
    pub(crate) fn label_error(&self, id: SchemaId, err: CodecError) -> CodecError {
        match self.name_of(id) {
            Some(name) => err.within(name),
            None => err,
        }
    }

    fn describe(&self, id: SchemaId) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn push(&mut self, slot: Slot, label: Option<String>) -> SchemaId {
        let id = SchemaId(self.slots.len() as u32);
        self.slots.push(slot);
        self.labels.push(label);
        id
    }

    fn transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self, &mut Transaction) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        let mark = self.slots.len();
        let mut tx = Transaction::default();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(self, &mut tx)));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                warn!(
                    slots = self.slots.len().saturating_sub(mark),
                    "schema builder panicked"
                );
                self.rollback(mark, &tx);
                panic::resume_unwind(payload);
            }
        };
        let result = result.and_then(|value| {
            self.check(&tx)?;
            Ok(value)
        });
        if result.is_err() {
            self.rollback(mark, &tx);
        }
        result
    }

    /// Checks that need the whole attempt to be lowered first: compact targets
    /// and alias chains may run through slots that were still resolving.
    fn check(&self, tx: &Transaction) -> Result<(), CodecError> {
        for &id in &tx.compacts {
            if let Some(Schema::Compact(inner)) = self.schema(id) {
                self.compact_bits(*inner)
                    .map_err(|kind| self.label_error(id, CodecError::schema(kind)))?;
            }
        }
        for &id in &tx.touched {
            if let Some(Schema::Alias(_)) = self.schema(id) {
                self.resolve_alias(id)
                    .map_err(|kind| self.label_error(id, CodecError::schema(kind)))?;
            }
        }
        Ok(())
    }

    fn rollback(&mut self, mark: usize, tx: &Transaction) {
        self.slots.truncate(mark);
        self.labels.truncate(mark);
        self.interned.retain(|_, id| id.index() < mark);
        for id in &tx.touched {
            if let Some(slot) = self.slots.get_mut(id.index()) {
                *slot = Slot::Pending;
            }
        }
        debug!(
            reverted = tx.touched.len(),
            slots = self.slots.len(),
            "rolled back schema resolution"
        );
    }

    fn resolve_slot(&mut self, id: SchemaId, tx: &mut Transaction) -> Result<(), CodecError> {
        match self.slots.get(id.index()) {
            Some(Slot::Pending) => {}
            // Resolving: a cycle back to a name on the current stack.
            Some(_) => return Ok(()),
            None => return Err(CodecError::schema(ErrorKind::UnresolvedSchema(id.to_string()))),
        }
        let name = self.describe(id);
        let builder = self
            .builders
            .get(&id)
            .cloned()
            .ok_or_else(|| CodecError::schema(ErrorKind::UnresolvedSchema(name.clone())))?;

        self.slots[id.index()] = Slot::Resolving;
        tx.touched.push(id);
        trace!(name = %name, id = %id, "resolving schema");

        let schema = self.lower_node(builder(), tx).map_err(|e| e.within(name))?;
        if matches!(schema, Schema::Compact(_)) {
            tx.compacts.push(id);
        }
        self.slots[id.index()] = Slot::Resolved(schema);
        Ok(())
    }

    /// Look up a named reference and make sure it is resolved or resolving.
    fn reference(&mut self, name: &str, tx: &mut Transaction) -> Result<SchemaId, CodecError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| CodecError::schema(ErrorKind::UnresolvedSchema(name.to_string())))?;
        self.resolve_slot(id, tx)?;
        Ok(id)
    }

    /// Lower a definition to a slot id. Structurally equal anonymous nodes share a slot.
    fn lower(&mut self, def: TypeDef, tx: &mut Transaction) -> Result<SchemaId, CodecError> {
        if let TypeDef::Named(name) = def {
            return self.reference(&name, tx);
        }
        let schema = self.lower_node(def, tx)?;
        if let Some(id) = self.interned.get(&schema) {
            return Ok(*id);
        }
        let is_compact = matches!(schema, Schema::Compact(_));
        let id = self.push(Slot::Resolved(schema.clone()), None);
        self.interned.insert(schema, id);
        if is_compact {
            tx.compacts.push(id);
        }
        Ok(id)
    }

    /// Lower one definition node, bounding how deep definitions and the names
    /// they reach may nest.
    fn lower_node(&mut self, def: TypeDef, tx: &mut Transaction) -> Result<Schema, CodecError> {
        if tx.depth >= self.options.max_depth {
            return Err(CodecError::schema(ErrorKind::DepthLimitExceeded(
                self.options.max_depth,
            )));
        }
        tx.depth += 1;
        let schema = self.lower_def(def, tx);
        tx.depth -= 1;
        schema
    }

    fn lower_def(&mut self, def: TypeDef, tx: &mut Transaction) -> Result<Schema, CodecError> {
        Ok(match def {
            TypeDef::Primitive(p) => Schema::Primitive(p),
            TypeDef::Unit => Schema::Unit,
            TypeDef::Bytes(len) => Schema::Bytes(len),
            TypeDef::Compact(inner) => Schema::Compact(self.lower(*inner, tx)?),
            TypeDef::Option(inner) => Schema::Option(self.lower(*inner, tx)?),
            TypeDef::Result(ok, err) => Schema::Result {
                ok: self.lower(*ok, tx).map_err(|e| e.within("Ok"))?,
                err: self.lower(*err, tx).map_err(|e| e.within("Err"))?,
            },
            TypeDef::Tuple(items) if items.is_empty() => Schema::Unit,
            TypeDef::Tuple(items) => Schema::Tuple(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| self.lower(item, tx).map_err(|e| e.within(format!("[{}]", i))))
                    .collect::<Result<_, _>>()?,
            ),
            TypeDef::Sequence(inner) => Schema::Sequence(self.lower(*inner, tx)?),
            TypeDef::Array(inner, len) => match *inner {
                TypeDef::Primitive(Primitive::U8) => Schema::Bytes(len),
                inner => Schema::Array(self.lower(inner, tx)?, len),
            },
            TypeDef::Struct(fields) => self.lower_struct(fields, tx)?,
            TypeDef::Enum(def) => Schema::Enum(self.lower_enum(def, tx)?),
            TypeDef::BitSet(def) => Schema::BitSet(lower_bitset(def)?),
            TypeDef::Alias(target) => Schema::Alias(self.lower(*target, tx)?),
            TypeDef::Named(name) => Schema::Alias(self.reference(&name, tx)?),
        })
    }

    fn lower_struct(
        &mut self,
        fields: Vec<(String, TypeDef)>,
        tx: &mut Transaction,
    ) -> Result<Schema, CodecError> {
        let mut seen = HashSet::new();
        let mut lowered = Vec::with_capacity(fields.len());
        for (name, def) in fields {
            if !seen.insert(name.clone()) {
                return Err(invalid(format!("duplicate field '{}'", name)));
            }
            let schema = self.lower(def, tx).map_err(|e| e.within(name.clone()))?;
            lowered.push(Field { name, schema });
        }
        Ok(Schema::Struct(lowered))
    }

    fn lower_enum(&mut self, def: EnumDef, tx: &mut Transaction) -> Result<EnumSchema, CodecError> {
        let mut names = HashSet::new();
        let mut indices = HashSet::new();
        let mut variants = Vec::with_capacity(def.variants.len());
        for variant in def.variants {
            if !names.insert(variant.name.clone()) {
                return Err(invalid(format!("duplicate variant '{}'", variant.name)));
            }
            if !indices.insert(variant.index) {
                return Err(invalid(format!(
                    "duplicate discriminant {} on '{}'",
                    variant.index, variant.name
                )));
            }
            if variant.index > def.tag.max() {
                return Err(invalid(format!(
                    "discriminant {} of '{}' exceeds a {}-bit tag",
                    variant.index,
                    variant.name,
                    def.tag.bits()
                )));
            }
            let payload = match variant.payload {
                None | Some(TypeDef::Unit) => None,
                Some(TypeDef::Tuple(items)) if items.is_empty() => None,
                Some(payload) => Some(
                    self.lower(payload, tx)
                        .map_err(|e| e.within(variant.name.clone()))?,
                ),
            };
            variants.push(Variant {
                name: variant.name,
                index: variant.index,
                payload,
            });
        }
        Ok(EnumSchema {
            tag: def.tag,
            variants,
        })
    }
}

fn lower_bitset(def: BitSetDef) -> Result<BitSetSchema, CodecError> {
    if !BITSET_WIDTHS.contains(&def.bits) {
        return Err(invalid(format!("unsupported bit set width {}", def.bits)));
    }
    let mut names = HashSet::new();
    for (name, position) in &def.flags {
        if !names.insert(name.as_str()) {
            return Err(invalid(format!("duplicate flag '{}'", name)));
        }
        if *position >= def.bits {
            return Err(invalid(format!(
                "flag '{}' at bit {} does not fit {} bits",
                name, position, def.bits
            )));
        }
    }
    Ok(BitSetSchema {
        bits: def.bits,
        flags: def.flags,
    })
}

fn invalid(reason: String) -> CodecError {
    CodecError::schema(ErrorKind::InvalidSchema(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{TagWidth, VariantDef};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn u32_def() -> TypeDef {
        TypeDef::Primitive(Primitive::U32)
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = Registry::new();
        registry.register_def("BlockNumber", u32_def()).unwrap();
        let err = registry.register_def("BlockNumber", u32_def()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateSchema("BlockNumber".to_string()));
    }

    #[test]
    fn test_resolve_is_memoized() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let mut registry = Registry::new();
        registry
            .register("Balance", || {
                CALLS.fetch_add(1, Ordering::SeqCst);
                TypeDef::Primitive(Primitive::U128)
            })
            .unwrap();

        let first = registry.resolve("Balance").unwrap();
        let second = registry.resolve("Balance").unwrap();
        assert_eq!(first, second);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(
            registry.schema(first),
            Some(&Schema::Primitive(Primitive::U128))
        );
    }

    #[test]
    fn test_forward_reference_and_alias() {
        let mut registry = Registry::new();
        registry
            .register_def("AccountId", TypeDef::named("AccountId32"))
            .unwrap();
        registry.register_def("AccountId32", TypeDef::Bytes(32)).unwrap();

        let id = registry.resolve("AccountId").unwrap();
        let target = registry.id_of("AccountId32").unwrap();
        assert_eq!(registry.schema(id), Some(&Schema::Alias(target)));
        assert_eq!(
            registry.resolve_alias(id).unwrap(),
            (target, &Schema::Bytes(32))
        );
    }

    #[test]
    fn test_mutual_recursion_resolves_to_cycle() {
        let mut registry = Registry::new();
        registry
            .register_def(
                "Xcm",
                TypeDef::structure([("orders", TypeDef::sequence(TypeDef::named("XcmOrder")))]),
            )
            .unwrap();
        registry
            .register_def(
                "XcmOrder",
                TypeDef::enumeration([
                    ("Noop", None),
                    ("Nested", Some(TypeDef::named("Xcm"))),
                ]),
            )
            .unwrap();

        let xcm = registry.resolve("Xcm").unwrap();
        let order = registry.id_of("XcmOrder").unwrap();
        assert!(registry.is_resolved(order));

        let Some(Schema::Struct(fields)) = registry.schema(xcm) else {
            panic!("expected struct");
        };
        assert_eq!(registry.schema(fields[0].schema), Some(&Schema::Sequence(order)));
        let Some(Schema::Enum(order_enum)) = registry.schema(order) else {
            panic!("expected enum");
        };
        assert_eq!(order_enum.by_name("Nested").unwrap().payload, Some(xcm));
    }

    #[test]
    fn test_unresolved_name_rolls_back() {
        let mut registry = Registry::new();
        registry
            .register_def(
                "Header",
                TypeDef::structure([
                    ("number", TypeDef::compact(TypeDef::named("BlockNumber"))),
                    ("digest", TypeDef::named("Digest")),
                ]),
            )
            .unwrap();
        registry.register_def("BlockNumber", u32_def()).unwrap();
        let slots = registry.slots.len();

        let err = registry.resolve("Header").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnresolvedSchema("Digest".to_string()));
        assert_eq!(err.path, vec!["Header", "digest"]);
        assert_eq!(registry.slots.len(), slots);
        assert!(!registry.is_resolved(registry.id_of("Header").unwrap()));
        assert!(!registry.is_resolved(registry.id_of("BlockNumber").unwrap()));

        registry.register_def("Digest", TypeDef::sequence(TypeDef::Bytes(4))).unwrap();
        assert!(registry.resolve("Header").is_ok());
    }

    #[test]
    fn test_compact_over_non_integer_is_invalid() {
        let mut registry = Registry::new();
        registry
            .register_def("Weird", TypeDef::compact(TypeDef::named("Name")))
            .unwrap();
        registry
            .register_def("Name", TypeDef::Primitive(Primitive::Str))
            .unwrap();
        let err = registry.resolve("Weird").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSchema(_)));
        assert!(!registry.is_resolved(registry.id_of("Weird").unwrap()));
    }

    #[test]
    fn test_enum_validation() {
        let mut registry = Registry::new();
        let duplicate = TypeDef::Enum(EnumDef {
            tag: TagWidth::U8,
            variants: vec![
                VariantDef {
                    name: "A".to_string(),
                    index: 1,
                    payload: None,
                },
                VariantDef {
                    name: "B".to_string(),
                    index: 1,
                    payload: None,
                },
            ],
        });
        assert!(matches!(
            registry.define(duplicate).unwrap_err().kind,
            ErrorKind::InvalidSchema(_)
        ));

        let too_wide = TypeDef::Enum(EnumDef {
            tag: TagWidth::U8,
            variants: vec![VariantDef {
                name: "Far".to_string(),
                index: 256,
                payload: None,
            }],
        });
        assert!(registry.define(too_wide).is_err());

        let null_payload = TypeDef::enumeration([("Off", Some(TypeDef::Unit)), ("On", None)]);
        let id = registry.define(null_payload).unwrap();
        let Some(Schema::Enum(schema)) = registry.schema(id) else {
            panic!("expected enum");
        };
        assert!(schema.is_basic());
    }

    #[test]
    fn test_bitset_validation() {
        let mut registry = Registry::new();
        let bad_width = TypeDef::BitSet(BitSetDef {
            bits: 24,
            flags: vec![],
        });
        assert!(registry.define(bad_width).is_err());

        let bad_position = TypeDef::BitSet(BitSetDef {
            bits: 8,
            flags: vec![("High".to_string(), 8)],
        });
        assert!(registry.define(bad_position).is_err());
    }

    #[test]
    fn test_anonymous_nodes_are_interned() {
        let mut registry = Registry::new();
        let a = registry.schema_for("Vec<(u32, bool)>").unwrap();
        let b = registry
            .define(TypeDef::sequence(TypeDef::Tuple(vec![
                u32_def(),
                TypeDef::Primitive(Primitive::Bool),
            ])))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.cached("Vec<(u32, bool)>"), Some(a));

        let bytes = registry.schema_for("[u8; 4]").unwrap();
        assert_eq!(registry.schema(bytes), Some(&Schema::Bytes(4)));
    }

    #[test]
    fn test_schema_for_parse_error() {
        let mut registry = Registry::new();
        let err = registry.schema_for("Vec<u8").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSchema(_)));
    }

    #[test]
    fn test_alias_cycle_is_rejected() {
        let mut registry = Registry::new();
        registry.register_def("A", TypeDef::named("B")).unwrap();
        registry.register_def("B", TypeDef::named("A")).unwrap();
        let err = registry.resolve("A").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSchema(_)));
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let mut registry = Registry::new();
        registry.register_def("Good", u32_def()).unwrap();
        registry.register_def("MissingOne", TypeDef::named("Nope")).unwrap();
        registry
            .register_def("MissingTwo", TypeDef::option(TypeDef::named("AlsoNope")))
            .unwrap();

        let errors = registry.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(registry.is_resolved(registry.id_of("Good").unwrap()));
        assert_eq!(registry.names(), vec!["Good", "MissingOne", "MissingTwo"]);
    }

    #[test]
    fn test_panicking_builder_rolls_back() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let mut registry = Registry::new();
        registry
            .register_def("Wrapper", TypeDef::sequence(TypeDef::named("Flaky")))
            .unwrap();
        let flaky = registry
            .register("Flaky", || {
                if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("builder failed");
                }
                TypeDef::Primitive(Primitive::U32)
            })
            .unwrap();
        let slots = registry.slots.len();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| registry.resolve("Wrapper")));
        assert!(outcome.is_err());
        assert_eq!(registry.slots.len(), slots);
        assert!(!registry.is_resolved(flaky));
        assert!(!registry.is_resolved(registry.id_of("Wrapper").unwrap()));

        let wrapper = registry.resolve("Wrapper").unwrap();
        assert!(registry.is_resolved(wrapper));
        assert_eq!(
            registry.schema(flaky),
            Some(&Schema::Primitive(Primitive::U32))
        );
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deep_definition_is_bounded() {
        let mut registry = Registry::with_options(CodecOptions {
            max_depth: 32,
            ..CodecOptions::default()
        });

        let mut shallow = TypeDef::Primitive(Primitive::U8);
        for _ in 0..31 {
            shallow = TypeDef::option(shallow);
        }
        assert!(registry.define(shallow).is_ok());

        let mut deep = TypeDef::Primitive(Primitive::U8);
        for _ in 0..1_000 {
            deep = TypeDef::option(deep);
        }
        let err = registry.define(deep).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthLimitExceeded(32));

        let expr = format!("{}u16{}", "Vec<".repeat(40), ">".repeat(40));
        let err = registry.schema_for(&expr).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthLimitExceeded(32));
        assert_eq!(registry.cached(&expr), None);
    }

    #[test]
    fn test_deep_name_chain_is_bounded() {
        let mut registry = Registry::with_options(CodecOptions {
            max_depth: 32,
            ..CodecOptions::default()
        });
        for i in 0..50 {
            let next = TypeDef::option(TypeDef::named(format!("Link{}", i + 1)));
            registry.register_def(format!("Link{}", i), next).unwrap();
        }
        registry
            .register_def("Link50", TypeDef::Primitive(Primitive::U8))
            .unwrap();
        let slots = registry.slots.len();

        let err = registry.resolve("Link0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthLimitExceeded(32));
        assert_eq!(err.path.first().map(String::as_str), Some("Link0"));
        assert_eq!(registry.slots.len(), slots);
        assert!(!registry.is_resolved(registry.id_of("Link20").unwrap()));

        // Resolving from the far end first keeps every later attempt shallow.
        for i in (0..=50).rev() {
            registry.resolve(&format!("Link{}", i)).unwrap();
        }
    }
}
