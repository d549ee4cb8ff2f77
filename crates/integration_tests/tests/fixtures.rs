// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result, bail};
use integration_tests::{Fixture, FixtureLoader, compare_json};
use scale_registry::format::{decode_hex, hex_with_prefix};

/// Decode every case, compare with the expected JSON, then encode the JSON
/// back and require the original bytes.
fn run_fixture(fixture: &Fixture) -> Result<usize> {
    let mut registry = fixture.registry()?;
    let mut failures = Vec::new();

    for case in &fixture.cases {
        let label = format!("{} {}", case.type_name, case.hex);
        let id = registry
            .schema_for(&case.type_name)
            .with_context(|| format!("resolving {}", case.type_name))?;
        let bytes = decode_hex(&case.hex).with_context(|| format!("bad hex in {}", label))?;

        let value = registry
            .decode_all(id, &bytes)
            .with_context(|| format!("decoding {}", label))?;
        let actual = registry.to_json(id, &value)?;
        let result = compare_json(&actual, &case.json);
        if !result.is_match() {
            failures.push(result.format_diff(&label));
            continue;
        }

        let from_json = registry
            .from_json(id, &case.json)
            .with_context(|| format!("reading JSON of {}", label))?;
        let encoded = hex_with_prefix(&registry.encode(id, &from_json)?);
        if encoded != case.hex {
            failures.push(format!("{}: re-encoded as {}", label, encoded));
        }
    }

    if !failures.is_empty() {
        bail!("{}", failures.join("\n"));
    }
    Ok(fixture.cases.len())
}

#[test]
fn test_all_fixtures() -> Result<()> {
    let loader = FixtureLoader::bundled();
    let paths = loader.list()?;
    assert!(!paths.is_empty(), "no fixtures in {:?}", loader.fixtures_dir());

    for path in paths {
        let fixture = loader.load(&path)?;
        let count = run_fixture(&fixture).with_context(|| format!("fixture {:?}", path))?;
        println!("{:?}: {} cases", path.file_name().unwrap_or_default(), count);
    }
    Ok(())
}

#[test]
fn test_bundled_fixture_cases() -> Result<()> {
    let loader = FixtureLoader::bundled();
    assert!(loader.exists("bundled_chain_types.json"));

    let fixture = loader.load("bundled_chain_types.json")?;
    assert!(fixture.bundled);
    assert!(fixture.types.is_null());
    assert_eq!(run_fixture(&fixture)?, fixture.cases.len());
    Ok(())
}

#[test]
fn test_mismatch_is_reported() -> Result<()> {
    let fixture: Fixture = serde_json::from_value(serde_json::json!({
        "bundled": false,
        "types": { "Pair": { "a": "u8", "b": "u8" } },
        "cases": [{ "type": "Pair", "hex": "0x0102", "json": { "a": 1, "b": 3 } }]
    }))?;

    let err = run_fixture(&fixture).unwrap_err().to_string();
    assert!(err.contains("Pair 0x0102"));
    assert!(err.contains("$.b"));
    Ok(())
}

#[test]
fn test_truncated_case_fails_with_offset() -> Result<()> {
    let fixture: Fixture = serde_json::from_value(serde_json::json!({
        "bundled": false,
        "types": { "Header": { "number": "Compact<u32>", "hash": "[u8; 4]" } },
        "cases": [{ "type": "Header", "hex": "0x040102", "json": null }]
    }))?;

    let err = run_fixture(&fixture).unwrap_err();
    let root = err.root_cause().to_string();
    assert!(root.contains("at byte 1"), "{}", root);
    assert!(root.contains("Header.hash"), "{}", root);
    Ok(())
}
