//! Hash command
//!
//! Usage: logihash hash <FILE.json> [--config <FILE>] [--include <NAME>]... [--exclude <NAME>]...
//!
//! Objects and arrays are nodes. An object's keys (in sorted order) and an
//! array's indices are its properties. Strings, numbers and booleans are leaf
//! values and `null` is null. Include/exclude lists apply to every object;
//! arrays always hash every element.

use clap::Args;
use logihash_core::{
    EngineConfig, HashEngine, LogicalHash, LogicalType, LogicalTypeBuilder, ScalarHash,
    SelectionConfig, TypeDecl, Value,
};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct HashArgs {
    /// JSON document to hash
    pub input: PathBuf,

    /// Engine config (TOML); pin salts there to get reproducible digests
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Object keys to include
    #[arg(long = "include", value_name = "NAME")]
    pub includes: Vec<String>,

    /// Object keys to exclude
    #[arg(long = "exclude", value_name = "NAME")]
    pub excludes: Vec<String>,
}

/// Execute hash command
pub fn execute(args: HashArgs) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = HashEngine::from_config(&config)?;

    let input = std::fs::read_to_string(&args.input)?;
    let document: Json = serde_json::from_str(&input)?;

    let mut sites = Vec::new();
    if !args.includes.is_empty() {
        sites.push(SelectionConfig::including(args.includes));
    }
    if !args.excludes.is_empty() {
        sites.push(SelectionConfig::excluding(args.excludes));
    }

    let Slot::Node(root) = Slot::build(&document, &sites)? else {
        return Err("document root must be an object or an array".into());
    };
    let digest = engine.compute_hash(&root)?;

    tracing::debug!(
        component = module_path!(),
        op = "hash_document",
        path = %args.input.display(),
        hash = digest,
        duration_ms = started.elapsed().as_millis() as u64,
    );
    println!("{}", digest);
    Ok(())
}

/// A JSON value as a property slot
enum Slot {
    Null,
    Scalar(i32),
    Node(JsonNode),
}

impl Slot {
    fn build(value: &Json, sites: &[SelectionConfig]) -> logihash_core::Result<Self> {
        Ok(match value {
            Json::Null => Slot::Null,
            Json::Bool(b) => Slot::Scalar(b.scalar_hash()),
            Json::Number(n) => Slot::Scalar(number_hash(n)),
            Json::String(s) => Slot::Scalar(s.scalar_hash()),
            Json::Array(items) => {
                let entries = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect();
                Slot::Node(JsonNode::build("array", entries, &[], sites)?)
            }
            Json::Object(map) => {
                let entries = map.iter().map(|(k, v)| (k.clone(), v)).collect();
                Slot::Node(JsonNode::build("object", entries, sites, sites)?)
            }
        })
    }
}

/// Integers that fit in 32 bits hash as themselves; wider ones fold.
fn number_hash(n: &serde_json::Number) -> i32 {
    if let Some(v) = n.as_i64() {
        i32::try_from(v).map_or_else(|_| v.scalar_hash(), |v| v.scalar_hash())
    } else if let Some(v) = n.as_u64() {
        v.scalar_hash()
    } else {
        n.as_f64().unwrap_or(f64::NAN).scalar_hash()
    }
}

struct JsonNode {
    ty: LogicalType,
    slots: HashMap<String, Slot>,
}

impl JsonNode {
    fn build(
        type_name: &str,
        entries: Vec<(String, &Json)>,
        own_sites: &[SelectionConfig],
        sites: &[SelectionConfig],
    ) -> logihash_core::Result<Self> {
        let decl = TypeDecl::new(type_name, entries.iter().map(|(name, _)| name.clone()));
        let ty = own_sites
            .iter()
            .cloned()
            .fold(LogicalType::builder(decl), LogicalTypeBuilder::declare)
            .build()?;

        let mut slots = HashMap::with_capacity(entries.len());
        for (name, value) in entries {
            slots.insert(name, Slot::build(value, sites)?);
        }
        Ok(Self { ty, slots })
    }
}

impl LogicalHash for JsonNode {
    fn logical_type(&self) -> &LogicalType {
        &self.ty
    }

    fn read_property(&self, name: &str, sink: &mut dyn FnMut(Value<'_>)) {
        match self.slots.get(name) {
            Some(Slot::Scalar(hash)) => sink(Value::Scalar(*hash)),
            Some(Slot::Node(node)) => sink(Value::Node(node)),
            Some(Slot::Null) | None => sink(Value::Null),
        }
    }
}
