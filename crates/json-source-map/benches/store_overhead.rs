//! Storage overhead comparison: side-table records vs columnar arena.
//!
//! Estimates the bytes each store backend spends per tracked container,
//! over documents of increasing size. The arena backend exists for
//! high-volume documents where one heap-allocated record per node is too
//! costly; this benchmark quantifies what the handle indirection buys.
//!
//! Run with: cargo bench --bench store_overhead

use json_source_map::{FilePosition, ProvenanceRecord, SourceMap};
use json_value::{PathSegment, Value};
use std::mem;
use std::rc::Rc;

struct TestCase {
    name: &'static str,
    json: &'static str,
    description: &'static str,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "small_object",
        json: r#"{ "title": "My Document", "author": "John Doe", "draft": false }"#,
        description: "Flat object, primitive values only",
    },
    TestCase {
        name: "small_array",
        json: r#"["item1", "item2", "item3", "item4", "item5"]"#,
        description: "Flat array of 5 strings",
    },
    TestCase {
        name: "nested_config",
        json: r#"{
            "project": {
                "title": "My Project",
                "version": "1.0.0",
                "authors": [
                    { "name": "Alice", "email": "alice@example.com" },
                    { "name": "Bob", "email": "bob@example.com" }
                ],
                "config": {
                    "port": 8080,
                    "debug": true,
                    "features": ["feature1", "feature2", "feature3"]
                }
            }
        }"#,
        description: "Nested structure with arrays and objects",
    },
    TestCase {
        name: "site_config",
        json: r#"{
            "site": {
                "title": "My Website",
                "output-dir": "_site",
                "navbar": {
                    "left": [
                        { "text": "Home", "href": "index.html" },
                        { "text": "About", "href": "about.html" },
                        { "text": "Blog", "href": "blog/index.html" }
                    ],
                    "right": [
                        { "icon": "github", "href": "https://github.com/user/repo" }
                    ]
                },
                "format": {
                    "html": {
                        "theme": { "light": "flatly", "dark": "darkly" },
                        "css": "styles.css",
                        "toc": true
                    }
                }
            }
        }"#,
        description: "Typical website configuration document",
    },
];

/// Attach records the way a parser would: a root on the document, a child
/// record on every nested container, and a primitive position on the
/// enclosing record for every primitive-valued property. Returns the
/// records created.
fn attach_tree(map: &SourceMap, doc: &Value) -> Vec<Rc<ProvenanceRecord>> {
    let mut records = Vec::new();
    let root = record_for(doc, ProvenanceRecord::root("file:///doc.json", FilePosition::new(0, 0)));
    let root = Rc::new(root);
    map.attach(doc, root.clone());
    records.push(root);
    attach_children(map, doc, &mut records);
    records
}

fn attach_children(map: &SourceMap, parent: &Value, records: &mut Vec<Rc<ProvenanceRecord>>) {
    for (segment, child) in child_entries(parent) {
        if !child.is_container() {
            continue;
        }
        let record = record_for(
            &child,
            ProvenanceRecord::child(parent.clone(), segment, FilePosition::new(0, 0)),
        );
        let record = Rc::new(record);
        map.attach(&child, record.clone());
        records.push(record);
        attach_children(map, &child, records);
    }
}

fn record_for(value: &Value, mut record: ProvenanceRecord) -> ProvenanceRecord {
    for (segment, child) in child_entries(value) {
        if child.is_primitive() {
            record = record.with_primitive(segment, FilePosition::new(0, 0));
        }
    }
    record
}

fn child_entries(value: &Value) -> Vec<(PathSegment, Value)> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (PathSegment::from(i), v.clone()))
            .collect(),
        Value::Object(entries) => entries
            .iter()
            .map(|(k, v)| (PathSegment::from(k.as_str()), v.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Heap bytes a record's variable-length fields occupy in either backend
/// (url, string property key, primitive-property keys and positions).
fn record_heap_bytes(record: &ProvenanceRecord) -> usize {
    let mut size = 0;
    if let Some(url) = record.url() {
        size += url.len();
    }
    if let Some(PathSegment::Key(key)) = record.property() {
        size += key.len();
    }
    for (key, _) in record.primitive_properties() {
        size += key.len() + mem::size_of::<FilePosition>();
    }
    size
}

/// Side table: one heap-allocated record per node plus the identity-map
/// entry pointing at it.
fn estimate_side_table(records: &[Rc<ProvenanceRecord>]) -> usize {
    records
        .iter()
        .map(|record| {
            mem::size_of::<ProvenanceRecord>()
                + 2 * mem::size_of::<usize>() // Rc strong/weak counts
                + mem::size_of::<usize>() * 2 // identity-map entry: id + pointer
                + record_heap_bytes(record)
        })
        .sum()
}

/// Arena: fixed column bytes per record plus the pooled variable-length
/// data, and a 4-byte handle in the identity map.
fn estimate_arena(records: &[Rc<ProvenanceRecord>]) -> usize {
    // kind + line/column/directive/link/prim_start/prim_len columns
    const FIXED_COLUMNS: usize = 1 + 6 * mem::size_of::<u32>();
    records
        .iter()
        .map(|record| {
            FIXED_COLUMNS
                + mem::size_of::<usize>() // identity-map key
                + mem::size_of::<u32>() // handle
                + record_heap_bytes(record)
        })
        .sum()
}

fn main() {
    println!("Storage Overhead Analysis: side-table records vs columnar arena");
    println!("================================================================\n");

    println!("Size of base types:");
    println!(
        "  ProvenanceRecord:           {} bytes",
        mem::size_of::<ProvenanceRecord>()
    );
    println!(
        "  FilePosition:               {} bytes",
        mem::size_of::<FilePosition>()
    );
    println!(
        "  Value:                      {} bytes",
        mem::size_of::<Value>()
    );
    println!();

    let mut total_side = 0usize;
    let mut total_arena = 0usize;

    for case in TEST_CASES {
        let doc = Value::from(serde_json::from_str::<serde_json::Value>(case.json).unwrap());

        let map = SourceMap::arena();
        let records = attach_tree(&map, &doc);
        let tracked = map.tracked_len();

        let side = estimate_side_table(&records);
        let arena = estimate_arena(&records);
        total_side += side;
        total_arena += arena;

        println!("{} ({})", case.name, case.description);
        println!("  tracked containers:     {tracked}");
        println!(
            "  side table:             {side} bytes ({} bytes/record)",
            side / tracked
        );
        println!(
            "  arena:                  {arena} bytes ({} bytes/record)",
            arena / tracked
        );
        println!(
            "  arena / side table:     {:.2}x",
            arena as f64 / side as f64
        );
        println!();
    }

    println!("Totals across all cases:");
    println!("  side table:             {total_side} bytes");
    println!("  arena:                  {total_arena} bytes");
    println!(
        "  arena / side table:     {:.2}x",
        total_arena as f64 / total_side as f64
    );
}
