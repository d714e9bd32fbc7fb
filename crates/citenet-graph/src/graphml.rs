//! GraphML serialization of the co-citation graph.
//!
//! Produces the attribute layout networkx and Gephi expect: node keys
//! `label` (string), `freq` (int), `year` (string) and the edge key
//! `weight` (double), with attribute names doubling as key ids. An
//! unknown year serializes as the empty string.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use petgraph::visit::EdgeRef;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, instrument};

use crate::build::CocitationGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://graphml.graphdrawing.org/xmlns \
     http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";

/// Write `graph` to `path` as GraphML, creating parent directories.
///
/// The caller is expected to skip the write for empty graphs; an empty
/// graph still serializes to a valid document with no nodes.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot
/// be written.
#[instrument(skip(graph), fields(path = %path.display()))]
pub fn write_graphml(graph: &CocitationGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }

    let buf = render(graph).context("serialize GraphML document")?;
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote GraphML"
    );
    Ok(())
}

/// Serialize the GraphML document into a byte buffer.
fn render(graph: &CocitationGraph) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    write_key(&mut writer, "label", "node", "string")?;
    write_key(&mut writer, "freq", "node", "int")?;
    write_key(&mut writer, "year", "node", "string")?;
    write_key(&mut writer, "weight", "edge", "double")?;

    let mut graph_el = BytesStart::new("graph");
    graph_el.push_attribute(("edgedefault", "undirected"));
    writer.write_event(Event::Start(graph_el))?;

    for idx in graph.graph.node_indices() {
        let attrs = &graph.graph[idx];

        let mut node = BytesStart::new("node");
        node.push_attribute(("id", attrs.label.as_str()));
        writer.write_event(Event::Start(node))?;

        write_data(&mut writer, "label", &attrs.label)?;
        write_data(&mut writer, "freq", &attrs.freq.to_string())?;
        write_data(&mut writer, "year", attrs.year.as_deref().unwrap_or(""))?;

        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for edge in graph.graph.edge_references() {
        let source = &graph.graph[edge.source()].label;
        let target = &graph.graph[edge.target()].label;

        let mut el = BytesStart::new("edge");
        el.push_attribute(("source", source.as_str()));
        el.push_attribute(("target", target.as_str()));
        writer.write_event(Event::Start(el))?;

        write_data(&mut writer, "weight", &format!("{:?}", edge.weight()))?;

        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    Ok(writer.into_inner())
}

/// Emit one `<key>` declaration.
fn write_key(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    domain: &str,
    attr_type: &str,
) -> Result<()> {
    let mut key = BytesStart::new("key");
    key.push_attribute(("id", name));
    key.push_attribute(("for", domain));
    key.push_attribute(("attr.name", name));
    key.push_attribute(("attr.type", attr_type));
    writer.write_event(Event::Empty(key))?;
    Ok(())
}

/// Emit one `<data key="...">value</data>` element.
fn write_data(
    writer: &mut Writer<Vec<u8>>,
    key: &str,
    value: &str,
) -> Result<()> {
    let mut el = BytesStart::new("data");
    el.push_attribute(("key", key));
    writer.write_event(Event::Start(el))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use citenet_core::fields;
    use citenet_core::Record;

    fn two_node_graph() -> CocitationGraph {
        let mut record = Record::default();
        record.set_scalar(fields::ACCESSION, "WOS:1");
        record.push_list_item(fields::CITED_REFS, "Davis FD, 1989, MIS QUART, V13, P319");
        record.push_list_item(fields::CITED_REFS, "Venkatesh V, 2003, MIS QUART, V27, P425");
        CocitationGraph::from_records(std::slice::from_ref(&record))
    }

    #[test]
    fn document_has_keys_nodes_and_edges() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.graphml");
        write_graphml(&two_node_graph(), &path).expect("write");

        let xml = std::fs::read_to_string(&path).expect("read back");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("edgedefault=\"undirected\""));
        assert!(xml.contains(r#"<key id="weight" for="edge" attr.name="weight" attr.type="double"/>"#));
        assert!(xml.contains(r#"<node id="DAVIS FD, 1989, MIS QUART">"#));
        assert!(xml.contains(r#"<data key="year">1989</data>"#));
        assert!(xml.contains(r#"<data key="freq">1</data>"#));
        assert!(xml.contains(r#"<data key="weight">1.0</data>"#));
    }

    #[test]
    fn unknown_year_serializes_empty() {
        let mut record = Record::default();
        record.set_scalar(fields::ACCESSION, "WOS:1");
        record.push_list_item(fields::CITED_REFS, "Smith J");
        let graph = CocitationGraph::from_records(std::slice::from_ref(&record));

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.graphml");
        write_graphml(&graph, &path).expect("write");

        let xml = std::fs::read_to_string(&path).expect("read back");
        assert!(xml.contains(r#"<data key="year"></data>"#));
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deep").join("out.graphml");
        write_graphml(&two_node_graph(), &path).expect("write");
        assert!(path.is_file());
    }
}
