//! Compact-encoded graph values.
//!
//! Every cell in a `--compact` reply is `[scalar_type, value]`. Nodes and
//! edges refer to labels, relationship types and property keys by index;
//! [`GraphSchema`] maps those indices back to names.

use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_f64, expect_i64, expect_string};
use crate::reply::Reply;

// ── Column types ──────────────────────────────────────────────────

/// Column type from the compact header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Unknown = 0,
    Scalar = 1,
    Node = 2,
    Relation = 3,
}

impl ColumnType {
    pub(crate) fn from_ordinal(value: &Reply) -> Result<Self> {
        match expect_i64(value, "column type")? {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Scalar),
            2 => Ok(Self::Node),
            3 => Ok(Self::Relation),
            other => Err(ModuleError::decode(format!("unknown column type {other}"), value)),
        }
    }
}

// ── Value types ───────────────────────────────────────────────────

/// Scalar value types in compact encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Unknown = 0,
    Null = 1,
    String = 2,
    Integer = 3,
    Boolean = 4,
    Double = 5,
    Array = 6,
    Edge = 7,
    Node = 8,
    Path = 9,
    Map = 10,
    Point = 11,
}

impl ScalarType {
    /// Resolve a wire ordinal. `UNKNOWN` is not decodable and fails like an
    /// out-of-range ordinal.
    pub(crate) fn from_ordinal(value: &Reply) -> Result<Self> {
        let scalar = match expect_i64(value, "scalar type")? {
            1 => Self::Null,
            2 => Self::String,
            3 => Self::Integer,
            4 => Self::Boolean,
            5 => Self::Double,
            6 => Self::Array,
            7 => Self::Edge,
            8 => Self::Node,
            9 => Self::Path,
            10 => Self::Map,
            11 => Self::Point,
            other => return Err(ModuleError::decode(format!("unsupported scalar type {other}"), value)),
        };
        Ok(scalar)
    }
}

// ── Schema ────────────────────────────────────────────────────────

/// Name tables of one graph, as returned by `db.labels()`,
/// `db.relationshipTypes()` and `db.propertyKeys()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSchema {
    pub labels: Vec<String>,
    pub relationship_types: Vec<String>,
    pub property_keys: Vec<String>,
}

fn lookup(names: &[String], index: i64) -> Option<String> {
    usize::try_from(index).ok().and_then(|i| names.get(i)).cloned()
}

impl GraphSchema {
    pub fn label(&self, index: i64) -> Option<String> {
        lookup(&self.labels, index)
    }

    pub fn relationship_type(&self, index: i64) -> Option<String> {
        lookup(&self.relationship_types, index)
    }

    pub fn property_key(&self, index: i64) -> Option<String> {
        lookup(&self.property_keys, index)
    }
}

// ── Parsed types ──────────────────────────────────────────────────

/// A property of a node or edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: i64,
    /// Resolved through the schema, when one was supplied.
    pub name: Option<String>,
    pub value: GraphValue,
}

/// A label index with its resolved name.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub index: i64,
    pub name: Option<String>,
}

/// A node in the graph result.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: i64,
    pub labels: Vec<Label>,
    pub properties: Vec<Property>,
}

/// An edge (relation) in the graph result.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: i64,
    pub relation_type: i64,
    pub relation_name: Option<String>,
    pub src_node: i64,
    pub dst_node: i64,
    pub properties: Vec<Property>,
}

impl GraphNode {
    /// First property with the given resolved name.
    pub fn property(&self, name: &str) -> Option<&GraphValue> {
        find_property(&self.properties, name)
    }
}

impl GraphEdge {
    pub fn property(&self, name: &str) -> Option<&GraphValue> {
        find_property(&self.properties, name)
    }
}

fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a GraphValue> {
    properties
        .iter()
        .find(|p| p.name.as_deref() == Some(name))
        .map(|p| &p.value)
}

/// A geographical point.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A value parsed from a graph result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    String(String),
    Integer(i64),
    Boolean(bool),
    Double(f64),
    Array(Vec<GraphValue>),
    Node(GraphNode),
    Edge(GraphEdge),
    Path {
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    },
    Map(Vec<(String, GraphValue)>),
    Point(GraphPoint),
}

impl GraphValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

// ── Decoding ──────────────────────────────────────────────────────

/// Decodes cells, resolving names through an optional schema.
pub(crate) struct CellDecoder<'a> {
    schema: Option<&'a GraphSchema>,
}

fn pair(reply: Reply, what: &str) -> Result<[Reply; 2]> {
    match reply {
        Reply::Array(items) => items
            .try_into()
            .map_err(|items| ModuleError::decode(format!("expected {what} pair"), &Reply::Array(items))),
        other => Err(ModuleError::decode(format!("expected {what} pair"), &other)),
    }
}

impl<'a> CellDecoder<'a> {
    pub(crate) fn new(schema: Option<&'a GraphSchema>) -> Self {
        Self { schema }
    }

    /// `[scalar_type, value]`
    pub(crate) fn cell(&self, reply: Reply) -> Result<GraphValue> {
        let [kind, value] = pair(reply, "[type, value]")?;
        self.scalar(ScalarType::from_ordinal(&kind)?, value)
    }

    fn scalar(&self, kind: ScalarType, value: Reply) -> Result<GraphValue> {
        Ok(match kind {
            ScalarType::Null => GraphValue::Null,
            ScalarType::String => GraphValue::String(expect_string(&value, "string cell")?),
            ScalarType::Integer => GraphValue::Integer(expect_i64(&value, "integer cell")?),
            ScalarType::Boolean => GraphValue::Boolean(
                value
                    .to_bool()
                    .ok_or_else(|| ModuleError::decode("expected boolean cell", &value))?,
            ),
            ScalarType::Double => GraphValue::Double(expect_f64(&value, "double cell")?),
            ScalarType::Array => GraphValue::Array(
                decode::array(value)?
                    .into_iter()
                    .map(|item| self.cell(item))
                    .collect::<Result<_>>()?,
            ),
            ScalarType::Node => GraphValue::Node(self.node(value)?),
            ScalarType::Edge => GraphValue::Edge(self.edge(value)?),
            ScalarType::Path => self.path(value)?,
            ScalarType::Map => self.map(value)?,
            ScalarType::Point => {
                let [lat, lon] = pair(value, "[latitude, longitude]")?;
                GraphValue::Point(GraphPoint {
                    latitude: expect_f64(&lat, "latitude")?,
                    longitude: expect_f64(&lon, "longitude")?,
                })
            }
            ScalarType::Unknown => {
                return Err(ModuleError::decode("unsupported scalar type 0", &value));
            }
        })
    }

    /// `[node_id, [label_ids…], [[prop_id, type, value]…]]`
    fn node(&self, reply: Reply) -> Result<GraphNode> {
        let [id, labels, props]: [Reply; 3] = match reply {
            Reply::Array(items) => items
                .try_into()
                .map_err(|items| ModuleError::decode("malformed node", &Reply::Array(items)))?,
            other => return Err(ModuleError::decode("malformed node", &other)),
        };
        let labels = decode::integer_list(labels)?
            .into_iter()
            .map(|index| Label {
                index,
                name: self.schema.and_then(|s| s.label(index)),
            })
            .collect();
        Ok(GraphNode {
            id: expect_i64(&id, "node id")?,
            labels,
            properties: self.properties(props)?,
        })
    }

    /// `[edge_id, rel_type_id, src_id, dst_id, [[prop_id, type, value]…]]`
    fn edge(&self, reply: Reply) -> Result<GraphEdge> {
        let [id, rel, src, dst, props]: [Reply; 5] = match reply {
            Reply::Array(items) => items
                .try_into()
                .map_err(|items| ModuleError::decode("malformed edge", &Reply::Array(items)))?,
            other => return Err(ModuleError::decode("malformed edge", &other)),
        };
        let relation_type = expect_i64(&rel, "relationship type")?;
        Ok(GraphEdge {
            id: expect_i64(&id, "edge id")?,
            relation_type,
            relation_name: self.schema.and_then(|s| s.relationship_type(relation_type)),
            src_node: expect_i64(&src, "source node")?,
            dst_node: expect_i64(&dst, "destination node")?,
            properties: self.properties(props)?,
        })
    }

    fn properties(&self, reply: Reply) -> Result<Vec<Property>> {
        decode::array(reply)?
            .into_iter()
            .map(|triple| {
                let [key, kind, value]: [Reply; 3] = match triple {
                    Reply::Array(items) => items.try_into().map_err(|items| {
                        ModuleError::decode("expected [key, type, value]", &Reply::Array(items))
                    })?,
                    other => return Err(ModuleError::decode("expected [key, type, value]", &other)),
                };
                let key = expect_i64(&key, "property key")?;
                Ok(Property {
                    key,
                    name: self.schema.and_then(|s| s.property_key(key)),
                    value: self.scalar(ScalarType::from_ordinal(&kind)?, value)?,
                })
            })
            .collect()
    }

    /// `[[ARRAY, [node cells]], [ARRAY, [edge cells]]]`
    fn path(&self, reply: Reply) -> Result<GraphValue> {
        let [nodes, edges] = pair(reply, "[nodes, edges]")?;
        let nodes = self.path_part(nodes, "node", |v| match v {
            GraphValue::Node(n) => Some(n),
            _ => None,
        })?;
        let edges = self.path_part(edges, "edge", |v| match v {
            GraphValue::Edge(e) => Some(e),
            _ => None,
        })?;
        Ok(GraphValue::Path { nodes, edges })
    }

    fn path_part<T>(
        &self,
        reply: Reply,
        what: &str,
        pick: fn(GraphValue) -> Option<T>,
    ) -> Result<Vec<T>> {
        let fragment = reply.clone();
        let GraphValue::Array(items) = self.cell(reply)? else {
            return Err(ModuleError::decode(format!("expected path {what}s"), &fragment));
        };
        items
            .into_iter()
            .map(|v| {
                pick(v).ok_or_else(|| ModuleError::decode(format!("expected {what} in path"), &fragment))
            })
            .collect()
    }

    /// `[key, cell, key, cell…]`
    fn map(&self, reply: Reply) -> Result<GraphValue> {
        decode::flat_pairs(reply)?
            .into_iter()
            .map(|(key, value)| Ok((key, self.cell(value)?)))
            .collect::<Result<_>>()
            .map(GraphValue::Map)
    }

    /// Non-compact replies carry plain values; nested arrays become arrays.
    pub(crate) fn verbose(&self, reply: Reply) -> Result<GraphValue> {
        Ok(match reply {
            Reply::Null => GraphValue::Null,
            Reply::Integer(i) => GraphValue::Integer(i),
            Reply::Double(d) => GraphValue::Double(d),
            Reply::Boolean(b) => GraphValue::Boolean(b),
            Reply::Array(items) => GraphValue::Array(
                items
                    .into_iter()
                    .map(|item| self.verbose(item))
                    .collect::<Result<_>>()?,
            ),
            other => GraphValue::String(decode::string(other)?),
        })
    }
}
