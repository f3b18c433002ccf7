//! `GRAPH.QUERY` result sets.
//!
//! A compact reply is a RESP array with either 1 element (statistics only,
//! e.g. `CREATE` without `RETURN`) or 3 elements:
//! 1. **Header**: array of column descriptors `[type, name]`
//! 2. **Result set**: array of rows, each row is an array of cells
//! 3. **Statistics**: array of `"Key: value"` strings

use crate::error::{ModuleError, Result};
use crate::graph::values::{CellDecoder, ColumnType, GraphSchema, GraphValue};
use crate::reply::decode::{self, expect_string};
use crate::reply::Reply;

/// Column descriptors from the result header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub column_types: Vec<ColumnType>,
    pub column_names: Vec<String>,
}

/// Parsed statistics from the result footer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub labels_added: u64,
    pub labels_removed: u64,
    pub nodes_created: u64,
    pub nodes_deleted: u64,
    pub properties_set: u64,
    pub properties_removed: u64,
    pub relationships_created: u64,
    pub relationships_deleted: u64,
    pub indices_created: u64,
    pub indices_deleted: u64,
    pub cached_execution: bool,
    /// Query internal execution time, in milliseconds.
    pub execution_time_ms: f64,
    /// Every `key: value` pair as the server sent it.
    pub raw: Vec<(String, String)>,
}

impl Statistics {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn apply(&mut self, key: &str, value: &str, fragment: &Reply) -> Result<()> {
        let count = |v: &str| {
            v.trim()
                .parse::<u64>()
                .map_err(|_| ModuleError::decode(format!("bad value for {key}: {v}"), fragment))
        };
        match key {
            "Labels added" => self.labels_added = count(value)?,
            "Labels removed" => self.labels_removed = count(value)?,
            "Nodes created" => self.nodes_created = count(value)?,
            "Nodes deleted" => self.nodes_deleted = count(value)?,
            "Properties set" => self.properties_set = count(value)?,
            "Properties removed" => self.properties_removed = count(value)?,
            "Relationships created" => self.relationships_created = count(value)?,
            "Relationships deleted" => self.relationships_deleted = count(value)?,
            "Indices created" => self.indices_created = count(value)?,
            "Indices deleted" => self.indices_deleted = count(value)?,
            "Cached execution" => self.cached_execution = count(value)? != 0,
            "Query internal execution time" => {
                let ms = value.trim().trim_end_matches("milliseconds").trim();
                self.execution_time_ms = ms
                    .parse()
                    .map_err(|_| ModuleError::decode(format!("bad execution time: {value}"), fragment))?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// A fully parsed graph query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub header: Header,
    pub rows: Vec<Vec<GraphValue>>,
    pub statistics: Statistics,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.column_names.iter().position(|c| c == name)
    }
}

/// `[header, rows, stats]` or `[stats]`.
fn sections(reply: Reply) -> Result<(Option<(Reply, Reply)>, Reply)> {
    let items = match reply {
        Reply::Array(items) => items,
        other => return Err(ModuleError::decode("expected result array", &other)),
    };
    match <[Reply; 3]>::try_from(items) {
        Ok([header, rows, stats]) => Ok((Some((header, rows)), stats)),
        Err(items) => match <[Reply; 1]>::try_from(items) {
            Ok([stats]) => Ok((None, stats)),
            Err(items) => Err(ModuleError::decode(
                format!("expected 1 or 3 result sections, got {}", items.len()),
                &Reply::Array(items),
            )),
        },
    }
}

/// Decode a `--compact` reply.
pub fn compact_result(reply: Reply, schema: Option<&GraphSchema>) -> Result<ResultSet> {
    let cells = CellDecoder::new(schema);
    let (body, stats) = sections(reply)?;
    let mut result = ResultSet {
        statistics: statistics(stats)?,
        ..ResultSet::default()
    };
    if let Some((header, rows)) = body {
        result.header = compact_header(header)?;
        for row in decode::array(rows)? {
            let row: Vec<GraphValue> = decode::array(row)?
                .into_iter()
                .map(|c| cells.cell(c))
                .collect::<Result<_>>()?;
            result.rows.push(row);
        }
    }
    Ok(result)
}

/// Decode a reply sent without `--compact`: plain column names and values.
pub fn verbose_result(reply: Reply) -> Result<ResultSet> {
    let cells = CellDecoder::new(None);
    let (body, stats) = sections(reply)?;
    let mut result = ResultSet {
        statistics: statistics(stats)?,
        ..ResultSet::default()
    };
    if let Some((header, rows)) = body {
        let column_names = decode::string_list(header)?;
        result.header = Header {
            column_types: vec![ColumnType::Scalar; column_names.len()],
            column_names,
        };
        for row in decode::array(rows)? {
            let row: Vec<GraphValue> = decode::array(row)?
                .into_iter()
                .map(|c| cells.verbose(c))
                .collect::<Result<_>>()?;
            result.rows.push(row);
        }
    }
    Ok(result)
}

fn compact_header(reply: Reply) -> Result<Header> {
    let mut header = Header::default();
    for column in decode::array(reply)? {
        let [kind, name]: [Reply; 2] = match column {
            Reply::Array(items) => items
                .try_into()
                .map_err(|items| ModuleError::decode("expected [type, name]", &Reply::Array(items)))?,
            other => return Err(ModuleError::decode("expected [type, name]", &other)),
        };
        header.column_types.push(ColumnType::from_ordinal(&kind)?);
        header.column_names.push(expect_string(&name, "column name")?);
    }
    Ok(header)
}

/// Split each `"Key: value"` line on its first `": "`.
pub fn statistics(reply: Reply) -> Result<Statistics> {
    let mut stats = Statistics::default();
    for line in decode::array(reply)? {
        let text = expect_string(&line, "statistic")?;
        let (key, value) = match text.split_once(": ") {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (text, String::new()),
        };
        stats.apply(&key, &value, &line)?;
        stats.raw.push((key, value));
    }
    Ok(stats)
}

/// One `GRAPH.SLOWLOG` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SlowLogEntry {
    /// Unix time, seconds.
    pub timestamp: i64,
    pub command: String,
    pub query: String,
    pub duration_ms: f64,
}

pub fn slow_log(reply: Reply) -> Result<Vec<SlowLogEntry>> {
    decode::array(reply)?
        .into_iter()
        .map(|entry| {
            let [timestamp, command, query, duration]: [Reply; 4] = match entry {
                Reply::Array(items) => items
                    .try_into()
                    .map_err(|items| ModuleError::decode("malformed slowlog entry", &Reply::Array(items)))?,
                other => return Err(ModuleError::decode("malformed slowlog entry", &other)),
            };
            Ok(SlowLogEntry {
                timestamp: decode::expect_i64(&timestamp, "timestamp")?,
                command: decode::string(command)?,
                query: decode::string(query)?,
                duration_ms: decode::expect_f64(&duration, "duration")?,
            })
        })
        .collect()
}

/// `GRAPH.CONFIG GET` answers `[name, value]` for one parameter and
/// `[[name, value]…]` for `*`.
pub fn config_pairs(reply: Reply) -> Result<Vec<(String, Reply)>> {
    let items = decode::array(reply)?;
    let single = items.len() == 2 && !matches!(items[0], Reply::Array(_));
    if single {
        let [name, value]: [Reply; 2] = items
            .try_into()
            .map_err(|items| ModuleError::decode("expected [name, value]", &Reply::Array(items)))?;
        return Ok(vec![(expect_string(&name, "config name")?, value)]);
    }
    items
        .into_iter()
        .map(|entry| {
            let [name, value]: [Reply; 2] = match entry {
                Reply::Array(items) => items
                    .try_into()
                    .map_err(|items| ModuleError::decode("expected [name, value]", &Reply::Array(items)))?,
                other => return Err(ModuleError::decode("expected [name, value]", &other)),
            };
            Ok((expect_string(&name, "config name")?, value))
        })
        .collect()
}

/// First column of every row as text (`CALL db.labels()` and friends).
pub(crate) fn first_column_strings(reply: Reply, compact: bool) -> Result<Vec<String>> {
    let fragment = reply.clone();
    let result = if compact {
        compact_result(reply, None)?
    } else {
        verbose_result(reply)?
    };
    result
        .rows
        .into_iter()
        .map(|row| match row.into_iter().next() {
            Some(GraphValue::String(s)) => Ok(s),
            other => Err(ModuleError::decode(
                format!("expected string column, got {other:?}"),
                &fragment,
            )),
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(kind: i64, name: &str) -> Reply {
        Reply::Array(vec![Reply::Integer(kind), Reply::bulk(name)])
    }

    fn cell(kind: i64, value: Reply) -> Reply {
        Reply::Array(vec![Reply::Integer(kind), value])
    }

    fn one_cell(header: Reply, value: Reply) -> Reply {
        Reply::Array(vec![
            Reply::Array(vec![header]),
            Reply::Array(vec![Reply::Array(vec![value])]),
            Reply::Array(vec![]),
        ])
    }

    #[test]
    fn parse_empty_result() {
        // CREATE without RETURN
        let reply = Reply::Array(vec![Reply::bulk_array([
            "Nodes created: 1",
            "Properties set: 2",
            "Query internal execution time: 0.5 milliseconds",
        ])]);

        let result = compact_result(reply, None).unwrap();
        assert!(result.header.column_names.is_empty());
        assert!(result.is_empty());
        assert_eq!(result.statistics.raw.len(), 3);
        assert_eq!(result.statistics.nodes_created, 1);
        assert_eq!(result.statistics.properties_set, 2);
        assert_eq!(result.statistics.execution_time_ms, 0.5);
        assert_eq!(result.statistics.get("Nodes created"), Some("1"));
    }

    #[test]
    fn parse_scalar_result() {
        // RETURN 1, 'hello'
        let reply = Reply::Array(vec![
            Reply::Array(vec![column(1, "1"), column(1, "hello")]),
            Reply::Array(vec![Reply::Array(vec![
                cell(3, Reply::Integer(1)),
                cell(2, Reply::bulk("hello")),
            ])]),
            Reply::Array(vec![]),
        ]);

        let result = compact_result(reply, None).unwrap();
        assert_eq!(result.header.column_names, vec!["1", "hello"]);
        assert_eq!(result.header.column_types, vec![ColumnType::Scalar, ColumnType::Scalar]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0][0], GraphValue::Integer(1));
        assert_eq!(result.rows[0][1], GraphValue::String("hello".to_string()));
        assert_eq!(result.column("hello"), Some(1));
    }

    #[test]
    fn parse_node_result() {
        let node = Reply::Array(vec![
            Reply::Integer(0),
            Reply::Array(vec![Reply::Integer(0)]),
            Reply::Array(vec![Reply::Array(vec![
                Reply::Integer(0),
                Reply::Integer(2),
                Reply::bulk("Alice"),
            ])]),
        ]);
        let result = compact_result(one_cell(column(2, "n"), cell(8, node)), None).unwrap();
        assert_eq!(result.header.column_types[0], ColumnType::Node);
        match &result.rows[0][0] {
            GraphValue::Node(n) => {
                assert_eq!(n.id, 0);
                assert_eq!(n.labels[0].index, 0);
                assert_eq!(n.labels[0].name, None);
                assert_eq!(n.properties.len(), 1);
                assert_eq!(n.properties[0].key, 0);
                assert_eq!(n.properties[0].value, GraphValue::String("Alice".to_string()));
            }
            other => panic!("expected Node, got {:?}", other),
        }
    }

    #[test]
    fn parse_edge_result() {
        let edge = Reply::Array(vec![
            Reply::Integer(0),
            Reply::Integer(0),
            Reply::Integer(0),
            Reply::Integer(1),
            Reply::Array(vec![Reply::Array(vec![
                Reply::Integer(0),
                Reply::Integer(3),
                Reply::Integer(100),
            ])]),
        ]);
        let schema = GraphSchema {
            relationship_types: vec!["KNOWS".into()],
            property_keys: vec!["since".into()],
            ..GraphSchema::default()
        };
        let result = compact_result(one_cell(column(3, "r"), cell(7, edge)), Some(&schema)).unwrap();
        match &result.rows[0][0] {
            GraphValue::Edge(e) => {
                assert_eq!(e.relation_name.as_deref(), Some("KNOWS"));
                assert_eq!(e.dst_node, 1);
                assert_eq!(e.property("since"), Some(&GraphValue::Integer(100)));
            }
            other => panic!("expected Edge, got {:?}", other),
        }
    }

    #[test]
    fn parse_boolean_and_double() {
        let result = compact_result(one_cell(column(1, "b"), cell(4, Reply::bulk("true"))), None).unwrap();
        assert_eq!(result.rows[0][0], GraphValue::Boolean(true));
        let result = compact_result(one_cell(column(1, "d"), cell(5, Reply::bulk("3.14"))), None).unwrap();
        assert_eq!(result.rows[0][0], GraphValue::Double(3.14));
    }

    #[test]
    fn wrong_arity_and_ordinals_fail() {
        let two = Reply::Array(vec![Reply::Array(vec![]), Reply::Array(vec![])]);
        assert!(compact_result(two, None).unwrap_err().is_decode());
        let bad_column = one_cell(column(9, "x"), cell(1, Reply::Null));
        assert!(compact_result(bad_column, None).unwrap_err().is_decode());
        let bad_scalar = one_cell(column(1, "x"), cell(99, Reply::Null));
        assert!(compact_result(bad_scalar, None).unwrap_err().is_decode());
    }

    #[test]
    fn parse_stats_key_values() {
        let stats = statistics(Reply::bulk_array([
            "Labels added: 1",
            "Nodes created: 5",
            "Relationships created: 3",
            "Properties set: 10",
            "Cached execution: 1",
            "Query internal execution time: 1.234 milliseconds",
            "Something new: 7",
        ]))
        .unwrap();
        assert_eq!(stats.labels_added, 1);
        assert_eq!(stats.nodes_created, 5);
        assert_eq!(stats.relationships_created, 3);
        assert!(stats.cached_execution);
        assert_eq!(stats.execution_time_ms, 1.234);
        assert_eq!(stats.get("Something new"), Some("7"));
        assert_eq!(stats.raw.len(), 7);
    }

    #[test]
    fn verbose_rows_are_plain() {
        let reply = Reply::Array(vec![
            Reply::bulk_array(["a.name", "a.age"]),
            Reply::Array(vec![Reply::Array(vec![Reply::bulk("Alice"), Reply::Integer(33)])]),
            Reply::bulk_array(["Cached execution: 0"]),
        ]);
        let result = verbose_result(reply).unwrap();
        assert_eq!(result.header.column_names, vec!["a.name", "a.age"]);
        assert_eq!(result.rows[0], vec![GraphValue::String("Alice".into()), GraphValue::Integer(33)]);
    }

    #[test]
    fn slowlog_and_config() {
        let log = Reply::Array(vec![Reply::bulk_array([
            "1700000000",
            "GRAPH.QUERY",
            "MATCH (n) RETURN n",
            "0.47",
        ])]);
        let entries = slow_log(log).unwrap();
        assert_eq!(entries[0].timestamp, 1_700_000_000);
        assert_eq!(entries[0].duration_ms, 0.47);

        let single = Reply::Array(vec![Reply::bulk("TIMEOUT"), Reply::Integer(0)]);
        assert_eq!(config_pairs(single).unwrap(), vec![("TIMEOUT".into(), Reply::Integer(0))]);
        let all = Reply::Array(vec![
            Reply::Array(vec![Reply::bulk("TIMEOUT"), Reply::Integer(0)]),
            Reply::Array(vec![Reply::bulk("CACHE_SIZE"), Reply::Integer(25)]),
        ]);
        assert_eq!(config_pairs(all).unwrap().len(), 2);
    }
}
