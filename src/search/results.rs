//! Reply types and decoders of the FT.* commands.

use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_f64, expect_string, expect_u64};
use crate::reply::Reply;
use crate::search::options::SearchReplyShape;

/// One FT.SEARCH hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub id: String,
    pub score: Option<f64>,
    pub payload: Option<String>,
    pub sort_key: Option<String>,
    /// Field/value pairs in reply order; empty with NOCONTENT or when the
    /// document expired between match and load.
    pub fields: Vec<(String, Option<String>)>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Total matches, which may exceed `documents.len()` under LIMIT.
    pub total: u64,
    pub documents: Vec<Document>,
}

/// `[total, id, (score), (payload), (sortkey), (fields)…]`
pub fn search_result(reply: Reply, shape: SearchReplyShape) -> Result<SearchResult> {
    let items = match reply {
        Reply::Array(items) if !items.is_empty() => items,
        other => return Err(ModuleError::decode("expected [total, …] search reply", &other)),
    };
    let stride = shape.stride();
    if (items.len() - 1) % stride != 0 {
        return Err(ModuleError::decode(
            format!(
                "search reply of {} elements does not split into rows of {stride}",
                items.len()
            ),
            &Reply::Array(items),
        ));
    }

    let mut iter = items.into_iter();
    let total = match iter.next() {
        Some(first) => expect_u64(&first, "total")?,
        None => 0,
    };
    let mut documents = Vec::with_capacity(iter.len() / stride);
    while let Some(id) = iter.next() {
        let mut doc = Document {
            id: decode::string(id)?,
            ..Document::default()
        };
        if shape.with_scores {
            doc.score = iter.next().map(decode::double).transpose()?;
        }
        if shape.with_payloads {
            doc.payload = iter.next().map(decode::optional_string).transpose()?.flatten();
        }
        if shape.with_sort_keys {
            doc.sort_key = iter.next().map(decode::optional_string).transpose()?.flatten();
        }
        if shape.with_content {
            if let Some(fields) = iter.next() {
                doc.fields = decode::string_pairs(fields)?;
            }
        }
        documents.push(doc);
    }
    Ok(SearchResult { total, documents })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub total: u64,
    pub rows: Vec<Vec<(String, Option<String>)>>,
    /// Present while a cursor has more rows to read.
    pub cursor_id: Option<i64>,
}

/// `[total, row…]`
pub fn aggregate_result(reply: Reply) -> Result<AggregateResult> {
    let mut items = match reply {
        Reply::Array(items) if !items.is_empty() => items.into_iter(),
        other => return Err(ModuleError::decode("expected [total, row…] aggregate reply", &other)),
    };
    let total = match items.next() {
        Some(first) => expect_u64(&first, "total")?,
        None => 0,
    };
    let rows = items.map(decode::string_pairs).collect::<Result<_>>()?;
    Ok(AggregateResult {
        total,
        rows,
        cursor_id: None,
    })
}

/// `[[total, row…], cursor_id]`; cursor `0` means exhausted.
pub fn aggregate_cursor_result(reply: Reply) -> Result<AggregateResult> {
    let [rows, cursor]: [Reply; 2] = match reply {
        Reply::Array(items) => items.try_into().map_err(|items| {
            ModuleError::decode("expected [rows, cursor] reply", &Reply::Array(items))
        })?,
        other => return Err(ModuleError::decode("expected [rows, cursor] reply", &other)),
    };
    let mut result = aggregate_result(rows)?;
    let cursor = decode::integer(cursor)?;
    result.cursor_id = (cursor != 0).then_some(cursor);
    Ok(result)
}

/// One schema attribute as reported by FT.INFO.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldInfo {
    pub identifier: String,
    pub attribute: String,
    pub field_type: String,
    /// Remaining tokens (`SORTABLE`, `WEIGHT`, `1`, …) in reply order.
    pub flags: Vec<String>,
}

fn field_info(reply: Reply, legacy: bool) -> Result<FieldInfo> {
    let mut tokens = decode::array(reply)?.into_iter();
    let mut info = FieldInfo::default();
    if legacy {
        // Pre-2.0 servers: `[name, type, TEXT, …]`.
        if let Some(name) = tokens.next() {
            info.identifier = decode::string(name)?;
            info.attribute = info.identifier.clone();
        }
    }
    while let Some(token) = tokens.next() {
        let token = decode::string(token)?;
        match token.as_str() {
            "identifier" | "attribute" | "type" => {
                let value = tokens
                    .next()
                    .map(decode::string)
                    .transpose()?
                    .unwrap_or_default();
                match token.as_str() {
                    "identifier" => info.identifier = value,
                    "attribute" => info.attribute = value,
                    _ => info.field_type = value,
                }
            }
            _ => info.flags.push(token),
        }
    }
    Ok(info)
}

/// FT.INFO
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexInfo {
    pub index_name: String,
    pub index_options: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub num_docs: u64,
    pub max_doc_id: u64,
    pub num_terms: u64,
    pub num_records: u64,
    pub inverted_sz_mb: f64,
    pub indexing: bool,
    pub percent_indexed: f64,
    pub hash_indexing_failures: u64,
}

pub fn index_info(reply: Reply) -> Result<IndexInfo> {
    let mut info = IndexInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "index_name" => info.index_name = expect_string(&value, "index_name")?,
            "index_options" => info.index_options = decode::string_list(value)?,
            "attributes" => {
                info.fields = decode::array(value)?
                    .into_iter()
                    .map(|f| field_info(f, false))
                    .collect::<Result<_>>()?
            }
            "fields" => {
                info.fields = decode::array(value)?
                    .into_iter()
                    .map(|f| field_info(f, true))
                    .collect::<Result<_>>()?
            }
            "num_docs" => info.num_docs = expect_u64(&value, "num_docs")?,
            "max_doc_id" => info.max_doc_id = expect_u64(&value, "max_doc_id")?,
            "num_terms" => info.num_terms = expect_u64(&value, "num_terms")?,
            "num_records" => info.num_records = expect_u64(&value, "num_records")?,
            "inverted_sz_mb" => info.inverted_sz_mb = expect_f64(&value, "inverted_sz_mb")?,
            "indexing" => info.indexing = decode::expect_i64(&value, "indexing")? != 0,
            "percent_indexed" => info.percent_indexed = expect_f64(&value, "percent_indexed")?,
            "hash_indexing_failures" => {
                info.hash_indexing_failures = expect_u64(&value, "hash_indexing_failures")?
            }
            _ => {}
        }
    }
    Ok(info)
}

/// FT.SUGGET entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestion {
    pub string: String,
    pub score: Option<f64>,
    pub payload: Option<String>,
}

/// Flat list with stride `1 + scores + payloads`.
pub fn suggestions(reply: Reply, with_scores: bool, with_payloads: bool) -> Result<Vec<Suggestion>> {
    let items = decode::array(reply)?;
    let stride = 1 + usize::from(with_scores) + usize::from(with_payloads);
    if items.len() % stride != 0 {
        return Err(ModuleError::decode(
            format!("suggestion reply does not split into rows of {stride}"),
            &Reply::Array(items),
        ));
    }
    let mut out = Vec::with_capacity(items.len() / stride);
    let mut iter = items.into_iter();
    while let Some(string) = iter.next() {
        let mut suggestion = Suggestion {
            string: decode::string(string)?,
            ..Suggestion::default()
        };
        if with_scores {
            suggestion.score = iter.next().map(decode::double).transpose()?;
        }
        if with_payloads {
            suggestion.payload = iter.next().map(decode::optional_string).transpose()?.flatten();
        }
        out.push(suggestion);
    }
    Ok(out)
}

/// FT.SPELLCHECK entry for one misspelled term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellCheckResult {
    pub term: String,
    /// `(score, suggestion)`, best first as sent by the server.
    pub suggestions: Vec<(f64, String)>,
}

/// `[["TERM", term, [[score, suggestion]…]]…]`
pub fn spell_check(reply: Reply) -> Result<Vec<SpellCheckResult>> {
    decode::array(reply)?
        .into_iter()
        .map(|entry| {
            let parts = decode::array(entry)?;
            let [_, term, found]: [Reply; 3] = parts.try_into().map_err(|parts| {
                ModuleError::decode("expected [TERM, term, suggestions]", &Reply::Array(parts))
            })?;
            let suggestions = decode::array(found)?
                .into_iter()
                .map(|pair| {
                    let [score, suggestion]: [Reply; 2] =
                        decode::array(pair)?.try_into().map_err(|pair| {
                            ModuleError::decode("expected [score, suggestion]", &Reply::Array(pair))
                        })?;
                    Ok((decode::double(score)?, decode::string(suggestion)?))
                })
                .collect::<Result<_>>()?;
            Ok(SpellCheckResult {
                term: decode::string(term)?,
                suggestions,
            })
        })
        .collect()
}

/// FT.SYNDUMP: `[term, [group…], …]`
pub fn synonym_dump(reply: Reply) -> Result<Vec<(String, Vec<String>)>> {
    decode::flat_pairs(reply)?
        .into_iter()
        .map(|(term, groups)| Ok((term, decode::string_list(groups)?)))
        .collect()
}

/// FT.CONFIG GET: `[[name, value]…]`
pub fn config_pairs(reply: Reply) -> Result<Vec<(String, Option<String>)>> {
    decode::array(reply)?
        .into_iter()
        .map(|entry| {
            let [name, value]: [Reply; 2] = decode::array(entry)?.try_into().map_err(|entry| {
                ModuleError::decode("expected [name, value]", &Reply::Array(entry))
            })?;
            Ok((decode::string(name)?, decode::optional_string(value)?))
        })
        .collect()
}
