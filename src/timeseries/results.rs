//! Decoders for TS.* replies.

use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_f64, expect_i64, expect_string, expect_u64};
use crate::reply::Reply;
use crate::timeseries::keywords::{AggregationType, DuplicatePolicy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

/// One series of a multi-key query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub key: String,
    /// Empty unless WITHLABELS / SELECTED_LABELS was requested; selected
    /// labels the series lacks are `None`.
    pub labels: Vec<(String, Option<String>)>,
    pub samples: Vec<Sample>,
}

/// Compaction rule reported by `TS.INFO`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub dest_key: String,
    pub bucket: i64,
    pub aggregation: AggregationType,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesInfo {
    pub total_samples: u64,
    pub memory_usage: u64,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
    pub retention_time: i64,
    pub chunk_count: u64,
    pub chunk_size: u64,
    pub chunk_type: String,
    pub duplicate_policy: Option<DuplicatePolicy>,
    pub labels: Vec<(String, String)>,
    pub source_key: Option<String>,
    pub rules: Vec<Rule>,
}

fn sample_parts(items: Vec<Reply>) -> Result<Sample> {
    let [timestamp, value]: [Reply; 2] = items
        .try_into()
        .map_err(|items| ModuleError::decode("expected [timestamp, value]", &Reply::Array(items)))?;
    Ok(Sample {
        timestamp: expect_i64(&timestamp, "timestamp")?,
        value: expect_f64(&value, "value")?,
    })
}

/// `[timestamp, value]`
pub fn sample(reply: Reply) -> Result<Sample> {
    match reply {
        Reply::Array(items) => sample_parts(items),
        other => Err(ModuleError::decode("expected [timestamp, value]", &other)),
    }
}

/// `[timestamp, value]`, or `[]` for an empty series.
pub fn optional_sample(reply: Reply) -> Result<Option<Sample>> {
    match reply {
        Reply::Null => Ok(None),
        Reply::Array(items) if items.is_empty() => Ok(None),
        other => sample(other).map(Some),
    }
}

pub fn samples(reply: Reply) -> Result<Vec<Sample>> {
    decode::array(reply)?.into_iter().map(sample).collect()
}

/// `[[name, value]…]`, or a RESP3 map.
fn labels(reply: Reply) -> Result<Vec<(String, Option<String>)>> {
    match reply {
        Reply::Map(_) => decode::string_pairs(reply),
        other => decode::array(other)?
            .into_iter()
            .map(|pair| match pair {
                Reply::Array(items) => {
                    let [name, value]: [Reply; 2] = items
                        .try_into()
                        .map_err(|items| ModuleError::decode("expected [label, value]", &Reply::Array(items)))?;
                    Ok((expect_string(&name, "label")?, decode::optional_string(value)?))
                }
                other => Err(ModuleError::decode("expected [label, value]", &other)),
            })
            .collect(),
    }
}

/// Entries of TS.MRANGE / TS.MGET: `[key, labels, samples]` (RESP2) or a
/// RESP3 map from key to `[labels, …, samples]`.
fn series_list(reply: Reply, single_sample: bool) -> Result<Vec<TimeSeries>> {
    let entries: Vec<(Reply, Vec<Reply>)> = match reply {
        Reply::Map(entries) => entries
            .into_iter()
            .map(|(key, body)| Ok((key, decode::array(body)?)))
            .collect::<Result<_>>()?,
        other => decode::array(other)?
            .into_iter()
            .map(|entry| match entry {
                Reply::Array(mut items) if !items.is_empty() => {
                    let key = items.remove(0);
                    Ok((key, items))
                }
                other => Err(ModuleError::decode("expected [key, labels, samples]", &other)),
            })
            .collect::<Result<_>>()?,
    };
    entries
        .into_iter()
        .map(|(key, mut body)| {
            let key = expect_string(&key, "series key")?;
            if body.len() < 2 {
                return Err(ModuleError::decode(
                    format!("series {key} needs labels and samples"),
                    &Reply::Array(body),
                ));
            }
            let data = body.pop().unwrap_or(Reply::Null);
            let series_labels = labels(body.swap_remove(0))?;
            let series_samples = if single_sample {
                optional_sample(data)?.into_iter().collect()
            } else {
                samples(data)?
            };
            Ok(TimeSeries {
                key,
                labels: series_labels,
                samples: series_samples,
            })
        })
        .collect()
}

pub fn mrange(reply: Reply) -> Result<Vec<TimeSeries>> {
    series_list(reply, false)
}

pub fn mget(reply: Reply) -> Result<Vec<TimeSeries>> {
    series_list(reply, true)
}

fn rule(reply: Reply) -> Result<Rule> {
    let items = match reply {
        Reply::Array(items) if items.len() >= 3 => items,
        other => return Err(ModuleError::decode("expected [dest, bucket, aggregation]", &other)),
    };
    let kind = expect_string(&items[2], "aggregation")?;
    Ok(Rule {
        dest_key: expect_string(&items[0], "rule destination")?,
        bucket: expect_i64(&items[1], "bucket")?,
        aggregation: AggregationType::from_wire(&kind)
            .ok_or_else(|| ModuleError::decode(format!("unknown aggregation {kind}"), &items[2]))?,
    })
}

/// `TS.INFO` flat pairs; unknown fields are skipped.
pub fn info(reply: Reply) -> Result<TimeSeriesInfo> {
    let mut info = TimeSeriesInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "totalSamples" => info.total_samples = expect_u64(&value, &name)?,
            "memoryUsage" => info.memory_usage = expect_u64(&value, &name)?,
            "firstTimestamp" => info.first_timestamp = expect_i64(&value, &name)?,
            "lastTimestamp" => info.last_timestamp = expect_i64(&value, &name)?,
            "retentionTime" => info.retention_time = expect_i64(&value, &name)?,
            "chunkCount" => info.chunk_count = expect_u64(&value, &name)?,
            "chunkSize" => info.chunk_size = expect_u64(&value, &name)?,
            "chunkType" => info.chunk_type = expect_string(&value, &name)?,
            "duplicatePolicy" => {
                info.duplicate_policy = match decode::optional_string(value.clone())? {
                    None => None,
                    Some(policy) => Some(DuplicatePolicy::from_wire(&policy).ok_or_else(|| {
                        ModuleError::decode(format!("unknown duplicate policy {policy}"), &value)
                    })?),
                }
            }
            "labels" => {
                info.labels = labels(value)?
                    .into_iter()
                    .map(|(k, v)| (k, v.unwrap_or_default()))
                    .collect()
            }
            "sourceKey" => info.source_key = decode::optional_string(value)?,
            "rules" => info.rules = decode::array(value)?.into_iter().map(rule).collect::<Result<_>>()?,
            _ => {}
        }
    }
    Ok(info)
}
