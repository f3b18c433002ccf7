//! Option objects of FT.SEARCH, FT.AGGREGATE and the auxiliary FT.* commands.

use crate::args::{format_float, ArgList};
use crate::error::{ModuleError, Result};
use crate::search::keywords::{GeoUnit, ReduceFunction, SearchKeyword, SortOrder};

/// `FILTER field min max`
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFilter {
    pub field: String,
    pub min: f64,
    pub max: f64,
    pub exclusive_min: bool,
    pub exclusive_max: bool,
}

impl NumericFilter {
    pub fn new(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            field: field.into(),
            min,
            max,
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    pub fn exclusive_min(mut self) -> Self {
        self.exclusive_min = true;
        self
    }

    pub fn exclusive_max(mut self) -> Self {
        self.exclusive_max = true;
        self
    }

    fn bound(value: f64, exclusive: bool) -> String {
        if exclusive {
            format!("({}", format_float(value))
        } else {
            format_float(value)
        }
    }
}

/// `GEOFILTER field lon lat radius unit`
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFilter {
    pub field: String,
    pub lon: f64,
    pub lat: f64,
    pub radius: f64,
    pub unit: GeoUnit,
}

impl GeoFilter {
    pub fn new(field: impl Into<String>, lon: f64, lat: f64, radius: f64, unit: GeoUnit) -> Self {
        Self {
            field: field.into(),
            lon,
            lat,
            radius,
            unit,
        }
    }
}

/// `SUMMARIZE [FIELDS n f…] [FRAGS n] [LEN n] [SEPARATOR s]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summarize {
    pub fields: Vec<String>,
    pub frags: Option<i64>,
    pub len: Option<i64>,
    pub separator: Option<String>,
}

/// `HIGHLIGHT [FIELDS n f…] [TAGS open close]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    pub fields: Vec<String>,
    pub tags: Option<(String, String)>,
}

/// FT.SEARCH options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    no_content: bool,
    verbatim: bool,
    no_stopwords: bool,
    with_scores: bool,
    with_payloads: bool,
    with_sort_keys: bool,
    filters: Vec<NumericFilter>,
    geo_filters: Vec<GeoFilter>,
    in_keys: Vec<String>,
    in_fields: Vec<String>,
    return_fields: Vec<(String, Option<String>)>,
    summarize: Option<Summarize>,
    highlight: Option<Highlight>,
    slop: Option<i64>,
    timeout: Option<i64>,
    in_order: bool,
    language: Option<String>,
    expander: Option<String>,
    scorer: Option<String>,
    payload: Option<String>,
    sort_by: Option<(String, SortOrder)>,
    limit: Option<(i64, i64)>,
    params: Vec<(String, String)>,
    dialect: Option<u32>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return ids only.
    pub fn no_content(mut self) -> Self {
        self.no_content = true;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn no_stopwords(mut self) -> Self {
        self.no_stopwords = true;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    pub fn with_sort_keys(mut self) -> Self {
        self.with_sort_keys = true;
        self
    }

    pub fn filter(mut self, filter: NumericFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn geo_filter(mut self, filter: GeoFilter) -> Self {
        self.geo_filters.push(filter);
        self
    }

    pub fn in_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn in_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn return_field(mut self, field: impl Into<String>) -> Self {
        self.return_fields.push((field.into(), None));
        self
    }

    pub fn return_field_as(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.return_fields.push((field.into(), Some(alias.into())));
        self
    }

    pub fn summarize(mut self, summarize: Summarize) -> Self {
        self.summarize = Some(summarize);
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn slop(mut self, slop: i64) -> Self {
        self.slop = Some(slop);
        self
    }

    pub fn timeout(mut self, millis: i64) -> Self {
        self.timeout = Some(millis);
        self
    }

    pub fn in_order(mut self) -> Self {
        self.in_order = true;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn expander(mut self, expander: impl Into<String>) -> Self {
        self.expander = Some(expander.into());
        self
    }

    pub fn scorer(mut self, scorer: impl Into<String>) -> Self {
        self.scorer = Some(scorer.into());
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((field.into(), order));
        self
    }

    pub fn limit(mut self, offset: i64, num: i64) -> Self {
        self.limit = Some((offset, num));
        self
    }

    /// Query parameter referenced as `$name`; needs dialect 2 or later.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn dialect(mut self, dialect: u32) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub(crate) fn reply_shape(&self) -> SearchReplyShape {
        SearchReplyShape {
            with_content: !self.no_content,
            with_scores: self.with_scores,
            with_payloads: self.with_payloads,
            with_sort_keys: self.with_sort_keys,
        }
    }

    /// Arguments after the query; `default_dialect` applies when none is set.
    pub fn build(&self, default_dialect: Option<u32>) -> Result<ArgList> {
        let mut args = ArgList::new();
        args.flag(self.no_content, SearchKeyword::NoContent)
            .flag(self.verbatim, SearchKeyword::Verbatim)
            .flag(self.no_stopwords, SearchKeyword::NoStopwords)
            .flag(self.with_scores, SearchKeyword::WithScores)
            .flag(self.with_payloads, SearchKeyword::WithPayloads)
            .flag(self.with_sort_keys, SearchKeyword::WithSortKeys);
        for f in &self.filters {
            args.arg(SearchKeyword::Filter)
                .arg(&f.field)
                .arg(NumericFilter::bound(f.min, f.exclusive_min))
                .arg(NumericFilter::bound(f.max, f.exclusive_max));
        }
        for g in &self.geo_filters {
            args.arg(SearchKeyword::GeoFilter)
                .arg(&g.field)
                .arg(g.lon)
                .arg(g.lat)
                .arg(g.radius)
                .arg(g.unit);
        }
        if !self.in_keys.is_empty() {
            args.counted(SearchKeyword::InKeys, self.in_keys.iter());
        }
        if !self.in_fields.is_empty() {
            args.counted(SearchKeyword::InFields, self.in_fields.iter());
        }
        if !self.return_fields.is_empty() {
            // The count covers every emitted token, aliases included.
            let tokens: usize = self
                .return_fields
                .iter()
                .map(|(_, alias)| if alias.is_some() { 3 } else { 1 })
                .sum();
            args.arg(SearchKeyword::Return).arg(tokens);
            for (field, alias) in &self.return_fields {
                args.arg(field).opt(SearchKeyword::As, alias.as_ref());
            }
        }
        if let Some(s) = &self.summarize {
            args.arg(SearchKeyword::Summarize);
            if !s.fields.is_empty() {
                args.counted(SearchKeyword::Fields, s.fields.iter());
            }
            args.opt(SearchKeyword::Frags, s.frags)
                .opt(SearchKeyword::Len, s.len)
                .opt(SearchKeyword::Separator, s.separator.as_ref());
        }
        if let Some(h) = &self.highlight {
            args.arg(SearchKeyword::Highlight);
            if !h.fields.is_empty() {
                args.counted(SearchKeyword::Fields, h.fields.iter());
            }
            if let Some((open, close)) = &h.tags {
                args.arg(SearchKeyword::Tags).arg(open).arg(close);
            }
        }
        args.opt(SearchKeyword::Slop, self.slop)
            .opt(SearchKeyword::Timeout, self.timeout)
            .flag(self.in_order, SearchKeyword::InOrder)
            .opt(SearchKeyword::Language, self.language.as_ref())
            .opt(SearchKeyword::Expander, self.expander.as_ref())
            .opt(SearchKeyword::Scorer, self.scorer.as_ref())
            .opt(SearchKeyword::Payload, self.payload.as_ref());
        if let Some((field, order)) = &self.sort_by {
            args.arg(SearchKeyword::SortBy).arg(field).arg(*order);
        }
        if let Some((offset, num)) = self.limit {
            if offset < 0 || num < 0 {
                return Err(ModuleError::invalid(format!(
                    "LIMIT must be non-negative, got {offset} {num}"
                )));
            }
            args.arg(SearchKeyword::Limit).arg(offset).arg(num);
        }
        append_params(&mut args, &self.params);
        args.opt(SearchKeyword::Dialect, self.dialect.or(default_dialect));
        Ok(args)
    }
}

fn append_params(args: &mut ArgList, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    args.arg(SearchKeyword::Params).arg(params.len() * 2);
    for (name, value) in params {
        args.arg(name).arg(value);
    }
}

/// Which optional slots each FT.SEARCH result row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReplyShape {
    pub with_content: bool,
    pub with_scores: bool,
    pub with_payloads: bool,
    pub with_sort_keys: bool,
}

impl Default for SearchReplyShape {
    fn default() -> Self {
        Self {
            with_content: true,
            with_scores: false,
            with_payloads: false,
            with_sort_keys: false,
        }
    }
}

impl SearchReplyShape {
    /// Reply elements per document.
    pub fn stride(&self) -> usize {
        1 + usize::from(self.with_scores)
            + usize::from(self.with_payloads)
            + usize::from(self.with_sort_keys)
            + usize::from(self.with_content)
    }
}

// ── FT.AGGREGATE ───────────────────────────────────────────────────

/// `REDUCE fn nargs arg… [AS name]`
#[derive(Debug, Clone, PartialEq)]
pub struct Reducer {
    function: ReduceFunction,
    args: Vec<String>,
    alias: Option<String>,
}

impl Reducer {
    fn new(function: ReduceFunction, args: Vec<String>) -> Self {
        Self {
            function,
            args,
            alias: None,
        }
    }

    pub fn count() -> Self {
        Self::new(ReduceFunction::Count, Vec::new())
    }

    pub fn count_distinct(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::CountDistinct, vec![property.into()])
    }

    pub fn count_distinctish(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::CountDistinctish, vec![property.into()])
    }

    pub fn sum(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::Sum, vec![property.into()])
    }

    pub fn min(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::Min, vec![property.into()])
    }

    pub fn max(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::Max, vec![property.into()])
    }

    pub fn avg(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::Avg, vec![property.into()])
    }

    pub fn stddev(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::StdDev, vec![property.into()])
    }

    pub fn quantile(property: impl Into<String>, quantile: f64) -> Self {
        Self::new(
            ReduceFunction::Quantile,
            vec![property.into(), format_float(quantile)],
        )
    }

    pub fn to_list(property: impl Into<String>) -> Self {
        Self::new(ReduceFunction::ToList, vec![property.into()])
    }

    /// `FIRST_VALUE prop [BY by [ASC|DESC]]`
    pub fn first_value(property: impl Into<String>, by: Option<(String, Option<SortOrder>)>) -> Self {
        let mut args = vec![property.into()];
        if let Some((by, order)) = by {
            args.push(SearchKeyword::By.to_string());
            args.push(by);
            if let Some(order) = order {
                args.push(order.to_string());
            }
        }
        Self::new(ReduceFunction::FirstValue, args)
    }

    pub fn random_sample(property: impl Into<String>, size: i64) -> Self {
        Self::new(
            ReduceFunction::RandomSample,
            vec![property.into(), size.to_string()],
        )
    }

    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    fn append_to(&self, args: &mut ArgList) {
        args.arg(SearchKeyword::Reduce)
            .arg(self.function)
            .arg(self.args.len())
            .args(self.args.iter())
            .opt(SearchKeyword::As, self.alias.as_ref());
    }
}

/// One pipeline step; steps run in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateStep {
    GroupBy {
        properties: Vec<String>,
        reducers: Vec<Reducer>,
    },
    SortBy {
        fields: Vec<(String, SortOrder)>,
        max: Option<i64>,
    },
    Apply {
        expression: String,
        alias: String,
    },
    Limit {
        offset: i64,
        num: i64,
    },
    Filter(String),
}

impl AggregateStep {
    fn append_to(&self, args: &mut ArgList) -> Result<()> {
        match self {
            Self::GroupBy {
                properties,
                reducers,
            } => {
                args.counted(SearchKeyword::GroupBy, properties.iter());
                for reducer in reducers {
                    reducer.append_to(args);
                }
            }
            Self::SortBy { fields, max } => {
                if fields.is_empty() {
                    return Err(ModuleError::invalid("SORTBY needs at least one field"));
                }
                args.arg(SearchKeyword::SortBy).arg(fields.len() * 2);
                for (field, order) in fields {
                    args.arg(field).arg(*order);
                }
                args.opt(SearchKeyword::Max, *max);
            }
            Self::Apply { expression, alias } => {
                args.arg(SearchKeyword::Apply)
                    .arg(expression)
                    .arg(SearchKeyword::As)
                    .arg(alias);
            }
            Self::Limit { offset, num } => {
                args.arg(SearchKeyword::Limit).arg(*offset).arg(*num);
            }
            Self::Filter(expression) => {
                args.arg(SearchKeyword::Filter).arg(expression);
            }
        }
        Ok(())
    }
}

/// FT.AGGREGATE options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOptions {
    verbatim: bool,
    load: Option<Vec<String>>,
    load_all: bool,
    timeout: Option<i64>,
    steps: Vec<AggregateStep>,
    cursor: Option<(Option<i64>, Option<i64>)>,
    params: Vec<(String, String)>,
    dialect: Option<u32>,
}

impl AggregateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn load<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.load
            .get_or_insert_with(Vec::new)
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// `LOAD *`
    pub fn load_all(mut self) -> Self {
        self.load_all = true;
        self
    }

    pub fn timeout(mut self, millis: i64) -> Self {
        self.timeout = Some(millis);
        self
    }

    pub fn group_by<I, S>(mut self, properties: I, reducers: Vec<Reducer>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(AggregateStep::GroupBy {
            properties: properties.into_iter().map(Into::into).collect(),
            reducers,
        });
        self
    }

    pub fn sort_by(mut self, fields: Vec<(String, SortOrder)>, max: Option<i64>) -> Self {
        self.steps.push(AggregateStep::SortBy { fields, max });
        self
    }

    pub fn apply(mut self, expression: impl Into<String>, alias: impl Into<String>) -> Self {
        self.steps.push(AggregateStep::Apply {
            expression: expression.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn limit(mut self, offset: i64, num: i64) -> Self {
        self.steps.push(AggregateStep::Limit { offset, num });
        self
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.steps.push(AggregateStep::Filter(expression.into()));
        self
    }

    /// Read results through a cursor (`WITHCURSOR [COUNT c] [MAXIDLE ms]`).
    pub fn with_cursor(mut self, count: Option<i64>, max_idle_ms: Option<i64>) -> Self {
        self.cursor = Some((count, max_idle_ms));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn dialect(mut self, dialect: u32) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn steps(&self) -> &[AggregateStep] {
        &self.steps
    }

    pub(crate) fn uses_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn build(&self, default_dialect: Option<u32>) -> Result<ArgList> {
        let mut args = ArgList::new();
        args.flag(self.verbatim, SearchKeyword::Verbatim);
        if self.load_all {
            args.arg(SearchKeyword::Load).arg(SearchKeyword::Star);
        } else if let Some(fields) = &self.load {
            args.counted(SearchKeyword::Load, fields.iter());
        }
        args.opt(SearchKeyword::Timeout, self.timeout);
        for step in &self.steps {
            step.append_to(&mut args)?;
        }
        if let Some((count, max_idle)) = self.cursor {
            args.arg(SearchKeyword::WithCursor)
                .opt(SearchKeyword::Count, count)
                .opt(SearchKeyword::MaxIdle, max_idle);
        }
        append_params(&mut args, &self.params);
        args.opt(SearchKeyword::Dialect, self.dialect.or(default_dialect));
        Ok(args)
    }
}

// ── Suggestions, spellcheck ────────────────────────────────────────

/// `FT.SUGADD` tail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SugAddOptions {
    incr: bool,
    payload: Option<String>,
}

impl SugAddOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the score to an existing entry instead of replacing it.
    pub fn incr(mut self) -> Self {
        self.incr = true;
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.flag(self.incr, SearchKeyword::Incr)
            .opt(SearchKeyword::Payload, self.payload.as_ref());
        args
    }
}

/// `FT.SUGGET` tail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SugGetOptions {
    fuzzy: bool,
    with_scores: bool,
    with_payloads: bool,
    max: i64,
}

impl SugGetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    /// Maximum number of suggestions; sent when > 0.
    pub fn max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    pub(crate) fn flags(&self) -> (bool, bool) {
        (self.with_scores, self.with_payloads)
    }

    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.flag(self.fuzzy, SearchKeyword::Fuzzy)
            .flag(self.with_scores, SearchKeyword::WithScores)
            .flag(self.with_payloads, SearchKeyword::WithPayloads)
            .positive(SearchKeyword::Max, self.max);
        args
    }
}

/// `FT.SPELLCHECK` tail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellCheckOptions {
    distance: Option<u32>,
    terms: Vec<(bool, String)>,
    dialect: Option<u32>,
}

impl SpellCheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levenshtein distance, 1 to 4.
    pub fn distance(mut self, distance: u32) -> Self {
        self.distance = Some(distance);
        self
    }

    /// `TERMS INCLUDE dict`
    pub fn include(mut self, dict: impl Into<String>) -> Self {
        self.terms.push((true, dict.into()));
        self
    }

    /// `TERMS EXCLUDE dict`
    pub fn exclude(mut self, dict: impl Into<String>) -> Self {
        self.terms.push((false, dict.into()));
        self
    }

    pub fn dialect(mut self, dialect: u32) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn build(&self) -> Result<ArgList> {
        let mut args = ArgList::new();
        if let Some(distance) = self.distance {
            if !(1..=4).contains(&distance) {
                return Err(ModuleError::invalid(format!(
                    "spellcheck distance must be 1..=4, got {distance}"
                )));
            }
            args.arg(SearchKeyword::Distance).arg(distance);
        }
        for (include, dict) in &self.terms {
            let mode = if *include {
                SearchKeyword::Include
            } else {
                SearchKeyword::Exclude
            };
            args.arg(SearchKeyword::Terms).arg(mode).arg(dict);
        }
        args.opt(SearchKeyword::Dialect, self.dialect);
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_count_includes_aliases() {
        let opts = SearchOptions::new()
            .return_field("title")
            .return_field_as("$.price", "price");
        assert_eq!(
            opts.build(None).unwrap().to_strings(),
            vec!["RETURN", "4", "title", "$.price", "AS", "price"]
        );
    }

    #[test]
    fn search_options_order() {
        let opts = SearchOptions::new()
            .dialect(2)
            .limit(0, 10)
            .sort_by("price", SortOrder::Desc)
            .filter(NumericFilter::new("price", 10.0, f64::INFINITY).exclusive_min())
            .with_scores()
            .no_content();
        assert_eq!(
            opts.build(None).unwrap().to_strings(),
            vec![
                "NOCONTENT", "WITHSCORES", "FILTER", "price", "(10", "+inf", "SORTBY", "price",
                "DESC", "LIMIT", "0", "10", "DIALECT", "2"
            ]
        );
    }

    #[test]
    fn default_dialect_only_when_unset() {
        let args = SearchOptions::new().build(Some(3)).unwrap();
        assert_eq!(args.to_strings(), vec!["DIALECT", "3"]);
        let args = SearchOptions::new().dialect(1).build(Some(3)).unwrap();
        assert_eq!(args.to_strings(), vec!["DIALECT", "1"]);
        assert!(SearchOptions::new().build(None).unwrap().is_empty());
    }

    #[test]
    fn params_are_counted_twice() {
        let opts = SearchOptions::new().param("lo", "1").param("hi", "5");
        assert_eq!(
            opts.build(None).unwrap().to_strings(),
            vec!["PARAMS", "4", "lo", "1", "hi", "5"]
        );
    }

    #[test]
    fn stride_by_flags() {
        assert_eq!(SearchOptions::new().reply_shape().stride(), 2);
        assert_eq!(SearchOptions::new().with_scores().reply_shape().stride(), 3);
        assert_eq!(SearchOptions::new().no_content().reply_shape().stride(), 1);
        let all = SearchOptions::new().with_scores().with_payloads().with_sort_keys();
        assert_eq!(all.reply_shape().stride(), 5);
    }

    #[test]
    fn aggregate_steps_keep_order() {
        let opts = AggregateOptions::new()
            .load(["@title"])
            .group_by(
                ["@brand"],
                vec![Reducer::count().alias("n"), Reducer::quantile("@price", 0.5)],
            )
            .sort_by(vec![("@n".to_string(), SortOrder::Desc)], Some(10))
            .apply("@n * 2", "double")
            .limit(0, 5)
            .filter("@n > 1")
            .with_cursor(Some(100), None);
        assert_eq!(
            opts.build(None).unwrap().to_strings(),
            vec![
                "LOAD", "1", "@title", "GROUPBY", "1", "@brand", "REDUCE", "COUNT", "0", "AS",
                "n", "REDUCE", "QUANTILE", "2", "@price", "0.5", "SORTBY", "2", "@n", "DESC",
                "MAX", "10", "APPLY", "@n * 2", "AS", "double", "LIMIT", "0", "5", "FILTER",
                "@n > 1", "WITHCURSOR", "COUNT", "100"
            ]
        );
        assert!(opts.uses_cursor());
    }

    #[test]
    fn first_value_by() {
        let reducer = Reducer::first_value("@title", Some(("@price".into(), Some(SortOrder::Asc))));
        let mut args = ArgList::new();
        reducer.append_to(&mut args);
        assert_eq!(
            args.to_strings(),
            vec!["REDUCE", "FIRST_VALUE", "4", "@title", "BY", "@price", "ASC"]
        );
    }

    #[test]
    fn load_all_wins() {
        let opts = AggregateOptions::new().load(["@a"]).load_all();
        assert_eq!(opts.build(None).unwrap().to_strings(), vec!["LOAD", "*"]);
    }

    #[test]
    fn spellcheck_distance_bounds() {
        assert!(SpellCheckOptions::new().distance(5).build().unwrap_err().is_invalid_argument());
        let args = SpellCheckOptions::new().distance(2).include("dict").build().unwrap();
        assert_eq!(
            args.to_strings(),
            vec!["DISTANCE", "2", "TERMS", "INCLUDE", "dict"]
        );
    }

    #[test]
    fn sugget_flags() {
        let args = SugGetOptions::new().fuzzy().with_scores().max(5).build();
        assert_eq!(args.to_strings(), vec!["FUZZY", "WITHSCORES", "MAX", "5"]);
    }
}
