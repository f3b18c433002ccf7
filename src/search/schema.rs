//! Index definition: `FT.CREATE` options and schema fields.

use crate::args::{format_float, ArgList};
use crate::search::keywords::{DistanceMetric, FieldType, IndexOn, SearchKeyword, VectorAlgorithm};

/// Type-specific part of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        no_stem: bool,
        weight: f64,
        phonetic: Option<String>,
    },
    Tag {
        separator: Option<String>,
        case_sensitive: bool,
    },
    Numeric,
    Geo,
    Vector {
        algorithm: VectorAlgorithm,
        /// `TYPE` attribute, e.g. `FLOAT32`.
        element_type: String,
        dim: u32,
        metric: DistanceMetric,
        /// Further algorithm attributes (`INITIAL_CAP`, `M`, …), in order.
        extra: Vec<(String, String)>,
    },
}

/// One `SCHEMA` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    kind: FieldKind,
    sortable: bool,
    no_index: bool,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind,
            sortable: false,
            no_index: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Text {
                no_stem: false,
                weight: 1.0,
                phonetic: None,
            },
        )
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Tag {
                separator: None,
                case_sensitive: false,
            },
        )
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Numeric)
    }

    pub fn geo(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Geo)
    }

    pub fn vector(
        name: impl Into<String>,
        algorithm: VectorAlgorithm,
        element_type: impl Into<String>,
        dim: u32,
        metric: DistanceMetric,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Vector {
                algorithm,
                element_type: element_type.into(),
                dim,
                metric,
                extra: Vec::new(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Tag { .. } => FieldType::Tag,
            FieldKind::Numeric => FieldType::Numeric,
            FieldKind::Geo => FieldType::Geo,
            FieldKind::Vector { .. } => FieldType::Vector,
        }
    }

    /// `AS alias`; required for JSON paths.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    /// TEXT only.
    pub fn no_stem(mut self) -> Self {
        if let FieldKind::Text { no_stem, .. } = &mut self.kind {
            *no_stem = true;
        }
        self
    }

    /// TEXT only; `1.0` is the server default and is not sent.
    pub fn weight(mut self, value: f64) -> Self {
        if let FieldKind::Text { weight, .. } = &mut self.kind {
            *weight = value;
        }
        self
    }

    /// TEXT only, e.g. `dm:en`.
    pub fn phonetic(mut self, matcher: impl Into<String>) -> Self {
        if let FieldKind::Text { phonetic, .. } = &mut self.kind {
            *phonetic = Some(matcher.into());
        }
        self
    }

    /// TAG only.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        if let FieldKind::Tag { separator, .. } = &mut self.kind {
            *separator = Some(sep.into());
        }
        self
    }

    /// TAG only.
    pub fn case_sensitive(mut self) -> Self {
        if let FieldKind::Tag { case_sensitive, .. } = &mut self.kind {
            *case_sensitive = true;
        }
        self
    }

    /// VECTOR only: an extra algorithm attribute.
    pub fn vector_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let FieldKind::Vector { extra, .. } = &mut self.kind {
            extra.push((name.into(), value.into()));
        }
        self
    }

    /// `name [AS alias] TYPE … [SORTABLE] [NOINDEX]`
    pub fn append_to(&self, args: &mut ArgList) {
        args.arg(&self.name)
            .opt(SearchKeyword::As, self.alias.as_ref())
            .arg(self.field_type());
        match &self.kind {
            FieldKind::Text {
                no_stem,
                weight,
                phonetic,
            } => {
                args.flag(*no_stem, SearchKeyword::NoStem);
                if *weight != 1.0 {
                    args.arg(SearchKeyword::Weight).arg(format_float(*weight));
                }
                args.opt(SearchKeyword::Phonetic, phonetic.as_ref());
            }
            FieldKind::Tag {
                separator,
                case_sensitive,
            } => {
                args.opt(SearchKeyword::Separator, separator.as_ref())
                    .flag(*case_sensitive, SearchKeyword::CaseSensitive);
            }
            FieldKind::Numeric | FieldKind::Geo => {}
            FieldKind::Vector {
                algorithm,
                element_type,
                dim,
                metric,
                extra,
            } => {
                args.arg(*algorithm)
                    .arg(2 * (3 + extra.len()))
                    .arg(SearchKeyword::Type)
                    .arg(element_type)
                    .arg(SearchKeyword::Dim)
                    .arg(*dim)
                    .arg(SearchKeyword::DistanceMetric)
                    .arg(*metric);
                for (name, value) in extra {
                    args.arg(name).arg(value);
                }
                return;
            }
        }
        args.flag(self.sortable, SearchKeyword::Sortable)
            .flag(self.no_index, SearchKeyword::NoIndex);
    }
}

/// Everything `FT.CREATE` accepts before `SCHEMA`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexOptions {
    on: Option<IndexOn>,
    prefixes: Vec<String>,
    filter: Option<String>,
    language: Option<String>,
    language_field: Option<String>,
    score: Option<f64>,
    score_field: Option<String>,
    max_text_fields: bool,
    temporary: i64,
    no_offsets: bool,
    no_hl: bool,
    no_fields: bool,
    no_freqs: bool,
    stopwords: Option<Vec<String>>,
    skip_initial_scan: bool,
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, on: IndexOn) -> Self {
        self.on = Some(on);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn language_field(mut self, field: impl Into<String>) -> Self {
        self.language_field = Some(field.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn score_field(mut self, field: impl Into<String>) -> Self {
        self.score_field = Some(field.into());
        self
    }

    pub fn max_text_fields(mut self, on: bool) -> Self {
        self.max_text_fields = on;
        self
    }

    /// Expire the index after `seconds` of inactivity; sent when > 0.
    pub fn temporary(mut self, seconds: i64) -> Self {
        self.temporary = seconds;
        self
    }

    pub fn no_offsets(mut self, on: bool) -> Self {
        self.no_offsets = on;
        self
    }

    pub fn no_hl(mut self, on: bool) -> Self {
        self.no_hl = on;
        self
    }

    pub fn no_fields(mut self, on: bool) -> Self {
        self.no_fields = on;
        self
    }

    pub fn no_freqs(mut self, on: bool) -> Self {
        self.no_freqs = on;
        self
    }

    /// Custom stopword list; an empty list disables stopwords (`STOPWORDS 0`).
    pub fn stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_initial_scan(mut self, on: bool) -> Self {
        self.skip_initial_scan = on;
        self
    }

    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.opt(SearchKeyword::On, self.on);
        if !self.prefixes.is_empty() {
            args.counted(SearchKeyword::Prefix, self.prefixes.iter());
        }
        args.opt(SearchKeyword::Filter, self.filter.as_ref())
            .opt(SearchKeyword::Language, self.language.as_ref())
            .opt(SearchKeyword::LanguageField, self.language_field.as_ref())
            .opt(SearchKeyword::Score, self.score)
            .opt(SearchKeyword::ScoreField, self.score_field.as_ref())
            .flag(self.max_text_fields, SearchKeyword::MaxTextFields)
            .positive(SearchKeyword::Temporary, self.temporary)
            .flag(self.no_offsets, SearchKeyword::NoOffsets)
            .flag(self.no_hl, SearchKeyword::NoHl)
            .flag(self.no_fields, SearchKeyword::NoFields)
            .flag(self.no_freqs, SearchKeyword::NoFreqs);
        if let Some(words) = &self.stopwords {
            args.counted(SearchKeyword::Stopwords, words.iter());
        }
        args.flag(self.skip_initial_scan, SearchKeyword::SkipInitialScan);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field_args(field: &Field) -> Vec<String> {
        let mut args = ArgList::new();
        field.append_to(&mut args);
        args.to_strings()
    }

    #[test]
    fn text_field_attributes() {
        let field = Field::text("title").weight(5.0).no_stem().sortable();
        assert_eq!(
            field_args(&field),
            vec!["title", "TEXT", "NOSTEM", "WEIGHT", "5", "SORTABLE"]
        );
        assert_eq!(field_args(&Field::text("body").weight(1.0)), vec!["body", "TEXT"]);
    }

    #[test]
    fn tag_field_with_alias() {
        let field = Field::tag("$.tags").alias("tags").separator(";").case_sensitive();
        assert_eq!(
            field_args(&field),
            vec!["$.tags", "AS", "tags", "TAG", "SEPARATOR", ";", "CASESENSITIVE"]
        );
    }

    #[test]
    fn vector_field_counts_attributes() {
        let field = Field::vector("v", VectorAlgorithm::Hnsw, "FLOAT32", 4, DistanceMetric::Cosine)
            .vector_attribute("M", "16");
        assert_eq!(
            field_args(&field),
            vec![
                "v", "VECTOR", "HNSW", "8", "TYPE", "FLOAT32", "DIM", "4",
                "DISTANCE_METRIC", "COSINE", "M", "16"
            ]
        );
    }

    #[test]
    fn index_options_order() {
        let opts = IndexOptions::new()
            .stopwords(["a", "the"])
            .no_freqs(true)
            .no_offsets(true)
            .temporary(60)
            .max_text_fields(true)
            .prefix("doc:")
            .on(IndexOn::Hash);
        assert_eq!(
            opts.build().to_strings(),
            vec![
                "ON", "HASH", "PREFIX", "1", "doc:", "MAXTEXTFIELDS", "TEMPORARY", "60",
                "NOOFFSETS", "NOFREQS", "STOPWORDS", "2", "a", "the"
            ]
        );
    }

    #[test]
    fn empty_stopwords_disable_them() {
        let opts = IndexOptions::new().stopwords(Vec::<String>::new());
        assert_eq!(opts.build().to_strings(), vec!["STOPWORDS", "0"]);
        assert!(IndexOptions::new().build().is_empty());
    }
}
