use crate::args::Arg;
use crate::client::{twin_methods, Dispatcher};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::search::commands;
use crate::search::options::{
    AggregateOptions, SearchOptions, SpellCheckOptions, SugAddOptions, SugGetOptions,
};
use crate::search::results::{AggregateResult, IndexInfo, SearchResult, SpellCheckResult, Suggestion};
use crate::search::schema::{Field, IndexOptions};

/// RediSearch façade bound to one index.
///
/// Dictionary, suggestion and config commands are not index-scoped on the
/// server; they live here for discoverability.
pub struct RediSearch<E> {
    index: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RediSearch<E> {
    pub(crate) fn new(index: String, dispatcher: Dispatcher<E>) -> Self {
        Self { index, dispatcher }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn dialect(&self) -> Option<u32> {
        self.dispatcher.config().search_dialect
    }

    /// Names of every index on the server.
    pub fn list(&self) -> Result<Vec<String>> {
        self.dispatcher.call(commands::ft_list())
    }

    pub async fn list_async(&self) -> Result<Vec<String>> {
        self.dispatcher.call_async(commands::ft_list()).await
    }

    twin_methods! {
        fn create / create_async(self, options: IndexOptions, fields: &[Field]) -> ()
            = commands::ft_create(&self.index, &options, fields);

        fn alter_add / alter_add_async(self, fields: &[Field]) -> ()
            = commands::ft_alter_add(&self.index, fields);

        /// Drop the index; with `delete_docs` the indexed hashes/documents go too.
        fn drop_index / drop_index_async(self, delete_docs: bool) -> ()
            = commands::ft_dropindex(&self.index, delete_docs);

        fn info / info_async(self) -> IndexInfo
            = commands::ft_info(&self.index);

        fn search / search_async(self, query: &str, options: SearchOptions) -> SearchResult
            = commands::ft_search(&self.index, query, &options, self.dialect());

        fn aggregate / aggregate_async(self, query: &str, options: AggregateOptions) -> AggregateResult
            = commands::ft_aggregate(&self.index, query, &options, self.dialect());

        /// Next page of a cursor opened by [`aggregate`](Self::aggregate).
        fn cursor_read / cursor_read_async(self, cursor_id: i64, count: Option<i64>) -> AggregateResult
            = commands::ft_cursor_read(&self.index, cursor_id, count);

        fn cursor_del / cursor_del_async(self, cursor_id: i64) -> ()
            = commands::ft_cursor_del(&self.index, cursor_id);

        fn explain / explain_async(self, query: &str) -> String
            = commands::ft_explain(&self.index, query, self.dialect());

        fn alias_add / alias_add_async(self, alias: &str) -> ()
            = commands::ft_aliasadd(alias, &self.index);

        fn alias_update / alias_update_async(self, alias: &str) -> ()
            = commands::ft_aliasupdate(alias, &self.index);

        fn alias_del / alias_del_async(self, alias: &str) -> ()
            = commands::ft_aliasdel(alias);

        fn tag_vals / tag_vals_async(self, field: &str) -> Vec<String>
            = commands::ft_tagvals(&self.index, field);

        fn config_set / config_set_async(self, option: &str, value: impl Into<Arg>) -> ()
            = commands::ft_config_set(option, value);

        fn config_get / config_get_async(self, option: &str) -> Vec<(String, Option<String>)>
            = commands::ft_config_get(option);

        fn syn_update / syn_update_async(self, group: &str, skip_initial_scan: bool, terms: impl IntoIterator<Item = impl Into<Arg>>) -> ()
            = commands::ft_synupdate(&self.index, group, skip_initial_scan, terms);

        fn syn_dump / syn_dump_async(self) -> Vec<(String, Vec<String>)>
            = commands::ft_syndump(&self.index);

        fn dict_add / dict_add_async(self, dict: &str, terms: impl IntoIterator<Item = impl Into<Arg>>) -> i64
            = commands::ft_dictadd(dict, terms);

        fn dict_del / dict_del_async(self, dict: &str, terms: impl IntoIterator<Item = impl Into<Arg>>) -> i64
            = commands::ft_dictdel(dict, terms);

        fn dict_dump / dict_dump_async(self, dict: &str) -> Vec<String>
            = commands::ft_dictdump(dict);

        fn sug_add / sug_add_async(self, key: &str, string: &str, score: f64, options: SugAddOptions) -> i64
            = commands::ft_sugadd(key, string, score, &options);

        fn sug_get / sug_get_async(self, key: &str, prefix: &str, options: SugGetOptions) -> Vec<Suggestion>
            = commands::ft_sugget(key, prefix, &options);

        fn sug_del / sug_del_async(self, key: &str, string: &str) -> bool
            = commands::ft_sugdel(key, string);

        fn sug_len / sug_len_async(self, key: &str) -> i64
            = commands::ft_suglen(key);

        fn spell_check / spell_check_async(self, query: &str, options: SpellCheckOptions) -> Vec<SpellCheckResult>
            = commands::ft_spellcheck(&self.index, query, &options);
    }
}
