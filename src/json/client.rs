use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{twin_methods, Dispatcher};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::json::commands;
use crate::json::keywords::JsonType;
use crate::json::options::{GetArgs, SetArgs};
use crate::reply::Reply;

/// RedisJSON façade bound to one key.
///
/// Methods taking `path: Option<&str>` use
/// [`ModulesConfig::json_root_path`](crate::config::ModulesConfig::json_root_path)
/// when given `None`.
pub struct RedisJson<E> {
    key: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RedisJson<E> {
    pub(crate) fn new(key: String, dispatcher: Dispatcher<E>) -> Self {
        Self { key, dispatcher }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn path<'a>(&'a self, path: Option<&'a str>) -> &'a str {
        path.unwrap_or(&self.dispatcher.config().json_root_path)
    }

    twin_methods! {
        /// `false` when an NX/XX condition was not met.
        fn set / set_async(self, path: Option<&str>, value: &(impl Serialize + ?Sized), condition: SetArgs) -> bool
            = commands::json_set(&self.key, self.path(path), value, condition);

        /// The stored JSON text, unparsed.
        fn get_raw / get_raw_async(self, options: &GetArgs) -> Option<String>
            = commands::json_get_raw(&self.key, options, self.path(None));

        fn del / del_async(self, path: Option<&str>) -> i64
            = commands::json_del(&self.key, self.path(path));

        fn forget / forget_async(self, path: Option<&str>) -> i64
            = commands::json_forget(&self.key, self.path(path));

        fn type_of / type_of_async(self, path: Option<&str>) -> Option<JsonType>
            = commands::json_type_of(&self.key, self.path(path));

        fn num_incr_by / num_incr_by_async(self, path: Option<&str>, by: f64) -> serde_json::Value
            = commands::json_num_incr_by(&self.key, self.path(path), by);

        fn num_mult_by / num_mult_by_async(self, path: Option<&str>, by: f64) -> serde_json::Value
            = commands::json_num_mult_by(&self.key, self.path(path), by);

        fn str_append / str_append_async(self, path: Option<&str>, suffix: &str) -> i64
            = commands::json_str_append(&self.key, self.path(path), suffix);

        fn str_len / str_len_async(self, path: Option<&str>) -> Option<i64>
            = commands::json_str_len(&self.key, self.path(path));

        /// New array length.
        fn arr_append / arr_append_async(self, path: Option<&str>, values: &[impl Serialize]) -> i64
            = commands::json_arr_append(&self.key, self.path(path), values);

        /// Position of `value`, or -1.
        fn arr_index / arr_index_async(self, path: Option<&str>, value: &(impl Serialize + ?Sized), start: Option<i64>, stop: Option<i64>) -> i64
            = commands::json_arr_index(&self.key, self.path(path), value, start, stop);

        fn arr_insert / arr_insert_async(self, path: Option<&str>, index: i64, values: &[impl Serialize]) -> i64
            = commands::json_arr_insert(&self.key, self.path(path), index, values);

        fn arr_len / arr_len_async(self, path: Option<&str>) -> Option<i64>
            = commands::json_arr_len(&self.key, self.path(path));

        fn arr_trim / arr_trim_async(self, path: Option<&str>, start: i64, stop: i64) -> i64
            = commands::json_arr_trim(&self.key, self.path(path), start, stop);

        fn obj_keys / obj_keys_async(self, path: Option<&str>) -> Option<Vec<String>>
            = commands::json_obj_keys(&self.key, self.path(path));

        fn obj_len / obj_len_async(self, path: Option<&str>) -> Option<i64>
            = commands::json_obj_len(&self.key, self.path(path));

        /// Number of containers cleared.
        fn clear / clear_async(self, path: Option<&str>) -> i64
            = commands::json_clear(&self.key, self.path(path));

        /// The new value of the toggled boolean.
        fn toggle / toggle_async(self, path: Option<&str>) -> bool
            = commands::json_toggle(&self.key, self.path(path));

        fn debug_memory / debug_memory_async(self, path: Option<&str>) -> i64
            = commands::json_debug_memory(&self.key, self.path(path));

        fn resp / resp_async(self, path: Option<&str>) -> Reply
            = commands::json_resp(&self.key, self.path(path));
    }

    /// Deserialize the value at the given paths (the root path when none).
    pub fn get<T: DeserializeOwned + 'static>(&self, options: &GetArgs) -> Result<Option<T>> {
        self.dispatcher
            .call(commands::json_get(&self.key, options, self.path(None))?)
    }

    pub async fn get_async<T: DeserializeOwned + 'static>(&self, options: &GetArgs) -> Result<Option<T>> {
        let request = commands::json_get(&self.key, options, self.path(None))?;
        self.dispatcher.call_async(request).await
    }

    /// Remove and deserialize the element at `index` (last when `None`).
    pub fn arr_pop<T: DeserializeOwned + 'static>(&self, path: Option<&str>, index: Option<i64>) -> Result<Option<T>> {
        self.dispatcher
            .call(commands::json_arr_pop(&self.key, self.path(path), index)?)
    }

    pub async fn arr_pop_async<T: DeserializeOwned + 'static>(
        &self,
        path: Option<&str>,
        index: Option<i64>,
    ) -> Result<Option<T>> {
        let request = commands::json_arr_pop(&self.key, self.path(path), index)?;
        self.dispatcher.call_async(request).await
    }
}
