//! Reply types of the RG.* commands.
//!
//! Most gears replies are flat `[name, value, …]` arrays nested one or two
//! levels deep. Unknown names are skipped.

use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_array, expect_i64, expect_string};
use crate::reply::Reply;

/// Outcome of `RG.PYEXECUTE`.
#[derive(Debug, Clone, PartialEq)]
pub enum PyExecuteResult {
    /// Registration or a run without results.
    Ok,
    /// `UNBLOCKING` run; poll with `get_results`.
    ExecutionId(String),
    Results(GearsResults),
}

/// `[[results…], [errors…]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GearsResults {
    pub results: Vec<String>,
    pub errors: Vec<String>,
}

impl GearsResults {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionInfo {
    pub execution_id: String,
    pub status: String,
    pub registered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    pub shard_id: String,
    pub execution_plan: Vec<(String, Reply)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationData {
    pub mode: String,
    pub num_triggered: i64,
    pub num_success: i64,
    pub num_failures: i64,
    pub num_aborted: i64,
    pub last_error: Option<String>,
    pub args: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub id: String,
    pub reader: String,
    pub desc: Option<String>,
    pub registration_data: RegistrationData,
    pub private_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardInfo {
    pub id: String,
    pub ip: String,
    pub port: u16,
    pub unix_socket: Option<String>,
    pub run_id: String,
    pub min_hslot: u16,
    pub max_hslot: u16,
}

/// `RG.INFOCLUSTER`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterInfo {
    NoCluster,
    Cluster {
        my_id: String,
        my_run_id: Option<String>,
        shards: Vec<ShardInfo>,
    },
}

/// Python allocator counters, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PyStats {
    pub total_allocated: i64,
    pub peak_allocated: i64,
    pub current_allocated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub is_downloaded: bool,
    pub is_installed: bool,
    pub wheels: Vec<String>,
}

/// Gears prints Python's `None` for absent values.
fn optional_text(value: &Reply) -> Option<String> {
    value.to_text().filter(|s| s != "None")
}

fn yes_no(value: &Reply, what: &str) -> Result<bool> {
    match value.as_str() {
        Some(s) if s.eq_ignore_ascii_case("yes") => Ok(true),
        Some(s) if s.eq_ignore_ascii_case("no") => Ok(false),
        _ => value
            .to_bool()
            .ok_or_else(|| ModuleError::decode(format!("expected yes/no for {what}"), value)),
    }
}

fn expect_u16(value: &Reply, what: &str) -> Result<u16> {
    let n = expect_i64(value, what)?;
    u16::try_from(n).map_err(|_| ModuleError::decode(format!("{what} out of range: {n}"), value))
}

/// Flatten nested argument values into one display string.
fn render(value: &Reply) -> String {
    match value {
        Reply::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        Reply::Null => String::new(),
        other => other.to_text().unwrap_or_default(),
    }
}

fn text_list(value: &Reply, what: &str) -> Result<Vec<String>> {
    expect_array(value, what)?
        .iter()
        .map(|item| expect_string(item, what))
        .collect()
}

pub fn gears_results(reply: Reply) -> Result<GearsResults> {
    let items = decode::array(reply)?;
    let [results, errors]: [Reply; 2] = items
        .try_into()
        .map_err(|items| ModuleError::decode("expected [results, errors]", &Reply::Array(items)))?;
    Ok(GearsResults {
        results: text_list(&results, "results")?,
        errors: text_list(&errors, "errors")?,
    })
}

pub fn py_execute_result(reply: Reply) -> Result<PyExecuteResult> {
    match reply {
        Reply::Array(_) => gears_results(reply).map(PyExecuteResult::Results),
        ref r if r.is_ok() => Ok(PyExecuteResult::Ok),
        Reply::Status(_) | Reply::Bulk(_) => decode::string(reply).map(PyExecuteResult::ExecutionId),
        other => Err(ModuleError::decode("unexpected RG.PYEXECUTE reply", &other)),
    }
}

fn execution_info(reply: Reply) -> Result<ExecutionInfo> {
    let mut info = ExecutionInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "executionId" => info.execution_id = expect_string(&value, "executionId")?,
            "status" => info.status = expect_string(&value, "status")?,
            "registered" => info.registered = decode::boolean(value)?,
            _ => {}
        }
    }
    Ok(info)
}

pub fn executions(reply: Reply) -> Result<Vec<ExecutionInfo>> {
    decode::array(reply)?.into_iter().map(execution_info).collect()
}

fn execution_plan(reply: Reply) -> Result<ExecutionPlan> {
    let fragment = reply.clone();
    let mut shard_id = None;
    let mut plan = None;
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "shard_id" => shard_id = Some(expect_string(&value, "shard_id")?),
            "execution_plan" => plan = Some(decode::flat_pairs(value)?),
            _ => {}
        }
    }
    match (shard_id, plan) {
        (Some(shard_id), Some(execution_plan)) => Ok(ExecutionPlan {
            shard_id,
            execution_plan,
        }),
        _ => Err(ModuleError::decode(
            "execution plan without shard_id or execution_plan",
            &fragment,
        )),
    }
}

pub fn execution_plans(reply: Reply) -> Result<Vec<ExecutionPlan>> {
    decode::array(reply)?.into_iter().map(execution_plan).collect()
}

fn registration_data(reply: Reply) -> Result<RegistrationData> {
    let mut data = RegistrationData::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "mode" => data.mode = expect_string(&value, "mode")?,
            "numTriggered" => data.num_triggered = expect_i64(&value, "numTriggered")?,
            "numSuccess" => data.num_success = expect_i64(&value, "numSuccess")?,
            "numFailures" => data.num_failures = expect_i64(&value, "numFailures")?,
            "numAborted" => data.num_aborted = expect_i64(&value, "numAborted")?,
            "lastError" => data.last_error = optional_text(&value),
            "args" => {
                data.args = decode::flat_pairs(value)?
                    .into_iter()
                    .map(|(k, v)| (k, render(&v)))
                    .collect()
            }
            _ => {}
        }
    }
    Ok(data)
}

fn registration(reply: Reply) -> Result<Registration> {
    let mut reg = Registration::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "id" => reg.id = expect_string(&value, "id")?,
            "reader" => reg.reader = expect_string(&value, "reader")?,
            "desc" => reg.desc = optional_text(&value),
            "RegistrationData" => reg.registration_data = registration_data(value)?,
            "PD" => reg.private_data = optional_text(&value),
            _ => {}
        }
    }
    Ok(reg)
}

pub fn registrations(reply: Reply) -> Result<Vec<Registration>> {
    decode::array(reply)?.into_iter().map(registration).collect()
}

fn shard_info(reply: Reply) -> Result<ShardInfo> {
    let mut shard = ShardInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "id" => shard.id = expect_string(&value, "id")?,
            "ip" => shard.ip = expect_string(&value, "ip")?,
            "port" => shard.port = expect_u16(&value, "port")?,
            "unixSocket" => shard.unix_socket = optional_text(&value),
            "runid" => shard.run_id = expect_string(&value, "runid")?,
            "minHslot" => shard.min_hslot = expect_u16(&value, "minHslot")?,
            "maxHslot" => shard.max_hslot = expect_u16(&value, "maxHslot")?,
            _ => {}
        }
    }
    Ok(shard)
}

/// `"no cluster mode"`, or `[MyId, id, (MyRunId, rid,)? [shard…]]`.
pub fn cluster_info(reply: Reply) -> Result<ClusterInfo> {
    if let Some(text) = reply.as_str() {
        if text.eq_ignore_ascii_case("no cluster mode") {
            return Ok(ClusterInfo::NoCluster);
        }
        return Err(ModuleError::decode("unexpected RG.INFOCLUSTER reply", &reply));
    }
    let fragment = reply.clone();
    let mut my_id = None;
    let mut my_run_id = None;
    let mut shards = Vec::new();
    let mut items = decode::array(reply)?.into_iter();
    while let Some(item) = items.next() {
        if let Reply::Array(list) = item {
            shards = list.into_iter().map(shard_info).collect::<Result<_>>()?;
            continue;
        }
        let name = expect_string(&item, "cluster field")?;
        let value = items
            .next()
            .ok_or_else(|| ModuleError::decode(format!("{name} without a value"), &item))?;
        match name.as_str() {
            "MyId" => my_id = Some(expect_string(&value, "MyId")?),
            "MyRunId" => my_run_id = optional_text(&value),
            _ => {}
        }
    }
    let my_id = my_id.ok_or_else(|| ModuleError::decode("cluster info without MyId", &fragment))?;
    Ok(ClusterInfo::Cluster {
        my_id,
        my_run_id,
        shards,
    })
}

pub fn py_stats(reply: Reply) -> Result<PyStats> {
    let mut stats = PyStats::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "TotalAllocated" => stats.total_allocated = expect_i64(&value, "TotalAllocated")?,
            "PeakAllocated" => stats.peak_allocated = expect_i64(&value, "PeakAllocated")?,
            "CurrAllocated" => stats.current_allocated = expect_i64(&value, "CurrAllocated")?,
            _ => {}
        }
    }
    Ok(stats)
}

fn requirement(reply: Reply) -> Result<Requirement> {
    let mut req = Requirement::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "Name" => req.name = expect_string(&value, "Name")?,
            "IsDownloaded" => req.is_downloaded = yes_no(&value, "IsDownloaded")?,
            "IsInstalled" => req.is_installed = yes_no(&value, "IsInstalled")?,
            "Wheels" => req.wheels = text_list(&value, "Wheels")?,
            _ => {}
        }
    }
    Ok(req)
}

pub fn requirements(reply: Reply) -> Result<Vec<Requirement>> {
    decode::array(reply)?.into_iter().map(requirement).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn arr(items: Vec<Reply>) -> Reply {
        Reply::Array(items)
    }

    #[test]
    fn py_execute_shapes() {
        assert_eq!(py_execute_result(Reply::status("OK")).unwrap(), PyExecuteResult::Ok);
        assert_eq!(
            py_execute_result(Reply::bulk("0000000000000000000000000000000000000000-12")).unwrap(),
            PyExecuteResult::ExecutionId("0000000000000000000000000000000000000000-12".into())
        );
        let reply = arr(vec![Reply::bulk_array(["1", "2"]), arr(vec![])]);
        let PyExecuteResult::Results(results) = py_execute_result(reply).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(results.results, vec!["1", "2"]);
        assert!(results.is_success());
        assert!(py_execute_result(Reply::Integer(3)).unwrap_err().is_decode());
    }

    #[test]
    fn results_need_two_lists() {
        assert!(gears_results(arr(vec![arr(vec![])])).unwrap_err().is_decode());
        let reply = arr(vec![arr(vec![]), Reply::bulk_array(["boom"])]);
        assert_eq!(gears_results(reply).unwrap().errors, vec!["boom"]);
    }

    #[test]
    fn dump_executions() {
        let reply = arr(vec![arr(vec![
            Reply::bulk("executionId"),
            Reply::bulk("abc-1"),
            Reply::bulk("status"),
            Reply::bulk("done"),
            Reply::bulk("registered"),
            Reply::Integer(0),
        ])]);
        assert_eq!(
            executions(reply).unwrap(),
            vec![ExecutionInfo {
                execution_id: "abc-1".into(),
                status: "done".into(),
                registered: false,
            }]
        );
    }

    #[test]
    fn execution_plan_per_shard() {
        let reply = arr(vec![arr(vec![
            Reply::bulk("shard_id"),
            Reply::bulk("s1"),
            Reply::bulk("execution_plan"),
            arr(vec![Reply::bulk("status"), Reply::bulk("done"), Reply::bulk("shards_received"), Reply::Integer(0)]),
        ])]);
        let plans = execution_plans(reply).unwrap();
        assert_eq!(plans[0].shard_id, "s1");
        assert_eq!(plans[0].execution_plan[0], ("status".to_string(), Reply::bulk("done")));
        assert!(execution_plans(arr(vec![arr(vec![Reply::bulk("shard_id"), Reply::bulk("s1")])]))
            .unwrap_err()
            .is_decode());
    }

    #[test]
    fn dump_registrations() {
        let reply = arr(vec![arr(vec![
            Reply::bulk("id"),
            Reply::bulk("reg-1"),
            Reply::bulk("reader"),
            Reply::bulk("KeysReader"),
            Reply::bulk("desc"),
            Reply::bulk("None"),
            Reply::bulk("RegistrationData"),
            arr(vec![
                Reply::bulk("mode"),
                Reply::bulk("async"),
                Reply::bulk("numTriggered"),
                Reply::Integer(4),
                Reply::bulk("numSuccess"),
                Reply::Integer(3),
                Reply::bulk("numFailures"),
                Reply::Integer(1),
                Reply::bulk("numAborted"),
                Reply::Integer(0),
                Reply::bulk("lastError"),
                Reply::bulk("ZeroDivisionError"),
                Reply::bulk("args"),
                arr(vec![
                    Reply::bulk("regex"),
                    Reply::bulk("user:*"),
                    Reply::bulk("eventTypes"),
                    Reply::bulk_array(["set", "hset"]),
                ]),
            ]),
            Reply::bulk("PD"),
            Reply::bulk("{'sessionId':'0-1'}"),
        ])]);
        let regs = registrations(reply).unwrap();
        let reg = &regs[0];
        assert_eq!(reg.id, "reg-1");
        assert_eq!(reg.desc, None);
        assert_eq!(reg.registration_data.num_triggered, 4);
        assert_eq!(reg.registration_data.last_error.as_deref(), Some("ZeroDivisionError"));
        assert_eq!(
            reg.registration_data.args,
            vec![
                ("regex".to_string(), "user:*".to_string()),
                ("eventTypes".to_string(), "set,hset".to_string()),
            ]
        );
        assert_eq!(reg.private_data.as_deref(), Some("{'sessionId':'0-1'}"));
    }

    #[test]
    fn cluster_modes() {
        assert_eq!(cluster_info(Reply::status("no cluster mode")).unwrap(), ClusterInfo::NoCluster);
        let shard = arr(vec![
            Reply::bulk("id"),
            Reply::bulk("n1"),
            Reply::bulk("ip"),
            Reply::bulk("10.0.0.1"),
            Reply::bulk("port"),
            Reply::Integer(6379),
            Reply::bulk("unixSocket"),
            Reply::bulk("None"),
            Reply::bulk("runid"),
            Reply::bulk("r1"),
            Reply::bulk("minHslot"),
            Reply::Integer(0),
            Reply::bulk("maxHslot"),
            Reply::Integer(16383),
        ]);
        let reply = arr(vec![
            Reply::bulk("MyId"),
            Reply::bulk("n1"),
            Reply::bulk("MyRunId"),
            Reply::bulk("r1"),
            arr(vec![shard]),
        ]);
        let ClusterInfo::Cluster { my_id, my_run_id, shards } = cluster_info(reply).unwrap() else {
            panic!("expected cluster");
        };
        assert_eq!(my_id, "n1");
        assert_eq!(my_run_id.as_deref(), Some("r1"));
        assert_eq!(shards[0].port, 6379);
        assert_eq!(shards[0].unix_socket, None);
        assert_eq!(shards[0].max_hslot, 16383);
        assert!(cluster_info(Reply::status("weird")).unwrap_err().is_decode());
    }

    #[test]
    fn decode_errors_keep_the_reply() {
        let partial = arr(vec![Reply::bulk("shard_id"), Reply::bulk("s1")]);
        let err = execution_plans(arr(vec![partial.clone()])).unwrap_err();
        assert_eq!(err.fragment(), Some(&partial));

        let anonymous = arr(vec![Reply::bulk("MyRunId"), Reply::bulk("r1"), arr(vec![])]);
        let err = cluster_info(anonymous.clone()).unwrap_err();
        assert_eq!(err.fragment(), Some(&anonymous));

        let shard = arr(vec![Reply::bulk("id"), Reply::bulk("n1"), Reply::bulk("port"), Reply::Integer(70000)]);
        let reply = arr(vec![Reply::bulk("MyId"), Reply::bulk("n1"), arr(vec![shard])]);
        let err = cluster_info(reply).unwrap_err();
        assert_eq!(err.fragment(), Some(&Reply::Integer(70000)));
    }

    #[test]
    fn stats_and_requirements() {
        let stats = py_stats(arr(vec![
            Reply::bulk("TotalAllocated"),
            Reply::Integer(100),
            Reply::bulk("PeakAllocated"),
            Reply::Integer(80),
            Reply::bulk("CurrAllocated"),
            Reply::Integer(40),
        ]))
        .unwrap();
        assert_eq!(stats.current_allocated, 40);

        let reqs = requirements(arr(vec![arr(vec![
            Reply::bulk("GearReqVersion"),
            Reply::Integer(1),
            Reply::bulk("Name"),
            Reply::bulk("numpy"),
            Reply::bulk("IsDownloaded"),
            Reply::bulk("yes"),
            Reply::bulk("IsInstalled"),
            Reply::bulk("no"),
            Reply::bulk("Wheels"),
            Reply::bulk_array(["numpy-1.26.0-cp310-linux_x86_64.whl"]),
        ])]))
        .unwrap();
        assert_eq!(reqs[0].name, "numpy");
        assert!(reqs[0].is_downloaded);
        assert!(!reqs[0].is_installed);
        assert_eq!(reqs[0].wheels.len(), 1);
    }
}
