//! System-monitor fault variables renderer
//! (`management/sys_monitor_fault_info.config`).
//!
//! The system monitor cannot look its own faults up in the fault table it
//! manages, so its heartbeat and initialization faults are compiled into
//! dedicated Lua variables instead:
//!
//! - a HEARTBEAT-keyed `sys_monitor` record sets
//!   `sys_monitor_heartbeat_timeout`, `sys_monitor_heartbeat_fault_response`
//!   and `sys_monitor_heartbeat_fault_blocking`;
//! - an INITIALIZATION-keyed record sets `sys_monitor_init_fault_response`
//!   and `sys_monitor_init_fault_blocking`.
//!
//! Every other `sys_monitor` record falls through to the ordinary per-node
//! path in the fault-table emitter.

use super::{render_command, render_number, LUA_BANNER, LUA_REQUIRE, SYS_MONITOR_NODE};
use crate::table::FaultTableBuilder;

/// Render the system-monitor fault variables.
pub fn render(builder: &FaultTableBuilder) -> String {
    let mut out = String::from(LUA_BANNER);
    out.push_str(LUA_REQUIRE);

    for nodes in builder.subsystems().values() {
        let Some(faults) = nodes.get(SYS_MONITOR_NODE) else {
            continue;
        };
        for fault in faults {
            let response = render_command(&fault.response, &fault.args);
            if fault.is_heartbeat() {
                out.push_str(&format!(
                    "sys_monitor_heartbeat_timeout = {}\n\n",
                    render_number(fault.timeout_sec)
                ));
                out.push_str(&format!(
                    "sys_monitor_heartbeat_fault_response = {}\n\n",
                    response
                ));
                out.push_str(&format!(
                    "sys_monitor_heartbeat_fault_blocking = {}\n\n",
                    fault.blocking
                ));
            } else if fault.is_initialization() {
                out.push_str(&format!("sys_monitor_init_fault_response = {}\n\n", response));
                out.push_str(&format!(
                    "sys_monitor_init_fault_blocking = {}\n\n",
                    fault.blocking
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FaultRecord;

    fn record(key: &str, response: &str, blocking: bool, timeout: f64) -> FaultRecord {
        FaultRecord {
            id: "1".into(),
            subsystem: "mgt".into(),
            node: "sys_monitor".into(),
            description: String::new(),
            warning: false,
            blocking,
            response: response.into(),
            args: vec![],
            key: key.into(),
            timeout_sec: timeout,
            misses: 3.0,
        }
    }

    #[test]
    fn test_heartbeat_variables() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("SYS_HEARTBEAT_MISSING", "restart", false, 5.0));

        let out = render(&builder);
        assert!(out.contains("sys_monitor_heartbeat_timeout = 5\n"));
        assert!(out.contains("sys_monitor_heartbeat_fault_response = command(\"restart\")\n"));
        assert!(out.contains("sys_monitor_heartbeat_fault_blocking = false\n"));
    }

    #[test]
    fn test_heartbeat_response_with_args() {
        let mut fault = record("SYS_HEARTBEAT_MISSING", "restart", false, 5.0);
        fault.args = vec!["arg1".into(), "arg2".into()];
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(fault);

        let out = render(&builder);
        assert!(out.contains(
            "sys_monitor_heartbeat_fault_response = command(\"restart\", \"arg1\", \"arg2\")\n"
        ));
    }

    #[test]
    fn test_initialization_variables() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("SYS_INITIALIZATION_FAILED", "reboot", true, -1.0));

        let out = render(&builder);
        assert!(out.contains("sys_monitor_init_fault_response = command(\"reboot\")\n"));
        assert!(out.contains("sys_monitor_init_fault_blocking = true\n"));
        assert!(!out.contains("heartbeat_timeout"));
    }

    #[test]
    fn test_ordinary_sys_monitor_faults_ignored() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("SYS_DISK_FULL", "purge", false, -1.0));

        let out = render(&builder);
        assert!(!out.contains("SYS_DISK_FULL"));
        assert!(!out.contains("sys_monitor_heartbeat"));
        assert!(!out.contains("sys_monitor_init"));
    }

    #[test]
    fn test_other_nodes_ignored() {
        let mut fault = record("EPS_HEARTBEAT_MISSING", "restart", false, 5.0);
        fault.node = "eps".into();
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(fault);

        let out = render(&builder);
        assert!(!out.contains("sys_monitor_heartbeat_timeout"));
    }
}
