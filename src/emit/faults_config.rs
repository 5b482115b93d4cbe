//! Minimal fault config renderer (`faults.config`).
//!
//! One Lua block per node listing `{id, key, description}` for each of its
//! faults. Two classes of record are left out:
//!
//! - heartbeat faults of ordinary nodes, because a node does not trigger
//!   its own missing-heartbeat fault;
//! - the system monitor's heartbeat/initialization faults, which live in
//!   `sys_monitor_fault_info.config` instead.

use super::{diverted_to_sys_monitor, LUA_BANNER, SYS_MONITOR_NODE};
use crate::models::FaultRecord;
use crate::table::FaultTableBuilder;

/// Render the minimal fault config.
pub fn render(builder: &FaultTableBuilder) -> String {
    let mut out = String::from(LUA_BANNER);

    for nodes in builder.subsystems().values() {
        for (node, faults) in nodes {
            if node == SYS_MONITOR_NODE {
                let ordinary: Vec<&FaultRecord> = faults
                    .iter()
                    .filter(|f| !diverted_to_sys_monitor(node, f))
                    .collect();
                // The block only exists if the system monitor has faults
                // beyond its carved-out heartbeat/initialization entries.
                if ordinary.is_empty() {
                    continue;
                }
                out.push_str(&format!("{} = {{\n", node));
                for fault in ordinary {
                    out.push_str(&entry(fault));
                }
                out.push_str("}\n\n");
            } else {
                out.push_str(&format!("{} = {{\n", node));
                for fault in faults {
                    if !fault.is_heartbeat() {
                        out.push_str(&entry(fault));
                    }
                }
                out.push_str("}\n\n");
            }
        }
    }

    out
}

fn entry(fault: &FaultRecord) -> String {
    format!(
        "  {{id={}, key=\"{}\", description=\"{}\"}},\n",
        fault.id, fault.key, fault.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, node: &str, key: &str) -> FaultRecord {
        FaultRecord {
            id: id.into(),
            subsystem: "fsw".into(),
            node: node.into(),
            description: format!("fault {}", id),
            warning: false,
            blocking: false,
            response: "restart".into(),
            args: vec![],
            key: key.into(),
            timeout_sec: -1.0,
            misses: -1.0,
        }
    }

    #[test]
    fn test_node_block_shape() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("1", "eps", "EPS_BATTERY_LOW"));
        builder.ingest_record(record("2", "eps", "EPS_OVER_TEMP"));

        let out = render(&builder);
        assert!(out.starts_with(LUA_BANNER));
        assert!(out.contains("eps = {\n"));
        assert!(out.contains("  {id=1, key=\"EPS_BATTERY_LOW\", description=\"fault 1\"},\n"));
        assert!(out.contains("  {id=2, key=\"EPS_OVER_TEMP\", description=\"fault 2\"},\n"));
    }

    #[test]
    fn test_heartbeat_faults_excluded() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("1", "eps", "EPS_HEARTBEAT_MISSING"));
        builder.ingest_record(record("2", "eps", "EPS_BATTERY_LOW"));

        let out = render(&builder);
        assert!(!out.contains("EPS_HEARTBEAT_MISSING"));
        assert!(out.contains("EPS_BATTERY_LOW"));
    }

    #[test]
    fn test_sys_monitor_carved_entries_excluded() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("1", "sys_monitor", "SYS_HEARTBEAT_MISSING"));
        builder.ingest_record(record("2", "sys_monitor", "SYS_INITIALIZATION_FAILED"));

        let out = render(&builder);
        // All entries diverted: no sys_monitor block at all.
        assert!(!out.contains("sys_monitor = {"));
    }

    #[test]
    fn test_sys_monitor_ordinary_entries_kept() {
        let mut builder = FaultTableBuilder::new();
        builder.ingest_record(record("1", "sys_monitor", "SYS_HEARTBEAT_MISSING"));
        builder.ingest_record(record("2", "sys_monitor", "SYS_DISK_FULL"));

        let out = render(&builder);
        assert!(out.contains("sys_monitor = {\n"));
        assert!(out.contains("SYS_DISK_FULL"));
        assert!(!out.contains("SYS_HEARTBEAT_MISSING"));
    }
}
