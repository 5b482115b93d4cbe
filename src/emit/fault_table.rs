//! Full fault-response table renderer (`management/fault_table.config`).
//!
//! Emits the complete `subsystems={...}` Lua tree: one block per subsystem,
//! one nested block per node, one entry per fault, all in first-seen input
//! order. The emitted text is diffed across builds, so iteration order is
//! part of the contract.
//!
//! Heartbeat faults of ordinary nodes carry a trailing
//! `heartbeat={timeout_sec=..., misses=...}` sub-block. The system
//! monitor's heartbeat/initialization faults do not appear here at all;
//! they are rendered by the [`sys_monitor`](super::sys_monitor) emitter.

use super::{
    diverted_to_sys_monitor, render_command, render_number, LUA_BANNER, LUA_REQUIRE,
    SYS_MONITOR_NODE,
};
use crate::models::FaultRecord;
use crate::table::FaultTableBuilder;

/// Render the full fault-response table.
pub fn render(builder: &FaultTableBuilder) -> String {
    let mut out = String::from(LUA_BANNER);
    out.push_str(LUA_REQUIRE);
    out.push_str("subsystems={\n");

    for (subsystem, nodes) in builder.subsystems() {
        out.push_str(&format!("  {{name=\"{}\", nodes={{\n", subsystem));
        for (node, faults) in nodes {
            if node == SYS_MONITOR_NODE {
                let ordinary: Vec<&FaultRecord> = faults
                    .iter()
                    .filter(|f| !diverted_to_sys_monitor(node, f))
                    .collect();
                if ordinary.is_empty() {
                    continue;
                }
                out.push_str(&format!("    {{name=\"{}\", faults={{\n", node));
                for fault in ordinary {
                    out.push_str(&entry(fault));
                    out.push_str("},\n");
                }
                out.push_str("    }},\n");
            } else {
                out.push_str(&format!("    {{name=\"{}\", faults={{\n", node));
                for fault in faults {
                    out.push_str(&entry(fault));
                    if fault.is_heartbeat() {
                        out.push_str(&format!(
                            ", heartbeat={{timeout_sec={}, misses={}}}}},\n",
                            render_number(fault.timeout_sec),
                            render_number(fault.misses)
                        ));
                    } else {
                        out.push_str("},\n");
                    }
                }
                out.push_str("    }},\n");
            }
        }
        out.push_str("  }},\n");
    }

    out.push_str("}\n");
    out
}

/// Render one fault entry, without the closing brace: heartbeat faults
/// append a sub-block before closing.
fn entry(fault: &FaultRecord) -> String {
    format!(
        "      {{id={}, warning={}, blocking={}, response={}, key=\"{}\", description=\"{}\"",
        fault.id,
        fault.warning,
        fault.blocking,
        render_command(&fault.response, &fault.args),
        fault.key,
        fault.description
    )
}
