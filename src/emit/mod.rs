//! Artifact renderers.
//!
//! Four stateless renderers walk the finalized [`FaultTableBuilder`] and
//! produce one text artifact each:
//!
//! - [`faults_config`] - minimal per-node fault list (Lua)
//! - [`fault_table`] - full per-subsystem fault-response table (Lua)
//! - [`sys_monitor`] - system-monitor heartbeat/initialization variables (Lua)
//! - [`fault_keys`] - fault-key enumeration header (C++)
//!
//! Every renderer returns a `String`; file I/O happens only in the pipeline
//! after all four artifacts rendered successfully, so an emission failure
//! can never leave a partial artifact on disk.
//!
//! [`FaultTableBuilder`]: crate::table::FaultTableBuilder

pub mod fault_keys;
pub mod fault_table;
pub mod faults_config;
pub mod sys_monitor;

use crate::models::FaultRecord;

/// The node with dedicated heartbeat/initialization handling.
pub const SYS_MONITOR_NODE: &str = "sys_monitor";

/// Banner prepended to every generated Lua artifact.
pub const LUA_BANNER: &str = "-- Autogenerated from FMECA! DO NOT CHANGE!\n\n";

/// Banner prepended to the generated header.
pub const HEADER_BANNER: &str = "// Autogenerated from FMECA! DO NOT CHANGE!\n\n";

/// Require line shared by the Lua artifacts that call `command(...)`.
pub const LUA_REQUIRE: &str = "require \"management/fault_functions\"\n\n";

/// Whether a record is diverted to the dedicated system-monitor variables
/// instead of appearing as an ordinary fault-table entry.
pub fn diverted_to_sys_monitor(node: &str, record: &FaultRecord) -> bool {
    node == SYS_MONITOR_NODE && (record.is_heartbeat() || record.is_initialization())
}

/// Render a `command("name", "arg", ...)` call for a fault response.
pub fn render_command(response: &str, args: &[String]) -> String {
    let mut out = format!("command(\"{}\"", response);
    for arg in args {
        out.push_str(&format!(", \"{}\"", arg));
    }
    out.push(')');
    out
}

/// Render a timing number the way the configs expect: integral values
/// print without a trailing `.0`.
pub fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command_without_args() {
        assert_eq!(render_command("restart", &[]), "command(\"restart\")");
    }

    #[test]
    fn test_render_command_with_args() {
        let args = vec!["arg1".to_string(), "arg2".to_string()];
        assert_eq!(
            render_command("restart", &args),
            "command(\"restart\", \"arg1\", \"arg2\")"
        );
    }

    #[test]
    fn test_render_number_integral() {
        assert_eq!(render_number(5.0), "5");
        assert_eq!(render_number(-1.0), "-1");
        assert_eq!(render_number(0.0), "0");
    }

    #[test]
    fn test_render_number_fractional() {
        assert_eq!(render_number(2.5), "2.5");
    }
}
