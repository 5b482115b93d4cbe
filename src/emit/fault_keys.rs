//! Fault-key enumeration header renderer (`ff_util/ff_faults.h`).
//!
//! Emits the C++ header that gives flight software a strongly-typed view of
//! the fault keys: an `enum FaultKeys` in exact first-seen order, a
//! compile-time key count, and a parallel string table for key-to-name
//! lookups.
//!
//! Two preconditions are fatal here, because violating either produces a
//! header that does not compile: the key set must be non-empty, and every
//! key must be a valid C identifier.

use super::HEADER_BANNER;
use crate::error::{EmitError, EmitResult};
use crate::table::FaultTableBuilder;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

/// Render the fault-key enumeration header.
pub fn render(builder: &FaultTableBuilder) -> EmitResult<String> {
    let keys: Vec<&str> = builder.keys().collect();
    if keys.is_empty() {
        return Err(EmitError::EmptyKeySet);
    }
    for key in &keys {
        if !IDENTIFIER.is_match(key) {
            return Err(EmitError::InvalidKeyIdentifier(key.to_string()));
        }
    }

    let mut out = String::from(HEADER_BANNER);
    out.push_str("#ifndef FF_UTIL_FF_FAULTS_H_\n#define FF_UTIL_FF_FAULTS_H_\n\n");
    out.push_str("#include <string>\n\nnamespace ff_util {\n\n");

    out.push_str("enum FaultKeys {\n");
    for (i, key) in keys.iter().enumerate() {
        if i + 1 < keys.len() {
            out.push_str(&format!("  {},\n", key));
        } else {
            out.push_str(&format!("  {}\n}};\n\n", key));
        }
    }

    out.push_str(&format!("constexpr int kFaultKeysSize = {};\n\n", keys.len()));

    out.push_str("static std::string fault_keys[] = {\n");
    for (i, key) in keys.iter().enumerate() {
        if i + 1 < keys.len() {
            out.push_str(&format!("    \"{}\",\n", key));
        } else {
            out.push_str(&format!("    \"{}\"\n}};\n\n", key));
        }
    }

    out.push_str("}  // namespace ff_util\n\n#endif  // FF_UTIL_FF_FAULTS_H_\n");
    Ok(out)
}
