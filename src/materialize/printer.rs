// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Structured rendering of objects

use crate::error::MaterializationFailure;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Write one object as a YAML or JSON document, terminated by a newline
pub fn print<T, W>(object: &T, format: OutputFormat, out: &mut W) -> Result<(), MaterializationFailure>
where
    T: Serialize + ?Sized,
    W: Write + ?Sized,
{
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(object)
            .map_err(|e| MaterializationFailure::Serialize(e.to_string()))?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(object)
                .map_err(|e| MaterializationFailure::Serialize(e.to_string()))?;
            json.push('\n');
            json
        }
    };

    out.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_print_yaml() {
        let mut out = Vec::new();
        print(&json!({"kind": "Namespace"}), OutputFormat::Yaml, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "kind: Namespace\n");
    }

    #[test]
    fn test_print_json_ends_with_newline() {
        let mut out = Vec::new();
        print(&json!({"kind": "Namespace"}), OutputFormat::Json, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"kind\": \"Namespace\"\n}\n"
        );
    }
}
