//! JSON snapshot codec for [`DictionaryMaxlength`](crate::dictionary_lib::DictionaryMaxlength).
//!
//! A snapshot is a single JSON document holding all 18 dictionaries keyed by their
//! PascalCase slot name. Each dictionary is encoded as a 3-element positional array:
//!
//! ```json
//! "STPhrases": [{"计算机": "計算機"}, 3, 2]
//! ```
//!
//! The three elements are, in order: the phrase map itself, the dictionary's
//! `max_len`, and its `min_len`. Both lengths are counted in Unicode scalar values
//! (`char`s), matching [`DictMaxLen::max_len`]/[`DictMaxLen::min_len`].
//!
//! Older 2-element snapshots (`[dict, maxLen]`, no `minLen`) are rejected outright
//! as a [`DictionaryError::SchemaError`] rather than silently accepted with a
//! guessed `min_len` — a stored snapshot should always carry enough information to
//! reconstruct a dictionary exactly.

use crate::dictionary_lib::dict_max_len::DictMaxLen;
use crate::dictionary_lib::dictionary_maxlength::DictionaryError;
use serde_json::Value;
use std::fmt::Write as _;

/// Parses a snapshot document into `(slot name, dictionary)` pairs.
///
/// Slot names are returned exactly as they appear in the document; unknown names
/// are the caller's concern (see `DictionaryMaxlength::set_named`).
pub fn parse_snapshot(json: &str) -> Result<Vec<(String, DictMaxLen)>, DictionaryError> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| DictionaryError::SchemaError(format!("invalid JSON: {}", e)))?;

    let Value::Object(top) = root else {
        return Err(DictionaryError::SchemaError(
            "snapshot root must be a JSON object".to_string(),
        ));
    };

    let mut out = Vec::with_capacity(top.len());
    for (name, entry) in top {
        let dmax = parse_entry(&name, &entry)?;
        out.push((name, dmax));
    }
    Ok(out)
}

fn parse_entry(name: &str, entry: &Value) -> Result<DictMaxLen, DictionaryError> {
    let Value::Array(items) = entry else {
        return Err(DictionaryError::SchemaError(format!(
            "dictionary \"{}\" must be a 3-element array",
            name
        )));
    };

    if items.len() == 2 {
        return Err(DictionaryError::SchemaError(format!(
            "dictionary \"{}\" uses the legacy 2-element [dict, maxLen] form; \
             this snapshot format requires [dict, maxLen, minLen]",
            name
        )));
    }
    if items.len() != 3 {
        return Err(DictionaryError::SchemaError(format!(
            "dictionary \"{}\" array must have exactly 3 elements, found {}",
            name,
            items.len()
        )));
    }

    let Value::Object(map) = &items[0] else {
        return Err(DictionaryError::SchemaError(format!(
            "dictionary \"{}\": first element must be an object",
            name
        )));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (k, v) in map {
        let Value::String(v) = v else {
            return Err(DictionaryError::SchemaError(format!(
                "dictionary \"{}\": value for key \"{}\" must be a string",
                name, k
            )));
        };
        pairs.push((k.clone(), v.clone()));
    }

    let declared_max = items[1].as_u64().ok_or_else(|| {
        DictionaryError::SchemaError(format!("dictionary \"{}\": maxLen must be an integer", name))
    })? as usize;
    let declared_min = items[2].as_u64().ok_or_else(|| {
        DictionaryError::SchemaError(format!("dictionary \"{}\": minLen must be an integer", name))
    })? as usize;

    let dmax = DictMaxLen::build_from_pairs(pairs);

    if !dmax.map.is_empty() && (dmax.max_len != declared_max || dmax.min_len != declared_min) {
        return Err(DictionaryError::SchemaError(format!(
            "dictionary \"{}\": declared maxLen/minLen ({}/{}) does not match computed values ({}/{})",
            name, declared_max, declared_min, dmax.max_len, dmax.min_len
        )));
    }

    Ok(dmax)
}

/// Serializes 18 named dictionaries into a single snapshot document.
///
/// When `pretty` is `true`, the document is indented two spaces per level and
/// entries within each dictionary are sorted by `(UTF-16 length, key)` — the same
/// order OpenCC's own reference dictionaries use, so phrase dictionaries read with
/// shorter entries first. When `false`, a single-line compact document is produced
/// with no ordering guarantee (fastest to write, not meant for diffing).
pub fn write_snapshot(dicts: [(&str, &DictMaxLen); 18], pretty: bool) -> Result<String, DictionaryError> {
    let mut out = String::new();
    out.push('{');
    if pretty {
        out.push('\n');
    }

    for (i, (name, dmax)) in dicts.iter().enumerate() {
        if pretty {
            out.push_str("  ");
        }
        write_json_string(&mut out, name);
        out.push(':');
        if pretty {
            out.push(' ');
        }
        write_entry(&mut out, dmax, pretty)?;
        if i + 1 != dicts.len() {
            out.push(',');
        }
        if pretty {
            out.push('\n');
        }
    }

    out.push('}');
    Ok(out)
}

fn write_entry(out: &mut String, dmax: &DictMaxLen, pretty: bool) -> Result<(), DictionaryError> {
    let mut entries: Vec<(String, &str)> = dmax
        .map
        .iter()
        .map(|(k, v)| (k.iter().collect::<String>(), v.as_ref()))
        .collect();

    if pretty {
        entries.sort_by(|(a, _), (b, _)| {
            let len_a: usize = a.chars().map(|c| c.len_utf16()).sum();
            let len_b: usize = b.chars().map(|c| c.len_utf16()).sum();
            len_a.cmp(&len_b).then_with(|| a.cmp(b))
        });
    }

    out.push('[');
    if pretty {
        out.push('\n');
        out.push_str("    ");
    }
    out.push('{');
    if pretty && !entries.is_empty() {
        out.push('\n');
    }

    for (i, (k, v)) in entries.iter().enumerate() {
        if pretty {
            out.push_str("      ");
        }
        write_json_string(out, k);
        out.push(':');
        if pretty {
            out.push(' ');
        }
        write_json_string(out, v);
        if i + 1 != entries.len() {
            out.push(',');
        }
        if pretty {
            out.push('\n');
        }
    }

    if pretty && !entries.is_empty() {
        out.push_str("    ");
    }
    out.push('}');
    out.push(',');
    if pretty {
        out.push(' ');
    }
    let _ = write!(out, "{}", dmax.max_len);
    out.push(',');
    if pretty {
        out.push(' ');
    }
    let _ = write!(out, "{}", dmax.min_len);
    if pretty {
        out.push('\n');
        out.push_str("  ");
    }
    out.push(']');

    Ok(())
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_legacy_two_element_form() {
        let json = r#"{"STPhrases": [{"计算机": "計算機"}, 3]}"#;
        let err = parse_snapshot(json).expect_err("legacy form should be rejected");
        assert!(matches!(err, DictionaryError::SchemaError(_)));
    }

    #[test]
    fn rejects_mismatched_declared_lengths() {
        let json = r#"{"STPhrases": [{"计算机": "計算機"}, 99, 1]}"#;
        let err = parse_snapshot(json).expect_err("mismatched maxLen should be rejected");
        assert!(matches!(err, DictionaryError::SchemaError(_)));
    }

    #[test]
    fn parses_well_formed_entry() {
        let json = r#"{"STPhrases": [{"计算机": "計算機", "网络": "網絡"}, 3, 2]}"#;
        let parsed = parse_snapshot(json).expect("should parse");
        assert_eq!(parsed.len(), 1);
        let (name, dmax) = &parsed[0];
        assert_eq!(name, "STPhrases");
        assert_eq!(dmax.max_len, 3);
        assert_eq!(dmax.min_len, 2);
        assert_eq!(dmax.map.len(), 2);
    }

    #[test]
    fn roundtrip_write_then_parse() {
        let dict = DictMaxLen::build_from_pairs(vec![
            ("计算机".to_string(), "計算機".to_string()),
            ("网络".to_string(), "網絡".to_string()),
        ]);
        let empty = DictMaxLen::default();
        let dicts: [(&str, &DictMaxLen); 18] = [
            ("STCharacters", &empty),
            ("STPhrases", &dict),
            ("TSCharacters", &empty),
            ("TSPhrases", &empty),
            ("TWPhrases", &empty),
            ("TWPhrasesRev", &empty),
            ("TWVariants", &empty),
            ("TWVariantsRev", &empty),
            ("TWVariantsRevPhrases", &empty),
            ("HKVariants", &empty),
            ("HKVariantsRev", &empty),
            ("HKVariantsRevPhrases", &empty),
            ("JPShinjitaiCharacters", &empty),
            ("JPShinjitaiPhrases", &empty),
            ("JPVariants", &empty),
            ("JPVariantsRev", &empty),
            ("STPunctuations", &empty),
            ("TSPunctuations", &empty),
        ];
        let json = write_snapshot(dicts, true).expect("should serialize");
        let parsed = parse_snapshot(&json).expect("should parse back");
        let st_phrases = parsed
            .iter()
            .find(|(name, _)| name == "STPhrases")
            .expect("STPhrases slot present");
        assert_eq!(st_phrases.1.max_len, 3);
        assert_eq!(st_phrases.1.min_len, 2);
        assert_eq!(st_phrases.1.map.len(), 2);
    }
}
