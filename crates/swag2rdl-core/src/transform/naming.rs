use heck::ToSnakeCase;

use crate::parse::fragment::SchemaKind;

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a raw definition name into a type name.
///
/// Primitive keywords map to their canonical names; multi-word names are
/// joined with each word capitalized (`"pet owner"` → `"PetOwner"`); a
/// single word is returned as is.
pub fn camelize(raw: &str) -> String {
    match raw {
        "string" | "integer" | "number" | "array" | "object" => {
            return canonical_type_name(raw).to_string();
        }
        _ => {}
    }
    let words: Vec<&str> = raw.split_whitespace().collect();
    match words.as_slice() {
        [] => raw.to_string(),
        [single] => single.to_string(),
        _ => words.iter().map(|w| capitalize(w)).collect(),
    }
}

/// Map a JSON Schema primitive token to its RDL base type name. Anything
/// else passes through unchanged.
pub fn canonical_type_name(tname: &str) -> &str {
    SchemaKind::from_token(tname).map_or(tname, |k| k.canonical_name())
}

/// Choose the schema name: `X` when the title reads `"The X API"`, else the
/// file stem (snake-cased if it is not already a plain identifier).
pub fn schema_name(file_stem: &str, title: Option<&str>) -> String {
    if let Some(inner) = title
        .and_then(|t| t.strip_prefix("The "))
        .and_then(|t| t.strip_suffix(" API"))
        .filter(|inner| !inner.is_empty())
    {
        return inner.to_string();
    }
    if file_stem
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        file_stem.to_string()
    } else {
        file_stem.to_snake_case()
    }
}

/// Identifier for a parameter or property name: every character other than
/// an ASCII letter, digit or `_` becomes `_`.
pub fn input_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
