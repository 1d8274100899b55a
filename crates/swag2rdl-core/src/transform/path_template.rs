use crate::error::TransformError;

/// Names of the `{name}` and `{name:pattern}` variables in a path template,
/// left to right. The pattern part is discarded.
///
/// An unterminated `{`, a `}` without a matching `{`, a `{` inside a variable
/// or an empty name is a malformed template.
pub fn template_variables(path: &str) -> Result<Vec<&str>, TransformError> {
    let malformed = || TransformError::MalformedPathTemplate {
        path: path.to_string(),
    };

    let mut names = Vec::new();
    let mut open = None;
    for (i, c) in path.char_indices() {
        match (c, open) {
            ('{', None) => open = Some(i + 1),
            ('}', Some(start)) => {
                let inner = &path[start..i];
                let name = inner.split_once(':').map_or(inner, |(name, _)| name);
                if name.is_empty() {
                    return Err(malformed());
                }
                names.push(name);
                open = None;
            }
            ('{', Some(_)) | ('}', None) => return Err(malformed()),
            _ => {}
        }
    }
    if open.is_some() {
        return Err(malformed());
    }
    Ok(names)
}
