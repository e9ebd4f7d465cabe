use crate::error::{Error, Result};

/// Message text with `$name` or `${name}` placeholders. `$$` is a literal `$`,
/// as is a `$` that does not start a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
}

impl MessageTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                out.push('$');
                rest = tail;
                continue;
            }

            let (name, tail) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(end) if is_identifier(&braced[..end]) => (&braced[..end], &braced[end + 1..]),
                    _ => ("", after),
                },
                None => {
                    let end = after
                        .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
                        .unwrap_or(after.len());
                    if is_identifier(&after[..end]) {
                        (&after[..end], &after[end..])
                    } else {
                        ("", after)
                    }
                }
            };

            if name.is_empty() {
                out.push('$');
            } else {
                let value = vars
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| Error::Template(name.to_owned()))?;
                out.push_str(value);
            }
            rest = tail;
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
