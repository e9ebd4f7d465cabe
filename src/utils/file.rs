use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    processing::classifier::OverrideList,
};

use super::template::MessageTemplate;

pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

pub fn load_template(path: &Path) -> Result<MessageTemplate> {
    read_text_file(path).map(MessageTemplate::new)
}

/// Reads a JSON array of usernames.
pub fn load_overrides(path: &Path) -> Result<OverrideList> {
    let text = read_text_file(path)?;
    let names: Vec<String> = serde_json::from_str(&text)?;
    Ok(names.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_override_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["u/Alice", "bob"]"#).unwrap();

        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(overrides.len(), 2);
        assert!(overrides.contains("alice"));
    }

    #[test]
    fn rejects_non_array_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"alice": true}}"#).unwrap();
        assert!(matches!(load_overrides(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn missing_template_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("self-promo-warning.txt");
        match load_template(&path) {
            Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn template_is_read_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hello $author\n").unwrap();
        assert_eq!(load_template(file.path()).unwrap().source(), "Hello $author\n");
    }
}
