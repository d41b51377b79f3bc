use std::fs;
use std::path::Path;

use crate::error::{Result, TrackerError};

const IMAGE_PLACEHOLDER: &str = "{image}";
const VERSION_PLACEHOLDER: &str = "{version}";

/// Build definition written for every release when no template file is configured
pub const DEFAULT_TEMPLATE: &str = "FROM {image}:{version}\n\
\n\
LABEL org.opencontainers.image.version=\"{version}\"\n";

/// Text template for the generated build definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTemplate {
    text: String,
}

impl BuildTemplate {
    /// Create a template from text; it must reference `{version}`
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !text.contains(VERSION_PLACEHOLDER) {
            return Err(TrackerError::template(
                "Template must contain {version} placeholder",
            ));
        }
        Ok(BuildTemplate { text })
    }

    /// Load the template from `path`, or fall back to [`DEFAULT_TEMPLATE`]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    TrackerError::template(format!(
                        "Cannot read template '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::new(text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Fill in image name and version
    pub fn render(&self, image: &str, version: &str) -> String {
        self.text
            .replace(IMAGE_PLACEHOLDER, image)
            .replace(VERSION_PLACEHOLDER, version)
    }
}

impl Default for BuildTemplate {
    fn default() -> Self {
        BuildTemplate {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_default() {
        let rendered = BuildTemplate::default().render("gitlab/gitlab-ce", "11.4.0-ce.0");
        assert!(rendered.starts_with("FROM gitlab/gitlab-ce:11.4.0-ce.0\n"));
        assert!(rendered.contains("version=\"11.4.0-ce.0\""));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = BuildTemplate::new("{image}:{version} {image}:{version}").unwrap();
        assert_eq!(template.render("img", "1.0.0-ee.1"), "img:1.0.0-ee.1 img:1.0.0-ee.1");
    }

    #[test]
    fn test_template_requires_version_placeholder() {
        assert!(BuildTemplate::new("FROM {image}:latest").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"FROM {image}:{version}\nRUN true\n").unwrap();
        file.flush().unwrap();

        let template = BuildTemplate::load(Some(file.path())).unwrap();
        assert_eq!(
            template.render("gitlab/gitlab-ee", "1.2.3-ee.0"),
            "FROM gitlab/gitlab-ee:1.2.3-ee.0\nRUN true\n"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = BuildTemplate::load(Some(Path::new("/nonexistent/Dockerfile.tmpl"))).unwrap_err();
        assert!(err.to_string().contains("Cannot read template"));
    }

    #[test]
    fn test_load_none_is_default() {
        assert_eq!(BuildTemplate::load(None).unwrap(), BuildTemplate::default());
    }
}
