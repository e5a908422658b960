use std::{fmt, str::FromStr};

use thiserror::Error;

/// `<project_slug>.<resource_slug>` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSelector {
    pub project: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed resource selector '{0}', expected <project>.<resource>")]
pub struct MalformedSelector(pub String);

impl FromStr for ResourceSelector {
    type Err = MalformedSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(project), Some(slug), None) if !project.is_empty() && !slug.is_empty() => {
                Ok(Self {
                    project: project.to_string(),
                    slug: slug.to_string(),
                })
            }
            _ => Err(MalformedSelector(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.project, self.slug)
    }
}

/// Parse every selector, failing on the first malformed one.
pub fn parse_selectors<S: AsRef<str>>(
    selectors: &[S],
) -> Result<Vec<ResourceSelector>, MalformedSelector> {
    selectors.iter().map(|s| s.as_ref().parse()).collect()
}
