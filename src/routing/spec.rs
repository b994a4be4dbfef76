//! Mount specification parsing
//!
//! A mount is written on the command line as `ID` or `ID:/root-path`; the
//! root, when present, must start with `/`.

use crate::error::{Error, Result};
use crate::types::CollectionMount;

/// Ordered accumulator of parsed collection mounts.
#[derive(Debug, Default)]
pub struct CollectionSpecs {
    mounts: Vec<CollectionMount>,
}

impl CollectionSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one `ID` / `ID:/root` specification and append it.
    pub fn add(&mut self, spec: &str) -> Result<()> {
        self.mounts.push(parse_spec(spec)?);
        Ok(())
    }

    pub fn mounts(&self) -> &[CollectionMount] {
        &self.mounts
    }

    pub fn into_mounts(self) -> Vec<CollectionMount> {
        self.mounts
    }
}

fn parse_spec(spec: &str) -> Result<CollectionMount> {
    let (id, root) = match spec.split_once(':') {
        Some((id, root)) => (id, Some(root)),
        None => (spec, None),
    };

    if id.is_empty() {
        return Err(Error::Config(format!(
            "Invalid collection specification '{}': collection id is empty",
            spec
        )));
    }

    let root = match root {
        Some(root) if !root.starts_with('/') => {
            return Err(Error::Config(format!(
                "Invalid root path '{}': Root path must start with '/'",
                root
            )));
        }
        Some(root) => Some(root.to_string()),
        None => None,
    };

    Ok(CollectionMount::new(id, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_collection_without_root() {
        let mut specs = CollectionSpecs::new();
        specs.add("abc123").unwrap();
        assert_eq!(specs.mounts(), &[CollectionMount::new("abc123", None)]);
    }

    #[test]
    fn test_single_collection_with_root() {
        let mut specs = CollectionSpecs::new();
        specs.add("abc123:/api/v1").unwrap();
        assert_eq!(
            specs.mounts(),
            &[CollectionMount::new("abc123", Some("/api/v1".to_string()))]
        );
    }

    #[test]
    fn test_multiple_collections_with_mixed_roots() {
        let mut specs = CollectionSpecs::new();
        specs.add("abc123").unwrap();
        specs.add("def456:/api/v2").unwrap();
        specs.add("ghi789:/api/v3").unwrap();
        assert_eq!(
            specs.mounts(),
            &[
                CollectionMount::new("abc123", None),
                CollectionMount::new("def456", Some("/api/v2".to_string())),
                CollectionMount::new("ghi789", Some("/api/v3".to_string())),
            ]
        );
    }

    #[test]
    fn test_root_without_leading_slash_is_rejected() {
        let mut specs = CollectionSpecs::new();
        let err = specs.add("abc123:api/v1").unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_empty_collection_id_is_rejected() {
        let mut specs = CollectionSpecs::new();
        assert!(specs.add(":/api/v1").is_err());
        assert!(specs.add("").is_err());
    }
}
