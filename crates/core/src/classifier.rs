use crate::models::PackageType;
use crate::stdlib::stdlib_packages;
use std::collections::HashSet;

/// Classifies import paths as stdlib, third-party, or local.
///
/// Classification depends only on the static stdlib table and the
/// optional local-package prefix, so a classifier is safe to share
/// across files.
pub struct ImportClassifier {
    /// Go stdlib import paths
    stdlib: HashSet<&'static str>,
    /// Import-path prefix of the caller's own module
    local_package: Option<String>,
}

impl ImportClassifier {
    pub fn new(local_package: Option<&str>) -> Self {
        Self {
            stdlib: stdlib_packages(),
            local_package: local_package
                .filter(|p| !p.is_empty())
                .map(String::from),
        }
    }

    /// Classify an unquoted import path.
    ///
    /// The check order is significant: stdlib and local-prefix
    /// matches take precedence over the dot heuristic.
    pub fn classify(&self, path: &str) -> PackageType {
        if self.stdlib.contains(path) {
            return PackageType::StandardLibrary;
        }
        if let Some(ref prefix) = self.local_package {
            if path.starts_with(prefix.as_str()) {
                return PackageType::LocalPackage;
            }
        }
        if path.contains('.') {
            // Dotted paths are hosted on a domain (github.com/...,
            // golang.org/x/...), which in practice marks third-party.
            return PackageType::ThirdParty;
        }
        // Not stdlib and not obviously third-party, assume local.
        PackageType::LocalPackage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib() {
        let classifier = ImportClassifier::new(None);
        assert_eq!(classifier.classify("fmt"), PackageType::StandardLibrary);
        assert_eq!(
            classifier.classify("net/http"),
            PackageType::StandardLibrary
        );
        assert_eq!(classifier.classify("go/token"), PackageType::StandardLibrary);
    }

    #[test]
    fn test_third_party_dotted() {
        let classifier = ImportClassifier::new(None);
        assert_eq!(
            classifier.classify("github.com/foo/bar"),
            PackageType::ThirdParty
        );
        assert_eq!(
            classifier.classify("golang.org/x/tools/imports"),
            PackageType::ThirdParty
        );
    }

    #[test]
    fn test_local_prefix() {
        let classifier = ImportClassifier::new(Some("github.com/me/proj"));
        assert_eq!(
            classifier.classify("github.com/me/proj/sub"),
            PackageType::LocalPackage
        );
        // The prefix check beats the dot heuristic.
        assert_eq!(
            classifier.classify("github.com/me/proj"),
            PackageType::LocalPackage
        );
        // Other dotted paths stay third-party.
        assert_eq!(
            classifier.classify("github.com/other/pkg"),
            PackageType::ThirdParty
        );
    }

    #[test]
    fn test_stdlib_beats_local_prefix() {
        let classifier = ImportClassifier::new(Some("fmt"));
        assert_eq!(classifier.classify("fmt"), PackageType::StandardLibrary);
    }

    #[test]
    fn test_dotless_fallback_is_local() {
        let classifier = ImportClassifier::new(None);
        assert_eq!(classifier.classify("myproject/util"), PackageType::LocalPackage);
        assert_eq!(classifier.classify("internalpkg"), PackageType::LocalPackage);
    }

    #[test]
    fn test_empty_prefix_is_no_override() {
        let classifier = ImportClassifier::new(Some(""));
        assert_eq!(
            classifier.classify("github.com/foo/bar"),
            PackageType::ThirdParty
        );
    }
}
