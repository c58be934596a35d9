//! Marker lookup over Markdown documents.
//!
//! Scoring code asks a [`SectionMatcher`] which markers a document contains
//! and only ever looks at the returned list, so the matching strategy can
//! change without touching any score arithmetic.

/// Finds which of a fixed list of section markers appear in a document.
pub trait SectionMatcher {
    /// Return the markers present in `content`, in the order of `markers`.
    fn find<'m>(&self, content: &str, markers: &[&'m str]) -> Vec<&'m str>;

    fn count(&self, content: &str, markers: &[&str]) -> usize {
        self.find(content, markers).len()
    }
}

/// Case-sensitive substring search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl SectionMatcher for ExactMatcher {
    fn find<'m>(&self, content: &str, markers: &[&'m str]) -> Vec<&'m str> {
        markers
            .iter()
            .copied()
            .filter(|m| content.contains(m))
            .collect()
    }
}

/// Substring search after lowercasing both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveMatcher;

impl SectionMatcher for CaseInsensitiveMatcher {
    fn find<'m>(&self, content: &str, markers: &[&'m str]) -> Vec<&'m str> {
        let haystack = content.to_lowercase();
        markers
            .iter()
            .copied()
            .filter(|m| haystack.contains(&m.to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: [&str; 3] = ["## Overview", "Persona", "# 🤖"];

    #[test]
    fn exact_is_case_sensitive() {
        let found = ExactMatcher.find("## overview\nPersona", &MARKERS);
        assert_eq!(found, vec!["Persona"]);
    }

    #[test]
    fn case_insensitive_ignores_case() {
        let found = CaseInsensitiveMatcher.find("## OVERVIEW\npersona", &MARKERS);
        assert_eq!(found, vec!["## Overview", "Persona"]);
    }

    #[test]
    fn results_follow_marker_order() {
        let found = ExactMatcher.find("# 🤖 Agent\nPersona\n## Overview", &MARKERS);
        assert_eq!(found, MARKERS.to_vec());
    }

    #[test]
    fn count_matches_find() {
        assert_eq!(CaseInsensitiveMatcher.count("nothing here", &MARKERS), 0);
        assert_eq!(ExactMatcher.count("# 🤖 x", &MARKERS), 1);
    }
}
