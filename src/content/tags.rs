//! Tag index derived from the post store

use std::collections::{BTreeMap, BTreeSet};

use super::Post;

/// All distinct tags across `posts`, sorted lexicographically
pub fn distinct_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of posts carrying each tag, sorted by tag
pub fn tag_counts(posts: &[Post]) -> Vec<(&str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(slug: &str, tags: &[&str]) -> Post {
        let mut p = Post::new(slug, slug);
        p.tags = tags.iter().map(|t| t.to_string()).collect();
        p
    }

    #[test]
    fn test_distinct_tags_sorted_without_duplicates() {
        let posts = vec![
            tagged("a", &["web-development", "css"]),
            tagged("b", &["design", "css"]),
            tagged("c", &[]),
            tagged("d", &["Accessibility", "design"]),
        ];
        let tags = distinct_tags(&posts);
        assert_eq!(tags, vec!["Accessibility", "css", "design", "web-development"]);
    }

    #[test]
    fn test_empty_store_has_no_tags() {
        assert!(distinct_tags(&[]).is_empty());
        assert!(tag_counts(&[]).is_empty());
    }

    #[test]
    fn test_tag_counts() {
        let posts = vec![tagged("a", &["css", "design"]), tagged("b", &["css"])];
        assert_eq!(tag_counts(&posts), vec![("css", 2), ("design", 1)]);
    }
}
