//! Test fixtures - search result pages and recipe bodies.

#![allow(dead_code)]

/// Result page with two recipe links and one non-recipe link.
pub fn binary_tree_page() -> String {
    result_page(&[
        "http://code.activestate.com/recipes/577478-binary-tree/",
        "http://code.activestate.com/recipes/511508-binary-search-tree-in-python/",
        "http://code.activestate.com/recipes/module-index/",
    ])
}

/// Result page in the search engine's list markup.
pub fn result_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(
                "<li class=\"b_algo\"><h2><a href=\"{href}\">result</a></h2><p>snippet</p></li>"
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>results</title></head>\
         <body><ol id=\"b_results\">{items}</ol></body></html>"
    )
}

pub const TREE_CODE: &str = r#"class Node:
    def __init__(self, value):
        self.value = value
        self.left = None
        self.right = None
"#;

pub const SEARCH_TREE_DESCRIPTION: &str = "A simple binary search tree with insert and lookup.";
