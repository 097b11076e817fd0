//! Tests for the static route table: redirect, view resolution, uniqueness.

use rag_chat_client::router::{resolve, RouteTarget, View, ROUTES};
use std::collections::HashSet;

#[test]
fn root_redirects_to_chat_before_rendering() {
    let root = resolve("/").expect("/ should resolve");
    let chat = resolve("/chat").expect("/chat should resolve");
    assert_eq!(root, chat);
    assert_eq!(root.name, "chat");
    assert_eq!(root.view, View::Chat);
}

#[test]
fn knowledge_path_renders_knowledge_view() {
    let resolved = resolve("/knowledge").expect("/knowledge should resolve");
    assert_eq!(resolved.name, "knowledge");
    assert_eq!(resolved.view, View::Knowledge);
    assert_ne!(resolved.view, View::Chat);
}

#[test]
fn unmatched_paths_resolve_to_none() {
    for path in ["/admin", "/chat/", "/CHAT", "/knowledge/list", "", "chat"] {
        assert!(resolve(path).is_none(), "{:?} should not resolve", path);
    }
}

#[test]
fn route_paths_are_unique() {
    let mut seen = HashSet::new();
    for entry in ROUTES {
        assert!(seen.insert(entry.path), "duplicate route path {}", entry.path);
    }
}

#[test]
fn every_redirect_target_exists_in_the_table() {
    let paths: HashSet<&str> = ROUTES.iter().map(|e| e.path).collect();
    for entry in ROUTES {
        if let RouteTarget::Redirect(target) = entry.target {
            assert!(
                paths.contains(target),
                "redirect {} -> {} points outside the table",
                entry.path,
                target
            );
        }
    }
}

#[test]
fn every_rendered_view_is_named() {
    for entry in ROUTES {
        if let RouteTarget::Render { name, .. } = entry.target {
            assert!(!name.is_empty(), "view route {} must be named", entry.path);
        }
    }
}
