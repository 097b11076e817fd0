//! Static route table for the frontend views: history-style paths, exact
//! match only, with the root redirect to `/chat`.

/// Views selectable by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    Knowledge,
}

/// Where a route entry leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a named view.
    Render { name: &'static str, view: View },
    /// Redirect to another path before anything renders.
    Redirect(&'static str),
}

/// One row of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub path: &'static str,
    pub target: RouteTarget,
}

/// The full route table. Defined at compile time, never mutated.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/",
        target: RouteTarget::Redirect("/chat"),
    },
    RouteEntry {
        path: "/chat",
        target: RouteTarget::Render {
            name: "chat",
            view: View::Chat,
        },
    },
    RouteEntry {
        path: "/knowledge",
        target: RouteTarget::Render {
            name: "knowledge",
            view: View::Knowledge,
        },
    },
];

/// A resolved navigation: the named view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub name: &'static str,
    pub view: View,
}

// Bounds redirect chains so a miswritten table cannot loop.
const MAX_REDIRECT_HOPS: usize = 8;

fn lookup(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Resolve a requested path to a view, following redirects first.
/// Paths without a table entry resolve to `None`; what to render then is
/// owned by the caller (the table defines no catch-all).
pub fn resolve(path: &str) -> Option<Resolved> {
    let mut current = path;
    for _ in 0..MAX_REDIRECT_HOPS {
        match lookup(current)?.target {
            RouteTarget::Render { name, view } => return Some(Resolved { name, view }),
            RouteTarget::Redirect(next) => current = next,
        }
    }
    None
}
