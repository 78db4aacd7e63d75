// SPDX-FileCopyrightText: The route-trie authors
// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

use crate::{
    node::{DynamicKind, PathNode},
    path::{self, RoutePath},
    HashMap,
};

/// Errors detected while registering a route.
///
/// All of them are configuration errors. Callers are expected to register
/// routes during start-up and treat any error as fatal; the router provides
/// no way to repair a partially registered route.
#[derive(Debug, Error)]
pub enum AddRouteError {
    #[error("empty route path")]
    EmptyPath,
    #[error("route path {path:?} does not start with a slash")]
    NoLeadingSlash { path: String },
    #[error("route path {path:?} ends with a slash")]
    TrailingSlash { path: String },
    #[error("route path {path:?} contains an empty segment")]
    EmptySegment { path: String },
    #[error("malformed pattern segment {segment:?}, expected `:name(expression)`")]
    MalformedPattern { segment: String },
    #[error("failed to compile the expression of pattern segment {segment:?}")]
    InvalidRegex {
        segment: String,
        source: regex::Error,
    },
    #[error("{requested} segment {segment:?} conflicts with an existing {existing} segment at the same position")]
    SegmentKindConflict {
        segment: String,
        existing: DynamicKind,
        requested: DynamicKind,
    },
    #[error("segment {requested:?} differs from the {kind} segment {existing:?} registered at the same position")]
    SegmentMismatch {
        kind: DynamicKind,
        existing: String,
        requested: String,
    },
    #[error("a handler is already registered for {method} {path:?}")]
    HandlerConflict { method: String, path: String },
}

/// Forest of route trees, one per HTTP method.
///
/// Built incrementally by [`Self::add_route`] and meant to be treated as
/// immutable afterwards. Lookups never mutate, so a finished router can be
/// shared or cloned freely across request-handling threads. With the `im`
/// feature enabled (default), clones share structure and are cheap.
///
/// Registration is not synchronized internally and must not run concurrently
/// with lookups.
#[derive(Debug, Clone)]
pub struct Router<H> {
    trees: HashMap<String, PathNode<H>>,
}

impl<H> Router<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// Find the node matching a request path.
    ///
    /// Walks the method's tree one segment at a time. At every node the
    /// static children take strict precedence; only a node without static
    /// children consults its regex, parameter, or wildcard child. When no
    /// child matches a segment, the remainder of the path collapses onto the
    /// current node if that node is a wildcard.
    ///
    /// Returns `None` if no tree exists for `method` or the walk gets stuck.
    /// A returned node is not necessarily an endpoint: callers must check
    /// [`PathNode::handler`] before dispatching.
    // TODO: Collect the parameter bindings of the visited nodes during the
    // walk instead of leaving the extraction to the caller?
    #[must_use]
    pub fn find_route(&self, method: &str, path: &str) -> Option<&PathNode<H>> {
        let mut current = self.trees.get(method)?;
        for segment in path::segments(path) {
            match current.match_child(segment) {
                Some(child) => current = child,
                None => return current.is_wildcard().then_some(current),
            }
        }
        Some(current)
    }

    /// All methods with at least one registered route, in no particular order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }
}

impl<H: Clone> Router<H> {
    /// Register a handler for a method and path.
    ///
    /// The path must be `/` or start with `/`, must not end with `/`, and
    /// must not contain empty segments. Missing tree nodes are created on
    /// the way down; nodes created before a failed registration remain in
    /// the tree.
    ///
    /// # Errors
    ///
    /// Fails if the path is invalid, a pattern segment is malformed or does
    /// not compile, a segment clashes with a different dynamic segment
    /// already registered at the same position, or a handler is already
    /// registered for the exact method and path.
    pub fn add_route(
        &mut self,
        method: &str,
        path: &str,
        handler: H,
    ) -> Result<(), AddRouteError> {
        let route_path = RoutePath::parse(path)?;
        let root = self
            .trees
            .entry(method.to_owned())
            .or_insert_with(|| {
                log::debug!("Creating route tree for method {method}");
                PathNode::new_root()
            });
        let mut node = root;
        for segment in route_path.segments() {
            node = node.child_or_insert(segment)?;
        }
        if node.handler().is_some() {
            return Err(AddRouteError::HandlerConflict {
                method: method.to_owned(),
                path: path.to_owned(),
            });
        }
        node.set_handler(handler);
        log::debug!("Registered handler for {method} {path:?}");
        Ok(())
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
