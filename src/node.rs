// SPDX-FileCopyrightText: The route-trie authors
// SPDX-License-Identifier: MPL-2.0

use regex::Regex;

use crate::{
    path::{RouteSegment, ROOT_PATH},
    AddRouteError, HashMap,
};

/// What a node matches, fixed when the route is registered.
#[derive(Debug, Clone)]
pub enum SegmentMatcher {
    /// Exact segment text. The root node carries the literal `/`.
    Literal(String),
    /// `:name`, matches any single segment.
    Param(String),
    /// `:name(expression)`, matches a segment the expression matches.
    Pattern {
        name: String,
        regex: Regex,
    },
    /// `*`, matches any single segment and absorbs an unmatched path suffix.
    Wildcard,
}

impl SegmentMatcher {
    fn try_from_segment(segment: &RouteSegment<'_>, raw: &str) -> Result<Self, AddRouteError> {
        match segment {
            RouteSegment::Literal(literal) => Ok(Self::Literal((*literal).to_owned())),
            RouteSegment::Param { name } => Ok(Self::Param((*name).to_owned())),
            RouteSegment::Pattern { name, expr } => {
                let regex = Regex::new(expr).map_err(|source| AddRouteError::InvalidRegex {
                    segment: raw.to_owned(),
                    source,
                })?;
                Ok(Self::Pattern {
                    name: (*name).to_owned(),
                    regex,
                })
            }
            RouteSegment::Wildcard => Ok(Self::Wildcard),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == segment,
            Self::Param(_) | Self::Wildcard => true,
            Self::Pattern { regex, .. } => regex.is_match(segment),
        }
    }

    pub(crate) const fn dynamic_kind(&self) -> Option<DynamicKind> {
        match self {
            Self::Literal(_) => None,
            Self::Param(_) => Some(DynamicKind::Parameter),
            Self::Pattern { .. } => Some(DynamicKind::Regex),
            Self::Wildcard => Some(DynamicKind::Wildcard),
        }
    }

    /// Check that a registration segment can reuse the node with this matcher.
    fn ensure_reusable(
        &self,
        requested: &RouteSegment<'_>,
        raw: &str,
    ) -> Result<(), AddRouteError> {
        match (self, requested) {
            (Self::Wildcard, RouteSegment::Wildcard) => Ok(()),
            (Self::Param(name), RouteSegment::Param {
                name: requested_name,
            }) => {
                if name == requested_name {
                    Ok(())
                } else {
                    Err(AddRouteError::SegmentMismatch {
                        kind: DynamicKind::Parameter,
                        existing: format!(":{name}"),
                        requested: raw.to_owned(),
                    })
                }
            }
            (Self::Pattern { name, regex }, RouteSegment::Pattern {
                name: requested_name,
                expr,
            }) => {
                if name == requested_name && regex.as_str() == *expr {
                    Ok(())
                } else {
                    Err(AddRouteError::SegmentMismatch {
                        kind: DynamicKind::Regex,
                        existing: format!(":{name}({expr})", expr = regex.as_str()),
                        requested: raw.to_owned(),
                    })
                }
            }
            (existing, requested) => Err(AddRouteError::SegmentKindConflict {
                segment: raw.to_owned(),
                existing: existing.dynamic_kind().expect("existing child is dynamic"),
                requested: requested
                    .dynamic_kind()
                    .expect("literal segments are static children"),
            }),
        }
    }
}

/// Kind of a dynamic (non-literal) route segment, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DynamicKind {
    #[display(fmt = "parameter")]
    Parameter,
    #[display(fmt = "regex")]
    Regex,
    #[display(fmt = "wildcard")]
    Wildcard,
}

/// Single node of a route tree, representing one path segment.
///
/// A node owns its literal children and at most one dynamic child, which is
/// either a parameter, a regex, or a wildcard node. Holding the dynamic
/// child in a single slot makes the three kinds mutually exclusive at every
/// tree position.
#[derive(Debug, Clone)]
pub struct PathNode<H> {
    matcher: SegmentMatcher,
    static_children: HashMap<String, PathNode<H>>,
    dynamic_child: Option<Box<PathNode<H>>>,
    handler: Option<H>,
}

impl<H> PathNode<H> {
    fn new(matcher: SegmentMatcher) -> Self {
        Self {
            matcher,
            static_children: HashMap::new(),
            dynamic_child: None,
            handler: None,
        }
    }

    pub(crate) fn new_root() -> Self {
        Self::new(SegmentMatcher::Literal(ROOT_PATH.to_owned()))
    }

    #[must_use]
    pub const fn matcher(&self) -> &SegmentMatcher {
        &self.matcher
    }

    /// The registered handler, if this node is an endpoint of some route.
    ///
    /// Nodes that only exist as junctions on the way to deeper routes
    /// have no handler.
    #[must_use]
    pub const fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// The name bound by a parameter or regex node.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match &self.matcher {
            SegmentMatcher::Param(name) | SegmentMatcher::Pattern { name, .. } => Some(name),
            SegmentMatcher::Literal(_) | SegmentMatcher::Wildcard => None,
        }
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self.matcher, SegmentMatcher::Wildcard)
    }

    pub(crate) fn set_handler(&mut self, handler: H) {
        debug_assert!(self.handler.is_none());
        self.handler = Some(handler);
    }

    /// Select the child matching a request segment.
    ///
    /// A node with any static children never falls through to its dynamic
    /// child, even when the static lookup misses.
    pub(crate) fn match_child(&self, segment: &str) -> Option<&Self> {
        if !self.static_children.is_empty() {
            return self.static_children.get(segment);
        }
        let child = self.dynamic_child.as_deref()?;
        child.matcher.matches(segment).then_some(child)
    }
}

impl<H: Clone> PathNode<H> {
    /// Get or create the child for a registration segment.
    pub(crate) fn child_or_insert(&mut self, segment: &str) -> Result<&mut Self, AddRouteError> {
        let route_segment = RouteSegment::classify(segment)?;
        if let RouteSegment::Literal(literal) = route_segment {
            return Ok(self
                .static_children
                .entry(literal.to_owned())
                .or_insert_with(|| {
                    log::debug!("Inserting new static child node for segment {literal:?}");
                    Self::new(SegmentMatcher::Literal(literal.to_owned()))
                }));
        }
        self.dynamic_child_or_insert(segment, &route_segment)
    }

    fn dynamic_child_or_insert(
        &mut self,
        segment: &str,
        requested: &RouteSegment<'_>,
    ) -> Result<&mut Self, AddRouteError> {
        if let Some(existing) = self.dynamic_child.as_deref() {
            existing.matcher.ensure_reusable(requested, segment)?;
        } else {
            let matcher = SegmentMatcher::try_from_segment(requested, segment)?;
            log::debug!(
                "Inserting new {kind} child node for segment {segment:?}",
                kind = matcher.dynamic_kind().expect("requested child is dynamic")
            );
            self.dynamic_child = Some(Box::new(Self::new(matcher)));
        }
        Ok(self.dynamic_child.as_deref_mut().expect("dynamic child exists"))
    }
}
