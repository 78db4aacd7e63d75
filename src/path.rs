// SPDX-FileCopyrightText: The route-trie authors
// SPDX-License-Identifier: MPL-2.0

use crate::{AddRouteError, DynamicKind};

pub(crate) const PATH_SEPARATOR: char = '/';

pub(crate) const ROOT_PATH: &str = "/";

const PARAM_PREFIX: char = ':';

const WILDCARD: &str = "*";

/// Validated route registration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RoutePath<'a>(&'a str);

impl<'a> RoutePath<'a> {
    /// Validate a registration path.
    ///
    /// Accepts `/` and paths of one or more non-empty, `/`-separated
    /// segments with a leading and no trailing separator.
    pub(crate) fn parse(path: &'a str) -> Result<Self, AddRouteError> {
        if path.is_empty() {
            return Err(AddRouteError::EmptyPath);
        }
        if !path.starts_with(PATH_SEPARATOR) {
            return Err(AddRouteError::NoLeadingSlash {
                path: path.to_owned(),
            });
        }
        if path != ROOT_PATH {
            if path.ends_with(PATH_SEPARATOR) {
                return Err(AddRouteError::TrailingSlash {
                    path: path.to_owned(),
                });
            }
            if path[1..].split(PATH_SEPARATOR).any(str::is_empty) {
                return Err(AddRouteError::EmptySegment {
                    path: path.to_owned(),
                });
            }
        }
        Ok(Self(path))
    }

    /// Iterate over all path segments, empty for the root path.
    pub(crate) fn segments(&self) -> impl Iterator<Item = &'a str> {
        segments(self.0)
    }
}

/// Segments of a request path.
///
/// Leading, trailing, and duplicate separators are skipped, so only
/// non-empty segments are ever matched against the tree.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split_terminator(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

/// Classified route registration segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouteSegment<'a> {
    Literal(&'a str),
    Param { name: &'a str },
    Pattern { name: &'a str, expr: &'a str },
    Wildcard,
}

impl<'a> RouteSegment<'a> {
    /// Classify one registration segment.
    ///
    /// Checked in this order: wildcard, `:name(expression)` pattern, `:name`
    /// parameter, literal. Segments that only partially resemble a pattern,
    /// such as `:x(` or `:x)`, are treated as literals.
    pub(crate) fn classify(segment: &'a str) -> Result<Self, AddRouteError> {
        if segment == WILDCARD {
            return Ok(Self::Wildcard);
        }
        let Some(tail) = segment.strip_prefix(PARAM_PREFIX) else {
            return Ok(Self::Literal(segment));
        };
        if segment.contains('(') && segment.ends_with(')') {
            let inner = &tail[..tail.len() - 1];
            let mut parts = inner.split('(');
            if let (Some(name), Some(expr), None) = (parts.next(), parts.next(), parts.next()) {
                return Ok(Self::Pattern { name, expr });
            }
            return Err(AddRouteError::MalformedPattern {
                segment: segment.to_owned(),
            });
        }
        if !segment.contains('(') && !segment.ends_with(')') {
            return Ok(Self::Param { name: tail });
        }
        Ok(Self::Literal(segment))
    }

    pub(crate) const fn dynamic_kind(&self) -> Option<DynamicKind> {
        match self {
            Self::Literal(_) => None,
            Self::Param { .. } => Some(DynamicKind::Parameter),
            Self::Pattern { .. } => Some(DynamicKind::Regex),
            Self::Wildcard => Some(DynamicKind::Wildcard),
        }
    }
}
