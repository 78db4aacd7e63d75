// SPDX-FileCopyrightText: The route-trie authors
// SPDX-License-Identifier: MPL-2.0

//! Trie-based HTTP request path router.
//!
//! Routes are registered per HTTP method as slash-separated paths composed of
//! literal, `:param`, `:param(regex)`, and `*` wildcard segments. Lookup walks
//! the method's tree one segment at a time with a fixed precedence: static
//! children first, then the single regex, parameter, or wildcard child. A
//! wildcard node additionally absorbs any unmatched remainder of the path.

mod node;
pub use self::node::{DynamicKind, PathNode, SegmentMatcher};

mod path;

mod router;
pub use self::router::{AddRouteError, Router};

#[cfg(feature = "im")]
type HashMap<K, V> = im::HashMap<K, V>;

#[cfg(not(feature = "im"))]
type HashMap<K, V> = std::collections::HashMap<K, V>;
