// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Class Names: compose a CSS class list from loosely structured input.
//!
//! A [`ClassName`] is one of:
//!
//! - a string (trimmed; empty strings are dropped),
//! - nothing ([`ClassName::None`]),
//! - a nested list of class names,
//! - an ordered map from class name to `bool`, keeping only the `true` entries.
//!
//! [`parse_class_names`] flattens any of these, recursively, into a single space-joined string.
//!
//! ```
//! use understory_class_names::{ClassName, parse_class_names};
//!
//! let classes = ClassName::list([
//!     ClassName::map([("a", true), ("b", false)]),
//!     ClassName::list(["c".into(), ClassName::None, "d".into()]),
//!     ClassName::None,
//! ]);
//! assert_eq!(parse_class_names(&classes), "a c d");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

/// Loosely structured class-name input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClassName<'a> {
    /// Absent value; contributes nothing.
    #[default]
    None,
    /// A single class string. May itself contain several space separated classes.
    Str(Cow<'a, str>),
    /// A nested sequence, flattened in order.
    List(Vec<ClassName<'a>>),
    /// Conditional classes in insertion order; only `true` entries are kept.
    Map(Vec<(Cow<'a, str>, bool)>),
}

impl<'a> ClassName<'a> {
    /// Build a [`ClassName::List`] from anything convertible to class names.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a [`ClassName::Map`] from `(name, enabled)` pairs.
    pub fn map<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<Cow<'a, str>>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(name, on)| (name.into(), on))
                .collect(),
        )
    }

    /// Returns true if this value flattens to an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Str(s) => s.trim().is_empty(),
            Self::List(items) => items.iter().all(Self::is_empty),
            Self::Map(entries) => entries
                .iter()
                .all(|(name, on)| !*on || name.trim().is_empty()),
        }
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Self::None => {}
            Self::Str(s) => push_class(out, s),
            Self::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            Self::Map(entries) => {
                for (name, _) in entries.iter().filter(|(_, on)| *on) {
                    push_class(out, name);
                }
            }
        }
    }
}

fn push_class(out: &mut String, class: &str) {
    let class = class.trim();
    if class.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(class);
}

impl<'a> From<&'a str> for ClassName<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<String> for ClassName<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl<'a, T: Into<Self>> From<Option<T>> for ClassName<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl<'a> From<Vec<Self>> for ClassName<'a> {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl<'a, const N: usize> From<[(&'a str, bool); N]> for ClassName<'a> {
    fn from(entries: [(&'a str, bool); N]) -> Self {
        Self::map(entries)
    }
}

impl core::fmt::Display for ClassName<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&parse_class_names(self))
    }
}

/// Flatten a [`ClassName`] into a single space-joined class string.
///
/// Strings are trimmed, empty and absent values are skipped, and map entries are kept only
/// when their flag is `true`. Nested lists are flattened depth-first in order.
pub fn parse_class_names(class: &ClassName<'_>) -> String {
    let mut out = String::new();
    class.flatten_into(&mut out);
    out
}
