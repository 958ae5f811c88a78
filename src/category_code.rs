// Copyright 2025 Cowboy AI, LLC.

//! Hierarchical category code algebra.
//!
//! A category code is a dotted sequence of fixed-width, zero-padded decimal
//! segments (e.g. `00001.00042.00005`). Each segment addresses a node among
//! its siblings, so the full code addresses a node from the root of the
//! category tree. A missing code denotes a root category with no parent.
//!
//! The free functions operate on raw stored strings and only reject what they
//! structurally need (an empty code). [`CategoryCode`] is the validated value
//! object used by the catalog entities.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// Number of digits in one code segment.
pub const CODE_SEGMENT_WIDTH: usize = 5;

/// Maximum depth of a category hierarchy.
pub const MAX_DEPTH: usize = 16;

/// Maximum length of a stored category code.
pub const MAX_CODE_LENGTH: usize = MAX_DEPTH * (CODE_SEGMENT_WIDTH + 1) - 1;

/// Largest number a single segment can hold.
pub const MAX_SEGMENT_VALUE: u32 = 99_999;

const SEPARATOR: char = '.';

fn require_code<'a>(argument: &str, code: &'a str) -> CatalogResult<&'a str> {
    if code.is_empty() {
        return Err(CatalogError::invalid_argument(
            argument,
            format!("{argument} can not be null or empty."),
        ));
    }
    Ok(code)
}

fn format_segment(number: u32) -> CatalogResult<String> {
    if number > MAX_SEGMENT_VALUE {
        return Err(CatalogError::invalid_argument(
            "numbers",
            format!("segment {number} does not fit in {CODE_SEGMENT_WIDTH} digits"),
        ));
    }
    Ok(format!("{number:0width$}", width = CODE_SEGMENT_WIDTH))
}

/// Create a code from segment numbers, e.g. `create_code(&[4, 2])` is
/// `00004.00002`. Returns `None` for an empty slice.
pub fn create_code(numbers: &[u32]) -> CatalogResult<Option<String>> {
    if numbers.is_empty() {
        return Ok(None);
    }
    if numbers.len() > MAX_DEPTH {
        return Err(CatalogError::invalid_argument(
            "numbers",
            format!("a code can not be deeper than {MAX_DEPTH} segments"),
        ));
    }
    let segments = numbers
        .iter()
        .map(|n| format_segment(*n))
        .collect::<CatalogResult<Vec<_>>>()?;
    Ok(Some(segments.join(".")))
}

/// Append a child code to a parent code. An absent or empty parent yields
/// the child unchanged.
pub fn append_code(parent_code: Option<&str>, child_code: &str) -> CatalogResult<String> {
    let child_code = require_code("child_code", child_code)?;
    match parent_code {
        Some(parent) if !parent.is_empty() => Ok(format!("{parent}{SEPARATOR}{child_code}")),
        _ => Ok(child_code.to_string()),
    }
}

/// Return `code` relative to `parent_code`.
///
/// An absent parent returns `code` unchanged and `code == parent_code`
/// returns `None`. A `code` that does not descend from `parent_code` is
/// rejected.
pub fn relative_code<'a>(code: &'a str, parent_code: Option<&str>) -> CatalogResult<Option<&'a str>> {
    let code = require_code("code", code)?;
    let parent = match parent_code {
        Some(parent) if !parent.is_empty() => parent,
        _ => return Ok(Some(code)),
    };
    if code == parent {
        return Ok(None);
    }
    code.strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .filter(|rest| !rest.is_empty())
        .map(Some)
        .ok_or_else(|| {
            CatalogError::invalid_argument(
                "parent_code",
                format!("{code} is not a descendant of {parent}"),
            )
        })
}

/// Compute the code of the next sibling: the last segment is incremented and
/// the parent prefix is kept.
pub fn next_code(code: &str) -> CatalogResult<String> {
    let code = require_code("code", code)?;
    let last = last_segment(code)?;
    let not_decimal =
        || CatalogError::invalid_argument("code", format!("segment `{last}` is not a decimal number"));
    if !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_decimal());
    }
    let number: u32 = last.parse().map_err(|_| not_decimal())?;
    if number >= MAX_SEGMENT_VALUE {
        return Err(CatalogError::invalid_argument(
            "code",
            format!("no sibling code follows {code}"),
        ));
    }
    append_code(parent_prefix(code)?, &format_segment(number + 1)?)
}

/// Last segment of a code.
pub fn last_segment(code: &str) -> CatalogResult<&str> {
    let code = require_code("code", code)?;
    Ok(code.rsplit_once(SEPARATOR).map_or(code, |(_, last)| last))
}

/// Everything but the last segment; `None` for a single-segment code.
pub fn parent_prefix(code: &str) -> CatalogResult<Option<&str>> {
    let code = require_code("code", code)?;
    Ok(code.rsplit_once(SEPARATOR).map(|(prefix, _)| prefix))
}

/// Check that a stored string satisfies every code invariant.
pub fn validate_code(code: &str) -> CatalogResult<()> {
    let code = require_code("code", code)?;
    if code.len() > MAX_CODE_LENGTH {
        return Err(CatalogError::invalid_argument(
            "code",
            format!("Category code can not be longer than {MAX_CODE_LENGTH}"),
        ));
    }
    for segment in code.split(SEPARATOR) {
        if segment.len() != CODE_SEGMENT_WIDTH || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CatalogError::invalid_argument(
                "code",
                format!("invalid segment `{segment}` in {code}"),
            ));
        }
    }
    Ok(())
}

/// Validated category code.
///
/// Fixed-width segments make the lexical order of codes match the pre-order
/// of the tree, so `Ord` sorts parents before their children.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryCode(String);

impl CategoryCode {
    /// Parse and validate a dotted code.
    pub fn parse(input: &str) -> CatalogResult<Self> {
        validate_code(input)?;
        Ok(Self(input.to_string()))
    }

    /// Build a code from its segment numbers.
    pub fn from_segments(numbers: &[u32]) -> CatalogResult<Self> {
        create_code(numbers)?
            .map(Self)
            .ok_or_else(|| CatalogError::invalid_argument("numbers", "numbers can not be empty."))
    }

    /// Single-segment code of a root category.
    pub fn root(number: u32) -> CatalogResult<Self> {
        Self::from_segments(&[number])
    }

    /// View the stored string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment numbers from the root down.
    pub fn segments(&self) -> impl Iterator<Item = u32> + '_ {
        // Validated on construction; every segment is five digits.
        self.0.split(SEPARATOR).filter_map(|s| s.parse().ok())
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.split(SEPARATOR).count()
    }

    /// Number held by the last segment.
    pub fn last_segment(&self) -> u32 {
        self.segments().last().unwrap_or_default()
    }

    /// Code of the parent category, `None` at the root.
    pub fn parent(&self) -> Option<CategoryCode> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(prefix, _)| Self(prefix.to_string()))
    }

    /// Code of the `number`-th child of this category.
    pub fn child(&self, number: u32) -> CatalogResult<Self> {
        let segment = format_segment(number)?;
        self.append(&Self(segment))
    }

    /// Code of the next sibling.
    pub fn next(&self) -> CatalogResult<Self> {
        next_code(&self.0).map(Self)
    }

    /// Append a relative code below this one.
    pub fn append(&self, relative: &CategoryCode) -> CatalogResult<Self> {
        let joined = append_code(Some(&self.0), &relative.0)?;
        if self.depth() + relative.depth() > MAX_DEPTH {
            return Err(CatalogError::InvariantViolation(format!(
                "category {joined} would be deeper than {MAX_DEPTH} levels"
            )));
        }
        Ok(Self(joined))
    }

    /// Append `relative` to an optional parent; `None` keeps it as a root code.
    pub fn append_to(parent: Option<&CategoryCode>, relative: &CategoryCode) -> CatalogResult<Self> {
        match parent {
            Some(parent) => parent.append(relative),
            None => Ok(relative.clone()),
        }
    }

    /// This code relative to `ancestor`; `None` when both are equal.
    pub fn relative_to(&self, ancestor: Option<&CategoryCode>) -> CatalogResult<Option<Self>> {
        let relative = relative_code(&self.0, ancestor.map(CategoryCode::as_str))?;
        Ok(relative.map(|r| Self(r.to_string())))
    }

    /// True when `other` lies strictly below this code.
    pub fn is_ancestor_of(&self, other: &CategoryCode) -> bool {
        other
            .0
            .strip_prefix(&self.0)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Move this code from below `old_root` to below `new_root`.
    ///
    /// `self` must be `old_root` or one of its descendants.
    pub fn rebase(&self, old_root: &CategoryCode, new_root: &CategoryCode) -> CatalogResult<Self> {
        match self.relative_to(Some(old_root))? {
            Some(relative) => new_root.append(&relative),
            None => Ok(new_root.clone()),
        }
    }
}

impl Display for CategoryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryCode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryCode::parse(s)
    }
}

impl TryFrom<String> for CategoryCode {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_code(&value)?;
        Ok(Self(value))
    }
}

impl From<CategoryCode> for String {
    fn from(code: CategoryCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CategoryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
