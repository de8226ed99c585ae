//! Media query generation for breakpoint ranges.
//!
//! [`QueryFactory`] turns a [`BreakpointsDefinition`] into the media query
//! strings used to match a viewport against the breakpoint ranges:
//!
//! ```rust
//! use lattice::{Breakpoint, BreakpointsDefinition, QueryFactory, QueryOptions};
//!
//! let queries = QueryFactory::new(BreakpointsDefinition::default(), QueryOptions::default());
//! assert_eq!(queries.up(Breakpoint::Md), "@media screen and (min-width: 960px)");
//! assert_eq!(
//!     queries.only(Breakpoint::Sm),
//!     "@media screen and (min-width: 600px) and (max-width: 959.95px)"
//! );
//! ```

use std::fmt;

use crate::{
    breakpoint::{Breakpoint, BreakpointSet, BreakpointsDefinition},
    error::{BreakpointError, ParseQueryError},
};

pub const MEDIA_QUERY_PREFIX: &str = "@media";

/// Subtracted from the next breakpoint's width to get the upper bound of a
/// range, so a width exactly on a boundary only matches one range.
pub const BREAKPOINT_DELTA: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Emit bare predicates instead of `@media` rules.
    pub query_only: bool,
}

/// A `screen` media query constrained by an inclusive width range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediaQuery {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
}

impl MediaQuery {
    pub fn min(width: f64) -> Self {
        Self {
            min_width: Some(width),
            max_width: None,
        }
    }

    pub fn max(width: f64) -> Self {
        Self {
            min_width: None,
            max_width: Some(width),
        }
    }

    pub fn and_max(self, width: f64) -> Self {
        Self {
            max_width: Some(width),
            ..self
        }
    }

    pub fn matches(&self, width: f64) -> bool {
        self.min_width.is_none_or(|min| width >= min)
            && self.max_width.is_none_or(|max| width <= max)
    }

    /// Parse a query produced by [`QueryFactory`], with or without the
    /// `@media` prefix.
    pub fn parse(query: &str) -> Result<Self, ParseQueryError> {
        let query = query.trim();
        let query = query
            .strip_prefix(MEDIA_QUERY_PREFIX)
            .map(str::trim_start)
            .unwrap_or(query);
        if query.is_empty() {
            return Err(ParseQueryError::Empty);
        }

        let mut parsed = MediaQuery::default();
        for (i, part) in query.split(" and ").enumerate() {
            let part = part.trim();
            if i == 0 && part == "screen" {
                continue;
            }

            let feature = part
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .ok_or_else(|| ParseQueryError::UnsupportedFeature(part.to_string()))?;
            let (name, value) = feature
                .split_once(':')
                .ok_or_else(|| ParseQueryError::UnsupportedFeature(part.to_string()))?;
            let name = name.trim();
            let slot = match name {
                "min-width" => &mut parsed.min_width,
                "max-width" => &mut parsed.max_width,
                _ => return Err(ParseQueryError::UnsupportedFeature(name.to_string())),
            };

            let value = value.trim();
            let px = value
                .strip_suffix("px")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseQueryError::InvalidLength(value.to_string()))?;
            if slot.replace(px).is_some() {
                return Err(ParseQueryError::DuplicateFeature(name.to_string()));
            }
        }

        Ok(parsed)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("screen")?;
        if let Some(min) = self.min_width {
            write!(f, " and (min-width: {min}px)")?;
        }
        if let Some(max) = self.max_width {
            write!(f, " and (max-width: {max}px)")?;
        }
        Ok(())
    }
}

/// Builds media queries for the ranges of a [`BreakpointsDefinition`].
#[derive(Clone, Debug)]
pub struct QueryFactory<B: BreakpointSet = Breakpoint> {
    breakpoints: BreakpointsDefinition<B>,
    prefix: &'static str,
}

impl<B: BreakpointSet> QueryFactory<B> {
    pub fn new(breakpoints: BreakpointsDefinition<B>, options: QueryOptions) -> Self {
        Self {
            breakpoints,
            prefix: if options.query_only { "" } else { "@media " },
        }
    }

    pub fn breakpoints(&self) -> &BreakpointsDefinition<B> {
        &self.breakpoints
    }

    /// Matches widths at or above `start`.
    pub fn up(&self, start: B) -> String {
        self.render(self.up_query(start))
    }

    /// Matches widths up to the end of the `end` range.
    ///
    /// The widest breakpoint has no end, so `down` of it matches everything
    /// and is the same query as `up` of the narrowest.
    pub fn down(&self, end: B) -> String {
        self.render(self.down_query(end))
    }

    /// Matches widths from the start of `start` to the end of `end`.
    pub fn between(&self, start: B, end: B) -> String {
        self.render(self.between_query(start, end))
    }

    /// Matches exactly the range owned by `breakpoint`.
    pub fn only(&self, breakpoint: B) -> String {
        self.between(breakpoint, breakpoint)
    }

    pub fn width(&self, breakpoint: B) -> f64 {
        self.breakpoints.width(breakpoint)
    }

    pub fn up_query(&self, start: B) -> MediaQuery {
        MediaQuery::min(self.width(start))
    }

    pub fn down_query(&self, end: B) -> MediaQuery {
        match self.upper_width(end) {
            Ok(max) => MediaQuery::max(max),
            Err(_) => self.up_query(self.breakpoints.first()),
        }
    }

    pub fn between_query(&self, start: B, end: B) -> MediaQuery {
        let up = self.up_query(start);
        match self.upper_width(end) {
            Ok(max) => up.and_max(max),
            Err(_) => up,
        }
    }

    pub fn only_query(&self, breakpoint: B) -> MediaQuery {
        self.between_query(breakpoint, breakpoint)
    }

    fn upper_width(&self, breakpoint: B) -> Result<f64, BreakpointError> {
        let next = breakpoint
            .next()
            .ok_or_else(|| BreakpointError::InvalidBreakpoint(breakpoint.name().to_string()))?;
        Ok(self.width(next) - BREAKPOINT_DELTA)
    }

    fn render(&self, query: MediaQuery) -> String {
        format!("{}{query}", self.prefix)
    }
}
