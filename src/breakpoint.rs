use std::{fmt, str::FromStr};

use crate::error::BreakpointError;

/// An ordered set of breakpoint names.
///
/// `ALL` lists the breakpoints from the narrowest range to the widest.
pub trait BreakpointSet: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Position of this breakpoint in `ALL`.
    ///
    /// [`BreakpointsDefinition::new`] rejects sets where this disagrees with
    /// `ALL`, so a definition never has to look a breakpoint up by name.
    fn index(self) -> usize;

    /// Key used for this breakpoint in configuration files.
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|bp| bp.name() == name)
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

/// The reference breakpoint set.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl BreakpointSet for Breakpoint {
    const ALL: &'static [Self] = &[
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = BreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Breakpoint::from_name(s) {
            Some(breakpoint) => Ok(breakpoint),
            None => Err(BreakpointError::UnknownBreakpoint(s.to_string())),
        }
    }
}

/// Minimum width in pixels for every breakpoint of a [`BreakpointSet`].
///
/// A definition always has a width for each breakpoint in `B::ALL`, the
/// widths never decrease in breakpoint order, and there are at least two
/// breakpoints. Each breakpoint owns the half-open range from its width up
/// to the width of the next one; the last breakpoint is unbounded above.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointsDefinition<B: BreakpointSet = Breakpoint> {
    widths: Vec<(B, f64)>,
}

impl Default for BreakpointsDefinition<Breakpoint> {
    fn default() -> Self {
        Self {
            widths: vec![
                (Breakpoint::Xs, 0.0),
                (Breakpoint::Sm, 600.0),
                (Breakpoint::Md, 960.0),
                (Breakpoint::Lg, 1280.0),
                (Breakpoint::Xl, 1920.0),
            ],
        }
    }
}

impl<B: BreakpointSet> BreakpointsDefinition<B> {
    /// Build a definition from `(breakpoint, width)` pairs given in any order.
    pub fn new(entries: impl IntoIterator<Item = (B, f64)>) -> Result<Self, BreakpointError> {
        if B::ALL.len() < 2 {
            return Err(BreakpointError::TooFewBreakpoints(B::ALL.len()));
        }

        for (position, &bp) in B::ALL.iter().enumerate() {
            if bp.index() != position {
                return Err(BreakpointError::IndexMismatch {
                    name: bp.name().to_string(),
                    index: bp.index(),
                    position,
                });
            }
        }

        let mut slots: Vec<Option<f64>> = vec![None; B::ALL.len()];
        for (bp, width) in entries {
            let Some(slot) = slots.get_mut(bp.index()) else {
                return Err(BreakpointError::UnknownBreakpoint(bp.name().to_string()));
            };
            if slot.is_some() {
                return Err(BreakpointError::DuplicateWidth(bp.name().to_string()));
            }
            if !width.is_finite() || width < 0.0 {
                return Err(BreakpointError::InvalidWidth {
                    name: bp.name().to_string(),
                    width,
                });
            }
            *slot = Some(width);
        }

        let mut widths: Vec<(B, f64)> = Vec::with_capacity(B::ALL.len());
        for (&bp, slot) in B::ALL.iter().zip(slots) {
            let Some(width) = slot else {
                return Err(BreakpointError::MissingWidth(bp.name().to_string()));
            };
            if let Some(&(previous, previous_width)) = widths.last()
                && width < previous_width
            {
                return Err(BreakpointError::Unordered {
                    name: bp.name().to_string(),
                    width,
                    previous: previous.name().to_string(),
                    previous_width,
                });
            }
            widths.push((bp, width));
        }

        Ok(Self { widths })
    }

    /// # Panics
    ///
    /// If `breakpoint` is not listed in `B::ALL`.
    pub fn width(&self, breakpoint: B) -> f64 {
        self.widths[breakpoint.index()].1
    }

    pub fn first(&self) -> B {
        self.widths[0].0
    }

    pub fn last(&self) -> B {
        self.widths[self.widths.len() - 1].0
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterate over the breakpoints and their widths in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (B, f64)> + '_ {
        self.widths.iter().copied()
    }

    /// The breakpoint whose range contains `width`.
    ///
    /// Widths below the first threshold belong to the first breakpoint.
    pub fn resolve(&self, width: f64) -> B {
        self.widths
            .iter()
            .rev()
            .find(|(_, min)| width >= *min)
            .map(|(bp, _)| *bp)
            .unwrap_or_else(|| self.first())
    }
}
