//! # Lattice
//! Lattice tracks which responsive breakpoint a viewport is in.
//!
//! A breakpoint is a named range of viewport widths. A [`BreakpointsDefinition`]
//! gives the minimum width of every breakpoint; each breakpoint then owns the
//! widths from its minimum up to just below the next breakpoint's minimum.
//!
//! ## Media queries
//! [`QueryFactory`] builds the media queries matching those ranges, either as
//! `@media` rules for stylesheets or as bare queries for `matchMedia`:
//!
//! ```rust
//! use lattice::{Breakpoint, BreakpointsDefinition, QueryFactory, QueryOptions};
//!
//! let queries = QueryFactory::new(
//!     BreakpointsDefinition::default(),
//!     QueryOptions { query_only: true },
//! );
//! assert_eq!(queries.down(Breakpoint::Sm), "screen and (max-width: 959.95px)");
//! assert_eq!(queries.down(Breakpoint::Xl), queries.up(Breakpoint::Xs));
//! ```
//!
//! ## Observing the viewport
//! [`BreakpointObserver`] registers the query of every breakpoint with a
//! [`ViewportQueryEngine`] and keeps track of the breakpoint the viewport is
//! currently in. Subscribers get the current breakpoint straight away and
//! then every change:
//!
//! ```rust,ignore
//! let observer = BreakpointObserver::new(BreakpointsDefinition::default(), MatchMediaEngine);
//! observer
//!     .subscribe(|breakpoint| tracing::info!("layout is now {breakpoint}"))
//!     .detach();
//! ```
//!
//! In the browser the engine is [`web::MatchMediaEngine`]. Elsewhere, any type
//! that can tell whether a width range matches and report changes can
//! implement [`ViewportQueryEngine`].
//!
//! With the `reactive` feature, [`BreakpointObserver::current_signal`] exposes
//! the current breakpoint as a floem signal.

pub mod breakpoint;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod query;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use breakpoint::{Breakpoint, BreakpointSet, BreakpointsDefinition};
pub use config::LatticeConfig;
pub use engine::{MatchListener, Registration, ViewportQueryEngine};
pub use error::{BreakpointError, ParseQueryError};
#[cfg(feature = "reactive")]
pub use floem_reactive as reactive;
pub use observer::{BreakpointObserver, Subscription};
pub use query::{BREAKPOINT_DELTA, MEDIA_QUERY_PREFIX, MediaQuery, QueryFactory, QueryOptions};
