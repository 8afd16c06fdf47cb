//! **gridstar-core** — geometry primitives shared by the *gridstar* crates.
//!
//! A [`Point`] is a cell coordinate and the identity key of every search
//! structure; a [`Range`] is the half-open rectangle a grid covers.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
