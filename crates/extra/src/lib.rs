#![deny(bare_trait_objects)]

//! Reference shapes and debugging helpers, mostly useful to write tests and
//! benchmarks for the tessellator.

extern crate polytess_geom as geom;

pub use geom::euclid;

pub mod debugging;
pub mod shapes;
