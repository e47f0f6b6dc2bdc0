//! Testing utilities and harness for rawsheet
//!
//! [`SheetTestRule`] owns a runtime with a virtual frame clock, a sheet, and a
//! recording overlay host. Tests drive it with robot-style calls (press, drag,
//! release) and advance time explicitly.

pub mod assertions;
pub mod rule;

pub use assertions::*;
pub use rule::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::rule::*;
}
