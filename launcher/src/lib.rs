// Internal modules used by the `quickpick` binary.
//
// Keeping these in a library module keeps `main.rs` down to argument parsing
// and wiring, and makes the units testable.

pub mod app;
pub mod consts;
pub mod logging;
pub mod paths;
pub mod window;
