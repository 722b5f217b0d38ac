//! Simulation driver adapter.
//!
//! Launches the external simulator with the configuration path as its only
//! argument and exposes its standard output as a [`LineStream`]: a lazy,
//! forward-only, finite iterator of lines. The stream ends when the
//! simulator closes its output. Reading blocks until the simulator writes
//! a line; that is the only point where ecoplot waits on the simulator.
//!
//! ```text
//! simulator stdout --> BufReader --> LineStream (Iterator) --> aggregator
//! ```
//!
//! The simulator's stderr is inherited so its diagnostics reach the user
//! directly. Its exit status is collected by [`LineStream::finish`]; a
//! non-zero exit is reported and logged as a warning, never as an error.

mod error;
mod stream;

pub use error::DriverError;
pub use stream::{LineStream, ProcessExit};
