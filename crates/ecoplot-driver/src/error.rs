//! Error types for the simulation driver.

/// Errors that can occur while running the simulator.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The simulator executable could not be found or started.
    #[error("failed to launch simulator {executable}: {source}")]
    Launch {
        /// The executable as given by the caller.
        executable: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// Reading the simulator's output failed (pipe error or invalid UTF-8).
    #[error("failed to read simulator output at line {line_number}: {source}")]
    Read {
        /// 1-based number of the line that could not be read.
        line_number: u64,
        /// The underlying read error.
        source: std::io::Error,
    },

    /// Waiting for the simulator to exit failed.
    #[error("failed to wait for simulator exit: {source}")]
    Wait {
        /// The underlying wait error.
        #[from]
        source: std::io::Error,
    },
}
