use thiserror::Error;

/// Infrastructure faults of the simulation. Economic outcomes such as an
/// unaffordable buy are not errors and never show up here.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Failed to spawn thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Thread {0} panicked")]
    WorkerPanicked(String),
    #[error("Monitor stopped before trading was halted")]
    StoppedBeforeHalt,
    #[error("Monitor has already been joined")]
    MonitorAlreadyJoined,
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
