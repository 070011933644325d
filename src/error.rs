use std::{error::Error, fmt, io};

use learners::MlErr;
use plotters::drawing::DrawingAreaErrorKind;

/// Result type for the plotting pipelines.
pub type Result<T> = std::result::Result<T, PlotErr>;

/// Errors that abort a plotting run.
#[derive(Debug)]
pub enum PlotErr {
    Ml(MlErr),               // Loading, fitting or scoring failed
    Io(io::Error),           // Writing artifacts or reading configs failed
    Render(String),          // The drawing backend failed
    Config(String),          // The run configuration is invalid
    Geometry(&'static str),  // The data does not fit a 2-D plot
}

impl fmt::Display for PlotErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotErr::Ml(e) => write!(f, "learner error: {e}"),
            PlotErr::Io(e) => write!(f, "io error: {e}"),
            PlotErr::Render(msg) => write!(f, "render error: {msg}"),
            PlotErr::Config(msg) => write!(f, "invalid config: {msg}"),
            PlotErr::Geometry(msg) => write!(f, "geometry error: {msg}"),
        }
    }
}

impl Error for PlotErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlotErr::Ml(e) => Some(e),
            PlotErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for PlotErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<io::Error> for PlotErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotErr {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(value.to_string())
    }
}
