use std::{fmt, path::Path};

/// Problems reading a Projectfile off disk, before any parsing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}: {}", self.filename.display(), self.problem)
        } else {
            write!(
                f,
                "{}: {}: {}",
                self.filename.display(),
                self.problem,
                self.details
            )
        }
    }
}

impl std::error::Error for LoadingError<'_> {}
