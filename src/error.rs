use core::fmt::Debug;

/// Transport plumbing failures
///
/// Command decoding itself never fails; this only covers moving bytes in
/// and out of the controller.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: Debug> {
    #[error("transport error: {0:?}")]
    Transport(E),
    #[error("formatting into the transport failed")]
    Format,
    #[error("command queue is full")]
    QueueFull,
}

impl<E: Debug> From<embedded_io::WriteFmtError<E>> for Error<E> {
    fn from(err: embedded_io::WriteFmtError<E>) -> Self {
        match err {
            embedded_io::WriteFmtError::Other(inner) => Self::Transport(inner),
            embedded_io::WriteFmtError::FmtError => Self::Format,
        }
    }
}
