use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("action index {0} is outside the two-action space")]
    InvalidAction(usize),
    #[error("environment used after close")]
    Closed,
}
