pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	/// A record-store read failed. Never retried inside the pipeline.
	#[error("Storage error: {message}")]
	Storage { message: String },
	/// The reasoning service could not be reached or answered with an error status.
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<loft_storage::Error> for Error {
	fn from(err: loft_storage::Error) -> Self {
		match err {
			loft_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			loft_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<loft_providers::Error> for Error {
	fn from(err: loft_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
