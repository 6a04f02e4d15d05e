#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FloraError {
	#[error("invalid {name}: {value}")]
	InvalidParameter { name: &'static str, value: String },
}

impl FloraError {
	pub fn invalid(name: &'static str, value: impl ToString) -> Self {
		Self::InvalidParameter { name, value: value.to_string() }
	}
}
