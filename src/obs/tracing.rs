// self
use crate::{_prelude::*, obs::GrantKind};

/// Future wrapped in an exchange span.
pub type InstrumentedExchange<F> = tracing::instrument::Instrumented<F>;

/// A span builder used by token exchanges.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	span: tracing::Span,
}
impl ExchangeSpan {
	/// Creates a new span tagged with the provided grant + stage.
	pub fn new(grant: GrantKind, stage: &'static str) -> Self {
		let span = tracing::info_span!("mgmt_token_client.exchange", grant = grant.as_str(), stage);

		Self { span }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedExchange<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
