// self
use crate::obs::{ExchangeOutcome, GrantKind};

/// Records an exchange outcome via the global metrics recorder (when enabled).
pub fn record_exchange_outcome(grant: GrantKind, outcome: ExchangeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mgmt_token_client_exchange_total",
			"grant" => grant.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_exchange_outcome_noop_without_recorder() {
		record_exchange_outcome(GrantKind::Password, ExchangeOutcome::Empty);
	}
}
