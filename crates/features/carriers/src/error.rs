use crate::directory::DirectoryError;
use crate::pricing::PricingError;
use std::borrow::Cow;

/// A specialized [`CarrierError`] enum of this crate.
///
/// Abstentions are never errors; they surface as `Ok(None)` or
/// [`RateOutcome::Abstained`](phub_domain::rate::RateOutcome::Abstained).
#[phub_derive::phub_error]
pub enum CarrierError {
    /// A label was requested for a method outside the family's capability set.
    #[error("Unknown method{}: {message}", format_context(.context))]
    UnknownMethod { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A dynamic operation was invoked without the record it is scoped to.
    #[error("Missing dynamic carrier context{}: {message}", format_context(.context))]
    MissingDynamicContext { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Unknown carrier{}: {message}", format_context(.context))]
    UnknownCarrier { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The carrier exists but is not served by the dynamic family.
    #[error("Not a dynamic carrier{}: {message}", format_context(.context))]
    NotDynamic { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Duplicate carrier{}: {message}", format_context(.context))]
    DuplicateCarrier { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Dynamic carrier directory error{}: {source}", format_context(.context))]
    Directory { source: DirectoryError, context: Option<Cow<'static, str>> },
    /// Pricing collaborator failure, propagated unchanged.
    #[error("Pricing error{}: {source}", format_context(.context))]
    Pricing { source: PricingError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal carrier error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CarrierError {
    pub(crate) fn unknown_carrier(code: &str) -> Self {
        Self::UnknownCarrier {
            message: format!("no carrier registered as '{code}'").into(),
            context: None,
        }
    }
}
