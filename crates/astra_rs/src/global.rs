//! Global provider handle.
//!
//! Hosts call [`init`] or [`init_default`] once at startup; the
//! convenience functions then share one provider without a handle
//! threaded through every call.

use std::sync::OnceLock;

use astra_ephem::Provider;

use crate::error::AstraError;

static PROVIDER: OnceLock<Provider> = OnceLock::new();

/// Install a provider. The first call wins; later calls leave the
/// installed provider in place and return `false`.
pub fn init(provider: Provider) -> bool {
    PROVIDER.set(provider).is_ok()
}

/// Install the standard backend chain ([`Provider::detect`]).
pub fn init_default() -> bool {
    init(Provider::detect())
}

pub fn is_initialized() -> bool {
    PROVIDER.get().is_some()
}

pub(crate) fn provider() -> Result<&'static Provider, AstraError> {
    PROVIDER.get().ok_or(AstraError::NotInitialized)
}
