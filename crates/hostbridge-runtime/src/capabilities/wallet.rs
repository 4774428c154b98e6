use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::catalog::{self, Capability};
use crate::capabilities::params;

/// Wallet ticket operations. Android hosts only; elsewhere every call is
/// `CallOutcome::Dropped`.
pub struct Wallet<'a> {
    bridge: &'a Bridge,
}

impl<'a> Wallet<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    fn ticket(&self, cap: &Capability, ticket_id: &str) -> Result<CallOutcome> {
        self.bridge
            .call(cap, Some(params([("ticketID", ticket_id.into())])))
    }

    pub fn check_ticket(&self, ticket_id: &str) -> Result<CallOutcome> {
        self.ticket(&catalog::CHECK_TICKET_IN_WALLET, ticket_id)
    }

    pub fn download_ticket(&self, ticket_id: &str) -> Result<CallOutcome> {
        self.ticket(&catalog::DOWNLOAD_TICKET_IN_WALLET, ticket_id)
    }

    pub fn show_ticket(&self, ticket_id: &str) -> Result<CallOutcome> {
        self.ticket(&catalog::SHOW_TICKET_IN_WALLET, ticket_id)
    }
}
