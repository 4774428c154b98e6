use hostbridge_core::error::Result;
use hostbridge_core::protocol::Envelope;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::{catalog, params};

pub struct NavBar<'a> {
    bridge: &'a Bridge,
}

impl<'a> NavBar<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    /// Redraw the navigation bar from a JSON object document.
    ///
    /// An empty document is skipped; anything that is not a JSON object is
    /// a param error.
    pub fn refresh(&self, config_json: &str) -> Result<CallOutcome> {
        if config_json.is_empty() {
            return Ok(CallOutcome::Skipped);
        }
        let cap = catalog::REFRESH_NAV_BAR;
        match Envelope::from_config_json(config_json, cap.service, cap.action, cap.tag) {
            Ok(envelope) => self.bridge.send_envelope(&envelope, cap.only),
            Err(e) => Ok(self.bridge.reject_params(&e.to_string())),
        }
    }

    pub fn set_navbar_hidden(&self, hidden: bool) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::SET_NAVBAR_HIDDEN,
            Some(params([("isHidden", hidden.into())])),
        )
    }

    pub fn set_toolbar_hidden(&self, hidden: bool) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::SET_TOOLBAR_HIDDEN,
            Some(params([("isHidden", hidden.into())])),
        )
    }
}
