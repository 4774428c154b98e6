use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::{catalog, params};

pub struct Pay<'a> {
    bridge: &'a Bridge,
}

impl<'a> Pay<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn check_pay_app_install_status(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::CHECK_PAY_APP_INSTALL_STATUS, None)
    }

    pub fn open_pay_app_by_url(
        &self,
        pay_app_name: &str,
        pay_meta: &str,
        success_relative_url: &str,
        detail_relative_url: &str,
    ) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::OPEN_PAY_APP_BY_URL,
            Some(params([
                ("payMeta", pay_meta.into()),
                ("payAppName", pay_app_name.into()),
                ("successRelativeURL", success_relative_url.into()),
                ("detailRelativeURL", detail_relative_url.into()),
            ])),
        )
    }
}
