use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::{catalog, params};

pub struct Business<'a> {
    bridge: &'a Bridge,
}

impl<'a> Business<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn choose_invoice_title(&self, selected: &str) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::CHOOSE_INVOICE_TITLE,
            Some(params([("selectedInvoiceTitle", selected.into())])),
        )
    }
}

pub struct Page<'a> {
    bridge: &'a Bridge,
}

impl<'a> Page<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn set_page_name(&self, page_name: &str) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::SET_PAGE_NAME,
            Some(params([("pageName", page_name.into())])),
        )
    }
}
