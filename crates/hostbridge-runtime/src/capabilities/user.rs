use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::catalog;

/// Member session operations. Results arrive as `member_login`-shaped
/// user info under each call's tag.
pub struct User<'a> {
    bridge: &'a Bridge,
}

impl<'a> User<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn init_member_h5_info(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::INIT_MEMBER_H5_INFO, None)
    }

    pub fn member_login(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::MEMBER_LOGIN, None)
    }

    pub fn non_member_login(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::NON_MEMBER_LOGIN, None)
    }

    pub fn member_auto_login(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::MEMBER_AUTO_LOGIN, None)
    }

    pub fn member_register(&self) -> Result<CallOutcome> {
        self.bridge.call(&catalog::MEMBER_REGISTER, None)
    }
}
