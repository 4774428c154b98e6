use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::{catalog, params};

/// Location and map display.
pub struct Map<'a> {
    bridge: &'a Bridge,
}

impl<'a> Map<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn locate(&self, is_async: bool) -> Result<CallOutcome> {
        self.bridge
            .call(&catalog::LOCATE, Some(params([("is_async", is_async.into())])))
    }

    pub fn show_map(
        &self,
        latitude: f64,
        longitude: f64,
        title: &str,
        subtitle: &str,
    ) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::SHOW_MAP,
            Some(params([
                ("latitude", latitude.into()),
                ("longitude", longitude.into()),
                ("title", title.into()),
                ("subtitle", subtitle.into()),
            ])),
        )
    }
}
