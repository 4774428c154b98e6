use serde_json::Value;
use tracing::debug;

use hostbridge_core::error::Result;
use hostbridge_core::platform::PlatformKind;
use hostbridge_core::protocol::Envelope;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::catalog::{self, Capability};
use crate::capabilities::params;

/// How `open_url` should open its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Load in the current page.
    CurrentPage = 0,
    /// Hand a `ctrip://` URL to the app.
    AppScheme = 1,
    /// New web page; `title` applies.
    NewPage = 2,
    /// System browser.
    SystemBrowser = 3,
    /// New local page from a relative path; `title` applies.
    LocalPage = 4,
}

impl TargetMode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Home URL `back_to_home` opens on Android.
pub const APP_HOME_URL: &str = "ctrip://wireless/";

pub struct Util<'a> {
    bridge: &'a Bridge,
}

impl<'a> Util<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    fn call(&self, cap: &Capability, p: Option<serde_json::Map<String, Value>>) -> Result<CallOutcome> {
        self.bridge.call(cap, p)
    }

    /// Skipped when `event_name` is empty.
    pub fn log_event(&self, event_name: &str) -> Result<CallOutcome> {
        if event_name.is_empty() {
            return Ok(CallOutcome::Skipped);
        }
        self.call(&catalog::LOG_EVENT, Some(params([("event", event_name.into())])))
    }

    /// Dial `phone`; an empty number means the service hotline.
    ///
    /// Old iOS hosts (unknown or 5.2) cannot take the bridge call and get a
    /// `tel://` page navigation instead.
    pub fn call_phone(&self, phone: &str) -> Result<CallOutcome> {
        let b = self.bridge;
        if b.detect() == PlatformKind::Ios && !phone.is_empty() {
            let version = b.platform().app_version();
            if version.is_empty() || version == "5.2" {
                return b.navigate_page(&format!("tel://{phone}"));
            }
        }
        self.call(&catalog::CALL_PHONE, Some(params([("phone", phone.into())])))
    }

    pub fn back_to_home(&self) -> Result<CallOutcome> {
        if self.bridge.detect() == PlatformKind::Android {
            return self.open_url(APP_HOME_URL, TargetMode::AppScheme, "  ", "");
        }
        self.call(&catalog::BACK_TO_HOME, None)
    }

    pub fn back_to_last_page(&self, callback_string: &str, delete_page: bool) -> Result<CallOutcome> {
        self.call(
            &catalog::BACK_TO_LAST_PAGE,
            Some(params([
                ("callbackString", callback_string.into()),
                ("isDeleteH5Page", delete_page.into()),
            ])),
        )
    }

    /// Open `url`. Before any host version is known this falls back to
    /// legacy paths: the native entry point on old Android hosts, otherwise
    /// plain page navigation.
    pub fn open_url(
        &self,
        url: &str,
        mode: TargetMode,
        title: &str,
        page_name: &str,
    ) -> Result<CallOutcome> {
        let b = self.bridge;
        let p = params([
            ("openUrl", url.into()),
            ("title", title.into()),
            ("targetMode", mode.code().into()),
            ("pageName", page_name.into()),
        ]);

        if !b.platform().app_version().is_empty() {
            return self.call(&catalog::OPEN_URL, Some(p));
        }

        if self.legacy_android() {
            let cap = catalog::OPEN_URL;
            let Some(envelope) = Envelope::build(cap.service, cap.action, Some(p), cap.tag) else {
                return Ok(b.reject_params("service and action must not be empty"));
            };
            match b.invoke_native(&envelope) {
                Ok(outcome) => return Ok(outcome),
                Err(e) => debug!(error = %e, "legacy openUrl failed; navigating page"),
            }
        }
        b.navigate_page(url)
    }

    fn legacy_android(&self) -> bool {
        let platform = self.bridge.platform();
        let ua = &platform.environment().user_agent;
        let marker = &platform.markers().app_marker;
        ua.contains("Android") && !marker.is_empty() && ua.contains(marker.as_str())
    }

    pub fn check_update(&self) -> Result<CallOutcome> {
        self.call(&catalog::CHECK_UPDATE, None)
    }

    pub fn recommend_app_to_friends(&self) -> Result<CallOutcome> {
        self.call(&catalog::RECOMMEND_APP_TO_FRIENDS, None)
    }

    pub fn add_weixin_friend(&self) -> Result<CallOutcome> {
        self.call(&catalog::ADD_WEIXIN_FRIEND, None)
    }

    /// Jump to another web package, e.g. `("myctrip", "index.html?ver=5.2")`.
    pub fn cross_package_href(&self, path: &str, param: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::CROSS_PACKAGE_HREF,
            Some(params([("path", path.into()), ("param", param.into())])),
        )
    }

    pub fn show_newest_introduction(&self) -> Result<CallOutcome> {
        self.call(&catalog::SHOW_NEWEST_INTRODUCTION, None)
    }

    pub fn check_network_status(&self) -> Result<CallOutcome> {
        self.call(&catalog::CHECK_NETWORK_STATUS, None)
    }

    pub fn check_app_install_status(&self, open_url: &str, package_name: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::CHECK_APP_INSTALL_STATUS,
            Some(params([
                ("openUrl", open_url.into()),
                ("packageName", package_name.into()),
            ])),
        )
    }

    pub fn refresh_native_page(&self, page_name: &str, json_str: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::REFRESH_NATIVE_PAGE,
            Some(params([
                ("pageName", page_name.into()),
                ("jsonStr", json_str.into()),
            ])),
        )
    }

    pub fn copy_to_clipboard(&self, text: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::COPY_TO_CLIPBOARD,
            Some(params([("copyString", text.into())])),
        )
    }

    pub fn read_copied_string_from_clipboard(&self) -> Result<CallOutcome> {
        self.call(&catalog::READ_COPIED_STRING, None)
    }

    pub fn call_system_share(
        &self,
        image_relative_path: &str,
        text: &str,
        title: &str,
        link_url: &str,
        ios_system_share: bool,
    ) -> Result<CallOutcome> {
        self.call(
            &catalog::CALL_SYSTEM_SHARE,
            Some(params([
                ("title", title.into()),
                ("text", text.into()),
                ("linkUrl", link_url.into()),
                ("imageRelativePath", image_relative_path.into()),
                ("isIOSSystemShare", ios_system_share.into()),
            ])),
        )
    }

    pub fn download_data(
        &self,
        download_url: &str,
        suffix: &str,
        ignore_https_certification: bool,
    ) -> Result<CallOutcome> {
        let page_url = self.bridge.platform().environment().page_url.clone();
        self.call(
            &catalog::DOWNLOAD_DATA,
            Some(params([
                ("downloadUrl", download_url.into()),
                ("suffix", suffix.into()),
                ("pageUrl", page_url.into()),
                ("isIgnoreHttpsCertification", ignore_https_certification.into()),
            ])),
        )
    }

    pub fn open_other_app(&self, package_id: &str, json_param: &str, url: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::OPEN_OTHER_APP,
            Some(params([
                ("packageId", package_id.into()),
                ("jsonParam", json_param.into()),
                ("url", url.into()),
            ])),
        )
    }

    /// Write a line to the host's log view. Skipped when `log` is empty.
    pub fn log(&self, log: &str, result: &str) -> Result<CallOutcome> {
        if log.is_empty() {
            return Ok(CallOutcome::Skipped);
        }
        self.call(
            &catalog::H5_LOG,
            Some(params([("log", log.into()), ("result", result.into())])),
        )
    }

    pub fn open_adv_page(&self, adv_url: &str) -> Result<CallOutcome> {
        self.call(&catalog::OPEN_ADV_PAGE, Some(params([("advUrl", adv_url.into())])))
    }
}
