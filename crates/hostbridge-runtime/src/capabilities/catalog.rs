//! Capability table: one row per host operation.

use hostbridge_core::platform::PlatformKind;

/// One host operation: where it goes, what it is tagged with, and which host
/// version first offered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub service: &'static str,
    pub action: &'static str,
    pub tag: &'static str,
    /// `None` means available on every host version.
    pub min_version: Option<&'static str>,
    /// Restrict sending to one platform; elsewhere the call is dropped.
    pub only: Option<PlatformKind>,
}

impl Capability {
    pub const fn new(service: &'static str, action: &'static str, tag: &'static str) -> Self {
        Self {
            service,
            action,
            tag,
            min_version: None,
            only: None,
        }
    }

    pub const fn since(mut self, version: &'static str) -> Self {
        self.min_version = Some(version);
        self
    }

    pub const fn only_on(mut self, platform: PlatformKind) -> Self {
        self.only = Some(platform);
        self
    }
}

// Util
pub const LOG_EVENT: Capability = Capability::new("Util", "logEvent", "log_event");
pub const CALL_PHONE: Capability = Capability::new("Util", "callPhone", "call_phone");
pub const BACK_TO_HOME: Capability = Capability::new("Util", "backToHome", "back_to_home");
pub const BACK_TO_LAST_PAGE: Capability =
    Capability::new("Util", "backToLast", "back_to_last_page");
pub const OPEN_URL: Capability = Capability::new("Util", "openUrl", "open_url");
pub const CHECK_UPDATE: Capability = Capability::new("Util", "checkUpdate", "check_update");
pub const RECOMMEND_APP_TO_FRIENDS: Capability =
    Capability::new("Util", "recommendAppToFriends", "recommend_app_to_friends");
pub const ADD_WEIXIN_FRIEND: Capability =
    Capability::new("Util", "addWeixinFriend", "add_weixin_friend");
pub const CROSS_PACKAGE_HREF: Capability =
    Capability::new("Util", "crossPackageJumpUrl", "cross_package_href");
pub const SHOW_NEWEST_INTRODUCTION: Capability =
    Capability::new("Util", "showNewestIntroduction", "show_newest_introduction");
pub const CHECK_NETWORK_STATUS: Capability =
    Capability::new("Util", "checkNetworkStatus", "check_network_status");
pub const CHECK_APP_INSTALL_STATUS: Capability =
    Capability::new("Util", "checkAppInstallStatus", "check_app_install_status");
pub const REFRESH_NATIVE_PAGE: Capability =
    Capability::new("Util", "refreshNativePage", "refresh_native_page");
pub const COPY_TO_CLIPBOARD: Capability =
    Capability::new("Util", "copyToClipboard", "copy_string_to_clipboard").since("5.3");
pub const READ_COPIED_STRING: Capability = Capability::new(
    "Util",
    "readCopiedStringFromClipboard",
    "read_copied_string_from_clipboard",
)
.since("5.3");
pub const CALL_SYSTEM_SHARE: Capability =
    Capability::new("Util", "callSystemShare", "call_system_share").since("5.3");
pub const DOWNLOAD_DATA: Capability =
    Capability::new("Util", "downloadData", "download_data").since("5.3");
pub const OPEN_OTHER_APP: Capability =
    Capability::new("Util", "openOtherApp", "open_other_app").since("5.3");
pub const H5_LOG: Capability = Capability::new("Util", "h5Log", "log");
pub const OPEN_ADV_PAGE: Capability =
    Capability::new("Util", "openAdvPage", "open_adv_page").since("5.4");

// User
pub const INIT_MEMBER_H5_INFO: Capability =
    Capability::new("User", "initMemberH5Info", "init_member_H5_info");
pub const MEMBER_LOGIN: Capability = Capability::new("User", "memberLogin", "member_login");
pub const NON_MEMBER_LOGIN: Capability =
    Capability::new("User", "nonMemberLogin", "non_member_login");
pub const MEMBER_AUTO_LOGIN: Capability =
    Capability::new("User", "memberAutoLogin", "member_auto_login");
pub const MEMBER_REGISTER: Capability =
    Capability::new("User", "memberRegister", "member_register");

// Encrypt
pub const BASE64_ENCODE: Capability =
    Capability::new("Encrypt", "base64Encode", "base64_encode").since("5.3");
pub const MD5_HASH: Capability = Capability::new("Encrypt", "md5Hash", "md5_hash").since("5.5");
pub const CTRIP_ENCRYPT: Capability =
    Capability::new("Encrypt", "ctripEncrypt", "ctrip_encrypt").since("5.5");

// Pay
pub const CHECK_PAY_APP_INSTALL_STATUS: Capability =
    Capability::new("Pay", "checkPayAppInstallStatus", "check_pay_app_install_status")
        .since("5.4");
pub const OPEN_PAY_APP_BY_URL: Capability =
    Capability::new("Pay", "openPayAppByURL", "open_pay_app_by_url").since("5.4");

// Pipe
pub const SEND_HTTP_PIPE_REQUEST: Capability =
    Capability::new("Pipe", "sendHTTPPipeRequest", "send_http_pipe_request").since("5.4");
pub const ABORT_HTTP_PIPE_REQUEST: Capability =
    Capability::new("Pipe", "abortHTTPRequest", "abort_http_pipe_request").since("5.4");
pub const SEND_H5_PIPE_REQUEST: Capability =
    Capability::new("Pipe", "sendH5PipeRequest", "send_h5_pipe_request").since("5.4");

// SamSungWallet
pub const CHECK_TICKET_IN_WALLET: Capability = Capability::new(
    "SamSungWallet",
    "checkTicketInSamSungWallet",
    "check_ticket_in_samsung_wallet",
)
.only_on(PlatformKind::Android);
pub const DOWNLOAD_TICKET_IN_WALLET: Capability = Capability::new(
    "SamSungWallet",
    "downloadTicketInSamSungWallet",
    "download_ticket_in_samsung_wallet",
)
.only_on(PlatformKind::Android);
pub const SHOW_TICKET_IN_WALLET: Capability = Capability::new(
    "SamSungWallet",
    "showTicketInSamSungWallet",
    "show_ticket_in_samsung_wallet",
)
.only_on(PlatformKind::Android);

// File
pub const GET_CURRENT_SANDBOX_NAME: Capability =
    Capability::new("File", "getCurrentSandboxName", "get_current_sandbox_name").since("5.4");
pub const WRITE_TEXT_TO_FILE: Capability =
    Capability::new("File", "writeTextToFile", "write_text_to_file").since("5.4");
pub const DELETE_FILE: Capability =
    Capability::new("File", "deleteFile", "delete_file").since("5.4");
pub const READ_TEXT_FROM_FILE: Capability =
    Capability::new("File", "readTextFromFile", "read_text_from_file").since("5.4");
pub const GET_FILE_SIZE: Capability =
    Capability::new("File", "getFileSize", "get_file_size").since("5.4");
pub const CHECK_FILE_EXIST: Capability =
    Capability::new("File", "checkFileExist", "check_file_exist").since("5.4");
pub const MAKE_DIR: Capability = Capability::new("File", "makeDir", "make_dir").since("5.4");

// NavBar
pub const REFRESH_NAV_BAR: Capability = Capability::new("NavBar", "refresh", "refresh_nav_bar");
pub const SET_NAVBAR_HIDDEN: Capability =
    Capability::new("NavBar", "setNavBarHidden", "set_navbar_hidden").since("5.4");
pub const SET_TOOLBAR_HIDDEN: Capability =
    Capability::new("NavBar", "setToolBarHidden", "set_toolbar_hidden").since("5.4");

// Locate
pub const LOCATE: Capability = Capability::new("Locate", "locate", "locate");
pub const SHOW_MAP: Capability = Capability::new("Locate", "showMap", "show_map").since("5.5");

// Business / Page
pub const CHOOSE_INVOICE_TITLE: Capability =
    Capability::new("Business", "chooseInvoiceTitle", "choose_invoice_title").since("5.6");
pub const SET_PAGE_NAME: Capability =
    Capability::new("Page", "setPageName", "set_page_name").since("5.6");

pub const ALL: &[Capability] = &[
    LOG_EVENT,
    CALL_PHONE,
    BACK_TO_HOME,
    BACK_TO_LAST_PAGE,
    OPEN_URL,
    CHECK_UPDATE,
    RECOMMEND_APP_TO_FRIENDS,
    ADD_WEIXIN_FRIEND,
    CROSS_PACKAGE_HREF,
    SHOW_NEWEST_INTRODUCTION,
    CHECK_NETWORK_STATUS,
    CHECK_APP_INSTALL_STATUS,
    REFRESH_NATIVE_PAGE,
    COPY_TO_CLIPBOARD,
    READ_COPIED_STRING,
    CALL_SYSTEM_SHARE,
    DOWNLOAD_DATA,
    OPEN_OTHER_APP,
    H5_LOG,
    OPEN_ADV_PAGE,
    INIT_MEMBER_H5_INFO,
    MEMBER_LOGIN,
    NON_MEMBER_LOGIN,
    MEMBER_AUTO_LOGIN,
    MEMBER_REGISTER,
    BASE64_ENCODE,
    MD5_HASH,
    CTRIP_ENCRYPT,
    CHECK_PAY_APP_INSTALL_STATUS,
    OPEN_PAY_APP_BY_URL,
    SEND_HTTP_PIPE_REQUEST,
    ABORT_HTTP_PIPE_REQUEST,
    SEND_H5_PIPE_REQUEST,
    CHECK_TICKET_IN_WALLET,
    DOWNLOAD_TICKET_IN_WALLET,
    SHOW_TICKET_IN_WALLET,
    GET_CURRENT_SANDBOX_NAME,
    WRITE_TEXT_TO_FILE,
    DELETE_FILE,
    READ_TEXT_FROM_FILE,
    GET_FILE_SIZE,
    CHECK_FILE_EXIST,
    MAKE_DIR,
    REFRESH_NAV_BAR,
    SET_NAVBAR_HIDDEN,
    SET_TOOLBAR_HIDDEN,
    LOCATE,
    SHOW_MAP,
    CHOOSE_INVOICE_TITLE,
    SET_PAGE_NAME,
];

pub fn lookup(service: &str, action: &str) -> Option<&'static Capability> {
    ALL.iter()
        .find(|c| c.service == service && c.action == action)
}

/// Tags under which pipe send results (success or failure) arrive.
pub fn is_pipe_response_tag(tag: &str) -> bool {
    tag == SEND_HTTP_PIPE_REQUEST.tag || tag == SEND_H5_PIPE_REQUEST.tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert!(
                    !(a.service == b.service && a.action == b.action),
                    "duplicate {}.{}",
                    a.service,
                    a.action
                );
            }
        }
    }

    #[test]
    fn lookup_finds_gated_rows() {
        let row = lookup("Encrypt", "md5Hash");
        assert_eq!(row.and_then(|c| c.min_version), Some("5.5"));
        assert!(lookup("Util", "nope").is_none());
    }
}
