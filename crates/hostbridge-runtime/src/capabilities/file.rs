use serde_json::{Map, Value};

use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::catalog::{self, Capability};

/// Sandboxed file operations. Every call carries the current `pageUrl`,
/// which the host uses to pick the sandbox.
pub struct File<'a> {
    bridge: &'a Bridge,
}

impl<'a> File<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    fn call<const N: usize>(&self, cap: &Capability, pairs: [(&str, Value); N]) -> Result<CallOutcome> {
        let mut p: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        let page_url = &self.bridge.platform().environment().page_url;
        p.insert("pageUrl".into(), Value::from(page_url.as_str()));
        self.bridge.call(cap, Some(p))
    }

    pub fn get_current_sandbox_name(&self) -> Result<CallOutcome> {
        self.call(&catalog::GET_CURRENT_SANDBOX_NAME, [])
    }

    pub fn write_text_to_file(
        &self,
        text: &str,
        file_name: &str,
        relative_file_path: &str,
        append: bool,
    ) -> Result<CallOutcome> {
        self.call(
            &catalog::WRITE_TEXT_TO_FILE,
            [
                ("text", text.into()),
                ("fileName", file_name.into()),
                ("relativeFilePath", relative_file_path.into()),
                ("isAppend", append.into()),
            ],
        )
    }

    pub fn delete_file(&self, file_name: &str, relative_file_path: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::DELETE_FILE,
            [
                ("fileName", file_name.into()),
                ("relativeFilePath", relative_file_path.into()),
            ],
        )
    }

    pub fn read_text_from_file(&self, file_name: &str, relative_file_path: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::READ_TEXT_FROM_FILE,
            [
                ("fileName", file_name.into()),
                ("relativeFilePath", relative_file_path.into()),
            ],
        )
    }

    pub fn get_file_size(&self, file_name: &str, relative_file_path: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::GET_FILE_SIZE,
            [
                ("fileName", file_name.into()),
                ("relativeFilePath", relative_file_path.into()),
            ],
        )
    }

    pub fn check_file_exist(&self, file_name: &str, relative_file_path: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::CHECK_FILE_EXIST,
            [
                ("fileName", file_name.into()),
                ("relativeFilePath", relative_file_path.into()),
            ],
        )
    }

    pub fn make_dir(&self, dir_name: &str, relative_dir_path: &str) -> Result<CallOutcome> {
        self.call(
            &catalog::MAKE_DIR,
            [
                ("dirName", dir_name.into()),
                ("relativeDirPath", relative_dir_path.into()),
            ],
        )
    }
}
