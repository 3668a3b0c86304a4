//! Groups output keeps only the description: every section renderer
//! of the legacy dialect is a no-op.

use crate::config::Config;
use crate::model::{OutParam, RaiseEntry, ReturnDoc};
use crate::render::Strategy;

pub struct GroupsStrategy;

impl Strategy for GroupsStrategy {
    fn params_section(&self, _params: &[OutParam], _config: &Config, _spaces: &str) -> String {
        String::new()
    }

    fn return_section(
        &self,
        _ret: &ReturnDoc,
        _rtype: Option<&str>,
        _params: &[OutParam],
        _config: &Config,
        _spaces: &str,
    ) -> String {
        String::new()
    }

    fn raises_section(
        &self,
        _raises: &[RaiseEntry],
        _params: &[OutParam],
        _ret: &ReturnDoc,
        _config: &Config,
        _spaces: &str,
    ) -> String {
        String::new()
    }
}
