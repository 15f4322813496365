use std::path::PathBuf;
use std::str::FromStr;
use crate::db::Backend;
use super::ValueParser;

#[derive(Clone, Debug)]
pub struct StringParser { }

impl ValueParser<String> for self::StringParser {
    fn parse(&self, value: &str) -> Result<String, String> {
        Ok(value.to_owned())
    }
}

pub const STRING: StringParser = StringParser {};

#[derive(Clone, Debug)]
pub struct FilePathParser { }

impl ValueParser<PathBuf> for self::FilePathParser {
    fn parse(&self, value: &str) -> Result<PathBuf, String> {
        Ok(PathBuf::from(shellexpand::tilde(value).into_owned()))
    }
}

pub const FILE_PATH: FilePathParser = FilePathParser {};

#[derive(Clone, Debug)]
pub struct PortParser { }

impl ValueParser<u16> for self::PortParser {
    fn parse(&self, value: &str) -> Result<u16, String> {
        match value.parse::<u16>() {
            Ok(0) | Err(_) => Err(format!("invalid port number: {value}")),
            Ok(port) => Ok(port),
        }
    }
}

pub const PORT: PortParser = PortParser {};

#[derive(Clone, Debug)]
pub struct BackendParser { }

impl ValueParser<Backend> for self::BackendParser {
    fn parse(&self, value: &str) -> Result<Backend, String> {
        Backend::from_str(&value.to_ascii_lowercase())
            .map_err(|_| format!("unknown database backend: {value}"))
    }
}

pub const BACKEND: BackendParser = BackendParser {};
