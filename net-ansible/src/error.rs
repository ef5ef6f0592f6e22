use std::fmt;
use std::fmt::Formatter;
use std::path::PathBuf;
use thiserror::Error;

/// What was wrong with a malformed line or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// a port specification without the `::` between switch and port
    MissingPortSeparator,
    /// a host or switch name containing `:`, which oslo.config reserves as a separator
    ReservedSeparator,
    EmptyName,
    InvalidBoolean,
    EntryOutsideSection,
    /// a non blank line that is neither a header nor `key = value`
    MissingValueSeparator,
    UnterminatedSection,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FormatErrorKind::MissingPortSeparator => {
                "is not a valid switch_name::port_name mapping, use a double colon :: as the separator"
            }
            FormatErrorKind::ReservedSeparator => "must not contain ':', it is reserved as a separator",
            FormatErrorKind::EmptyName => "has an empty name",
            FormatErrorKind::InvalidBoolean => "is not a valid boolean",
            FormatErrorKind::EntryOutsideSection => "appears before any [section] header",
            FormatErrorKind::MissingValueSeparator => "is not a key = value line",
            FormatErrorKind::UnterminatedSection => "is missing the closing ]",
        };
        f.write_str(msg)
    }
}

/// A malformed inventory. The whole load is abandoned when one of these is found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub line: Option<usize>,
    /// the offending key, value or line
    pub subject: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new<S: Into<String>>(kind: FormatErrorKind, subject: S, line: Option<usize>) -> Self {
        Self {
            line,
            subject: subject.into(),
            kind,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: '{}' {}", self.subject, self.kind),
            None => write!(f, "'{}' {}", self.subject, self.kind),
        }
    }
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to pick a platform handler for a switch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("switch {switch} has no ansible_network_os set")]
    MissingNetworkOs {
        switch: String,
    },
    #[error("switch {switch} uses unsupported platform {network_os}")]
    UnsupportedPlatform {
        switch: String,
        network_os: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("local_link_information is missing the {field}")]
    MissingLocalLinkInfo {
        field: String,
    },
    #[error("no switch name given and mac {mac} is not in the inventory")]
    UnknownSwitch {
        mac: String,
    },
}
