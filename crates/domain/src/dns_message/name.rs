use crate::errors::DomainError;
use std::fmt;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0xC0;

/// A domain name as the raw label bytes found on the wire.
///
/// Labels may hold any byte, including `.`, so the dotted text form is only a
/// presentation: [`fmt::Display`] escapes `.` and `\` with a backslash and
/// writes bytes outside printable ASCII as `\DDD`. The root name has no labels
/// and displays as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name {
    labels: Vec<Vec<u8>>,
}

impl Name {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: Vec<Vec<u8>>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length on the wire without compression, terminating zero included.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Checks label and total lengths before the name is written out.
    pub fn validate(&self) -> Result<(), DomainError> {
        for label in &self.labels {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "empty label in '{}'",
                    self
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label of {} bytes in '{}' is longer than {} bytes",
                    label.len(),
                    self,
                    MAX_LABEL_LEN
                )));
            }
        }
        if self.wire_len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' is longer than {} bytes",
                self, MAX_NAME_LEN
            )));
        }
        Ok(())
    }
}

/// Dotted text to labels. One trailing dot is ignored and `""` or `"."` is the
/// root. Lengths are checked when the name is encoded.
impl From<&str> for Name {
    fn from(name: &str) -> Self {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Self::root();
        }
        Self::from_labels(trimmed.split('.').map(|l| l.as_bytes().to_vec()).collect())
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for &b in label {
                match b {
                    b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x21..=0x7E => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
        }
        Ok(())
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Reads a possibly-compressed name starting at `start`.
///
/// Returns the name and the offset just past the name as it appears at
/// `start`. Every compression pointer must target an offset strictly below
/// the start of the label run that contains it, so pointer chains always move
/// backwards and cannot loop.
pub fn read_name(buf: &[u8], start: usize) -> Result<(Name, usize), DomainError> {
    let mut labels = Vec::new();
    let mut wire_len = 1usize;
    let mut cursor = start;
    let mut floor = start;
    let mut end = None;

    loop {
        let len = *buf
            .get(cursor)
            .ok_or_else(|| DomainError::malformed(format!("name at offset {} is truncated", start)))?;

        match len & POINTER_TAG {
            0x00 => {
                if len == 0 {
                    cursor += 1;
                    break;
                }
                let label_start = cursor + 1;
                let label_end = label_start + len as usize;
                if label_end > buf.len() {
                    return Err(DomainError::malformed(format!(
                        "label of {} bytes at offset {} exceeds the message",
                        len, cursor
                    )));
                }
                wire_len += len as usize + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(DomainError::malformed(format!(
                        "name at offset {} is longer than {} bytes",
                        start, MAX_NAME_LEN
                    )));
                }
                labels.push(buf[label_start..label_end].to_vec());
                cursor = label_end;
            }
            POINTER_TAG => {
                let low = *buf.get(cursor + 1).ok_or_else(|| {
                    DomainError::malformed(format!("pointer at offset {} is truncated", cursor))
                })?;
                let target = (((len & !POINTER_TAG) as usize) << 8) | low as usize;
                if target >= floor {
                    return Err(DomainError::malformed(format!(
                        "pointer at offset {} targets {} which is not before {}",
                        cursor, target, floor
                    )));
                }
                end.get_or_insert(cursor + 2);
                floor = target;
                cursor = target;
            }
            _ => {
                return Err(DomainError::malformed(format!(
                    "unsupported label type 0x{:02x} at offset {}",
                    len, cursor
                )));
            }
        }
    }

    Ok((Name::from_labels(labels), end.unwrap_or(cursor)))
}
