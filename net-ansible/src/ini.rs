use crate::error::{FormatError, FormatErrorKind};

/// One `key = value` line. `line` is 1-based and points at the line the key is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    pub line: usize,
    pub entries: Vec<IniEntry>,
}

impl IniSection {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            line: 0,
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.push(IniEntry {
            key: key.into(),
            value: value.into(),
            line: 0,
        });
    }
}

/// Read oslo.config style INI text into its sections, in the order they appear.
pub fn parse_ini(text: &str) -> Result<Vec<IniSection>, FormatError> {
    let mut sections: Vec<IniSection> = Vec::new();
    // index into `sections` of the section lines are currently added to
    let mut current: Option<usize> = None;
    // set while the last line read was an entry, so indented lines can continue it
    let mut continuing: Option<usize> = None;
    // set while the last entry read was a dropped duplicate, its continuation lines go with it
    let mut skipping = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continuing = None;
            skipping = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            if skipping {
                continue;
            }
            if let (Some(section), Some(entry)) = (current, continuing) {
                let value = &mut sections[section].entries[entry].value;
                value.push('\n');
                value.push_str(trimmed);
                continue;
            }
        }

        if trimmed.starts_with('[') {
            let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
                return Err(FormatError::new(FormatErrorKind::UnterminatedSection, trimmed, Some(line_no)));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(FormatError::new(FormatErrorKind::EmptyName, trimmed, Some(line_no)));
            }
            let position = match sections.iter().position(|s| s.name == name) {
                Some(position) => position,
                None => {
                    sections.push(IniSection {
                        name: name.to_string(),
                        line: line_no,
                        entries: Vec::new(),
                    });
                    sections.len() - 1
                }
            };
            current = Some(position);
            continuing = None;
            skipping = false;
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(FormatError::new(FormatErrorKind::MissingValueSeparator, trimmed, Some(line_no)));
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(FormatError::new(FormatErrorKind::EmptyName, trimmed, Some(line_no)));
        }
        let Some(section_idx) = current else {
            return Err(FormatError::new(FormatErrorKind::EntryOutsideSection, key, Some(line_no)));
        };
        let section = &mut sections[section_idx];
        if let Some(first) = section.entries.iter().find(|e| e.key == key) {
            tracing::warn!(
                "[{}] {} on line {} is already set on line {}, keeping the first value",
                section.name, key, line_no, first.line
            );
            continuing = None;
            skipping = true;
            continue;
        }
        skipping = false;
        section.entries.push(IniEntry {
            key: key.to_string(),
            value: value.to_string(),
            line: line_no,
        });
        continuing = Some(section.entries.len() - 1);
    }

    Ok(sections)
}

/// Write sections back out as INI text that `parse_ini` reads to the same sections.
pub fn write_ini(sections: &[IniSection]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}]\n", section.name));
        for entry in &section.entries {
            let mut lines = entry.value.split('\n');
            let first = lines.next().unwrap_or_default();
            if first.is_empty() {
                out.push_str(&format!("{} =\n", entry.key));
            } else {
                out.push_str(&format!("{} = {}\n", entry.key, first));
            }
            for continuation in lines {
                out.push_str(&format!("    {continuation}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_entries() {
        let text = "\
# leading comment
[ansible:port_mappings]
compute1 = sw0::port1, sw1::port2
; another comment

[ansible:sw0]
ansible_network_os=openvswitch
ansible_host = 10.0.0.1
";
        let sections = parse_ini(text).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "ansible:port_mappings");
        assert_eq!(sections[0].line, 2);
        assert_eq!(sections[0].entries[0].key, "compute1");
        assert_eq!(sections[0].entries[0].value, "sw0::port1, sw1::port2");
        assert_eq!(sections[0].entries[0].line, 3);
        assert_eq!(sections[1].get("ansible_network_os"), Some("openvswitch"));
        assert_eq!(sections[1].get("ansible_host"), Some("10.0.0.1"));
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let sections = parse_ini("[s]\ncp_opts = a=b\n").unwrap();
        assert_eq!(sections[0].get("cp_opts"), Some("a=b"));
    }

    #[test]
    fn test_continuation_lines() {
        let sections = parse_ini("[s]\nkey = first\n  second\n\n  third = 3\n").unwrap();
        assert_eq!(sections[0].get("key"), Some("first\nsecond"));
        assert_eq!(sections[0].get("third"), Some("3"));
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let sections = parse_ini("[s]\nkey = one\nkey = two\n").unwrap();
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[0].get("key"), Some("one"));
    }

    #[test]
    fn test_duplicate_key_drops_its_continuation() {
        let text = "[ansible:port_mappings]\nc1 = sw0::p0\nc1 = sw1::p1,\n  sw2::p2\nc2 = sw3::p3\n  sw4::p4\n";
        let sections = parse_ini(text).unwrap();
        assert_eq!(sections[0].entries.len(), 2);
        assert_eq!(sections[0].get("c1"), Some("sw0::p0"));
        assert_eq!(sections[0].get("c2"), Some("sw3::p3\nsw4::p4"));
    }

    #[test]
    fn test_repeated_section_merges() {
        let sections = parse_ini("[a]\nx = 1\n[b]\ny = 2\n[a]\nz = 3\n").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].entries.len(), 2);
        assert_eq!(sections[0].get("z"), Some("3"));
    }

    #[test]
    fn test_malformed_lines() {
        let err = parse_ini("key = value\n").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::EntryOutsideSection);
        assert_eq!(err.line, Some(1));

        let err = parse_ini("[s]\nno separator here\n").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::MissingValueSeparator);
        assert_eq!(err.line, Some(2));

        let err = parse_ini("[s\n").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::UnterminatedSection);

        let err = parse_ini("[ ]\n").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::EmptyName);

        let err = parse_ini("[s]\n = value\n").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::EmptyName);
    }

    #[test]
    fn test_write_reads_back() {
        let text = "[a]\nx = 1\nmulti = one\n    two\nempty =\n\n[b]\ny = 2\n";
        let sections = parse_ini(text).unwrap();
        let written = write_ini(&sections);
        assert_eq!(written, text);
        let reparsed = parse_ini(&written).unwrap();
        assert_eq!(reparsed, sections);
    }
}
