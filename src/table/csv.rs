//! Minimal RFC 4180 reader for the bundled reference tables.
//!
//! Fields are separated by commas and records by `\n` or `\r\n`. A field
//! wrapped in double quotes may contain commas, line breaks and `""`
//! escapes. Blank lines are skipped.

use super::TableError;

/// One CSV row, with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub(crate) fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.trim())
    }
}

pub(crate) fn parse_records(input: &str) -> Result<Vec<Record>, TableError> {
    let mut records = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while chars.peek().is_some() {
        let start = line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut quoted = false;

        loop {
            let Some(c) = chars.next() else {
                if quoted {
                    return Err(TableError::UnterminatedQuote { line: start });
                }
                break;
            };

            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    '\n' => {
                        line += 1;
                        field.push('\n');
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if field.trim().is_empty() => {
                    field.clear();
                    quoted = true;
                }
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    line += 1;
                    break;
                }
                _ => field.push(c),
            }
        }

        fields.push(field);
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }
        records.push(Record {
            line: start,
            fields,
        });
    }

    Ok(records)
}
