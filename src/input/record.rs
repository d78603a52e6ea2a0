use super::ParseError;

/// One `id<TAB>sentence` line of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub sentence: String,
}

impl Record {
    /// Parse a single line. `line_no` is 1-based and only used for errors.
    ///
    /// The line is split on the first tab; later tabs stay in the sentence.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let line = line.trim_end_matches('\r');

        let (id, sentence) = line
            .split_once('\t')
            .ok_or_else(|| ParseError::MissingDelimiter {
                line: line_no,
                content: line.to_string(),
            })?;

        if id.trim().is_empty() {
            return Err(ParseError::EmptyId { line: line_no });
        }

        Ok(Record {
            id: id.to_string(),
            sentence: sentence.trim().to_string(),
        })
    }
}

/// Parse every non-blank line of `text` into a record, keeping file order.
///
/// Stops at the first malformed line.
pub fn parse_records(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if line.trim().is_empty() {
            tracing::debug!(line = line_no, "skipping blank input line");
            continue;
        }

        records.push(Record::parse(line, line_no)?);
    }

    Ok(records)
}
