//! CSV codec: `key,<language>` columns, RFC 4180 quoting via the csv crate.
//!
//! Decoding is lenient the way spreadsheet exports demand: rows missing the
//! `key` or language column are skipped, extra columns are ignored.

use loctree_core::{LanguageCode, NamespaceContent};

use crate::error::CodecError;

pub fn decode(bytes: &[u8], language: &LanguageCode) -> Result<NamespaceContent, CodecError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let key_column = headers.iter().position(|h| h == "key");
    let value_column = headers.iter().position(|h| h == language.0);

    let mut content = NamespaceContent::new();
    let (Some(key_column), Some(value_column)) = (key_column, value_column) else {
        return Ok(content);
    };

    for record in reader.records() {
        let record = record?;
        let key = record.get(key_column).unwrap_or("");
        let Some(value) = record.get(value_column) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        content.insert(key.to_owned(), value.to_owned());
    }
    Ok(content)
}

pub fn encode(content: &NamespaceContent, language: &LanguageCode) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    {
        let mut writer = ::csv::Writer::from_writer(&mut buf);
        writer.write_record(["key", language.0.as_str()])?;
        for (key, value) in content {
            writer.write_record([key.as_str(), value.as_str()])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
