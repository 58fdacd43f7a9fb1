//! Multipart decoding
//!
//! Turns the inbound multipart stream into a [`SegmentSet`]. Parts are
//! matched by their declared filename, lower-cased. A part whose filename
//! is not a known segment name aborts the request (strict policy).

use axum::extract::Multipart;

use super::types::{IngestError, SegmentName, SegmentSet};

/// Read every part of the stream into a segment set.
///
/// End-of-stream after zero or more parts is not an error; completeness is
/// the caller's check. A failure while advancing the stream is a malformed
/// body (caller fault); a failure while reading an accepted part's bytes is
/// an upstream I/O fault.
pub async fn decode_segments(mut multipart: Multipart) -> Result<SegmentSet, IngestError> {
    let mut set = SegmentSet::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::MalformedMultipart(e.to_string()))?
    {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let name = match SegmentName::parse(&file_name) {
            Some(name) => name,
            None => {
                tracing::warn!(
                    file_name = %file_name,
                    form_name = field.name().unwrap_or_default(),
                    "rejecting part with unknown segment name"
                );
                return Err(IngestError::UnknownSegment(file_name));
            }
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| IngestError::UpstreamIo(e.to_string()))?;

        set.insert(name, bytes.to_vec());
    }

    Ok(set)
}
