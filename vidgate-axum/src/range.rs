//! Byte-range negotiation for the streaming endpoint.
//!
//! Parsing and validation are split on purpose: the parser only reads the
//! header, the validator only reasons about the object size. The handler
//! composes them, so each half stays a pure, unit-testable function.

/// A client-requested byte range, before validation against the object size.
///
/// `end: None` is an open-ended range (`bytes=500-`), meaning "to the end of
/// the object".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub start: u64,
    pub end: Option<u64>,
}

/// Decision for one request, made against the resolved object size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the whole object with a 200
    Full { size: u64 },
    /// Serve `[start, end]` (inclusive) with a 206
    Partial { start: u64, end: u64, size: u64 },
    /// The requested range lies outside the object; answer 416
    Unsatisfiable { size: u64 },
}

impl RangeOutcome {
    /// Byte count the response body will carry
    pub fn content_length(&self) -> u64 {
        match self {
            Self::Full { size } => *size,
            Self::Partial { start, end, .. } => end - start + 1,
            Self::Unsatisfiable { .. } => 0,
        }
    }
}

/// Parse a `Range` request header.
///
/// Accepted grammar: `bytes=<start>-<end?>` with a required decimal start
/// and an optional decimal end. Anything else - absent header, other units,
/// suffix form, multiple ranges, junk - yields `None` and the request falls
/// back to full content. A malformed header must never abort the request.
pub fn parse_range_header(header: Option<&str>) -> Option<RequestedRange> {
    let value = header?.trim();
    let ranges = value.strip_prefix("bytes=")?;
    let (start, end) = ranges.split_once('-')?;
    let start: u64 = start.parse().ok()?;
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().ok()?)
    };
    Some(RequestedRange { start, end })
}

/// Validate a requested range against the object size.
///
/// Rules, in order:
/// 1. a range against an empty object is unsatisfiable;
/// 2. no requested range means full content;
/// 3. `start >= size`, `end >= size` or `start > end` is unsatisfiable -
///    an overlong end is rejected, not clamped;
/// 4. otherwise partial, with an open end resolving to `size - 1`.
///
/// The `start > end` comparison matters: skipping it would emit a corrupt
/// `Content-Range` for inverted requests.
pub fn negotiate(requested: Option<RequestedRange>, size: u64) -> RangeOutcome {
    let Some(range) = requested else {
        return RangeOutcome::Full { size };
    };
    if size == 0 {
        return RangeOutcome::Unsatisfiable { size };
    }
    let end = range.end.unwrap_or(size - 1);
    if range.start >= size || end >= size || range.start > end {
        return RangeOutcome::Unsatisfiable { size };
    }
    RangeOutcome::Partial {
        start: range.start,
        end,
        size,
    }
}
