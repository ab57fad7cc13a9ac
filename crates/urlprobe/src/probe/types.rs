/// A fully received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// HTTP status code
    pub status_code: u16,

    /// Body decoded as UTF-8 (invalid sequences replaced)
    pub body: String,

    /// Number of raw body bytes received
    pub size_bytes: usize,

    /// Time from request start until the last body byte arrived
    pub elapsed_millis: u64,
}

impl ProbeResult {
    /// Build a result from an already decoded body.
    pub fn new(status_code: u16, body: impl Into<String>, elapsed_millis: u64) -> Self {
        let body = body.into();
        Self { status_code, size_bytes: body.len(), body, elapsed_millis }
    }

    /// Build a result from raw body bytes.
    pub fn from_bytes(status_code: u16, raw: &[u8], elapsed_millis: u64) -> Self {
        Self {
            status_code,
            body: String::from_utf8_lossy(raw).into_owned(),
            size_bytes: raw.len(),
            elapsed_millis,
        }
    }
}
