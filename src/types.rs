/// Request and response body type used by every handler.
pub type Body = bytes::Bytes;
