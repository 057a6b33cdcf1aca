//! The unit handed to a sink.

/// One serialized event, tagged with the uid it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload {
    /// Event uid, for logging.
    pub uid: String,
    /// Serialized XML document.
    pub xml: String,
}

impl EventPayload {
    pub fn new(uid: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            xml: xml.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.xml.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.xml.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xml.is_empty()
    }
}
