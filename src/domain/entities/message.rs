/// An inbound SMS as handed over by the transport layer.
///
/// The correlation id ties every log line for one message together; it is
/// opaque to the processing logic itself.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender_raw_phone: String,
    pub body: String,
    pub correlation_id: String,
}

impl InboundMessage {
    pub fn new(sender_raw_phone: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender_raw_phone: sender_raw_phone.into(),
            body: body.into(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }
}
