use serde::{Deserialize, Serialize};

/// Structured field bag shipped to the collector.
///
/// Every field is a plain string; optional fields are skipped during
/// serialization when empty. `timestamp`, `level` and `appname` are always
/// present in the output.
///
/// The dispatcher overwrites `timestamp`, `level`, `message`, `hostname`
/// and `ip_address` before serializing, so values set by callers for those
/// fields never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub level: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(rename = "appname", default)]
    pub app_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(rename = "tr_id", default, skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rrn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publish_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cf_trid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub device_info: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub param_a: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub param_b: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub param_c: String,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = transaction_id.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_bank_code(mut self, bank_code: impl Into<String>) -> Self {
        self.bank_code = bank_code.into();
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = reference_id.into();
        self
    }

    pub fn with_rrn(mut self, rrn: impl Into<String>) -> Self {
        self.rrn = rrn.into();
        self
    }

    pub fn with_publish_id(mut self, publish_id: impl Into<String>) -> Self {
        self.publish_id = publish_id.into();
        self
    }

    pub fn with_cf_trid(mut self, cf_trid: impl Into<String>) -> Self {
        self.cf_trid = cf_trid.into();
        self
    }

    pub fn with_device_info(mut self, device_info: impl Into<String>) -> Self {
        self.device_info = device_info.into();
        self
    }

    pub fn with_params(
        mut self,
        param_a: impl Into<String>,
        param_b: impl Into<String>,
        param_c: impl Into<String>,
    ) -> Self {
        self.param_a = param_a.into();
        self.param_b = param_b.into();
        self.param_c = param_c.into();
        self
    }

    /// Serialize the record into the JSON payload sent to the collector.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn keys(record: &LogRecord) -> Vec<String> {
        let value: Value = serde_json::from_slice(&record.to_json().unwrap()).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn zero_value_record_only_emits_mandatory_keys() {
        assert_eq!(keys(&LogRecord::default()), vec!["appname", "level", "timestamp"]);
    }

    #[test]
    fn wire_keys_use_collector_names() {
        let record = LogRecord::new()
            .with_app_name("payments")
            .with_transaction_id("tx-1")
            .with_channel("mobile")
            .with_bank_code("014")
            .with_reference_id("ref")
            .with_rrn("123456789012")
            .with_publish_id("pub")
            .with_cf_trid("cf")
            .with_device_info("android")
            .with_params("a", "b", "c");

        assert_eq!(
            keys(&record),
            vec![
                "appname",
                "bank_code",
                "cf_trid",
                "channel",
                "device_info",
                "level",
                "param_a",
                "param_b",
                "param_c",
                "publish_id",
                "reference_id",
                "rrn",
                "timestamp",
                "tr_id",
            ]
        );
    }

    #[test]
    fn empty_app_name_is_still_emitted() {
        let payload = LogRecord::default().to_json().unwrap();
        let value: Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["appname"], "");
    }

    #[test]
    fn deserializes_partial_payload() {
        let record: LogRecord =
            serde_json::from_str(r#"{"level":"INFO","tr_id":"abc"}"#).unwrap();
        assert_eq!(record.level, "INFO");
        assert_eq!(record.transaction_id, "abc");
        assert!(record.app_name.is_empty());
    }
}
