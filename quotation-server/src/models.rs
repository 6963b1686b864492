use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Upstream wire format
#[derive(Debug, Deserialize)]
pub struct UpstreamEnvelope {
    #[serde(rename = "USDBRL")]
    pub usdbrl: UpstreamQuote,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamQuote {
    pub code: String,
    pub codein: String,
    pub bid: String,
    pub create_date: String,
    pub name: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    #[serde(rename = "varBid")]
    pub var_bid: Option<String>,
    #[serde(rename = "pctChange")]
    pub pct_change: Option<String>,
    pub ask: Option<String>,
    pub timestamp: Option<String>,
}

/// A USD/BRL snapshot taken from one upstream response.
///
/// `bid` is kept as the upstream text and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotation {
    pub code: String,
    pub code_in: String,
    pub bid: String,
    pub create_date: String,
}

impl From<UpstreamEnvelope> for Quotation {
    fn from(envelope: UpstreamEnvelope) -> Self {
        let quote = envelope.usdbrl;
        Self {
            code: quote.code,
            code_in: quote.codein,
            bid: quote.bid,
            create_date: quote.create_date,
        }
    }
}

// Database models
#[derive(Debug, Clone)]
pub struct PersistedRecord {
    pub id: String,
    pub code: String,
    pub code_in: String,
    pub bid: String,
    pub create_date: String,
    pub quotation_date: DateTime<Utc>,
}

// Response models
#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub bid: String,
}

impl From<&Quotation> for BidResponse {
    fn from(quotation: &Quotation) -> Self {
        Self {
            bid: quotation.bid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4612","low":"5.4010","varBid":"0.0123","pctChange":"0.23","bid":"5.4300","ask":"5.4310","timestamp":"1700000000","create_date":"2023-11-14 19:13:20"}}"#;

    #[test]
    fn decodes_upstream_envelope() {
        let envelope: UpstreamEnvelope = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(envelope.usdbrl.var_bid.as_deref(), Some("0.0123"));

        let quotation = Quotation::from(envelope);
        assert_eq!(quotation.code, "USD");
        assert_eq!(quotation.code_in, "BRL");
        assert_eq!(quotation.create_date, "2023-11-14 19:13:20");
    }

    #[test]
    fn bid_keeps_upstream_formatting() {
        let envelope: UpstreamEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let quotation = Quotation::from(envelope);
        assert_eq!(quotation.bid, "5.4300");
        assert_eq!(
            serde_json::to_string(&BidResponse::from(&quotation)).unwrap(),
            r#"{"bid":"5.4300"}"#
        );
    }

    #[test]
    fn rejects_envelope_without_required_fields() {
        assert!(serde_json::from_str::<UpstreamEnvelope>(r#"{"USDBRL":{}}"#).is_err());
        assert!(serde_json::from_str::<UpstreamEnvelope>(r#"{"EURBRL":{"bid":"6.1"}}"#).is_err());
        assert!(serde_json::from_str::<UpstreamEnvelope>(
            r#"{"USDBRL":{"code":"USD","codein":"BRL","bid":5.43,"create_date":"x"}}"#
        )
        .is_err());
    }
}
