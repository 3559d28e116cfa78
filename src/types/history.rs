use serde::{Deserialize, Serialize};

/// A raw field as delivered by the quote API: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Finite numeric value, if any.
    pub fn finite(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

/// Unvalidated history record, in whatever order the provider returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_close: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<RawNumber>,
}

impl RawHistoryRecord {
    /// Build a record from already-numeric OHLCV values.
    pub fn new(date: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date: Some(RawNumber::Number(date as f64)),
            open: Some(open.into()),
            high: Some(high.into()),
            low: Some(low.into()),
            close: Some(close.into()),
            adjusted_close: None,
            volume: Some(volume.into()),
        }
    }

    /// Epoch seconds, when present and integral-finite.
    pub fn date(&self) -> Option<i64> {
        self.date.as_ref()?.finite().map(|d| d as i64)
    }

    /// Primary close, falling back to the adjusted close when the primary one is absent.
    pub fn close(&self) -> Option<f64> {
        self.close
            .as_ref()
            .or(self.adjusted_close.as_ref())?
            .finite()
    }

    fn field(value: &Option<RawNumber>) -> Option<f64> {
        value.as_ref()?.finite()
    }

    pub fn open(&self) -> Option<f64> {
        Self::field(&self.open)
    }

    pub fn high(&self) -> Option<f64> {
        Self::field(&self.high)
    }

    pub fn low(&self) -> Option<f64> {
        Self::field(&self.low)
    }

    pub fn volume(&self) -> Option<f64> {
        Self::field(&self.volume)
    }
}

impl From<&HistoryPoint> for RawHistoryRecord {
    fn from(point: &HistoryPoint) -> Self {
        RawHistoryRecord::new(
            point.date,
            point.open,
            point.high,
            point.low,
            point.close,
            point.volume,
        )
    }
}

/// Closing price at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: i64,
    pub close: f64,
}

/// Validated daily OHLCV bar. Every field is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Unix timestamp in seconds.
    pub date: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl HistoryPoint {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// History payload returned by a history source for one symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    pub symbol: String,
    pub history: Vec<RawHistoryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
