use serde::{Serialize, Serializer};

/// Overall direction of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendLabel {
    #[serde(rename = "Alta")]
    Up,
    #[serde(rename = "Baixa")]
    Down,
    #[serde(rename = "Lateral")]
    Sideways,
    #[serde(rename = "Indefinido")]
    Undefined,
}

/// Trend label plus the fractional return it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendResult {
    pub label: TrendLabel,
    pub change: f64,
}

impl TrendResult {
    pub fn undefined() -> Self {
        Self {
            label: TrendLabel::Undefined,
            change: 0.0,
        }
    }
}

/// Price-action setup detected on the latest bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Setup {
    #[serde(rename = "Pullback em alta")]
    PullbackUp,
    #[serde(rename = "Pullback em baixa")]
    PullbackDown,
    #[serde(rename = "Rompimento de alta (20d)")]
    BreakoutUp,
    #[serde(rename = "Rompimento de baixa (20d)")]
    BreakoutDown,
    #[serde(rename = "Engolfo de alta")]
    BullishEngulfing,
    #[serde(rename = "Engolfo de baixa")]
    BearishEngulfing,
}

/// Confirmation backing a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Confirmation {
    #[serde(rename = "Volume acima da media")]
    VolumeAboveAverage,
    #[serde(rename = "Fechamento no topo (20d)")]
    CloseAtHigh,
    #[serde(rename = "Fechamento no fundo (20d)")]
    CloseAtLow,
    #[serde(rename = "Fechamento na MM50")]
    CloseAtSma50,
}

/// Why a risk plan or level set could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    #[serde(rename = "Sem dados")]
    NoData,
    #[serde(rename = "Invalido")]
    Invalid,
}

#[derive(Serialize)]
struct Rejected {
    ok: bool,
    reason: RejectReason,
}

impl Rejected {
    fn new(reason: RejectReason) -> Self {
        Self { ok: false, reason }
    }
}

/// Entry/stop/target plan for a long trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskPlan {
    Planned {
        entry: f64,
        stop: f64,
        target: f64,
        rr: f64,
        is_good: bool,
    },
    Rejected(RejectReason),
}

impl RiskPlan {
    pub fn is_ok(&self) -> bool {
        matches!(self, RiskPlan::Planned { .. })
    }

    /// Reward/risk ratio, if the plan was produced.
    pub fn rr(&self) -> Option<f64> {
        match self {
            RiskPlan::Planned { rr, .. } => Some(*rr),
            RiskPlan::Rejected(_) => None,
        }
    }
}

impl Serialize for RiskPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Planned {
            ok: bool,
            entry: f64,
            stop: f64,
            target: f64,
            rr: f64,
            is_good: bool,
        }

        match *self {
            RiskPlan::Planned {
                entry,
                stop,
                target,
                rr,
                is_good,
            } => Planned {
                ok: true,
                entry,
                stop,
                target,
                rr,
                is_good,
            }
            .serialize(serializer),
            RiskPlan::Rejected(reason) => Rejected::new(reason).serialize(serializer),
        }
    }
}

/// Breakout and invalidation levels for the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Levels {
    Found {
        breakout_high: f64,
        breakout_low: f64,
        stop: f64,
        invalidation: f64,
    },
    Rejected(RejectReason),
}

impl Serialize for Levels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Found {
            ok: bool,
            breakout_high: f64,
            breakout_low: f64,
            stop: f64,
            invalidation: f64,
        }

        match *self {
            Levels::Found {
                breakout_high,
                breakout_low,
                stop,
                invalidation,
            } => Found {
                ok: true,
                breakout_high,
                breakout_low,
                stop,
                invalidation,
            }
            .serialize(serializer),
            Levels::Rejected(reason) => Rejected::new(reason).serialize(serializer),
        }
    }
}

/// Points awarded per signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub trend_score: u32,
    pub pattern_score: u32,
    pub volume_score: u32,
    pub momentum_score: u32,
    pub rr_score: u32,
}

impl ScoreBreakdown {
    /// Plain sum of the sub-scores. Never clamped.
    pub fn total(&self) -> u32 {
        self.trend_score + self.pattern_score + self.volume_score + self.momentum_score + self.rr_score
    }
}

/// Confluence score (0-100) with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
}

/// Snapshot of the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// Full analysis of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerAnalysis {
    pub score: ScoreResult,
    pub trend: TrendResult,
    pub setups: Vec<Setup>,
    pub confirmations: Vec<Confirmation>,
    pub risk: RiskPlan,
    pub levels: Levels,
    /// Reward/risk of the plan, 0 when the plan was rejected.
    pub rr: f64,
    pub quote: Quote,
    pub logo: Option<String>,
}

/// Per-ticker record stored by the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRecord {
    Ready(Box<TickerAnalysis>),
    Unavailable,
}

impl AnalysisRecord {
    pub fn is_ok(&self) -> bool {
        matches!(self, AnalysisRecord::Ready(_))
    }

    pub fn analysis(&self) -> Option<&TickerAnalysis> {
        match self {
            AnalysisRecord::Ready(analysis) => Some(analysis),
            AnalysisRecord::Unavailable => None,
        }
    }
}

impl Serialize for AnalysisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Ready<'a> {
            ok: bool,
            #[serde(flatten)]
            analysis: &'a TickerAnalysis,
        }

        #[derive(Serialize)]
        struct Unavailable {
            ok: bool,
        }

        match self {
            AnalysisRecord::Ready(analysis) => Ready { ok: true, analysis }.serialize(serializer),
            AnalysisRecord::Unavailable => Unavailable { ok: false }.serialize(serializer),
        }
    }
}
