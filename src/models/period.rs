/// One metric value out of a billing period: either a per-service group
/// (grouped mode) or the period total (ungrouped mode, `service` is `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub service: Option<String>,
    pub amount: String,
    pub unit: String,
}

/// SDK-independent form of one `ResultByTime`, so flattening and its tests
/// stay free of Cost Explorer types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodCosts {
    pub start: String,
    pub end: String,
    pub entries: Vec<CostEntry>,
}
