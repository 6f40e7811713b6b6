//! Metric definitions for the relay crate.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "Counter",
            MetricType::Gauge => "Gauge",
            MetricType::Histogram => "Histogram",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const INVOCATIONS: MetricDef = MetricDef {
    name: "relay.invocations",
    metric_type: MetricType::Counter,
    description: "Relay invocations started",
};

pub const ERROR_ENVELOPES: MetricDef = MetricDef {
    name: "relay.errors",
    metric_type: MetricType::Counter,
    description: "Invocations answered with an error envelope",
};

pub const JOBS_PERSISTED: MetricDef = MetricDef {
    name: "relay.jobs_persisted",
    metric_type: MetricType::Counter,
    description: "Relay results journaled to the job store",
};

pub const ALL_METRICS: &[MetricDef] = &[INVOCATIONS, ERROR_ENVELOPES, JOBS_PERSISTED];
