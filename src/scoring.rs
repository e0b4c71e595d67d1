//! Classification policies for the two yes/no fields that carry a
//! confidence: hazardous substance and dangerous good.
//!
//! The extractors only gather evidence. Turning evidence into a verdict
//! happens here so the weights live in one place.

pub const HAZARD_NEGATED: f64 = 1.0;
pub const HAZARD_STATEMENTS: f64 = 0.9;
pub const HAZARD_KEYWORD: f64 = 0.5;
pub const HAZARD_NONE: f64 = 0.2;

pub const DG_NEGATED: f64 = 1.0;
pub const DG_UN_AND_CLASS: f64 = 1.0;
pub const DG_TWO_SIGNALS: f64 = 0.8;
pub const DG_ONE_SIGNAL: f64 = 0.6;
pub const DG_NONE: f64 = 0.0;

/// A verdict and how sure we are of it, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub value: bool,
    pub confidence: f64,
}

impl Classification {
    pub fn new(value: bool, confidence: f64) -> Self {
        Self {
            value,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// What section 2 says about hazards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardEvidence {
    /// An explicit "not classified as hazardous" style statement.
    pub negated: bool,
    pub has_statements: bool,
    /// The text talks about hazards without listing H-statements.
    pub has_keyword: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardScoringPolicy {
    pub negated: f64,
    pub statements: f64,
    pub keyword_only: f64,
    pub no_evidence: f64,
}

impl Default for HazardScoringPolicy {
    fn default() -> Self {
        Self {
            negated: HAZARD_NEGATED,
            statements: HAZARD_STATEMENTS,
            keyword_only: HAZARD_KEYWORD,
            no_evidence: HAZARD_NONE,
        }
    }
}

impl HazardScoringPolicy {
    /// An explicit negation beats everything else.
    pub fn classify(&self, evidence: &HazardEvidence) -> Classification {
        if evidence.negated {
            Classification::new(false, self.negated)
        } else if evidence.has_statements {
            Classification::new(true, self.statements)
        } else if evidence.has_keyword {
            Classification::new(true, self.keyword_only)
        } else {
            Classification::new(false, self.no_evidence)
        }
    }
}

/// What section 14 says about transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportEvidence {
    pub negated: bool,
    pub has_un_number: bool,
    pub has_class: bool,
    pub has_packing_group: bool,
}

impl TransportEvidence {
    pub fn signal_count(&self) -> usize {
        [self.has_un_number, self.has_class, self.has_packing_group]
            .iter()
            .filter(|s| **s)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerousGoodsScoringPolicy {
    pub negated: f64,
    pub un_and_class: f64,
    pub two_signals: f64,
    pub one_signal: f64,
    pub no_signals: f64,
}

impl Default for DangerousGoodsScoringPolicy {
    fn default() -> Self {
        Self {
            negated: DG_NEGATED,
            un_and_class: DG_UN_AND_CLASS,
            two_signals: DG_TWO_SIGNALS,
            one_signal: DG_ONE_SIGNAL,
            no_signals: DG_NONE,
        }
    }
}

impl DangerousGoodsScoringPolicy {
    pub fn classify(&self, evidence: &TransportEvidence) -> Classification {
        if evidence.negated {
            return Classification::new(false, self.negated);
        }
        if evidence.has_un_number && evidence.has_class {
            return Classification::new(true, self.un_and_class);
        }
        match evidence.signal_count() {
            0 => Classification::new(false, self.no_signals),
            1 => Classification::new(true, self.one_signal),
            _ => Classification::new(true, self.two_signals),
        }
    }
}
