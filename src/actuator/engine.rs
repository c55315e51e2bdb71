// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Rule engine
//!
//! [`RuleEngine`] resolves a reading into [`Conditions`] and runs the rule
//! table over it. It holds nothing but thresholds and a reference to the
//! table, so one engine can be shared freely between threads.

use super::conditions::Conditions;
use super::rules::{Rule, RULES};
use super::thresholds::Thresholds;
use super::ControlDecision;
use crate::reading::Reading;
use serde::Serialize;

/// Result of an evaluation with its audit trail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Final commands
    pub decision: ControlDecision,
    /// Inputs after defaults
    pub conditions: Conditions,
    /// Names of the rules that fired, in firing order
    pub fired: Vec<&'static str>,
}

impl Evaluation {
    /// Whether a given rule fired
    pub fn fired(&self, name: &str) -> bool {
        self.fired.iter().any(|n| *n == name)
    }
}

/// Evaluates readings against an ordered rule table
#[derive(Debug, Clone)]
pub struct RuleEngine {
    thresholds: Thresholds,
    rules: &'static [Rule],
}

impl RuleEngine {
    /// Create an engine with the reference greenhouse thresholds
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::GREENHOUSE)
    }

    /// Create an engine with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            rules: RULES,
        }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Rule table in use
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Compute the device commands for one reading
    pub fn evaluate(&self, reading: &Reading) -> ControlDecision {
        let conditions = Conditions::resolve(reading, &self.thresholds);
        let mut decision = ControlDecision::OFF;
        for rule in self.rules {
            rule.apply(&conditions, &self.thresholds, &mut decision);
        }
        decision
    }

    /// Compute the commands for each reading, in input order
    pub fn evaluate_all(&self, readings: &[Reading]) -> Vec<ControlDecision> {
        readings.iter().map(|r| self.evaluate(r)).collect()
    }

    /// Evaluate one reading and record which rules fired
    pub fn explain(&self, reading: &Reading) -> Evaluation {
        let conditions = Conditions::resolve(reading, &self.thresholds);
        let mut decision = ControlDecision::OFF;
        let mut fired = Vec::new();

        for rule in self.rules {
            if rule.apply(&conditions, &self.thresholds, &mut decision) {
                trace!("rule {} fired at hour {}", rule.name, conditions.hour);
                fired.push(rule.name);
            }
        }

        Evaluation {
            decision,
            conditions,
            fired,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_defaults_at_noon() {
        let engine = RuleEngine::new();
        let decision = engine.evaluate(&Reading::new());

        // Outside air falls back to 20°C / 60%, which is comfortable
        assert!(!decision.fan);
        assert!(!decision.pump);
        assert!(decision.light);
        assert!(decision.roof);
    }

    #[test]
    fn test_explain_matches_evaluate() {
        let engine = RuleEngine::new();
        let reading = Reading::new()
            .at("2025-02-18T13:00:00Z")
            .with_greenhouse(27.0, 85.0)
            .with_weather(30.0, 20.0)
            .with_uv(9.5);

        let evaluation = engine.explain(&reading);
        assert_eq!(evaluation.decision, engine.evaluate(&reading));
        assert!(evaluation.fired("fan.air_too_hot"));
        assert!(evaluation.fired("roof.peak_uv"));
        assert!(!evaluation.fired("roof.outside_comfortable"));
    }

    #[test]
    fn test_fired_order_follows_table() {
        let engine = RuleEngine::new();
        let evaluation = engine.explain(&Reading::new());
        let positions: Vec<usize> = evaluation
            .fired
            .iter()
            .map(|name| engine.rules().iter().position(|r| r.name == *name).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_evaluate_all_keeps_order() {
        let engine = RuleEngine::default();
        let hot = Reading::new().with_greenhouse(30.0, 60.0).with_weather(35.0, 20.0);
        let calm = Reading::new();
        let decisions = engine.evaluate_all(&[hot.clone(), calm.clone(), hot.clone()]);
        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0], engine.evaluate(&hot));
        assert_eq!(decisions[1], engine.evaluate(&calm));
        assert_eq!(decisions[0], decisions[2]);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut thresholds = Thresholds::GREENHOUSE;
        thresholds.soil_humidity.min = 20.0;
        let engine = RuleEngine::with_thresholds(thresholds);
        let reading = Reading::new().with_soil(18.0, 30.0).with_weather(18.0, 50.0);
        assert!(!engine.evaluate(&reading).pump);
        assert!(RuleEngine::new().evaluate(&reading).pump);
    }
}
