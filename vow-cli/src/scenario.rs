//! Combinator scenarios
//!
//! A scenario file is JSON:
//!
//! ```json
//! {
//!   "limits": { "max_turns": 1000 },
//!   "cases": [
//!     {
//!       "name": "race-failure",
//!       "combinator": "race",
//!       "inputs": [
//!         { "fulfill": { "value": "slow", "after_ms": 800 } },
//!         { "reject": { "reason": "fast", "after_ms": 200 } },
//!         { "value": 42 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::json;
use vow_api::{LimitConfig, RunConfig, Runtime, VowError};
use vow_core::{Promise, Settlement, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    All,
    Race,
    Any,
    AllSettled,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::All => "all",
            Combinator::Race => "race",
            Combinator::Any => "any",
            Combinator::AllSettled => "all_settled",
        }
    }
}

/// One combinator input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// Plain value, already fulfilled
    Value(serde_json::Value),
    Fulfill {
        value: serde_json::Value,
        #[serde(default)]
        after_ms: u64,
    },
    Reject {
        reason: serde_json::Value,
        #[serde(default)]
        after_ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Case {
    pub name: String,
    pub combinator: Combinator,
    #[serde(default)]
    pub inputs: Vec<Input>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub limits: Option<LimitConfig>,
    pub cases: Vec<Case>,
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self, VowError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VowError::Scenario(format!("cannot read '{}': {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| VowError::Scenario(format!("'{}': {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let file: ScenarioFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if file.cases.is_empty() {
            return Err("no cases defined".to_string());
        }
        Ok(file)
    }

    /// Built-in cases, the same set the playground walks through
    pub fn builtin() -> Self {
        fn fulfill(value: serde_json::Value, after_ms: u64) -> Input {
            Input::Fulfill { value, after_ms }
        }
        fn reject(reason: serde_json::Value, after_ms: u64) -> Input {
            Input::Reject { reason, after_ms }
        }
        fn case(name: &str, combinator: Combinator, inputs: Vec<Input>) -> Case {
            Case {
                name: name.to_string(),
                combinator,
                inputs,
            }
        }

        let cases = vec![
            case(
                "all-success",
                Combinator::All,
                vec![fulfill(json!(1), 300), fulfill(json!(2), 100), Input::Value(json!(3))],
            ),
            case(
                "all-failure",
                Combinator::All,
                vec![fulfill(json!(1), 300), reject(json!("broken"), 200), fulfill(json!(3), 100)],
            ),
            case("all-empty", Combinator::All, vec![]),
            case(
                "race-success",
                Combinator::Race,
                vec![
                    fulfill(json!("slower"), 1000),
                    fulfill(json!("faster"), 300),
                    reject(json!("slow fail"), 1200),
                ],
            ),
            case(
                "race-failure",
                Combinator::Race,
                vec![fulfill(json!("slow success"), 800), reject(json!("fast fail"), 200)],
            ),
            case("race-empty", Combinator::Race, vec![]),
            case(
                "any-success",
                Combinator::Any,
                vec![reject(json!("a"), 100), fulfill(json!("b"), 400), fulfill(json!("c"), 500)],
            ),
            case(
                "any-failure",
                Combinator::Any,
                vec![reject(json!("a"), 300), reject(json!("b"), 100)],
            ),
            case(
                "all-settled",
                Combinator::AllSettled,
                vec![fulfill(json!("success"), 500), reject(json!("failure"), 300), Input::Value(json!(42))],
            ),
        ];
        ScenarioFile { limits: None, cases }
    }

    /// Run configuration for this file on top of `base`
    pub fn run_config(&self, base: &RunConfig) -> RunConfig {
        let mut config = base.clone();
        if let Some(limits) = &self.limits {
            config.limits = limits.clone();
        }
        config
    }
}

/// Convert JSON into a runtime value. Objects have no runtime counterpart.
pub fn value_from_json(json: &serde_json::Value) -> Result<Value, VowError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::str(s),
        serde_json::Value::Array(items) => {
            Value::list(items.iter().map(value_from_json).collect::<Result<Vec<_>, _>>()?)
        }
        serde_json::Value::Object(_) => {
            return Err(VowError::Scenario(format!("unsupported input value: {json}")))
        }
    })
}

/// How one case ended
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    pub combinator: Combinator,
    /// `None` when the result never settled
    pub settlement: Option<Settlement>,
    pub at_ms: u64,
    pub turns: u64,
}

impl CaseReport {
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = json!({
            "case": self.name,
            "combinator": self.combinator.as_str(),
            "at_ms": self.at_ms,
            "turns": self.turns,
        });
        match &self.settlement {
            Some(Settlement::Fulfilled(value)) => {
                object["status"] = json!("fulfilled");
                object["value"] = value.to_json();
            }
            Some(Settlement::Rejected(reason)) => {
                object["status"] = json!("rejected");
                object["reason"] = reason.to_json();
            }
            None => object["status"] = json!("pending"),
        }
        object
    }
}

/// Run `case` on a fresh runtime built from `config`
pub fn run_case(case: &Case, config: &RunConfig) -> Result<CaseReport, VowError> {
    let runtime = Runtime::new(config.clone());
    let inputs = case
        .inputs
        .iter()
        .map(|input| build_input(&runtime, input))
        .collect::<Result<Vec<_>, _>>()?;

    let result = match case.combinator {
        Combinator::All => runtime.all(inputs),
        Combinator::Race => runtime.race(inputs),
        Combinator::Any => runtime.any(inputs),
        Combinator::AllSettled => runtime.all_settled(inputs),
    };

    let (settlement, turns) = match runtime.settle(&result) {
        Ok(outcome) => (Some(outcome.settlement), outcome.summary.turns),
        Err(VowError::Stalled) => (None, runtime.event_loop().turn()),
        Err(error) => return Err(error),
    };
    Ok(CaseReport {
        name: case.name.clone(),
        combinator: case.combinator,
        settlement,
        at_ms: runtime.now(),
        turns,
    })
}

fn build_input(runtime: &Runtime, input: &Input) -> Result<Value, VowError> {
    let promise: Promise = match input {
        Input::Value(value) => return value_from_json(value),
        Input::Fulfill { value, after_ms } => runtime.delay_fulfill(value_from_json(value)?, *after_ms),
        Input::Reject { reason, after_ms } => runtime.delay_reject(value_from_json(reason)?, *after_ms),
    };
    Ok(Value::Promise(promise))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_case(name: &str) -> Case {
        ScenarioFile::builtin()
            .cases
            .into_iter()
            .find(|c| c.name == name)
            .unwrap()
    }

    fn run(name: &str) -> serde_json::Value {
        run_case(&builtin_case(name), &RunConfig::default())
            .unwrap()
            .to_json()
    }

    #[test]
    fn test_parse_scenario_file() {
        let file = ScenarioFile::parse(
            r#"{
                "limits": {"max_turns": 50},
                "cases": [{
                    "name": "mixed",
                    "combinator": "all_settled",
                    "inputs": [
                        {"fulfill": {"value": [1, 2], "after_ms": 5}},
                        {"reject": {"reason": "no"}},
                        {"value": null}
                    ]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(file.limits.as_ref().map(|l| l.max_turns), Some(50));
        let case = &file.cases[0];
        assert_eq!(case.combinator, Combinator::AllSettled);
        assert_eq!(
            case.inputs[1],
            Input::Reject {
                reason: json!("no"),
                after_ms: 0
            }
        );
        assert_eq!(file.run_config(&RunConfig::default()).limits.max_turns, 50);
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert!(ScenarioFile::parse(r#"{"cases": []}"#).is_err());
        assert!(ScenarioFile::parse(r#"{"cases": [{"name": "x", "combinator": "first"}]}"#).is_err());
    }

    #[test]
    fn test_object_values_are_rejected() {
        let error = value_from_json(&json!({"a": 1})).unwrap_err();
        assert_eq!(error.kind(), "scenario");
        assert_eq!(value_from_json(&json!([1, "x"])).unwrap(), Value::list([Value::Int(1), Value::str("x")]));
    }

    #[test]
    fn test_builtin_all() {
        assert_eq!(
            run("all-success"),
            json!({"case": "all-success", "combinator": "all", "status": "fulfilled",
                   "value": [1, 2, 3], "at_ms": 300, "turns": 2})
        );
        assert_eq!(run("all-failure")["reason"], json!("broken"));
        assert_eq!(run("all-empty")["value"], json!([]));
    }

    #[test]
    fn test_builtin_race() {
        let success = run("race-success");
        assert_eq!(success["value"], json!("faster"));
        assert_eq!(success["at_ms"], json!(300));

        let failure = run("race-failure");
        assert_eq!(failure["status"], json!("rejected"));
        assert_eq!(failure["reason"], json!("fast fail"));

        let empty = run("race-empty");
        assert_eq!(empty["status"], json!("pending"));
        assert_eq!(empty["turns"], json!(0));
    }

    #[test]
    fn test_builtin_any_and_all_settled() {
        assert_eq!(run("any-success")["value"], json!("b"));
        assert_eq!(
            run("any-failure")["reason"],
            json!({
                "name": "AggregateError",
                "message": "AggregateError: All promises were rejected",
                "errors": ["a", "b"]
            })
        );
        assert_eq!(
            run("all-settled")["value"],
            json!([
                {"status": "fulfilled", "value": "success"},
                {"status": "rejected", "reason": "failure"},
                {"status": "fulfilled", "value": 42}
            ])
        );
    }
}
