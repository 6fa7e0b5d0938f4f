use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::catch_prob::{effective_completion, roll_mean};
use crate::engine::config::DEFAULT_CONFIG;
use crate::engine::drive::{simulate_drive, DriveSetup};
use crate::engine::rng;
use crate::engine::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{Defense, DriveResult, FieldPosition, Offense};
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Deserialize)]
pub struct DriveRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub offense: Offense,
    pub defense: Defense,
    /// Defaults to 1st-and-10 from the 75
    #[serde(default)]
    pub field: FieldPosition,
    /// Overrides the process default config when present
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub result: DriveResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    /// `(throwing + awareness) / 2` of the passer
    pub accuracy: f32,
    #[serde(default)]
    pub pressure: f32,
    pub catch_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub roll_mean: f32,
    pub completion_pct: f32,
}

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        warn!("rejecting request with schema version {}", version);
        return Err(EngineError::UnsupportedSchema(version));
    }
    Ok(())
}

/// Simulate one drive from a JSON request.
///
/// The same request (seed included) always yields byte-identical output.
pub fn simulate_drive_json(request_json: &str) -> Result<String> {
    let request: DriveRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let DriveRequest { seed, offense, defense, field, config, .. } = request;
    let config = match config {
        Some(config) => {
            config.validate()?;
            config
        }
        None => DEFAULT_CONFIG.clone(),
    };

    info!(
        "Simulating drive: seed {}, {} receivers, {} rushers, {} yards from goal",
        seed,
        offense.receivers.len(),
        defense.line.len(),
        field.yards_from_goal
    );

    let setup = DriveSetup::new(offense, defense, field);
    let mut rng = rng::seeded(seed);
    let result = simulate_drive(&setup, &config, &mut rng)?;

    debug!("Drive finished: {:?} ({} points, {} plays)", result.outcome, result.points, result.plays.len());

    let response = DriveResponse { schema_version: SCHEMA_VERSION, seed, result };
    Ok(serde_json::to_string(&response)?)
}

/// Analytics completion percentage for an accuracy/pressure/threshold triple.
pub fn effective_completion_json(request_json: &str) -> Result<String> {
    let request: CompletionRequest = serde_json::from_str(request_json)?;
    let mean = roll_mean(request.accuracy, request.pressure, &DEFAULT_CONFIG.catch);
    let response = CompletionResponse {
        roll_mean: mean,
        completion_pct: effective_completion(request.catch_threshold, mean),
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(id: u32, position: &str, value: f32) -> serde_json::Value {
        let skills: serde_json::Map<String, serde_json::Value> = crate::models::Skill::ALL
            .iter()
            .map(|s| (serde_json::to_value(s).unwrap().as_str().unwrap().to_string(), json!(value)))
            .collect();
        json!({ "id": id, "name": format!("{position}{id}"), "position": position, "attributes": skills })
    }

    fn request(seed: u64) -> serde_json::Value {
        json!({
            "schema_version": 1,
            "seed": seed,
            "offense": {
                "quarterback": player(1, "QB", 75.0),
                "qb_trait": "gunslinger",
                "receivers": [player(10, "WR", 72.0), player(11, "WR", 70.0), player(12, "TE", 65.0)],
                "line": [player(60, "OL", 70.0), player(61, "OL", 70.0), player(62, "OL", 70.0),
                         player(63, "OL", 70.0), player(64, "OL", 70.0)]
            },
            "defense": {
                "line": [player(90, "DL", 70.0), player(91, "DL", 70.0), player(92, "DL", 70.0), player(93, "DL", 70.0)],
                "coverage": [
                    { "player": player(20, "CB", 70.0), "assignment": { "type": "man", "receiver": 10 } },
                    { "player": player(21, "CB", 70.0), "assignment": { "type": "man", "receiver": 11 } },
                    { "player": player(30, "LB", 65.0), "assignment": { "type": "zone", "depth": "underneath" } },
                    { "player": player(40, "S", 70.0), "assignment": { "type": "zone", "depth": "deep" } }
                ]
            },
            "field": { "yards_from_goal": 75, "yards_to_go": 10, "down": 1 }
        })
    }

    #[test]
    fn test_simulate_drive_json() {
        let out = simulate_drive_json(&request(42).to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["seed"], 42);
        assert!(parsed["result"]["points"].is_number());
        assert!(parsed["result"]["plays"].is_array());
    }

    #[test]
    fn test_same_request_same_output() {
        let req = request(999).to_string();
        assert_eq!(simulate_drive_json(&req).unwrap(), simulate_drive_json(&req).unwrap());
    }

    #[test]
    fn test_rejects_unknown_schema() {
        let mut req = request(1);
        req["schema_version"] = json!(2);
        assert!(matches!(simulate_drive_json(&req.to_string()), Err(EngineError::UnsupportedSchema(2))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(simulate_drive_json("{ not json"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_config_override_is_validated() {
        let mut req = request(1);
        req["config"] = json!({ "play": { "max_rounds": 0 } });
        assert!(matches!(simulate_drive_json(&req.to_string()), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_vision_noise_override_is_rejected() {
        let mut req = request(1);
        req["config"] = json!({ "decision": { "vision_noise": -1.0 } });
        assert!(matches!(simulate_drive_json(&req.to_string()), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_effective_completion_json() {
        let out = effective_completion_json(r#"{"accuracy": 85, "pressure": 0, "catch_threshold": 70}"#).unwrap();
        let parsed: CompletionResponse = serde_json::from_str(&out).unwrap();
        assert!((parsed.roll_mean - 62.0).abs() < 1e-3);
        assert!((parsed.completion_pct - 67.7).abs() < 0.5);
    }
}
