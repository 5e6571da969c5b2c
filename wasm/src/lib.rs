//! WebAssembly module for the market-garden planner
//!
//! Provides client-side planning for the browser UI:
//! - Full planning runs from a JSON request
//! - What-if scenarios
//! - The stock crop catalog
//! - Bed capacity conversion
//!
//! Every entry point takes and returns JSON strings. Errors cross the
//! boundary as a JSON `{code, message}` object.

use engine::{
    generate_scenarios, plan, to_equivalent, CompositionTable, PlanInputs, PlannerError,
    PlannerResult, PlannerSettings,
};
use serde::Deserialize;
use shared::{default_catalog, BedLength, CropCatalog, CropDefinition};
use wasm_bindgen::prelude::*;

/// A planning request as sent by the UI
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub inputs: PlanInputs,
    /// Weekly composition used as the demand oracle
    #[serde(default)]
    pub composition: CompositionTable,
    /// Custom crop definitions; the stock catalog when absent
    #[serde(default)]
    pub catalog: Option<Vec<CropDefinition>>,
    #[serde(default)]
    pub settings: Option<PlannerSettings>,
}

impl PlanRequest {
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn catalog(&self) -> PlannerResult<CropCatalog> {
        match &self.catalog {
            Some(crops) => Ok(CropCatalog::load(crops.clone())?),
            None => Ok(default_catalog()),
        }
    }

    fn settings(&self) -> PlannerSettings {
        self.settings.clone().unwrap_or_default()
    }
}

/// Run the planning pipeline and serialize the plan
pub fn run_plan(request_json: &str) -> PlannerResult<String> {
    let request = PlanRequest::from_json(request_json)?;
    let catalog = request.catalog()?;
    let output = plan(
        &request.inputs,
        &catalog,
        &request.composition,
        &request.settings(),
    )?;
    Ok(serde_json::to_string(&output)?)
}

/// Generate the scenario set and serialize it
pub fn run_scenarios(request_json: &str) -> PlannerResult<String> {
    let request = PlanRequest::from_json(request_json)?;
    let catalog = request.catalog()?;
    let set = generate_scenarios(
        &request.inputs,
        &catalog,
        &request.composition,
        &request.settings(),
    )?;
    Ok(serde_json::to_string(&set)?)
}

/// 15m-equivalent beds for a bed count of the given length in meters
pub fn equivalent_beds(beds: u32, bed_length_m: u32) -> Result<u32, String> {
    let bed_length = BedLength::try_from(bed_length_m)?;
    Ok(to_equivalent(beds, bed_length))
}

fn to_js_error(err: PlannerError) -> JsValue {
    match serde_json::to_string(&err.to_detail()) {
        Ok(detail) => JsValue::from_str(&detail),
        Err(_) => JsValue::from_str(&err.to_string()),
    }
}

/// Compute a full plan from a JSON request
#[wasm_bindgen]
pub fn plan_json(request_json: &str) -> Result<String, JsValue> {
    run_plan(request_json).map_err(to_js_error)
}

/// Compute the Conservative, Balanced, Ambitious and Current scenarios
#[wasm_bindgen]
pub fn scenarios_json(request_json: &str) -> Result<String, JsValue> {
    run_scenarios(request_json).map_err(to_js_error)
}

/// Stock crop catalog as JSON
#[wasm_bindgen]
pub fn default_catalog_json() -> Result<String, JsValue> {
    serde_json::to_string(&default_catalog())
        .map_err(|e| to_js_error(PlannerError::Serialization(e)))
}

/// Convert beds of 15 or 30 meters to 15m-equivalent beds
#[wasm_bindgen]
pub fn equivalent_capacity(beds: u32, bed_length_m: u32) -> Result<u32, JsValue> {
    equivalent_beds(beds, bed_length_m).map_err(|e| JsValue::from_str(&e))
}
