//! JSON dashboard output

use crate::models::Presentation;
use crate::reporter::Reporter;
use anyhow::Result;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn generate(presentation: &Presentation) -> Result<String> {
        serde_json::to_string_pretty(presentation).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::present_demo;

    #[test]
    fn test_demo_json_shape() {
        let json = JsonReporter::generate(&present_demo("no reports")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"]["kind"], "demo");
        assert_eq!(value["view"]["counters"]["total"], 41);
        assert_eq!(value["view"]["chart"].as_array().map(|a| a.len()), Some(4));
    }
}
