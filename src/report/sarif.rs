use super::Subject;
use crate::analyze::vulnerability::NO_VULNERABILITIES;
use crate::types::report::AnalysisResult;
use crate::types::scoring::RiskLevel;
use serde_json::json;

pub fn to_sarif(result: &AnalysisResult, subject: &Subject) -> Result<String, serde_json::Error> {
    let level = if result.vulnerabilities.risk_level() == RiskLevel::High {
        "error"
    } else {
        "warning"
    };

    // A degraded document has no findings; its error goes to the invocation.
    let findings: &[String] = if result.failure.is_some() {
        &[]
    } else {
        result.vulnerabilities.details()
    };
    let results: Vec<_> = findings
        .iter()
        .filter(|detail| detail.as_str() != NO_VULNERABILITIES)
        .map(|detail| {
            json!({
                "ruleId": "guardfi.vulnerability",
                "level": level,
                "message": { "text": detail },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": subject.path }
                    }
                }],
            })
        })
        .collect();

    let mut artifact = json!({ "location": { "uri": subject.path } });
    if let Some(sha256) = &subject.sha256 {
        artifact["hashes"] = json!({ "sha-256": sha256 });
    }

    let invocation = match &result.failure {
        Some(message) => json!({
            "executionSuccessful": false,
            "toolExecutionNotifications": [{
                "level": "error",
                "message": { "text": message },
            }],
        }),
        None => json!({ "executionSuccessful": true }),
    };

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "guardfi",
                    "version": env!("CARGO_PKG_VERSION"),
                }
            },
            "invocations": [invocation],
            "artifacts": [artifact],
            "properties": {
                "overall_score": result.overall_score,
                "recommendations": result.recommendations,
            },
            "results": results
        }]
    });

    serde_json::to_string_pretty(&sarif)
}
