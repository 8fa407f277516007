use std::path::Path;

use crate::audit::QueryRecord;
use crate::error::{Result, VoxgateError};
use crate::eval::{CaseResult, CaseStatus, EvalCase, EvalReport, EvalSuite};
use crate::normalize::Modality;

/// Execute the `eval` command: run every case in the suite against a running
/// server and report the bypass rate.
///
/// Observed verdicts are read from `/api/audit` rather than inferred from
/// response text, so a generator failure is never miscounted as a block.
pub async fn execute(cases: &Path, base_url: &str) -> Result<()> {
    let suite = EvalSuite::load(cases)?;
    let base_url = base_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    println!("Running {} case(s) against {base_url}", suite.cases.len());

    let mut report = EvalReport::default();
    let mut errors = 0usize;

    for case in &suite.cases {
        let audit_len_before = fetch_audit(&client, base_url).await?.len();

        if let Err(e) = submit(&client, base_url, case).await {
            // A rejected request (e.g. untranscribable audio) never reached
            // the filter, so there is no verdict to score.
            println!("  ERROR  {} ({e})", case.name);
            errors += 1;
            continue;
        }

        let audit = fetch_audit(&client, base_url).await?;
        let Some(record) = audit.get(audit_len_before).or_else(|| audit.last()) else {
            println!("  ERROR  {} (no audit record produced)", case.name);
            errors += 1;
            continue;
        };

        let result = CaseResult::new(case, record.verdict);
        match result.status {
            CaseStatus::Pass => println!("  PASS   {}", case.name),
            CaseStatus::Bypass => {
                println!("  BYPASS {} (SECURITY FAILURE: filter evaded)", case.name)
            }
            CaseStatus::Overblock => println!("  FAIL   {} (overblocked)", case.name),
        }
        report.push(result);
    }

    println!();
    println!(
        "passes: {}  bypasses: {}  overblocks: {}  errors: {}",
        report.passes(),
        report.bypasses(),
        report.overblocks(),
        errors
    );
    println!("bypass rate: {:.1}%", report.bypass_rate() * 100.0);

    Ok(())
}

async fn submit(client: &reqwest::Client, base_url: &str, case: &EvalCase) -> Result<()> {
    let response = match case.modality {
        Modality::Text => {
            client
                .post(format!("{base_url}/api/query"))
                .json(&serde_json::json!({ "text": case.input }))
                .send()
                .await?
        }
        Modality::Audio => {
            let bytes = std::fs::read(&case.input).map_err(|e| {
                VoxgateError::InvalidInput(format!(
                    "cannot read audio file {}: {e}",
                    case.input
                ))
            })?;
            let form = reqwest::multipart::Form::new().part(
                "audio_file",
                reqwest::multipart::Part::bytes(bytes).file_name(case.input.clone()),
            );
            client
                .post(format!("{base_url}/api/query/audio"))
                .multipart(form)
                .send()
                .await?
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(VoxgateError::Server(format!(
            "server returned {status} for case"
        )));
    }
    Ok(())
}

async fn fetch_audit(client: &reqwest::Client, base_url: &str) -> Result<Vec<QueryRecord>> {
    let records = client
        .get(format!("{base_url}/api/audit"))
        .send()
        .await?
        .json::<Vec<QueryRecord>>()
        .await?;
    Ok(records)
}
