use serde::Serialize;

use iv_core::entities::InterviewResult;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResultCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct ResultSummary {
    id: String,
    candidate: String,
    interview_id: Option<String>,
    completed: bool,
    answers: usize,
    score: Option<f64>,
    starred: bool,
    notes: Option<String>,
}

impl From<InterviewResult> for ResultSummary {
    fn from(result: InterviewResult) -> Self {
        Self {
            completed: result.is_complete(),
            answers: result.answers.len(),
            id: result.id,
            candidate: result.candidate_name,
            interview_id: result.interview_id,
            score: result.score,
            starred: result.starred,
            notes: result.notes,
        }
    }
}

#[derive(Serialize)]
struct ResultListResponse {
    results: Vec<ResultSummary>,
}

#[derive(Serialize)]
struct DeletedResponse<'a> {
    deleted: &'a str,
}

/// Handle `ivr result`.
pub async fn handle(action: &ResultCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        ResultCommands::List { interview, starred } => {
            let mut results =
                with_spinner("Loading results...", ctx.api.list_results(interview.as_deref()))
                    .await?;
            if *starred {
                results.retain(|r| r.starred);
            }
            let results = apply_limit(results, flags.limit)
                .into_iter()
                .map(ResultSummary::from)
                .collect();
            output(&ResultListResponse { results }, flags.format)
        }
        ResultCommands::Get { id } => output(&ctx.api.get_result(id).await?, flags.format),
        ResultCommands::Star { id } => output(&ctx.api.set_starred(id, true).await?, flags.format),
        ResultCommands::Unstar { id } => {
            output(&ctx.api.set_starred(id, false).await?, flags.format)
        }
        ResultCommands::Note { id, text } => output(&ctx.api.set_notes(id, text).await?, flags.format),
        ResultCommands::Delete { id } => {
            ctx.api.delete_result(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
    }
}
