use serde::Serialize;

use iv_core::entities::{Question, QuestionDraft};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{QuestionCommands, QuestionFields};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct QuestionListResponse {
    questions: Vec<Question>,
}

#[derive(Serialize)]
struct DeletedResponse<'a> {
    deleted: &'a str,
}

/// Handle `ivr question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        QuestionCommands::List { interview_id } => {
            let questions =
                with_spinner("Loading questions...", ctx.api.list_questions(interview_id)).await?;
            output(&QuestionListResponse { questions }, flags.format)
        }
        QuestionCommands::Add {
            interview_id,
            fields,
        } => {
            let created = ctx
                .api
                .create_question(interview_id, &draft_from(fields))
                .await?;
            output(&created, flags.format)
        }
        QuestionCommands::Update { id, fields } => {
            let draft = draft_from(fields);
            if draft == QuestionDraft::default() {
                anyhow::bail!("nothing to update: pass --text, --prep, --record or --order");
            }
            output(&ctx.api.update_question(id, &draft).await?, flags.format)
        }
        QuestionCommands::Delete { id } => {
            ctx.api.delete_question(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
        QuestionCommands::Reorder { interview_id, ids } => {
            ctx.api.reorder_questions(interview_id, ids.as_slice()).await?;
            let questions = ctx.api.list_questions(interview_id).await?;
            output(&QuestionListResponse { questions }, flags.format)
        }
    }
}

fn draft_from(fields: &QuestionFields) -> QuestionDraft {
    QuestionDraft {
        text: fields.text.clone(),
        preparation_time: fields.prep,
        recording_time: fields.record,
        order: fields.order,
    }
}
