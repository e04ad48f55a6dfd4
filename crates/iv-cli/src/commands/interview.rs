use serde::Serialize;

use iv_core::entities::{Interview, InterviewDraft};
use iv_core::enums::InterviewStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{InterviewCommands, InterviewFields};
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct InterviewListResponse {
    interviews: Vec<Interview>,
}

#[derive(Serialize)]
struct DeletedResponse<'a> {
    deleted: &'a str,
}

/// Handle `ivr interview`.
pub async fn handle(
    action: &InterviewCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        InterviewCommands::List { status } => {
            let status: Option<InterviewStatus> = parse_opt_enum(status.as_deref(), "status")?;
            let mut interviews =
                with_spinner("Loading interviews...", ctx.api.list_interviews()).await?;
            if let Some(status) = status {
                interviews.retain(|i| i.status == status);
            }
            let interviews = apply_limit(interviews, flags.limit);
            output(&InterviewListResponse { interviews }, flags.format)
        }
        InterviewCommands::Get { id } => output(&ctx.api.get_interview(id).await?, flags.format),
        InterviewCommands::Create(fields) => {
            let draft = draft_from(fields)?;
            let created = ctx.api.create_interview(&draft).await?;
            tracing::info!(interview = %created.id, "interview created");
            output(&created, flags.format)
        }
        InterviewCommands::Update { id, fields } => {
            let draft = draft_from(fields)?;
            if let Some(next) = draft.status {
                let current = ctx.api.get_interview(id).await?;
                current.check_transition(next)?;
            }
            output(&ctx.api.update_interview(id, &draft).await?, flags.format)
        }
        InterviewCommands::Delete { id } => {
            ctx.api.delete_interview(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
    }
}

fn draft_from(fields: &InterviewFields) -> anyhow::Result<InterviewDraft> {
    Ok(InterviewDraft {
        title: fields.title.clone(),
        description: fields.description.clone(),
        status: parse_opt_enum(fields.status.as_deref(), "status")?,
        duration: fields.duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interview(status: InterviewStatus) -> Interview {
        Interview {
            id: "int-1".into(),
            title: "Support lead".into(),
            description: String::new(),
            status,
            duration: 20,
            question_count: 0,
            token_count: 0,
            response_count: 0,
            created_at: None,
        }
    }

    #[test]
    fn draft_cannot_close_directly() {
        let err = interview(InterviewStatus::Draft).check_transition(InterviewStatus::Closed)
            .unwrap_err();
        assert!(err.to_string().contains("from draft to closed"));
    }

    #[test]
    fn closed_can_reopen() {
        assert!(interview(InterviewStatus::Closed).check_transition(InterviewStatus::Active).is_ok());
        assert!(interview(InterviewStatus::Active).check_transition(InterviewStatus::Active).is_ok());
    }

    #[test]
    fn draft_parses_status() {
        let fields = InterviewFields {
            title: Some("QA".into()),
            description: None,
            status: Some("active".into()),
            duration: Some(30),
        };
        let draft = draft_from(&fields).unwrap();
        assert_eq!(draft.status, Some(InterviewStatus::Active));
        assert!(draft.validate_for_create().is_ok());
    }
}
