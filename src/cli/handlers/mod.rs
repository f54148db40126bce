use std::sync::Arc;

use tracing::warn;

use crate::api::TicketApi;
use crate::api::http::HttpTicketApi;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::intake::classify::{ClassificationPipeline, qualifies_for_classification};
use crate::intake::draft::{FieldValue, FormDraft};
use crate::intake::validate::{ValidationError, validate, validate_title};
use crate::model::{DeskConfig, FilterCriteria, TicketId, TicketPatch};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(command: Commands, config: &DeskConfig, json: bool) -> CmdResult {
    let api: Arc<dyn TicketApi> = Arc::new(HttpTicketApi::new(&config.api)?);
    match command {
        Commands::List(args) => cmd_list(api.as_ref(), args, json).await,
        Commands::Create(args) => cmd_create(api.as_ref(), config, args, json).await,
        Commands::Update(args) => cmd_update(api.as_ref(), args, json).await,
        Commands::Stats => cmd_stats(api.as_ref(), json).await,
        Commands::Classify(args) => cmd_classify(api.as_ref(), args, json).await,
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

async fn cmd_list(api: &dyn TicketApi, args: ListArgs, json: bool) -> CmdResult {
    let mut filters = FilterCriteria {
        category: args.category,
        priority: args.priority,
        status: args.status,
        search: None,
    };
    if let Some(search) = args.search.as_deref() {
        filters.set_search(search);
    }

    let tickets = api.list_tickets(&filters).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
    } else if tickets.is_empty() {
        println!("no tickets");
    } else {
        for ticket in &tickets {
            println!("{}", format_ticket_line(ticket));
        }
    }
    Ok(())
}

async fn cmd_stats(api: &dyn TicketApi, json: bool) -> CmdResult {
    let stats = api.stats().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

async fn cmd_classify(api: &dyn TicketApi, args: ClassifyArgs, json: bool) -> CmdResult {
    let classification = api.classify(&args.description).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        for line in format_classification(&classification) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Explicit flags count as touched; the classifier may fill the rest.
async fn cmd_create(api: &dyn TicketApi, config: &DeskConfig, args: CreateArgs, json: bool) -> CmdResult {
    let mut draft = FormDraft {
        title: args.title,
        description: args.description,
        ..Default::default()
    };
    if let Some(category) = args.category {
        draft.set_field(FieldValue::Category(category));
    }
    if let Some(priority) = args.priority {
        draft.set_field(FieldValue::Priority(priority));
    }

    // Bad input fails before any request, the classify call included
    let mut body = validate(&draft)?;

    let wants_suggestion = !(draft.touched.category && draft.touched.priority);
    if !args.no_classify
        && wants_suggestion
        && qualifies_for_classification(&draft.description, config.intake.min_classify_chars)
    {
        let mut pipeline = ClassificationPipeline::new();
        let seq = pipeline.issue();
        let outcome = api.classify(draft.description.trim()).await;
        if let Some(suggestion) = pipeline.resolve(seq, outcome) {
            draft.merge(&suggestion);
            body = validate(&draft)?;
        }
    }

    let ticket = api.create_ticket(&body).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        println!("created {}", format_ticket_line(&ticket));
    }
    Ok(())
}

async fn cmd_update(api: &dyn TicketApi, args: UpdateArgs, json: bool) -> CmdResult {
    let title = args
        .title
        .as_deref()
        .map(validate_title)
        .transpose()?
        .map(str::to_string);
    let description = match args.description {
        Some(d) if d.trim().is_empty() => return Err(ValidationError::MissingDescription.into()),
        other => other,
    };
    let patch = TicketPatch {
        title,
        description,
        category: args.category,
        priority: args.priority,
        status: args.status,
    };
    if patch.is_empty() {
        return Err("nothing to update (pass at least one of --title, --description, --category, --priority, --status)".into());
    }

    let id = TicketId::new(args.id);
    let ticket = api.update_ticket(&id, &patch).await.inspect_err(|e| {
        warn!(%id, error = %e, "update rejected");
    })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        for line in format_ticket_detail(&ticket) {
            println!("{}", line);
        }
    }
    Ok(())
}
