//! Retrieval command handlers

use curio::config::CurioConfig;
use curio::models::RetrievalStrategy;
use serde_json::json;

use crate::args::{CompareArgs, RetrieveArgs};
use crate::context::CurioCliContext;
use crate::output::*;

pub async fn handle_retrieve_command(
    args: RetrieveArgs,
    config: CurioConfig,
    output_format: &str,
) -> curio::Result<()> {
    let request = &args.request;
    let ctx = CurioCliContext::new(config, &args.corpus, &request.subject, &request.grade).await?;

    let strategy = args.strategy.as_deref().map(RetrievalStrategy::from);
    if let Some(tag) = &args.strategy
        && RetrievalStrategy::from_tag(tag).is_none()
    {
        tracing::warn!("Unknown strategy '{}', using basic retrieval", tag);
    }

    if args.direct {
        let strategy = strategy.unwrap_or(curio::retrieval::service::DEFAULT_STRATEGY);
        let outcome = ctx
            .retriever()
            .advanced_retrieve(
                &request.query,
                &request.subject,
                &request.grade,
                strategy,
                &request.group_context,
            )
            .await?;

        if output_format == "json" {
            print_json(&json!({ "strategy": strategy, "outcome": outcome }));
        } else {
            print_outcome(strategy, &outcome);
        }
        return Ok(());
    }

    let records = ctx
        .service
        .retrieve_standards(
            &request.query,
            &request.subject,
            &request.grade,
            strategy,
            &request.group_context,
        )
        .await;

    if output_format == "json" {
        print_json(&records);
    } else {
        print_standards(&records);
    }
    Ok(())
}

pub async fn handle_compare_command(
    args: CompareArgs,
    config: CurioConfig,
    output_format: &str,
) -> curio::Result<()> {
    let request = &args.request;
    let ctx = CurioCliContext::new(config, &args.corpus, &request.subject, &request.grade).await?;

    let outcomes = ctx
        .service
        .compare_strategies(
            &request.query,
            &request.subject,
            &request.grade,
            &request.group_context,
        )
        .await;

    if output_format == "json" {
        print_json(&outcomes);
    } else {
        println!(
            "{}",
            format_info(&format!(
                "Compared {} strategies over {} documents",
                outcomes.len(),
                ctx.documents
            ))
        );
        println!();
        print_comparison(&outcomes);
    }
    Ok(())
}
