//! Integration tests for the Curio CLI
//!
//! These tests cover argument parsing, corpus and configuration loading,
//! and running retrieval through the CLI context.

use clap::Parser;
use curio::config::CurioConfig;
use curio::models::RetrievalStrategy;
use curio_cli::args::CorpusArgs;
use curio_cli::utils::truncate;
use curio_cli::{Cli, Commands, ConfigCommands, CurioCliContext, load_config, load_corpus};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn corpus_file(dir: &TempDir) -> PathBuf {
    write_json(
        dir,
        "corpus.json",
        json!([
            {
                "id": "5.NF.A.1",
                "text": "Add and subtract fractions with unlike denominators using visual models.",
                "fields": {"subject": "Mathematics", "grade": "5", "domain": "Number and Operations", "source": "Common Core"}
            },
            {
                "id": "5.NF.B.3",
                "text": "Interpret a fraction as division of the numerator by the denominator.",
                "fields": {"subject": "Mathematics", "grade": "5", "domain": "Number and Operations"}
            },
            {
                "text": "Classify two-dimensional figures by their properties.",
                "fields": {"subject": "Mathematics", "grade": "5", "domain": "Geometry"}
            },
            {
                "text": "Describe how plants make food through photosynthesis.",
                "fields": {"subject": "Science", "grade": "5"}
            }
        ]),
    )
}

fn resources_file(dir: &TempDir) -> PathBuf {
    write_json(
        dir,
        "resources.json",
        json!([
            {
                "title": "Adding fractions with unlike denominators",
                "description": "Video walkthrough of adding fractions using area models.",
                "url": "https://www.youtube.com/watch?v=fractions",
                "type": "video",
                "source": "YouTube"
            }
        ]),
    )
}

#[test]
fn test_parse_retrieve_command() {
    let cli = Cli::try_parse_from([
        "curio",
        "retrieve",
        "adding fractions",
        "--subject",
        "Mathematics",
        "--grade",
        "5",
        "--corpus",
        "corpus.json",
        "--strategy",
        "temporal",
        "--group",
        "ESL students",
        "--output",
        "json",
    ])
    .expect("arguments should parse");

    assert_eq!(cli.output, "json");
    match cli.command {
        Commands::Retrieve(args) => {
            assert_eq!(args.request.query, "adding fractions");
            assert_eq!(args.request.group_context, "ESL students");
            assert_eq!(args.strategy.as_deref(), Some("temporal"));
            assert_eq!(args.corpus.corpus, PathBuf::from("corpus.json"));
            assert!(args.corpus.resources.is_none());
            assert!(!args.direct);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_missing_subject() {
    let result = Cli::try_parse_from(["curio", "compare", "fractions", "--grade", "5", "-c", "x.json"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_config_validate() {
    let cli = Cli::try_parse_from(["curio", "config", "validate", "curio.toml"]).unwrap();
    match cli.command {
        Commands::Config(ConfigCommands::Validate(args)) => {
            assert_eq!(args.path, Some(PathBuf::from("curio.toml")));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("curio.toml");
    fs::write(
        &path,
        "[retrieval]\nfinal_top_k = 2\nhybrid_alpha = 0.5\n\n[retrieval.temporal]\nhorizon = \"30days\"\nfloor = 0.25\n",
    )
    .unwrap();

    let config = load_config(Some(path.as_path())).expect("config should load");
    assert_eq!(config.retrieval.final_top_k, 2);
    assert_eq!(config.retrieval.hybrid_alpha, 0.5);
    assert_eq!(config.retrieval.temporal.floor, 0.25);
    assert_eq!(config.retrieval.temporal.horizon_hours(), 720.0);
    assert_eq!(config.retrieval.group_profiles.len(), 4);
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("curio.toml");
    fs::write(&path, "[retrieval]\nhybrid_alpha = 1.5\n").unwrap();
    assert!(load_config(Some(path.as_path())).is_err());

    assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
}

#[test]
fn test_load_corpus() {
    let dir = TempDir::new().unwrap();
    let documents = load_corpus(&corpus_file(&dir)).unwrap();
    assert_eq!(documents.len(), 4);
    assert_eq!(documents[0].id.as_deref(), Some("5.NF.A.1"));
    assert!(documents[2].id.is_none());

    let blank = write_json(&dir, "blank.json", json!([{ "text": "  " }]));
    assert!(load_corpus(&blank).is_err());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "not json").unwrap();
    assert!(load_corpus(&broken).is_err());
}

#[test]
fn test_truncate_counts_characters() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("fractions and decimals", 10), "fractio...");
    assert_eq!(truncate("ééééé", 4), "é...");
}

#[tokio::test]
async fn test_context_retrieves_standards() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusArgs {
        corpus: corpus_file(&dir),
        resources: None,
    };
    let ctx = CurioCliContext::new(CurioConfig::default(), &corpus, "Mathematics", "5")
        .await
        .unwrap();
    assert_eq!(ctx.documents, 4);
    assert_eq!(ctx.retriever().embedding_sources(), 2);
    assert!(ctx.retriever().has_keyword_search());
    assert!(ctx.retriever().has_cross_encoder());

    let records = ctx
        .service
        .retrieve_standards("adding fractions", "Mathematics", "5", None, "ESL students")
        .await;
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.subject == "Mathematics"));
    assert!(records.iter().all(|r| r.retrieval_method.as_deref() == Some("hybrid_search")));
}

#[tokio::test]
async fn test_context_indexes_resources() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusArgs {
        corpus: corpus_file(&dir),
        resources: Some(resources_file(&dir)),
    };
    let ctx = CurioCliContext::new(CurioConfig::default(), &corpus, "Mathematics", "5")
        .await
        .unwrap();
    assert_eq!(ctx.documents, 5);

    let outcome = ctx
        .retriever()
        .advanced_retrieve(
            "adding fractions",
            "Mathematics",
            "5",
            RetrievalStrategy::ExternalResourceFocused,
            "",
        )
        .await
        .unwrap();
    let youtube = outcome
        .results()
        .iter()
        .find(|r| r.external_resource_type.as_deref() == Some("YouTube"))
        .expect("the cached video should be retrieved");
    assert_eq!(
        youtube.metadata.get("standard_id").and_then(|v| v.as_str()),
        Some("YouTube_Adding fractions with unlike denominators")
    );
}

#[tokio::test]
async fn test_context_compare_runs_every_strategy() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusArgs {
        corpus: corpus_file(&dir),
        resources: None,
    };
    let ctx = CurioCliContext::new(CurioConfig::default(), &corpus, "Mathematics", "5")
        .await
        .unwrap();

    let outcomes = ctx
        .service
        .compare_strategies("fractions", "Mathematics", "5", "gifted students")
        .await;
    assert_eq!(outcomes.len(), RetrievalStrategy::ALL.len());
}

#[tokio::test]
async fn test_context_tolerates_resources_without_description() {
    let dir = TempDir::new().unwrap();
    let resources = write_json(
        &dir,
        "sparse.json",
        json!([
            {
                "title": "Fraction strips explained",
                "description": "",
                "url": "https://www.youtube.com/watch?v=strips",
                "type": "video",
                "source": "YouTube"
            },
            {
                "title": "",
                "description": "",
                "source": "Wikipedia"
            }
        ]),
    );
    let corpus = CorpusArgs {
        corpus: corpus_file(&dir),
        resources: Some(resources),
    };
    let ctx = CurioCliContext::new(CurioConfig::default(), &corpus, "Mathematics", "5")
        .await
        .expect("sparse resources should not abort the context");
    assert_eq!(ctx.documents, 5);

    let outcome = ctx
        .retriever()
        .advanced_retrieve(
            "fraction strips",
            "Mathematics",
            "5",
            RetrievalStrategy::ExternalResourceFocused,
            "",
        )
        .await
        .unwrap();
    assert!(
        outcome
            .results()
            .iter()
            .any(|r| r.content == "Fraction strips explained")
    );
}
