//! Handler functions for analysis CLI commands.
//!
//! These functions implement the logic behind `analyze`, `graph stats`,
//! `graph check`, `graph classify`, and `frontmatter`. Document discovery
//! and file I/O live here; parsing and analysis live in the library
//! crates.

use std::path::{Path, PathBuf};
use vaultgraf_core::util::files;
use vaultgraf_core::{ConfigProvider, Error, Result};
use vaultgraf_graph::{
    classify, compute_stats, quick_summary, render_report, rewrite_disconnected, top_nodes_by_degree,
    validate_graph, BuildStats, ClassifyOptions, GraphBuilder, GraphData,
};

// ============================================================================
// Option types
// ============================================================================

/// Options for the full analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Major-domain identifiers anchoring the classification.
    pub majors: Vec<String>,
    /// Classifier tuning.
    pub classify: ClassifyOptions,
    /// If true, classify and print but write nothing.
    pub dry_run: bool,
    /// Report output path override.
    pub report_override: Option<String>,
}

// ============================================================================
// Graph construction from the vault
// ============================================================================

/// Scan the configured documents and build the link graph.
///
/// Unreadable documents are logged, counted, and skipped; no document
/// failure aborts the scan.
pub async fn build_graph<C: ConfigProvider>(
    config: &C,
    majors: &[String],
) -> Result<(GraphData, BuildStats)> {
    let mut builder = GraphBuilder::new();
    builder.register_major_domains(majors);

    // Primary coverage table
    let coverage_path = config.document_path("coverage")?;
    ingest_table(&mut builder, &coverage_path).await;

    // Per-repository coverage tables
    let repos_path = config.document_path("repos")?;
    if files::exists(&repos_path).await {
        for repo_dir in files::list_subdirectories(&repos_path).await? {
            let doc = repo_dir.join("Coverage.md");
            if files::exists(&doc).await {
                ingest_table(&mut builder, &doc).await;
            }
        }
    } else {
        log::warn!("repository docs directory missing: {}", repos_path.display());
    }

    // Index document with diagram blocks
    let index_path = config.document_path("index")?;
    ingest_diagram(&mut builder, &index_path).await;

    Ok(builder.finish())
}

async fn ingest_table(builder: &mut GraphBuilder, path: &Path) {
    match files::read_document(path).await {
        Ok(content) => builder.ingest_table_document(&content, &path.to_string_lossy()),
        Err(e) => {
            log::warn!("{e}");
            builder.record_skipped_document(&path.to_string_lossy());
        }
    }
}

async fn ingest_diagram(builder: &mut GraphBuilder, path: &Path) {
    match files::read_document(path).await {
        Ok(content) => builder.ingest_diagram_document(&content, &path.to_string_lossy()),
        Err(e) => {
            log::warn!("{e}");
            builder.record_skipped_document(&path.to_string_lossy());
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Run the full pipeline: build, classify, rewrite the coverage table,
/// write the report.
pub async fn handle_analyze<C: ConfigProvider>(config: &C, options: AnalyzeOptions) -> Result<()> {
    let (graph, stats) = build_graph(config, &options.majors).await?;
    println!("Graph built: {}", quick_summary(&graph));

    let classification = classify(&graph, &options.classify);
    println!("  Core:         {}", classification.core.len());
    println!("  Peripheral:   {}", classification.peripheral.len());
    println!("  Disconnected: {}", classification.disconnected.len());
    if classification.truncated {
        println!("  (path search truncated by the visitation budget)");
    }

    if options.dry_run {
        println!("\nDry run — coverage table and report not written.");
        return Ok(());
    }

    // Annotate disconnected rows in the primary coverage table.
    let coverage_path = config.document_path("coverage")?;
    match files::read_document(&coverage_path).await {
        Ok(content) => {
            let outcome = rewrite_disconnected(&content, &classification);
            write_atomic(&coverage_path, &outcome.content).await?;
            println!(
                "\nMarked {} disconnected row(s) in {}",
                outcome.rows_updated,
                coverage_path.display()
            );
        }
        Err(e) => log::warn!("coverage table not rewritten: {e}"),
    }

    // Write the connectivity report.
    let report_path = match options.report_override {
        Some(ref p) => PathBuf::from(p),
        None => config.document_path("report")?,
    };
    let report = render_report(&graph, &classification, &stats);
    write_atomic(&report_path, &report).await?;
    println!("Report written to {}", report_path.display());

    Ok(())
}

/// Show statistics for the built graph.
pub async fn handle_stats<C: ConfigProvider>(config: &C, majors: &[String]) -> Result<()> {
    let (graph, build_stats) = build_graph(config, majors).await?;
    let stats = compute_stats(&graph);

    println!("Graph Statistics");
    println!("================");
    println!("Nodes:             {}", stats.node_count);
    println!("  Major domains:   {}", stats.major_domain_count);
    println!("  Orphans:         {}", stats.orphan_count);
    println!("Edges:             {}", stats.edge_count);
    println!("  Undirected:      {}", stats.undirected_edge_count);
    println!("  Directed:        {}", stats.directed_edge_count);
    println!("Avg degree:        {:.2}", stats.avg_degree);
    println!("Max degree:        {}", stats.max_degree);

    if let Some(ref node_id) = stats.most_connected {
        println!("Most connected:    {node_id}");
    }

    let top = top_nodes_by_degree(&graph, 5);
    if !top.is_empty() {
        println!("\nTop nodes by degree:");
        for (id, degree) in top {
            println!("  {id}: {degree}");
        }
    }

    println!(
        "\nScan: {} document(s), {} skipped, {} malformed row(s)",
        build_stats.documents_scanned, build_stats.documents_skipped, build_stats.rows_malformed
    );

    Ok(())
}

/// Run graph integrity checks.
pub async fn handle_check<C: ConfigProvider>(config: &C, majors: &[String]) -> Result<()> {
    let (graph, _) = build_graph(config, majors).await?;
    let result = validate_graph(&graph);

    if result.clean {
        println!("Graph is clean.");
    } else {
        println!("Graph integrity findings:");
    }

    for warning in &result.warnings {
        println!("  WARN [{}]: {}", warning.code, warning.message);
        for node in &warning.nodes {
            println!("    - {node}");
        }
        for edge in &warning.edges {
            println!("    - {edge}");
        }
    }

    for info in &result.info {
        println!("  INFO [{}]: {}", info.code, info.message);
        for edge in &info.edges {
            println!("    - {edge}");
        }
    }

    println!(
        "\nSummary: {} warning(s), {} informational finding(s)",
        result.warnings.len(),
        result.info.len()
    );

    if result.clean {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Graph integrity check found {} warning(s)",
            result.warnings.len()
        )))
    }
}

/// Classify connectivity and print the buckets without writing anything.
pub async fn handle_classify<C: ConfigProvider>(
    config: &C,
    majors: &[String],
    options: ClassifyOptions,
) -> Result<()> {
    let (graph, _) = build_graph(config, majors).await?;
    let classification = classify(&graph, &options);

    println!("Core components:");
    for component in &classification.core {
        if graph.is_major_domain(component) {
            println!("  - {component} (major domain)");
        } else {
            println!("  - {component}");
        }
    }

    println!("\nPeripheral components:");
    for component in &classification.peripheral {
        println!("  - {component}");
    }

    println!("\nDisconnected components:");
    for component in &classification.disconnected {
        println!("  - {component}");
    }

    if classification.truncated {
        println!("\nPath search truncated by the visitation budget.");
    }

    Ok(())
}

/// Audit YAML frontmatter across every markdown file in the vault.
pub async fn handle_frontmatter<C: ConfigProvider>(config: &C) -> Result<()> {
    let base = config.base_path()?;
    let found = files::find_all_files(&base, files::FindOptions::markdown()).await?;

    let mut checked = 0usize;
    let mut flagged = 0usize;

    for file in &found {
        let content = match files::read_document(&file.path).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };
        checked += 1;

        let report = vaultgraf_content::frontmatter::check_document(&content);
        if !report.ok {
            flagged += 1;
            println!("{}:", file.relative_path.display());
            for problem in &report.problems {
                println!("  - {problem}");
            }
        }
    }

    println!("\nChecked {checked} markdown file(s); {flagged} with frontmatter issues");

    if flagged == 0 {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "{flagged} file(s) with frontmatter issues"
        )))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Write a file through a temporary sibling and an atomic rename, so a
/// crash mid-write never leaves a half-rewritten document.
async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::config(format!("not a writable path: {}", path.display())))?;
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| Error::output_write(e, path))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| Error::output_write(e, path))?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-vault"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn document_path(&self, kind: &str) -> Result<PathBuf> {
            match kind {
                "coverage" => Ok(self.base.join("Coverage.md")),
                "repos" => Ok(self.base.join("Repos Docs")),
                "index" => Ok(self.base.join("Repos Docs").join("Index.md")),
                "report" => Ok(self.base.join("connectivity_report.md")),
                other => Err(Error::config(format!("Unknown document kind: {other}"))),
            }
        }
    }

    const COVERAGE: &str = "\
| Component | Type | Source Path | Status | Last Scanned | Doc File | Backlinks |
|-----------|------|-------------|--------|--------------|----------|-----------|
| chat | domain | chat/ | done | 2024-11-02 | chat.md | |
| pubsub-rust | repo | chat/pubsub | todo | 2024-11-02 | pubsub.md | |
| orphan-lib | repo | path/x | todo | 2024-01-01 | doc.md | |
";

    /// Lay out a small vault under a temp directory.
    fn setup_vault(dir: &Path) -> TestConfig {
        std::fs::write(dir.join("Coverage.md"), COVERAGE).unwrap();

        let repos = dir.join("Repos Docs");
        let repo = repos.join("pubsub-rust");
        std::fs::create_dir_all(&repo).unwrap();
        std::fs::write(
            repo.join("Coverage.md"),
            "| edge-proxy | repo | video/edge | todo | 2024-11-02 | e.md | [[pubsub-rust]] |\n",
        )
        .unwrap();
        std::fs::write(
            repos.join("Index.md"),
            "```mermaid\nflowchart TD\n  pubsub-rust --> edge-proxy\n```\n",
        )
        .unwrap();

        TestConfig {
            base: dir.to_path_buf(),
        }
    }

    fn majors(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ------------------------------------------------------------------------
    // build_graph
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_build_graph_scans_all_documents() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let (graph, stats) = build_graph(&config, &majors(&["chat", "video"]))
            .await
            .unwrap();

        // Primary table, one repo table, one index document
        assert_eq!(stats.documents_scanned, 3);
        assert_eq!(stats.documents_skipped, 0);
        assert!(graph.contains_node("chat"));
        assert!(graph.contains_node("edge-proxy"));
        assert_eq!(stats.diagram_edges, 1);
    }

    #[tokio::test]
    async fn test_build_graph_missing_documents_are_skipped() {
        let dir = TempDir::new().unwrap();
        let config = TestConfig {
            base: dir.path().to_path_buf(),
        };

        let (graph, stats) = build_graph(&config, &majors(&["chat", "video"]))
            .await
            .unwrap();

        // Coverage and index are both unreadable; the scan continues
        assert_eq!(stats.documents_skipped, 2);
        assert_eq!(stats.documents_scanned, 0);
        // The registered domains are still present
        assert_eq!(graph.node_count(), 2);
    }

    #[tokio::test]
    async fn test_build_graph_domain_edge_from_repo_table() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let (graph, _) = build_graph(&config, &majors(&["chat", "video"]))
            .await
            .unwrap();

        // edge-proxy's source path "video/edge" mentions video
        assert!(graph.neighbors("edge-proxy").contains("video"));
    }

    // ------------------------------------------------------------------------
    // handle_analyze
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_analyze_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let options = AnalyzeOptions {
            majors: majors(&["chat", "video"]),
            classify: ClassifyOptions::default(),
            dry_run: false,
            report_override: None,
        };

        handle_analyze(&config, options).await.unwrap();

        let coverage = std::fs::read_to_string(dir.path().join("Coverage.md")).unwrap();
        assert!(coverage
            .contains("| orphan-lib | repo | path/x | disconnected | 2024-01-01 | doc.md | |"));
        // Connected rows untouched
        assert!(coverage.contains("| pubsub-rust | repo | chat/pubsub | todo |"));

        let report =
            std::fs::read_to_string(dir.path().join("connectivity_report.md")).unwrap();
        assert!(report.contains("# Connectivity Analysis Report"));
        assert!(report.contains("- orphan-lib"));
    }

    #[tokio::test]
    async fn test_handle_analyze_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());
        let before = std::fs::read_to_string(dir.path().join("Coverage.md")).unwrap();

        let options = AnalyzeOptions {
            majors: majors(&["chat", "video"]),
            classify: ClassifyOptions::default(),
            dry_run: true,
            report_override: None,
        };

        handle_analyze(&config, options).await.unwrap();

        let after = std::fs::read_to_string(dir.path().join("Coverage.md")).unwrap();
        assert_eq!(before, after);
        assert!(!dir.path().join("connectivity_report.md").exists());
    }

    #[tokio::test]
    async fn test_handle_analyze_report_override() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());
        let custom = dir.path().join("custom_report.md");

        let options = AnalyzeOptions {
            majors: majors(&["chat", "video"]),
            classify: ClassifyOptions::default(),
            dry_run: false,
            report_override: Some(custom.to_string_lossy().to_string()),
        };

        handle_analyze(&config, options).await.unwrap();

        assert!(custom.exists());
        assert!(!dir.path().join("connectivity_report.md").exists());
    }

    #[tokio::test]
    async fn test_handle_analyze_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let options = AnalyzeOptions {
            majors: majors(&["chat", "video"]),
            classify: ClassifyOptions::default(),
            dry_run: false,
            report_override: None,
        };

        handle_analyze(&config, options.clone()).await.unwrap();
        let first = std::fs::read_to_string(dir.path().join("Coverage.md")).unwrap();

        handle_analyze(&config, options).await.unwrap();
        let second = std::fs::read_to_string(dir.path().join("Coverage.md")).unwrap();

        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------------
    // handle_stats / handle_check / handle_classify
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_stats() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let result = handle_stats(&config, &majors(&["chat", "video"])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_handle_check_flags_orphans() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        // orphan-lib has no edges, so the check reports warnings
        let result = handle_check(&config, &majors(&["chat", "video"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_handle_classify() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let result = handle_classify(
            &config,
            &majors(&["chat", "video"]),
            ClassifyOptions::default(),
        )
        .await;
        assert!(result.is_ok());
    }

    // ------------------------------------------------------------------------
    // handle_frontmatter
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_handle_frontmatter_clean_vault() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());

        let result = handle_frontmatter(&config).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_handle_frontmatter_flags_problems() {
        let dir = TempDir::new().unwrap();
        let config = setup_vault(dir.path());
        std::fs::write(
            dir.path().join("broken.md"),
            "---\nstatus: todo\n---\n# Missing fields\n",
        )
        .unwrap();

        let result = handle_frontmatter(&config).await;
        assert!(result.is_err());
    }

    // ------------------------------------------------------------------------
    // write_atomic
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_write_atomic_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.md");

        write_atomic(&path, "content").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
        assert!(!dir.path().join("out.md.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.md");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_write_atomic_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.md");

        let result = write_atomic(&path, "content").await;
        assert!(matches!(result, Err(Error::OutputWrite { .. })));
    }
}
