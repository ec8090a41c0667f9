use anyhow::{Context, Result};
use clap::Parser;
use rustdoc_sidebar::cli::{Cli, Commands, resolve_path};
use rustdoc_sidebar::format::{render_findings, render_hits, render_index};
use rustdoc_sidebar::{Category, ModulePath, ParseOptions, SidebarIndex, SiteCatalog, lint};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    rustdoc_sidebar::tracing::init(tracing::Level::WARN);

    let options = cli.parse_options();
    let output = match cli.command {
        Commands::Show { file, category } => {
            let category = category.as_deref().map(Category::from_label);
            show(&file, category.as_ref(), &options).await?
        }
        Commands::Lookup {
            doc_root,
            module,
            category,
        } => lookup(&doc_root, &module, &category, options).await?,
        Commands::Check {
            doc_root,
            lint: with_lints,
        } => check(&doc_root, with_lints, options).await?,
        Commands::Search {
            doc_root,
            query,
            limit,
        } => {
            let catalog = open_catalog(&doc_root, options).await?;
            let hits = rustdoc_sidebar::search(&catalog, &query, limit).await;
            let mut output = String::new();
            render_hits(&mut output, &query, &hits)?;
            output
        }
        Commands::Json { file } => {
            let index = load_file(&file, &options).await?;
            let mut json = serde_json::to_string_pretty(&index)?;
            json.push('\n');
            json
        }
    };

    print!("{}", output);
    Ok(())
}

async fn load_file(file: &str, options: &ParseOptions) -> Result<SidebarIndex> {
    let path = resolve_path(file);
    tracing::debug!(path = %path.display(), "Loading sidebar file");
    SidebarIndex::load_async(&path, options)
        .await
        .with_context(|| format!("Failed to load sidebar index {}", path.display()))
}

async fn open_catalog(doc_root: &str, options: ParseOptions) -> Result<SiteCatalog> {
    let root = resolve_path(doc_root);
    SiteCatalog::discover_with(root, options, rustdoc_sidebar::site::DEFAULT_CACHE_SIZE).await
}

async fn show(file: &str, category: Option<&Category>, options: &ParseOptions) -> Result<String> {
    let index = load_file(file, options).await?;
    let mut output = String::new();
    render_index(&mut output, &index, category)?;
    Ok(output)
}

async fn lookup(
    doc_root: &str,
    module: &str,
    category: &str,
    options: ParseOptions,
) -> Result<String> {
    let catalog = open_catalog(doc_root, options).await?;
    let module = ModulePath::parse(module);
    let index = catalog
        .get(&module)
        .await
        .with_context(|| format!("Failed to look up module '{}'", module))?;

    let mut output = String::new();
    render_index(&mut output, &index, Some(&Category::from_label(category)))?;
    Ok(output)
}

async fn check(doc_root: &str, with_lints: bool, options: ParseOptions) -> Result<String> {
    let catalog = open_catalog(doc_root, options).await?;
    let report = catalog.check().await;

    let mut output = String::new();
    if with_lints {
        for index in &report.loaded {
            render_findings(&mut output, index, &lint(index))?;
        }
    }

    if !report.is_ok() {
        for (module, error) in &report.failures {
            eprintln!("error: {}: {}", module, error);
        }
        print!("{}", output);
        anyhow::bail!(
            "{} of {} sidebar indexes are invalid",
            report.failures.len(),
            catalog.len()
        );
    }

    output.push_str(&format!(
        "{} sidebar indexes OK under {}\n",
        report.loaded.len(),
        catalog.root().display()
    ));
    Ok(output)
}
