use anyhow::{Context, Result};
use docsview::registry::SourceRegistry;
use docsview::{
    AddSource, Command, Config, DocumentFetcher, GitHubFetcher, JsonFileRegistry, LinkTarget,
    NavigationState, Page, SourcesCommand, Viewer, register,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Input accepted at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseInput {
    /// Navigate to an address.
    Navigate(String),
    /// Re-request the current address.
    Reload,
    Quit,
    /// Nothing entered.
    Empty,
    /// Input that is neither a link number, an address nor a command.
    Unknown(String),
}

/// Interprets one line typed at the browse prompt.
///
/// Numbers select the matching entry of `links` (1-based); anything
/// starting with `/` or `#` is taken as an address.
fn parse_input(input: &str, links: &[LinkTarget]) -> BrowseInput {
    let input = input.trim();

    match input {
        "" => BrowseInput::Empty,
        "q" | "quit" | "exit" => BrowseInput::Quit,
        "r" | "reload" => BrowseInput::Reload,
        "h" | "home" => BrowseInput::Navigate("/".to_string()),
        _ if input.starts_with('/') || input.starts_with('#') => {
            BrowseInput::Navigate(input.to_string())
        }
        _ => match input.parse::<usize>() {
            Ok(n) if (1..=links.len()).contains(&n) => {
                BrowseInput::Navigate(links[n - 1].address.clone())
            }
            _ => BrowseInput::Unknown(input.to_string()),
        },
    }
}

/// Prints terminal outline of a page with numbered links.
fn print_page(address: &str, page: &Page, links: &[LinkTarget]) {
    println!();
    println!("== {}", address);

    match page {
        Page::Landing { sources } => {
            if sources.is_empty() {
                println!("No sources yet. Add one with: docsview sources add --url <repo url>");
            }
        }
        Page::Document(document) => {
            println!("{} ({})", document.source.name, document.doc_path);
            for block in &document.blocks {
                if let Some(heading) = block.heading_text() {
                    let indent = "  ".repeat(usize::from(block.display_level()) - 1);
                    println!("{}# {}", indent, heading);
                }
            }
        }
        Page::Error(err) => println!("Error: {}", err),
    }

    if !links.is_empty() {
        println!();
        for (i, link) in links.iter().enumerate() {
            println!("[{}] {} -> {}", i + 1, link.text, link.address);
        }
    }
}

/// Writes page HTML to `output`.
fn write_page(page: &Page, output: &Path) -> Result<()> {
    fs::write(output, page.to_markup().into_string())
        .with_context(|| format!("Failed to write page: {}", output.display()))?;
    println!("Generated: {}", output.display());
    Ok(())
}

/// Loads, writes and prints the page for an address.
fn show<R: SourceRegistry, F: DocumentFetcher>(
    viewer: &Viewer<R, F>,
    address: &str,
    output: &Path,
) -> Result<Page> {
    let page = viewer.open(address);
    write_page(&page, output)?;
    print_page(address, &page, &page.links());
    Ok(page)
}

fn open_page<R: SourceRegistry, F: DocumentFetcher>(
    viewer: &Viewer<R, F>,
    address: &str,
    output: &Path,
    launch: bool,
) -> Result<()> {
    let page = viewer.open(address);
    write_page(&page, output)?;

    if launch {
        open::that(output)
            .with_context(|| format!("Failed to open page: {}", output.display()))?;
    }

    Ok(())
}

fn browse<R: SourceRegistry, F: DocumentFetcher>(
    viewer: &Viewer<R, F>,
    address: &str,
    output: &Path,
) -> Result<()> {
    let stdin = io::stdin();
    let mut nav = NavigationState::new(address);
    let mut page = show(viewer, nav.current(), output)?;

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            break;
        }

        match parse_input(&line, &page.links()) {
            BrowseInput::Quit => break,
            BrowseInput::Empty => continue,
            BrowseInput::Reload => {
                let current = nav.current().to_string();
                nav.navigate(current);
            }
            BrowseInput::Navigate(target) => nav.navigate(target),
            BrowseInput::Unknown(input) => {
                println!("Unknown input '{}': enter a link number, an address, home, r or q", input);
                continue;
            }
        }

        if let Some(current) = nav.settle() {
            page = show(viewer, current, output)?;
        }
    }

    Ok(())
}

fn list_sources(registry: &JsonFileRegistry) {
    let sources = registry.list_or_empty();
    if sources.is_empty() {
        println!("No sources registered in {}", registry.path().display());
        return;
    }

    for source in sources {
        let location = if source.subdir.is_empty() {
            source.repository()
        } else {
            format!("{}/{}", source.repository(), source.subdir)
        };
        println!("{}\t{}\t{}@{}", source.id, source.name, location, source.git_ref);
    }
}

fn add_source(registry: &JsonFileRegistry, args: &AddSource) -> Result<()> {
    let source = register(registry, &args.to_form()).context("Failed to add source")?;
    println!("Added source '{}' ({})", source.id, source.repository());
    println!("Open it with: docsview open /s/{}/", source.id);
    Ok(())
}

/// Builds the log filter.
///
/// --verbose enables INFO level, otherwise RUST_LOG applies when it parses
/// and WARN is the default.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    let config = Config::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config.verbose, rust_log.as_deref()))
        .with_writer(io::stderr)
        .init();

    config.validate()?;

    let registry = JsonFileRegistry::new(&config.registry);

    match &config.command {
        Command::Open {
            address,
            output,
            launch,
        } => {
            let viewer = Viewer::new(registry, GitHubFetcher::new(&config.api_url, config.timeout()));
            open_page(&viewer, address, output, *launch)
        }
        Command::Browse { address, output } => {
            let viewer = Viewer::new(registry, GitHubFetcher::new(&config.api_url, config.timeout()));
            browse(&viewer, address, output)
        }
        Command::Sources(SourcesCommand::List) => {
            list_sources(&registry);
            Ok(())
        }
        Command::Sources(SourcesCommand::Add(args)) => add_source(&registry, args),
    }
}
