//! SNS CLI — command-line interface for the Semantic Network Service
//!
//! Runs every thesaurus, gazetteer, chronicle and classification operation
//! of `sns-client` against a configured SNS instance.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use sns_client::{
    ChronicleService, Event, FilterType, FullClassifyResult, FullClassifyService, GazetteerService,
    HierarchyDirection, Location, MatchingType, RelatedTerm, SnsConfig, SnsService, Term,
    ThesaurusService, TreeTerm,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sns", version, about = "Semantic Network Service CLI")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "SNS_CONFIG")]
    config: Option<String>,

    /// Language of labels; defaults to the configured language
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Matching {
    Exact,
    Begins,
    Contains,
}

impl From<Matching> for MatchingType {
    fn from(m: Matching) -> Self {
        match m {
            Matching::Exact => MatchingType::Exact,
            Matching::Begins => MatchingType::BeginsWith,
            Matching::Contains => MatchingType::Contains,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for HierarchyDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => HierarchyDirection::Up,
            Direction::Down => HierarchyDirection::Down,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Filter {
    Terms,
    Locations,
    Events,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Terms => FilterType::OnlyTerms,
            Filter::Locations => FilterType::OnlyLocations,
            Filter::Events => FilterType::OnlyEvents,
        }
    }
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Maximum number of words to analyse
    #[arg(long, default_value_t = 1000)]
    max_words: u32,

    /// Match labels case-insensitively
    #[arg(long)]
    ignore_case: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a location by id
    Location { id: String },
    /// List locations related to a location
    RelatedLocations {
        id: String,
        /// Include the location itself
        #[arg(long)]
        include_from: bool,
    },
    /// Search locations by label
    FindLocations {
        term: String,
        #[arg(long, default_value = "begins")]
        matching: Matching,
    },
    /// Find locations mentioned in a text
    LocationsFromText {
        text: String,
        #[command(flatten)]
        analyze: AnalyzeArgs,
    },
    /// Look up a thesaurus term by id
    Term { id: String },
    /// Search thesaurus terms by label
    FindTerms {
        term: String,
        #[arg(long, default_value = "begins")]
        matching: Matching,
        /// Also list the descriptor of each non-descriptor
        #[arg(long)]
        add_descriptors: bool,
    },
    /// Show the hierarchy around a term
    Hierarchy {
        id: String,
        #[arg(long, default_value_t = 1)]
        depth: u32,
        #[arg(long, default_value = "down")]
        direction: Direction,
        #[arg(long)]
        siblings: bool,
    },
    /// List the direct children of a term
    NextLevel { id: String },
    /// Show the path from a term up to the top terms
    PathToTop { id: String },
    /// List the top terms of the thesaurus
    TopLevel,
    /// List terms related to a term
    RelatedTerms { id: String },
    /// List terms similar to the given names
    Similar {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        ignore_case: bool,
    },
    /// Find thesaurus terms in a text
    TermsFromText {
        text: String,
        #[command(flatten)]
        analyze: AnalyzeArgs,
    },
    /// Look up a chronicle event by id
    Event { id: String },
    /// Search chronicle events
    FindEvents {
        term: String,
        #[arg(long, default_value = "begins")]
        matching: Matching,
        /// Restrict to an event collection; may be repeated
        #[arg(long = "collection")]
        collections: Vec<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        length: u32,
    },
    /// Auto-classify the document at a URL
    ClassifyUrl {
        url: String,
        #[command(flatten)]
        analyze: AnalyzeArgs,
        #[arg(long)]
        filter: Option<Filter>,
    },
    /// Auto-classify a text
    ClassifyText {
        text: String,
        #[command(flatten)]
        analyze: AnalyzeArgs,
        #[arg(long)]
        filter: Option<Filter>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => SnsConfig::from_file(path)?,
        None => SnsConfig::default(),
    };
    let service = SnsService::new(config)?;
    let lang = cli.lang.as_deref();
    let format = &cli.format;

    match cli.command {
        Commands::Location { id } => print_one(service.get_location(&id, lang).await, format)?,
        Commands::RelatedLocations { id, include_from } => {
            let locations = service
                .get_related_locations_from_location(&id, include_from, lang)
                .await;
            print_rows(&locations, format)?
        }
        Commands::FindLocations { term, matching } => {
            let locations = service
                .find_locations_from_query_term(&term, matching.into(), lang)
                .await;
            print_rows(&locations, format)?
        }
        Commands::LocationsFromText { text, analyze } => {
            let locations = service
                .get_locations_from_text(&text, analyze.max_words, analyze.ignore_case, lang)
                .await;
            print_rows(&locations, format)?
        }
        Commands::Term { id } => print_one(service.get_term(&id, lang).await, format)?,
        Commands::FindTerms { term, matching, add_descriptors } => {
            let terms = service
                .find_terms_from_query_term(&term, matching.into(), add_descriptors, lang)
                .await;
            print_rows(&terms, format)?
        }
        Commands::Hierarchy { id, depth, direction, siblings } => {
            let tree = service.get_hierarchy(&id, depth, direction.into(), siblings, lang).await;
            print_trees(tree.as_slice(), format)?
        }
        Commands::NextLevel { id } => {
            let children = service.get_hierarchy_next_level(&id, lang).await;
            print_trees(&children, format)?
        }
        Commands::PathToTop { id } => {
            let tree = service.get_hierarchy_path_to_top(&id, lang).await;
            print_trees(tree.as_slice(), format)?
        }
        Commands::TopLevel => {
            let tops = service.get_hierarchy_top_level(lang).await;
            print_trees(&tops, format)?
        }
        Commands::RelatedTerms { id } => {
            let related = service.get_related_terms_from_term(&id, lang).await;
            print_rows(&related, format)?
        }
        Commands::Similar { names, ignore_case } => {
            let terms = service.get_similar_terms_from_names(&names, ignore_case, lang).await;
            print_rows(&terms, format)?
        }
        Commands::TermsFromText { text, analyze } => {
            let terms = service
                .get_terms_from_text(&text, analyze.max_words, analyze.ignore_case, lang)
                .await;
            print_rows(&terms, format)?
        }
        Commands::Event { id } => print_one(service.get_event(&id, lang).await, format)?,
        Commands::FindEvents { term, matching, collections, from, to, page, length } => {
            let result = service
                .find_events_from_query_term(
                    &term,
                    matching.into(),
                    &collections,
                    from,
                    to,
                    lang,
                    page,
                    length,
                )
                .await;
            print_rows(&result.results, format)?;
            if matches!(format, OutputFormat::Table) {
                println!("{} of {} event(s)", result.results.len(), result.total_results);
            }
        }
        Commands::ClassifyUrl { url, analyze, filter } => {
            let result = service
                .auto_classify_url(
                    &url,
                    analyze.max_words,
                    analyze.ignore_case,
                    filter.map(Into::into),
                    lang,
                )
                .await;
            print_classification(result, format)?
        }
        Commands::ClassifyText { text, analyze, filter } => {
            let result = service
                .auto_classify_text(
                    &text,
                    analyze.max_words,
                    analyze.ignore_case,
                    filter.map(Into::into),
                    lang,
                )
                .await;
            print_classification(result, format)?
        }
    }

    Ok(())
}

/// Domain objects that can be shown as table rows
trait Row {
    fn header() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_date(value: &Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

impl Row for Location {
    fn header() -> Vec<&'static str> {
        vec!["id", "name", "type", "qualifier", "native key", "bounding box"]
    }

    fn cells(&self) -> Vec<String> {
        let bbox = self
            .bounding_box
            .map(|b| format!("{},{} {},{}", b[0], b[1], b[2], b[3]))
            .unwrap_or_default();
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.type_name),
            opt(&self.qualifier),
            opt(&self.native_key),
            bbox,
        ]
    }
}

impl Row for Term {
    fn header() -> Vec<&'static str> {
        vec!["id", "name", "type", "definition"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.term_type.to_string(),
            opt(&self.definition),
        ]
    }
}

impl Row for RelatedTerm {
    fn header() -> Vec<&'static str> {
        vec!["relation", "id", "name", "type"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{:?}", self.relation),
            self.term.id.clone(),
            self.term.name.clone(),
            self.term.term_type.to_string(),
        ]
    }
}

impl Row for Event {
    fn header() -> Vec<&'static str> {
        vec!["id", "title", "type", "at", "from", "to"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            opt(&self.type_id),
            opt_date(&self.time_at),
            opt_date(&self.time_range_from),
            opt_date(&self.time_range_to),
        ]
    }
}

fn print_rows<T: Row + Serialize>(
    rows: &[T],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Csv => {
            println!("{}", T::header().join(","));
            for row in rows {
                let cells: Vec<String> = row.cells().iter().map(|c| format_csv_value(c)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::header());
            for row in rows {
                table.add_row(row.cells());
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }
    Ok(())
}

fn print_one<T: Row + Serialize>(
    item: Option<T>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match item {
        Some(item) => print_rows(std::slice::from_ref(&item), format),
        None => {
            if matches!(format, OutputFormat::Json) {
                println!("null");
            } else {
                println!("(not found)");
            }
            Ok(())
        }
    }
}

fn print_trees(
    trees: &[TreeTerm],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(trees)?);
        return Ok(());
    }
    if trees.is_empty() {
        println!("(no results)");
    }
    for tree in trees {
        print_ancestors(tree, 0);
        print_descendants(tree, 0);
    }
    Ok(())
}

fn print_ancestors(tree: &TreeTerm, depth: usize) {
    for parent in &tree.parents {
        print_ancestors(parent, depth + 1);
        println!("{}^ {} ({})", "  ".repeat(depth), parent.term.name, parent.term.id);
    }
}

fn print_descendants(tree: &TreeTerm, depth: usize) {
    let indent = "  ".repeat(depth);
    let term = &tree.term;
    println!("{}{} ({}) [{}]", indent, term.name, term.id, term.term_type);
    for child in &tree.children {
        print_descendants(child, depth + 1);
    }
}

fn print_classification(
    result: Option<FullClassifyResult>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(result) = result else {
        println!("(no results)");
        return Ok(());
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let doc = &result.indexed_document;
    println!("Document: {}", opt(&doc.url));
    println!("Title:    {}", opt(&doc.title));
    if let Some(at) = doc.time_at {
        println!("Date:     {}", at);
    } else if doc.time_from.is_some() || doc.time_to.is_some() {
        println!("Period:   {} - {}", opt_date(&doc.time_from), opt_date(&doc.time_to));
    }
    println!();
    print_rows(&result.terms, format)?;
    print_rows(&result.locations, format)?;
    print_rows(&result.events, format)?;
    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
