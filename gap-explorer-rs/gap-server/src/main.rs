use std::path::PathBuf;
use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use gap_pipeline::cache::CatalogCache;
use gap_pipeline::catalog::GapCatalog;
use gap_pipeline::classifier::{OpportunityClassifier, Phrasing};
use gap_pipeline::components::claim_preference_selector::ClaimPreferenceSelector;
use gap_pipeline::config::{
    ExplorerConfig, DEFAULT_GAP_FILE, DEFAULT_GAP_THRESHOLD, DEFAULT_SKU_FILE, DEFAULT_TOP_N,
};
use gap_pipeline::error::GapResult;
use gap_pipeline::report::{build_opportunities, export_csv_file};
use gap_pipeline::types::Opportunity;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Explore whitespace opportunities by category and price tier.
#[derive(Parser, Debug)]
#[command(name = "gap-explorer", version)]
struct Args {
    /// SKU catalog CSV
    #[arg(long, default_value = DEFAULT_SKU_FILE)]
    skus: PathBuf,

    /// Gap score CSV
    #[arg(long, default_value = DEFAULT_GAP_FILE)]
    cells: PathBuf,

    /// Category to explore (default: every category)
    #[arg(long)]
    category: Option<String>,

    /// Minimum gap score, between 0 and 1
    #[arg(long, default_value_t = DEFAULT_GAP_THRESHOLD)]
    threshold: f64,

    /// Rows per category, distinct sub-categories, claimed first
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Vary recommendation wording within each tier
    #[arg(long)]
    varied: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Also write the selected rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the available categories and exit
    #[arg(long)]
    list_categories: bool,
}

impl Args {
    fn config(&self) -> ExplorerConfig {
        ExplorerConfig {
            sku_path: self.skus.clone(),
            gap_path: self.cells.clone(),
            threshold: self.threshold,
            top_n: self.top,
            phrasing: if self.varied {
                Phrasing::Varied
            } else {
                Phrasing::Fixed
            },
        }
    }
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    threshold: f64,
    top_n: usize,
    load_ms: u128,
    categories: Vec<CategoryJson>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct CategoryJson {
    category: String,
    opportunities: Vec<Opportunity>,
}

#[derive(Serialize)]
struct SummaryJson {
    cells_loaded: usize,
    categories_explored: usize,
    cells_above_threshold: usize,
    opportunities_shown: usize,
}

/// One category's selection: the cells above threshold, then the top-N
/// distinct sub-categories among them.
struct CategoryView {
    category: String,
    above_threshold: usize,
    opportunities: Vec<Opportunity>,
}

fn explore(
    catalog: &GapCatalog,
    config: &ExplorerConfig,
    category: &str,
    classifier: &OpportunityClassifier,
) -> GapResult<CategoryView> {
    let gaps = catalog.category_gaps(category, config.threshold)?;
    let above_threshold = gaps.len();
    let top = ClaimPreferenceSelector::new(config.top_n).select(gaps);
    log::debug!(
        "category={} above_threshold={} shown={}",
        category,
        above_threshold,
        top.len()
    );
    Ok(CategoryView {
        category: category.to_string(),
        above_threshold,
        opportunities: build_opportunities(top, classifier),
    })
}

fn build_json(
    views: &[CategoryView],
    config: &ExplorerConfig,
    cells_loaded: usize,
    load_ms: u128,
) -> ReportJson {
    ReportJson {
        generated_at: Utc::now().to_rfc3339(),
        threshold: config.threshold,
        top_n: config.top_n,
        load_ms,
        categories: views
            .iter()
            .map(|v| CategoryJson {
                category: v.category.clone(),
                opportunities: v.opportunities.clone(),
            })
            .collect(),
        summary: SummaryJson {
            cells_loaded,
            categories_explored: views.len(),
            cells_above_threshold: views.iter().map(|v| v.above_threshold).sum(),
            opportunities_shown: views.iter().map(|v| v.opportunities.len()).sum(),
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(views: &[CategoryView], config: &ExplorerConfig, cells_loaded: usize, load_ms: u128) {
    println!();
    println!("  FMCG GAP EXPLORER \u{2014} whitespace by category and price tier");
    println!(
        "  {} cells loaded  \u{00b7}  threshold {:.2}  \u{00b7}  top {} per category",
        cells_loaded, config.threshold, config.top_n
    );
    println!();

    for view in views {
        println!("  {:\u{2500}<64}", format!("\u{2500} Gaps in {} ", view.category));
        if view.opportunities.is_empty() {
            println!("  No significant gaps found in this category.");
            println!();
            continue;
        }
        for (i, o) in view.opportunities.iter().enumerate() {
            let claim = if o.claim.is_present() {
                format!(" \u{00b7} {}", o.claim)
            } else {
                String::new()
            };
            println!(
                "  {}. {:18} {:>10}{}  gap {:.2}",
                i + 1,
                o.sub_category,
                o.price_tier,
                claim,
                o.gap_score
            );
            println!("     {}", o.recommendation);
        }
        println!();
    }

    println!("  \u{23f1}  CSV loaded in {}ms", load_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn run(args: Args) -> GapResult<()> {
    let config = args.config();

    let load_start = Instant::now();
    let mut cache = CatalogCache::from_config(&config);
    let catalog = cache.get()?;
    let load_ms = load_start.elapsed().as_millis();

    if args.list_categories {
        for category in catalog.categories() {
            println!("{}", category);
        }
        return Ok(());
    }

    let categories: Vec<String> = match &args.category {
        Some(category) => vec![category.clone()],
        None => catalog.categories().into_iter().map(String::from).collect(),
    };

    let classifier = OpportunityClassifier::new(config.phrasing);
    let views = categories
        .iter()
        .map(|category| explore(&catalog, &config, category, &classifier))
        .collect::<GapResult<Vec<_>>>()?;

    if let Some(path) = &args.export {
        let rows: Vec<Opportunity> = views
            .iter()
            .flat_map(|v| v.opportunities.iter().cloned())
            .collect();
        export_csv_file(path, &rows)?;
    }

    if args.json {
        let report = build_json(&views, &config, catalog.len(), load_ms);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&views, &config, catalog.len(), load_ms);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
