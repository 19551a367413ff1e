use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teller::resources::{
    BulkTransactions, FundingRequests, Investors, Referrals, Resource, Transactions,
};
use teller::{Config, Filters, HttpSource, ListController, NoticeKind, Phase, Source};

/// Query console for the meridian back office
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the back-office API
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Which table to query
    #[arg(value_enum, default_value = "investors")]
    table: Table,

    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,

    /// Status facet filter
    #[arg(long)]
    status: Option<String>,

    /// Page number
    #[arg(short, long)]
    page: Option<u32>,

    /// Page size
    #[arg(short, long)]
    limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Table {
    Investors,
    Transactions,
    Bulk,
    Funding,
    Referrals,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_ref(), args.base_url.as_deref(), args.limit)?;
    info!("querying {}", config.api.base_url);

    let source: Arc<dyn Source> = Arc::new(HttpSource::from_config(&config)?);

    // Advisory reachability probe; a down backend still renders (degraded).
    match source.ping().await {
        Ok(()) => info!("backend reachable"),
        Err(e) => warn!("backend unreachable ({e}), expect degraded results"),
    }

    match args.table {
        Table::Investors => {
            let mut filters = base_filters::<Investors>(&args, &config);
            filters.facets.status = args.status.clone();
            show::<Investors>(source, &config, filters, |i| {
                format!(
                    "{:<10} {:<22} {:<28} {:<10} {:>12.2}",
                    i.id, i.name, i.email, i.status, i.balance
                )
            })
            .await
        }
        Table::Transactions => {
            let mut filters = base_filters::<Transactions>(&args, &config);
            filters.facets.status = args.status.clone();
            show::<Transactions>(source, &config, filters, |t| {
                format!(
                    "{:<10} {:<18} {:<12} {:>10.2} {:<10} {}",
                    t.id, t.investor_name, t.kind, t.amount, t.status, t.reference
                )
            })
            .await
        }
        Table::Bulk => {
            let mut filters = base_filters::<BulkTransactions>(&args, &config);
            filters.facets.status = args.status.clone();
            show::<BulkTransactions>(source, &config, filters, |b| {
                format!(
                    "{:<10} {:<28} {:>6} entries {:>12.2} {:<10} {}",
                    b.id, b.label, b.entries, b.total_amount, b.status, b.initiated_by
                )
            })
            .await
        }
        Table::Funding => {
            let mut filters = base_filters::<FundingRequests>(&args, &config);
            filters.facets.status = args.status.clone();
            show::<FundingRequests>(source, &config, filters, |f| {
                format!(
                    "{:<10} {:<18} {:>10.2} {:<8} {:<10} {}",
                    f.id,
                    f.investor_name,
                    f.amount,
                    f.method,
                    f.status,
                    f.note.as_deref().unwrap_or("-")
                )
            })
            .await
        }
        Table::Referrals => {
            let mut filters = base_filters::<Referrals>(&args, &config);
            filters.facets.status = args.status.clone();
            show::<Referrals>(source, &config, filters, |r| {
                format!(
                    "{:<10} {:<18} -> {:<18} L{} {:>8.2} {}",
                    r.id, r.referrer_name, r.referee_name, r.level, r.bonus, r.status
                )
            })
            .await
        }
    }
}

fn base_filters<R: Resource>(args: &Args, config: &Config) -> Filters<R::Facets> {
    let mut filters = Filters::new(args.limit.unwrap_or(config.list.page_size));
    filters.page = args.page.unwrap_or(1);
    filters.search = args.search.clone().unwrap_or_default();
    filters
}

/// Drive one controller from mount to its first settled state and print
/// the result as a table page.
async fn show<R: Resource>(
    source: Arc<dyn Source>,
    config: &Config,
    defaults: Filters<R::Facets>,
    render: impl Fn(&R::Item) -> String,
) -> anyhow::Result<()> {
    let controller: ListController<R> =
        ListController::with_filters(source, defaults, config.search_debounce());
    let mut notices = controller.subscribe_notices();
    let mut states = controller.watch_state();

    let state = loop {
        let snapshot = states.borrow().clone();
        if !snapshot.loading && snapshot.phase != Phase::Idle {
            break snapshot;
        }
        states.changed().await?;
    };

    if let Some(error) = &state.error {
        eprintln!("! degraded: {error} (showing local fallback rows)");
    }

    if state.items.is_empty() {
        println!("no {} match the current filters", R::NAME);
    } else {
        for item in &state.items {
            println!("{}", render(item));
        }
    }

    let p = &state.pagination;
    println!(
        "\npage {}/{} · {} result(s) · {} per page",
        p.current_page, p.total_pages, p.total_results, p.limit
    );

    while let Ok(notice) = notices.try_recv() {
        let tag = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        println!("[{tag}] {}", notice.message);
    }

    Ok(())
}
